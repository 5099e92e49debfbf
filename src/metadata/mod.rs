//! Audio file metadata reading.
//!
//! Uses the lofty crate for format-independent tag access (MP3, FLAC, OGG,
//! M4A, WAV). Fields the file does not carry stay `None`; nothing is filled
//! with placeholder values, because the importer drops records that are
//! missing their identity fields rather than inventing names for them.

use crate::error::{Error, Result};
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::{Accessor, ItemKey};
use std::path::Path;

/// Raw metadata record for one audio file, exactly as tagged.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackRecord {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub title: Option<String>,
    pub track_number: Option<u32>,
    pub disc_number: Option<u32>,
    pub year: Option<u32>,
    pub duration_secs: Option<f64>,
}

impl TrackRecord {
    /// Whether the record carries the identity fields the catalog needs.
    /// Records failing this are skipped before ever reaching the catalog.
    pub fn is_complete(&self) -> bool {
        self.artist.is_some() && self.album.is_some() && self.title.is_some()
    }
}

/// Reads the embedded metadata of one audio file.
pub fn read(path: &Path) -> Result<TrackRecord> {
    // Probe the file to determine format and read tags
    let tagged_file = Probe::open(path)
        .map_err(|e| Error::metadata(path, e.to_string()))?
        .read()
        .map_err(|e| Error::metadata(path, e.to_string()))?;

    // The primary tag, or the first available one
    let tag = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag());

    // Prefer the album artist so compilations group under one node
    let artist = tag
        .and_then(|t| t.get_string(&ItemKey::AlbumArtist).map(str::to_string))
        .or_else(|| tag.and_then(|t| t.artist().map(|s| s.to_string())));

    let album = tag.and_then(|t| t.album().map(|s| s.to_string()));
    let title = tag.and_then(|t| t.title().map(|s| s.to_string()));
    // A zero track number means untagged in the wild
    let track_number = tag.and_then(|t| t.track()).filter(|n| *n > 0);
    let disc_number = tag.and_then(|t| t.disk()).filter(|n| *n > 0);
    let year = tag.and_then(|t| t.year());

    let duration = tagged_file.properties().duration();
    let duration_secs = (!duration.is_zero()).then(|| duration.as_secs_f64());

    Ok(TrackRecord {
        artist,
        album,
        title,
        track_number,
        disc_number,
        year,
        duration_secs,
    })
}
