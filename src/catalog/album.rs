//! Album aggregate: exclusively owns an ordered sequence of tracks.

use super::track::{Track, TrackDetails};
use std::cmp::Ordering;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// One release by an artist.
///
/// Tracks stay sorted at all times: the sequence is re-sorted on every
/// insert rather than on read, which keeps test output deterministic.
#[derive(Debug, Clone)]
pub struct Album {
    /// Album title.
    pub title: String,
    /// Release year, when tagged.
    pub year: Option<u32>,
    tracks: Vec<Track>,
}

impl Album {
    pub(crate) fn new(title: impl Into<String>, year: Option<u32>) -> Self {
        Self {
            title: title.into(),
            year,
            tracks: Vec::new(),
        }
    }

    /// Tracks in their current sorted order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Constructs a track, inserts it, and re-sorts the full sequence.
    ///
    /// Duplicate titles and numbers are allowed and simply coexist. Returns
    /// the inserted track.
    pub fn add_track(
        &mut self,
        title: impl Into<String>,
        track_number: Option<u32>,
        disc_number: Option<u32>,
        duration_secs: Option<f64>,
        source_path: impl Into<std::path::PathBuf>,
    ) -> &Track {
        let track = Track::new(title, track_number, disc_number, duration_secs, source_path);
        let (title, source_path) = (track.title.clone(), track.source_path.clone());
        self.tracks.push(track);
        self.tracks.sort_by(track_order);
        // The sort is stable, so among identical entries the newest is last.
        let idx = self
            .tracks
            .iter()
            .rposition(|t| t.title == title && t.source_path == source_path)
            .expect("track was just inserted");
        &self.tracks[idx]
    }

    /// First track with the given number, if any.
    pub fn track_by_number(&self, number: u32) -> Option<&Track> {
        self.tracks.iter().find(|t| t.track_number == Some(number))
    }

    /// First track with exactly the given title, if any. No fuzzy matching.
    pub fn track_by_title(&self, title: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.title == title)
    }

    /// Display projections for every track, in current order.
    pub fn track_details(&self) -> Vec<TrackDetails> {
        self.tracks.iter().map(Track::details).collect()
    }

    /// Creates `<library_root>/<artist>/<title>` if it is not already there.
    ///
    /// Already-exists is success. Any other failure is logged and swallowed;
    /// it will surface as a copy failure later if the directory truly cannot
    /// be made.
    pub fn ensure_folder(&self, library_root: &Path, artist_name: &str) {
        let dir = library_root.join(artist_name).join(&self.title);
        if dir.is_dir() {
            debug!(dir = %dir.display(), "album folder already exists");
            return;
        }
        match fs::create_dir_all(&dir) {
            Ok(()) => info!(dir = %dir.display(), "created album folder"),
            Err(e) => warn!(dir = %dir.display(), error = %e, "failed to create album folder"),
        }
    }
}

/// Track number ascending; a pair where either number is missing falls back
/// to title order for that comparison.
fn track_order(a: &Track, b: &Track) -> Ordering {
    match (a.track_number, b.track_number) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => a.title.cmp(&b.title),
    }
}
