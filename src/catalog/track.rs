//! Track entity and its display derivations.

use serde::Serialize;
use std::path::PathBuf;

/// A single song in the catalog.
///
/// Identity fields are set at construction by the owning [`Album`] and never
/// change afterwards. Display strings (padded number, `m:ss` duration) are
/// derived on demand, never stored.
///
/// [`Album`]: super::Album
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Track title from metadata.
    pub title: String,
    /// Position on the album, when tagged.
    pub track_number: Option<u32>,
    /// Disc number for multi-disc releases.
    pub disc_number: Option<u32>,
    /// Duration in seconds, when known.
    pub duration_secs: Option<f64>,
    /// Location of the original file, relative to the import source root.
    pub source_path: PathBuf,
}

/// Read-only display projection of a [`Track`].
///
/// This is the only shape the catalog exports for a track; all fields are
/// already formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackDetails {
    pub name: String,
    pub track_number: Option<String>,
    pub disc_number: Option<String>,
    pub duration: Option<String>,
}

impl Track {
    pub(crate) fn new(
        title: impl Into<String>,
        track_number: Option<u32>,
        disc_number: Option<u32>,
        duration_secs: Option<f64>,
        source_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            title: title.into(),
            track_number,
            disc_number,
            duration_secs,
            source_path: source_path.into(),
        }
    }

    /// Two-digit, zero-padded track number. `None` when untagged or zero.
    pub fn padded_track_number(&self) -> Option<String> {
        self.track_number
            .filter(|n| *n > 0)
            .map(|n| format!("{n:02}"))
    }

    /// Decimal disc number, `None` when untagged.
    pub fn formatted_disc_number(&self) -> Option<String> {
        self.disc_number.map(|n| n.to_string())
    }

    /// Duration as `"m:ss"` with seconds rounded to the nearest integer.
    ///
    /// A missing or zero duration yields `None`, never `"0:00"`.
    pub fn formatted_duration(&self) -> Option<String> {
        let secs = self.duration_secs.filter(|d| *d != 0.0)?;
        let minutes = (secs / 60.0).floor() as u64;
        let seconds = (secs % 60.0).round() as u64;
        Some(format!("{minutes}:{seconds:02}"))
    }

    /// `"NN - Title"`, or just the title when the track number is untagged.
    pub fn display_name(&self) -> String {
        match self.padded_track_number() {
            Some(number) => format!("{number} - {}", self.title),
            None => self.title.clone(),
        }
    }

    /// Read-only projection of all display fields. Never fails.
    pub fn details(&self) -> TrackDetails {
        TrackDetails {
            name: self.display_name(),
            track_number: self.padded_track_number(),
            disc_number: self.formatted_disc_number(),
            duration: self.formatted_duration(),
        }
    }
}
