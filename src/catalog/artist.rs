//! Artist aggregate: exclusively owns an ordered sequence of albums.

use super::album::Album;
use super::track::TrackDetails;
use serde::Serialize;
use std::cmp::Ordering;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// One artist and all of their releases.
#[derive(Debug, Clone)]
pub struct Artist {
    /// Artist name.
    pub name: String,
    albums: Vec<Album>,
}

/// Export projection of one album: identity fields plus its track list.
#[derive(Debug, Clone, Serialize)]
pub struct AlbumSummary {
    pub title: String,
    pub year: Option<u32>,
    pub track_list: Vec<TrackDetails>,
}

impl Artist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            albums: Vec::new(),
        }
    }

    /// Albums in their current sorted order.
    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    /// Constructs an album, inserts it, and re-sorts the sequence.
    ///
    /// Duplicate titles are allowed and produce a second album node.
    pub fn add_album(&mut self, title: impl Into<String>, year: Option<u32>) -> &mut Album {
        let title = title.into();
        self.albums.push(Album::new(title.clone(), year));
        self.albums.sort_by(album_order);
        // Stable sort keeps the newest among identical entries last.
        let idx = self
            .albums
            .iter()
            .rposition(|a| a.title == title && a.year == year)
            .expect("album was just inserted");
        &mut self.albums[idx]
    }

    /// First album with exactly the given title, if any.
    pub fn album_by_title(&self, title: &str) -> Option<&Album> {
        self.albums.iter().find(|a| a.title == title)
    }

    pub(crate) fn album_by_title_mut(&mut self, title: &str) -> Option<&mut Album> {
        self.albums.iter_mut().find(|a| a.title == title)
    }

    /// Export projections for every album, in current order.
    pub fn album_summaries(&self) -> Vec<AlbumSummary> {
        self.albums
            .iter()
            .map(|album| AlbumSummary {
                title: album.title.clone(),
                year: album.year,
                track_list: album.track_details(),
            })
            .collect()
    }

    /// Creates `<library_root>/<name>` if it is not already there.
    ///
    /// Same contract as [`Album::ensure_folder`]: already-exists is success,
    /// other failures are logged and swallowed.
    pub fn ensure_folder(&self, library_root: &Path) {
        let dir = library_root.join(&self.name);
        if dir.is_dir() {
            debug!(dir = %dir.display(), "artist folder already exists");
            return;
        }
        match fs::create_dir_all(&dir) {
            Ok(()) => info!(dir = %dir.display(), "created artist folder"),
            Err(e) => warn!(dir = %dir.display(), error = %e, "failed to create artist folder"),
        }
    }
}

/// Year ascending; a pair where either year is missing falls back to title
/// order for that comparison.
fn album_order(a: &Album, b: &Album) -> Ordering {
    match (a.year, b.year) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => a.title.cmp(&b.title),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn titles(artist: &Artist) -> Vec<&str> {
        artist.albums().iter().map(|a| a.title.as_str()).collect()
    }

    #[test]
    fn test_albums_sorted_by_year() {
        let mut artist = Artist::new("Beatles");
        artist.add_album("Abbey Road", Some(1969));
        artist.add_album("Revolver", Some(1966));
        artist.add_album("Help!", Some(1965));
        assert_eq!(titles(&artist), vec!["Help!", "Revolver", "Abbey Road"]);
    }

    #[test]
    fn test_undated_album_compares_by_title_without_crashing() {
        let mut artist = Artist::new("Beatles");
        artist.add_album("Abbey Road", Some(1969));
        artist.add_album("Bootleg", None);
        // The 1969 album wins the pairwise title comparison here.
        assert_eq!(titles(&artist), vec!["Abbey Road", "Bootleg"]);
    }

    #[test]
    fn test_add_album_returns_the_inserted_album() {
        let mut artist = Artist::new("Beatles");
        artist.add_album("Revolver", Some(1966));
        let album = artist.add_album("Abbey Road", Some(1969));
        assert_eq!(album.title, "Abbey Road");
        assert_eq!(album.year, Some(1969));
    }

    #[test]
    fn test_duplicate_album_titles_coexist() {
        let mut artist = Artist::new("Beatles");
        artist.add_album("Abbey Road", Some(1969));
        artist.add_album("Abbey Road", Some(1969));
        assert_eq!(artist.albums().len(), 2);
    }

    #[test]
    fn test_album_by_title_is_exact_first_match() {
        let mut artist = Artist::new("Beatles");
        artist.add_album("Abbey Road", Some(1969));
        assert!(artist.album_by_title("Abbey Road").is_some());
        assert!(artist.album_by_title("abbey road").is_none());
    }

    #[test]
    fn test_album_summaries_projection() {
        let mut artist = Artist::new("Beatles");
        let album = artist.add_album("Abbey Road", Some(1969));
        album.add_track("Come Together", Some(1), Some(1), Some(259.0), "disk/a.mp3");

        let summaries = artist.album_summaries();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].title, "Abbey Road");
        assert_eq!(summaries[0].year, Some(1969));
        assert_eq!(summaries[0].track_list[0].name, "01 - Come Together");
    }

    #[test]
    fn test_ensure_folder_is_idempotent() {
        let temp = tempdir().unwrap();
        let artist = Artist::new("Beatles");
        artist.ensure_folder(temp.path());
        artist.ensure_folder(temp.path());
        assert!(temp.path().join("Beatles").is_dir());
    }
}
