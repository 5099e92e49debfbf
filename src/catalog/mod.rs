//! In-memory music catalog.
//!
//! Defines the primary entities: [`Catalog`], [`Artist`], [`Album`], and
//! [`Track`]. The relationships form a strict tree
//! (Catalog -> Artist -> Album -> Track) with exclusive ownership at every
//! level; all mutation goes through the aggregates, and
//! [`Catalog::add_track`] is the single authoritative upsert path.
//!
//! Every sequence is kept sorted on insert: artists by name, albums by year
//! (title when a compared pair is missing one), tracks by number (title when
//! a compared pair is missing one). The comparisons are plain case-sensitive
//! `str` ordering throughout.

mod album;
mod artist;
mod track;

pub use album::Album;
pub use artist::{AlbumSummary, Artist};
pub use track::{Track, TrackDetails};

use std::path::PathBuf;

/// The root aggregate of artists for one program run.
///
/// Populated incrementally while importing; never persisted by itself.
/// One instance is constructed explicitly and passed to the driver, there
/// is no ambient global catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    artists: Vec<Artist>,
    merge_duplicates: bool,
}

impl Catalog {
    /// Empty catalog with the historical duplicate-node behavior: inserting
    /// an artist or album name twice creates two nodes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty catalog that folds duplicate artist/album inserts onto the
    /// existing node instead of creating a second one.
    pub fn merging_duplicates() -> Self {
        Self {
            artists: Vec::new(),
            merge_duplicates: true,
        }
    }

    /// Artists in name order.
    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    /// First artist with exactly the given name, if any.
    pub fn artist_by_name(&self, name: &str) -> Option<&Artist> {
        self.artists.iter().find(|a| a.name == name)
    }

    /// Album lookup across the tree: exact artist name, then exact title.
    pub fn album_by_artist_and_title(&self, artist_name: &str, title: &str) -> Option<&Album> {
        self.artist_by_name(artist_name)
            .and_then(|artist| artist.album_by_title(title))
    }

    /// Inserts an artist and re-sorts the sequence by name ascending.
    pub fn add_artist(&mut self, name: impl Into<String>) -> &mut Artist {
        let name = name.into();
        if self.merge_duplicates
            && let Some(idx) = self.artists.iter().position(|a| a.name == name)
        {
            return &mut self.artists[idx];
        }
        self.artists.push(Artist::new(name.clone()));
        self.artists.sort_by(|a, b| a.name.cmp(&b.name));
        // Stable sort keeps the newest among identical names last.
        let idx = self
            .artists
            .iter()
            .rposition(|a| a.name == name)
            .expect("artist was just inserted");
        &mut self.artists[idx]
    }

    /// Find-or-create the artist, then insert an album under it.
    pub fn add_album(
        &mut self,
        artist_name: &str,
        album_title: impl Into<String>,
        year: Option<u32>,
    ) -> &mut Album {
        let album_title = album_title.into();
        let merge = self.merge_duplicates;
        if self.artist_by_name(artist_name).is_none() {
            self.add_artist(artist_name);
        }
        let artist = self
            .artists
            .iter_mut()
            .find(|a| a.name == artist_name)
            .expect("artist was just resolved");
        if merge && artist.album_by_title(&album_title).is_some() {
            return artist
                .album_by_title_mut(&album_title)
                .expect("album was just resolved");
        }
        artist.add_album(album_title, year)
    }

    /// The single authoritative upsert: find-or-create the artist, then the
    /// album within it (`year` is only used on creation), then insert the
    /// track. Pure in-memory mutation, never fails.
    #[allow(clippy::too_many_arguments)]
    pub fn add_track(
        &mut self,
        artist_name: &str,
        album_title: &str,
        track_title: impl Into<String>,
        track_number: Option<u32>,
        disc_number: Option<u32>,
        duration_secs: Option<f64>,
        source_path: impl Into<PathBuf>,
        year: Option<u32>,
    ) -> &Track {
        if self.album_by_artist_and_title(artist_name, album_title).is_none() {
            self.add_album(artist_name, album_title, year);
        }
        let artist = self
            .artists
            .iter_mut()
            .find(|a| a.name == artist_name)
            .expect("artist was just resolved");
        let album = artist
            .album_by_title_mut(album_title)
            .expect("album was just resolved");
        album.add_track(track_title, track_number, disc_number, duration_secs, source_path)
    }
}
