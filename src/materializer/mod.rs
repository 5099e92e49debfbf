//! File placement: turns a catalog track into a physical file in the library.
//!
//! The destination is always
//! `<library_root>/<artist>/<album>/<NN - Title>.mp3`, with path separators
//! in the title replaced by `_` so a title like "AC/DC Cover" cannot create
//! a nested directory.
//!
//! Placement is idempotent: a destination that already exists is success,
//! not an error, so re-running an import copies nothing twice. Any other
//! copy failure is propagated to the caller - a silently missed copy would
//! be data loss. Directory-creation failures, by contrast, are logged and
//! swallowed: if the directory genuinely cannot be made, the copy into it
//! fails and reports the problem anyway.

use crate::catalog::Track;
use crate::error::{Error, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// Destination filename for a track: its display name with path separators
/// replaced, plus the `.mp3` extension.
pub fn file_name(track: &Track) -> String {
    format!("{}.mp3", track.display_name().replace(['/', '\\'], "_"))
}

/// Full destination path for a track without touching the filesystem.
/// Used for dry runs and previews.
pub fn destination_for(
    track: &Track,
    artist_name: &str,
    album_title: &str,
    library_root: &Path,
) -> PathBuf {
    library_root
        .join(artist_name)
        .join(album_title)
        .join(file_name(track))
}

/// Copies a track's source file into the library.
///
/// Ensures `<library_root>/<artist>/<album>` exists, then copies
/// `<source_root>/<track.source_path>` into it under [`file_name`]. Returns
/// the destination path. Calling this twice with identical arguments leaves
/// exactly one file at the destination and succeeds both times.
pub async fn place(
    track: &Track,
    artist_name: &str,
    album_title: &str,
    library_root: &Path,
    source_root: &Path,
) -> Result<PathBuf> {
    let dest_dir = library_root.join(artist_name).join(album_title);
    if fs::try_exists(&dest_dir).await.unwrap_or(false) {
        debug!(dir = %dest_dir.display(), "destination folder already exists");
    } else {
        match fs::create_dir_all(&dest_dir).await {
            Ok(()) => info!(dir = %dest_dir.display(), "created destination folder"),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!(dir = %dest_dir.display(), "destination folder already exists")
            }
            Err(e) => {
                warn!(dir = %dest_dir.display(), error = %e, "failed to create destination folder")
            }
        }
    }

    let dest = dest_dir.join(file_name(track));
    if fs::try_exists(&dest).await.unwrap_or(false) {
        info!(title = %track.title, dest = %dest.display(), "already in library");
        return Ok(dest);
    }

    let source = source_root.join(&track.source_path);
    match fs::copy(&source, &dest).await {
        Ok(_) => {
            info!(title = %track.title, dest = %dest.display(), "copied to library");
            Ok(dest)
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            info!(title = %track.title, dest = %dest.display(), "already in library");
            Ok(dest)
        }
        Err(e) => Err(Error::copy(source, dest, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Album;
    use tempfile::tempdir;

    fn sample_track(album: &mut Album, title: &str, number: Option<u32>, source: &str) -> Track {
        album
            .add_track(title, number, Some(1), Some(200.0), source)
            .clone()
    }

    #[test]
    fn test_file_name_includes_padded_number() {
        let mut album = Album::new("Abbey Road", Some(1969));
        let track = sample_track(&mut album, "Come Together", Some(1), "disk/a.mp3");
        assert_eq!(file_name(&track), "01 - Come Together.mp3");
    }

    #[test]
    fn test_file_name_without_number_is_just_the_title() {
        let mut album = Album::new("Demos", None);
        let track = sample_track(&mut album, "Sketch", None, "disk/s.mp3");
        assert_eq!(file_name(&track), "Sketch.mp3");
    }

    #[test]
    fn test_file_name_replaces_path_separators() {
        let mut album = Album::new("Covers", None);
        let track = sample_track(&mut album, "AC/DC Medley \\ Live", Some(3), "disk/m.mp3");
        assert_eq!(file_name(&track), "03 - AC_DC Medley _ Live.mp3");
    }

    #[test]
    fn test_destination_for_builds_full_path() {
        let mut album = Album::new("Abbey Road", Some(1969));
        let track = sample_track(&mut album, "Something", Some(2), "disk/b.mp3");
        assert_eq!(
            destination_for(&track, "Beatles", "Abbey Road", Path::new("/music")),
            PathBuf::from("/music/Beatles/Abbey Road/02 - Something.mp3")
        );
    }

    #[tokio::test]
    async fn test_place_copies_file_into_new_folder() {
        let temp = tempdir().unwrap();
        let source_root = temp.path().join("incoming");
        let library_root = temp.path().join("library");
        std::fs::create_dir_all(source_root.join("disk")).unwrap();
        std::fs::write(source_root.join("disk/a.mp3"), b"fake mp3 content").unwrap();

        let mut album = Album::new("Abbey Road", Some(1969));
        let track = sample_track(&mut album, "Come Together", Some(1), "disk/a.mp3");

        let dest = place(&track, "Beatles", "Abbey Road", &library_root, &source_root)
            .await
            .unwrap();

        assert_eq!(
            dest,
            library_root.join("Beatles/Abbey Road/01 - Come Together.mp3")
        );
        assert_eq!(std::fs::read(&dest).unwrap(), b"fake mp3 content");
        // Source is copied, not moved.
        assert!(source_root.join("disk/a.mp3").exists());
    }

    #[tokio::test]
    async fn test_place_twice_is_idempotent() {
        let temp = tempdir().unwrap();
        let source_root = temp.path().join("incoming");
        let library_root = temp.path().join("library");
        std::fs::create_dir_all(&source_root).unwrap();
        std::fs::write(source_root.join("a.mp3"), b"first").unwrap();

        let mut album = Album::new("Abbey Road", Some(1969));
        let track = sample_track(&mut album, "Come Together", Some(1), "a.mp3");

        let first = place(&track, "Beatles", "Abbey Road", &library_root, &source_root)
            .await
            .unwrap();
        // Change the source; the second call must not overwrite the copy.
        std::fs::write(source_root.join("a.mp3"), b"second").unwrap();
        let second = place(&track, "Beatles", "Abbey Road", &library_root, &source_root)
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(std::fs::read(&first).unwrap(), b"first");
        let entries = std::fs::read_dir(library_root.join("Beatles/Abbey Road"))
            .unwrap()
            .count();
        assert_eq!(entries, 1);
    }

    #[tokio::test]
    async fn test_place_into_existing_folder_proceeds() {
        let temp = tempdir().unwrap();
        let source_root = temp.path().join("incoming");
        let library_root = temp.path().join("library");
        std::fs::create_dir_all(&source_root).unwrap();
        std::fs::create_dir_all(library_root.join("Beatles/Abbey Road")).unwrap();
        std::fs::write(source_root.join("b.mp3"), b"content").unwrap();

        let mut album = Album::new("Abbey Road", Some(1969));
        let track = sample_track(&mut album, "Something", Some(2), "b.mp3");

        let dest = place(&track, "Beatles", "Abbey Road", &library_root, &source_root)
            .await
            .unwrap();
        assert!(dest.exists());
    }

    #[tokio::test]
    async fn test_place_missing_source_is_a_hard_error() {
        let temp = tempdir().unwrap();
        let source_root = temp.path().join("incoming");
        let library_root = temp.path().join("library");
        std::fs::create_dir_all(&source_root).unwrap();

        let mut album = Album::new("Abbey Road", Some(1969));
        let track = sample_track(&mut album, "Ghost", Some(9), "missing.mp3");

        let result = place(&track, "Beatles", "Abbey Road", &library_root, &source_root).await;
        assert!(matches!(result, Err(Error::Copy { .. })));
    }

    #[tokio::test]
    async fn test_place_separator_title_stays_inside_album_folder() {
        let temp = tempdir().unwrap();
        let source_root = temp.path().join("incoming");
        let library_root = temp.path().join("library");
        std::fs::create_dir_all(&source_root).unwrap();
        std::fs::write(source_root.join("c.mp3"), b"content").unwrap();

        let mut album = Album::new("Covers", None);
        let track = sample_track(&mut album, "Intro/Outro", Some(1), "c.mp3");

        let dest = place(&track, "Band", "Covers", &library_root, &source_root)
            .await
            .unwrap();
        assert_eq!(dest, library_root.join("Band/Covers/01 - Intro_Outro.mp3"));
        assert!(dest.exists());
    }
}

/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use crate::catalog::Album;
    use proptest::prelude::*;

    /// Generate a title that may contain path separators
    fn arbitrary_title() -> impl Strategy<Value = String> {
        prop::string::string_regex("[a-zA-Z0-9 /\\\\._-]{1,40}").unwrap()
    }

    fn track_with(title: String, number: Option<u32>) -> Track {
        let mut album = Album::new("Album", None);
        album.add_track(title, number, None, None, "src.mp3").clone()
    }

    proptest! {
        /// Destination filenames never contain a path separator.
        #[test]
        fn file_name_has_no_separators(
            title in arbitrary_title(),
            number in proptest::option::of(1u32..100),
        ) {
            let name = file_name(&track_with(title, number));
            prop_assert!(!name.contains('/'), "Found / in: {}", name);
            prop_assert!(!name.contains('\\'), "Found \\ in: {}", name);
        }

        /// The destination always stays directly under the album folder.
        #[test]
        fn destination_stays_under_album_folder(
            title in arbitrary_title(),
            number in proptest::option::of(1u32..100),
        ) {
            let track = track_with(title, number);
            let dest = destination_for(&track, "Artist", "Album", Path::new("/music"));
            prop_assert_eq!(
                dest.parent(),
                Some(Path::new("/music/Artist/Album"))
            );
        }

        /// Numbered tracks always get a two-digit prefix.
        #[test]
        fn track_number_prefix_is_zero_padded(number in 1u32..100) {
            let name = file_name(&track_with("Song".to_string(), Some(number)));
            let expected = format!("{:02} - Song.mp3", number);
            prop_assert_eq!(name, expected);
        }
    }
}
