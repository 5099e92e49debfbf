//! Source directory traversal.
//!
//! Walks a directory tree on a blocking task and yields the audio files it
//! finds as a stream, so the import pipeline can start working before the
//! walk finishes.

use futures::stream::Stream;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use walkdir::WalkDir;

/// Whether a path looks like an audio file we can import.
///
/// Supported extensions: mp3, flac, ogg, wav, m4a (case-insensitive).
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            matches!(
                ext.to_lowercase().as_str(),
                "mp3" | "flac" | "ogg" | "wav" | "m4a"
            )
        })
        .unwrap_or(false)
}

/// Scans the given root directory recursively for audio files.
pub fn scan(root: PathBuf) -> impl Stream<Item = PathBuf> {
    let (tx, rx) = mpsc::channel(100);

    // The walk itself is synchronous, so it runs on a blocking task.
    tokio::task::spawn_blocking(move || {
        for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
            if entry.file_type().is_file() && is_audio_file(entry.path()) {
                // If the receiver is gone, stop scanning.
                if tx.blocking_send(entry.path().to_path_buf()).is_err() {
                    break;
                }
            }
        }
    });

    futures::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|path| (path, rx))
    })
}
