//! The import pipeline: scan, read metadata, upsert, place.
//!
//! Files are processed strictly one at a time; each file's metadata read,
//! catalog insertion, and copy complete before the next file starts, so the
//! catalog never sees concurrent mutation. A failure on one file is reported
//! as an event and the run continues - per-file errors are never global.

use crate::catalog::Catalog;
use crate::error::Result;
use crate::materializer;
use crate::metadata;
use crate::scanner;
use futures::{Stream, StreamExt};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Outcome of processing one source file.
#[derive(Debug, Clone)]
pub enum ImportEvent {
    /// The file has (or, on a dry run, would have) a place in the library.
    Placed { source: PathBuf, dest: PathBuf },
    /// The file was dropped before reaching the catalog.
    Skipped { path: PathBuf, reason: String },
    /// Metadata could not be read or the copy failed.
    Failed { path: PathBuf, error: String },
}

/// Imports every audio file under `source_root` into the catalog and the
/// library at `library_root`, yielding one event per file.
///
/// With `dry_run` set, destinations are computed but nothing is copied.
pub fn import<'a>(
    catalog: &'a mut Catalog,
    source_root: &'a Path,
    library_root: &'a Path,
    dry_run: bool,
) -> impl Stream<Item = ImportEvent> + 'a {
    let paths = Box::pin(scanner::scan(source_root.to_path_buf()));
    futures::stream::unfold((catalog, paths), move |(catalog, mut paths)| async move {
        let path = paths.next().await?;
        let event = import_one(catalog, &path, source_root, library_root, dry_run).await;
        Some((event, (catalog, paths)))
    })
}

async fn import_one(
    catalog: &mut Catalog,
    path: &Path,
    source_root: &Path,
    library_root: &Path,
    dry_run: bool,
) -> ImportEvent {
    let record = match metadata::read(path) {
        Ok(record) => record,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read metadata");
            return ImportEvent::Failed {
                path: path.to_path_buf(),
                error: e.to_string(),
            };
        }
    };

    let (Some(artist), Some(album), Some(title)) = (
        record.artist.as_deref(),
        record.album.as_deref(),
        record.title.as_deref(),
    ) else {
        debug!(path = %path.display(), "missing artist, album, or title; skipping");
        return ImportEvent::Skipped {
            path: path.to_path_buf(),
            reason: "missing artist, album, or title tag".into(),
        };
    };

    // The catalog stores the source location relative to the import root.
    let relative = path.strip_prefix(source_root).unwrap_or(path);
    let track = catalog.add_track(
        artist,
        album,
        title,
        record.track_number,
        record.disc_number,
        record.duration_secs,
        relative,
        record.year,
    );

    let placement: Result<PathBuf> = if dry_run {
        Ok(materializer::destination_for(track, artist, album, library_root))
    } else {
        materializer::place(track, artist, album, library_root, source_root).await
    };

    match placement {
        Ok(dest) => ImportEvent::Placed {
            source: path.to_path_buf(),
            dest,
        },
        Err(e) => ImportEvent::Failed {
            path: path.to_path_buf(),
            error: e.to_string(),
        },
    }
}
