//! Application-wide error types.
//!
//! Library modules use the [`Error`] enum via `thiserror`; the CLI layer
//! uses `anyhow` for convenient propagation.
//!
//! The catalog itself has no failure modes (pure in-memory mutation), so
//! every variant here describes an I/O or metadata problem. Copy failures
//! carry both endpoints because a missed copy is silent data loss and the
//! caller needs to know exactly which file to retry.

use std::path::PathBuf;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Metadata reading error
    #[error("metadata error for {}: {}", .path.display(), .message)]
    Metadata { path: PathBuf, message: String },

    /// A file copy into the library failed (other than already-exists,
    /// which is benign)
    #[error("failed to copy {} to {}: {}", .from.display(), .to.display(), .source)]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a metadata error.
    pub fn metadata(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Metadata {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a copy error.
    pub fn copy(from: impl Into<PathBuf>, to: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Copy {
            from: from.into(),
            to: to.into(),
            source,
        }
    }
}
