//! Error types for session storage.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a [`SessionStorage`](crate::SessionStorage) backend.
///
/// These never leave the session store; it logs them and degrades to
/// "no session".
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("session storage I/O failed at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file could not be encoded.
    #[error("session storage encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// An in-memory lock was poisoned by a panicking writer.
    #[error("session storage lock poisoned")]
    Poisoned,
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
