//! Error types for the walk crate.

use std::io;
use std::path::PathBuf;

/// Errors that abort an ordered walk.
#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    /// The walk root exists but is not a directory.
    #[error("walk root is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Listing a directory or reading an entry's metadata failed.
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A symlink cycle was found while following links.
    #[error("filesystem loop at {path} (ancestor {ancestor})")]
    Loop { path: PathBuf, ancestor: PathBuf },

    /// A file name could not be represented as UTF-8.
    #[error("path is not valid UTF-8: {0}")]
    NonUtf8Path(PathBuf),
}

impl From<walkdir::Error> for WalkError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(PathBuf::from).unwrap_or_default();
        if let Some(ancestor) = err.loop_ancestor() {
            return WalkError::Loop {
                path,
                ancestor: ancestor.to_path_buf(),
            };
        }
        let source = err
            .into_io_error()
            .unwrap_or_else(|| io::Error::other("walk failed"));
        WalkError::Io { path, source }
    }
}

/// Convenience alias for walk results.
pub type WalkResult<T> = Result<T, WalkError>;
