use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("remote error: {0}")]
    RemoteError(String),

    #[error("pagination did not advance past {after:?} (next offset {next_offset:?})")]
    StalledPagination { after: String, next_offset: String },

    #[error("listing producer stopped before the listing was complete")]
    ProducerAborted,

    #[error("failed to read listing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed listing {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type RemoteResult<T> = Result<T, RemoteError>;
