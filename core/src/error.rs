use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or querying an inverted index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Growing a container failed. The container is left as it was before the call.
    #[error("allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    #[error("empty token cannot be queried")]
    EmptyToken,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to read corpus {}: {source}", path.display())]
    Corpus {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, IndexError>;
