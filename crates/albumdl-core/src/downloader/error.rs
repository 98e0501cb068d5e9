//! Run-level and per-file error types.

use crate::transport::TransferError;
use std::io;
use std::path::PathBuf;

/// Error that ends an album run. Per-file failures are never returned here;
/// they surface as error events and the batch continues.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// The album directory could not be created. Nothing was downloaded.
    #[error("failed to create album directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The cancel token was set before or during a transfer.
    #[error("download cancelled")]
    Cancelled,
}

impl DownloadError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DownloadError::Cancelled)
    }
}

/// Failure of one file. Its `Display` is the text of the error event.
#[derive(Debug, thiserror::Error)]
pub(crate) enum FileError {
    #[error("cannot create {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Transfer(#[from] TransferError),
    #[error("failed to flush {}: {source}", .path.display())]
    Flush {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileError {
    pub(crate) fn is_cancelled(&self) -> bool {
        matches!(self, FileError::Transfer(e) if e.is_cancelled())
    }
}
