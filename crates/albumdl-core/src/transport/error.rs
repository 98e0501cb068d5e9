//! Transfer outcome errors.

use crate::control::Cancelled;

/// Why a single transfer did not complete.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// The cancel token was set while transferring. Not a failure of the file.
    #[error("transfer cancelled")]
    Cancelled,
    /// Source is not a URL this transport can fetch.
    #[error("invalid source {url}: {reason}")]
    InvalidSource { url: String, reason: String },
    /// Curl reported an error (timeout, connection, TLS, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {status} for {url}")]
    Http { status: u32, url: String },
    /// Writing to the destination failed (e.g. disk full, permission denied).
    #[error("write failed: {0}")]
    Sink(#[source] std::io::Error),
}

impl TransferError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, TransferError::Cancelled)
    }
}

impl From<Cancelled> for TransferError {
    fn from(_: Cancelled) -> Self {
        TransferError::Cancelled
    }
}
