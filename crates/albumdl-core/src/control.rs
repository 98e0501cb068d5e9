//! Cooperative cancellation for album downloads.
//!
//! A `CancelToken` wraps a shared abort flag. The caller keeps one clone (e.g.
//! wired to Ctrl-C) and hands another to the downloader; the download loop and
//! the transport check the flag and stop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Error returned when a download is stopped by cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("download cancelled")]
pub struct Cancelled;

/// Cloneable cancellation handle. All clones share one flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        if !self.flag.swap(true, Ordering::SeqCst) {
            tracing::debug!("cancellation requested");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// `Err(Cancelled)` once cancellation has been requested.
    pub fn check(&self) -> Result<(), Cancelled> {
        if self.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }
}
