//! Download lifecycle events and the per-downloader subscriber registry.
//!
//! Four channels exist: file changed, progress percentage, album finished and
//! per-file error. Listeners are registered on an [`EventHub`] owned by one
//! downloader and are called synchronously, in subscription order, on the
//! thread running the download.

use crate::album::AlbumFile;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// One lifecycle notification from an album download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadEvent {
    /// The downloader moved on to this file (emitted even if it is then skipped).
    FileChanged(AlbumFile),
    /// Whole-number percentage of the current file, 0..=100, rounded down.
    ///
    /// A 0 is sent for every file before [`FileChanged`](Self::FileChanged).
    /// After that, a value is only sent when it differs from the previous one
    /// for the same file, so transport callbacks that land on the same
    /// percentage produce a single event.
    Progress(u8),
    /// Every file was processed; carries the album directory.
    DownloadFinished(PathBuf),
    /// A single file failed; the batch continues.
    ErrorOccurred(String),
}

/// Token returned by [`EventHub::subscribe`]; pass it to `unsubscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&DownloadEvent) + Send + Sync>;

/// Registry of event listeners keyed by subscription id.
#[derive(Default)]
pub struct EventHub {
    next_id: AtomicU64,
    listeners: RwLock<BTreeMap<SubscriptionId, Listener>>,
}

impl std::fmt::Debug for EventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHub")
            .field("listeners", &self.len())
            .finish()
    }
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for every event.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&DownloadEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Arc::new(listener));
        id
    }

    /// Remove a listener. Returns false if the id was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .is_some()
    }

    pub fn on_file_changed<F>(&self, f: F) -> SubscriptionId
    where
        F: Fn(&AlbumFile) + Send + Sync + 'static,
    {
        self.subscribe(move |event| {
            if let DownloadEvent::FileChanged(file) = event {
                f(file)
            }
        })
    }

    pub fn on_progress<F>(&self, f: F) -> SubscriptionId
    where
        F: Fn(u8) + Send + Sync + 'static,
    {
        self.subscribe(move |event| {
            if let DownloadEvent::Progress(pct) = event {
                f(*pct)
            }
        })
    }

    pub fn on_download_finished<F>(&self, f: F) -> SubscriptionId
    where
        F: Fn(&Path) + Send + Sync + 'static,
    {
        self.subscribe(move |event| {
            if let DownloadEvent::DownloadFinished(path) = event {
                f(path)
            }
        })
    }

    pub fn on_error<F>(&self, f: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.subscribe(move |event| {
            if let DownloadEvent::ErrorOccurred(message) = event {
                f(message)
            }
        })
    }

    pub fn len(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deliver `event` to all current listeners.
    ///
    /// The registry lock is released before listeners run, so a listener may
    /// subscribe or unsubscribe without deadlocking.
    pub fn emit(&self, event: DownloadEvent) {
        match &event {
            DownloadEvent::Progress(pct) => tracing::trace!(pct, "progress"),
            DownloadEvent::FileChanged(file) => {
                tracing::debug!(name = ?file.name, source = ?file.source, "file changed")
            }
            DownloadEvent::DownloadFinished(path) => {
                tracing::debug!(path = %path.display(), "download finished")
            }
            DownloadEvent::ErrorOccurred(message) => tracing::debug!(%message, "error event"),
        }
        let snapshot: Vec<Listener> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        for listener in snapshot {
            listener(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn delivers_in_subscription_order() {
        let hub = EventHub::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        for tag in ["first", "second"] {
            let seen = Arc::clone(&seen);
            hub.subscribe(move |_| seen.lock().unwrap().push(tag));
        }
        hub.emit(DownloadEvent::Progress(0));
        assert_eq!(*seen.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn typed_helpers_filter_by_channel() {
        let hub = EventHub::new();
        let progress = Arc::new(Mutex::new(Vec::new()));
        let errors = Arc::new(Mutex::new(Vec::new()));
        {
            let progress = Arc::clone(&progress);
            hub.on_progress(move |p| progress.lock().unwrap().push(p));
        }
        {
            let errors = Arc::clone(&errors);
            hub.on_error(move |m| errors.lock().unwrap().push(m.to_string()));
        }
        hub.emit(DownloadEvent::Progress(42));
        hub.emit(DownloadEvent::ErrorOccurred("boom".into()));
        hub.emit(DownloadEvent::FileChanged(AlbumFile::default()));
        assert_eq!(*progress.lock().unwrap(), vec![42]);
        assert_eq!(*errors.lock().unwrap(), vec!["boom".to_string()]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let hub = EventHub::new();
        let count = Arc::new(AtomicU64::new(0));
        let c = Arc::clone(&count);
        let id = hub.on_download_finished(move |_| {
            c.fetch_add(1, Ordering::Relaxed);
        });
        hub.emit(DownloadEvent::DownloadFinished(PathBuf::from("/tmp/a")));
        assert!(hub.unsubscribe(id));
        assert!(!hub.unsubscribe(id));
        hub.emit(DownloadEvent::DownloadFinished(PathBuf::from("/tmp/a")));
        assert_eq!(count.load(Ordering::Relaxed), 1);
        assert!(hub.is_empty());
    }

    #[test]
    fn listener_may_subscribe_during_emit() {
        let hub = Arc::new(EventHub::new());
        let h = Arc::clone(&hub);
        hub.on_file_changed(move |_| {
            h.subscribe(|_| {});
        });
        hub.emit(DownloadEvent::FileChanged(AlbumFile::default()));
        assert_eq!(hub.len(), 2);
    }

    #[test]
    fn emit_without_listeners_is_noop() {
        EventHub::new().emit(DownloadEvent::Progress(100));
    }
}
