//! Album download loop.
//!
//! Creates the album directory, then walks the file list strictly in order:
//! reset progress, announce the file, honor cancellation, skip entries that are
//! incomplete or already on disk, and hand the rest to the [`Transport`]. A
//! failed file becomes an error event and the loop moves on; cancellation ends
//! the run. Partial files are left on disk in both cases.

mod error;
mod progress;

pub use error::DownloadError;
pub use progress::percent;

use crate::album::{Album, AlbumFile};
use crate::control::CancelToken;
use crate::events::{DownloadEvent, EventHub};
use crate::storage::{LocalStorage, Storage};
use crate::transport::Transport;
use error::FileError;
use progress::PercentReporter;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Counts from a run that reached the end of the file list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// What the downloader will do with one album entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileAction<'a> {
    Download { source: &'a str, path: PathBuf },
    /// Source or name is empty or missing.
    SkipIncomplete,
    /// Destination already exists; treated as downloaded.
    SkipExisting { path: PathBuf },
}

/// Sequential album downloader. Owns its transport, storage and event hub.
pub struct AlbumDownloader<T, S = LocalStorage> {
    transport: T,
    storage: S,
    events: EventHub,
}

impl<T: Transport> AlbumDownloader<T, LocalStorage> {
    pub fn new(transport: T) -> Self {
        Self::with_storage(transport, LocalStorage)
    }
}

/// `normalize(download_root / title)`, with the default title when empty.
pub fn album_dir<S: Storage>(storage: &S, album: &Album, download_root: &Path) -> PathBuf {
    storage.normalize_path(&download_root.join(album.title_or_default()))
}

fn action_for<'a, S: Storage>(storage: &S, album_dir: &Path, file: &'a AlbumFile) -> FileAction<'a> {
    let Some((source, name)) = file.target() else {
        return FileAction::SkipIncomplete;
    };
    let path = storage.normalize_path(&album_dir.join(name));
    if storage.file_exists(&path) {
        FileAction::SkipExisting { path }
    } else {
        FileAction::Download { source, path }
    }
}

/// Dry run: the action for each file, in album order. Touches no network
/// and creates nothing.
pub fn plan<'a, S: Storage>(storage: &S, album: &'a Album, download_root: &Path) -> Vec<FileAction<'a>> {
    let dir = album_dir(storage, album, download_root);
    album
        .files()
        .iter()
        .map(|file| action_for(storage, &dir, file))
        .collect()
}

impl<T, S: Storage> AlbumDownloader<T, S> {
    pub fn with_storage(transport: T, storage: S) -> Self {
        Self {
            transport,
            storage,
            events: EventHub::new(),
        }
    }

    /// Subscribe here before calling [`run`](Self::run).
    pub fn events(&self) -> &EventHub {
        &self.events
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn album_dir(&self, album: &Album, download_root: &Path) -> PathBuf {
        album_dir(&self.storage, album, download_root)
    }

    pub fn plan<'a>(&self, album: &'a Album, download_root: &Path) -> Vec<FileAction<'a>> {
        plan(&self.storage, album, download_root)
    }
}

impl<T: Transport, S: Storage> AlbumDownloader<T, S> {
    /// Download every file of `album` into `download_root/<title>`.
    ///
    /// Returns `Err(DownloadError::CreateDir)` if the album directory cannot be
    /// created and `Err(DownloadError::Cancelled)` if `cancel` fires; no
    /// further files are started after either. Individual file failures are
    /// reported through [`DownloadEvent::ErrorOccurred`] and counted in the
    /// summary.
    pub fn run(
        &self,
        album: &Album,
        download_root: &Path,
        cancel: &CancelToken,
    ) -> Result<RunSummary, DownloadError> {
        let files = album.files();
        if files.is_empty() {
            tracing::debug!("album has no files, nothing to do");
            return Ok(RunSummary::default());
        }

        let album_dir = self.album_dir(album, download_root);
        if !self.storage.dir_exists(&album_dir) {
            self.storage
                .create_dir_all(&album_dir)
                .map_err(|source| DownloadError::CreateDir {
                    path: album_dir.clone(),
                    source,
                })?;
            tracing::debug!(dir = %album_dir.display(), "created album directory");
        }
        tracing::info!(
            title = album.title_or_default(),
            dir = %album_dir.display(),
            files = files.len(),
            "album download started"
        );

        let mut summary = RunSummary::default();
        for (index, file) in files.iter().enumerate() {
            self.events.emit(DownloadEvent::Progress(0));
            self.events.emit(DownloadEvent::FileChanged(file.clone()));

            if cancel.is_cancelled() {
                tracing::info!(index, "album download cancelled");
                return Err(DownloadError::Cancelled);
            }

            let (source, path) = match action_for(&self.storage, &album_dir, file) {
                FileAction::Download { source, path } => (source, path),
                FileAction::SkipIncomplete => {
                    tracing::debug!(index, "skipping entry without source or name");
                    summary.skipped += 1;
                    continue;
                }
                FileAction::SkipExisting { path } => {
                    tracing::debug!(index, path = %path.display(), "already downloaded, skipping");
                    summary.skipped += 1;
                    continue;
                }
            };

            match self.download_file(source, &path, cancel) {
                Ok(()) => {
                    tracing::debug!(index, path = %path.display(), "file downloaded");
                    summary.downloaded += 1;
                }
                Err(e) if e.is_cancelled() => {
                    tracing::info!(index, path = %path.display(), "album download cancelled mid-transfer");
                    return Err(DownloadError::Cancelled);
                }
                Err(e) => {
                    tracing::warn!(index, source, error = %e, "file download failed");
                    summary.failed += 1;
                    self.events.emit(DownloadEvent::ErrorOccurred(e.to_string()));
                }
            }
        }

        tracing::info!(
            dir = %album_dir.display(),
            downloaded = summary.downloaded,
            skipped = summary.skipped,
            failed = summary.failed,
            "album download finished"
        );
        self.events.emit(DownloadEvent::DownloadFinished(album_dir));
        Ok(summary)
    }

    /// One transfer into a freshly created file. The sink is dropped (closed)
    /// on every return path; a partial file is left in place.
    fn download_file(&self, source: &str, path: &Path, cancel: &CancelToken) -> Result<(), FileError> {
        let mut sink = self
            .storage
            .open_exclusive(path)
            .map_err(|e| FileError::Open {
                path: path.to_path_buf(),
                source: e,
            })?;
        let mut reporter = PercentReporter::after_reset(&self.events);
        self.transport
            .transfer(source, &mut sink, &mut |f: f64| reporter.report(f), cancel)?;
        sink.flush().map_err(|e| FileError::Flush {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(())
    }
}
