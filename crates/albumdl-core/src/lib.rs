//! Core of albumdl: downloads an album (a titled list of remote files) into a
//! local directory one file at a time, reporting progress and errors through
//! an event hub and honoring cooperative cancellation.

pub mod album;
pub mod config;
pub mod control;
pub mod downloader;
pub mod events;
pub mod logging;
pub mod storage;
pub mod transport;

pub use album::{Album, AlbumFile};
pub use control::CancelToken;
pub use downloader::{AlbumDownloader, DownloadError, FileAction, RunSummary};
pub use events::{DownloadEvent, EventHub, SubscriptionId};
