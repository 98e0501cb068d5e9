//! Local storage capability used by the album downloader.
//!
//! The downloader only needs a handful of primitives: existence checks, directory
//! creation, exclusive file creation and lexical path normalization. They sit
//! behind the [`Storage`] trait so tests can observe or fake disk access;
//! [`LocalStorage`] is the `std::fs` implementation.

mod local;
mod path;

pub use local::LocalStorage;
pub use path::normalize_lexically;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Filesystem primitives consumed by the downloader.
pub trait Storage {
    /// Writable handle for one destination file. Closed when dropped.
    type Sink: Write;

    fn dir_exists(&self, path: &Path) -> bool;

    fn file_exists(&self, path: &Path) -> bool;

    /// Create `path` and any missing parents. Succeeds if it already exists.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Create a new file for writing. Fails if anything already exists at `path`.
    fn open_exclusive(&self, path: &Path) -> io::Result<Self::Sink>;

    fn normalize_path(&self, path: &Path) -> PathBuf {
        normalize_lexically(path)
    }
}
