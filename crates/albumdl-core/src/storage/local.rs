//! `std::fs` implementation of [`Storage`].

use super::Storage;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::Path;

/// Write buffer for destination files.
const SINK_BUFFER_BYTES: usize = 64 * 1024;

/// Storage backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl Storage for LocalStorage {
    type Sink = BufWriter<File>;

    fn dir_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn open_exclusive(&self, path: &Path) -> io::Result<Self::Sink> {
        let file = File::options().write(true).create_new(true).open(path)?;
        Ok(BufWriter::with_capacity(SINK_BUFFER_BYTES, file))
    }
}
