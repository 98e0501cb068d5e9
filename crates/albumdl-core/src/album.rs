//! Album model: a titled list of remote files downloaded into one directory.
//!
//! Albums are usually loaded from a JSON manifest:
//!
//! ```json
//! { "title": "Live 2019", "files": [ { "file": "https://host/a.flac", "name": "a.flac" } ] }
//! ```
//!
//! Every field is optional. A missing title falls back to [`DEFAULT_ALBUM_TITLE`];
//! a file entry without a source or a name is skipped by the downloader.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Title used for the album directory when the manifest has none.
pub const DEFAULT_ALBUM_TITLE: &str = "Album";

/// A named collection of remote files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub files: Option<Vec<AlbumFile>>,
}

/// One remote file of an album.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumFile {
    /// Remote locator (URL). Serialized as `file`; `source` and `url` are accepted on input.
    #[serde(default, rename = "file", alias = "source", alias = "url")]
    pub source: Option<String>,
    /// Local file name inside the album directory.
    #[serde(default)]
    pub name: Option<String>,
}

/// Error loading an album manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("failed to read manifest {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid album manifest: {0}")]
    Parse(#[from] serde_json::Error),
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.is_empty())
}

impl Album {
    pub fn new(title: impl Into<String>, files: Vec<AlbumFile>) -> Self {
        Self {
            title: Some(title.into()),
            files: Some(files),
        }
    }

    /// Parse an album from manifest JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load an album manifest from disk.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let data = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let album = Self::from_json_str(&data)?;
        tracing::debug!(
            path = %path.display(),
            files = album.files().len(),
            "loaded album manifest"
        );
        Ok(album)
    }

    /// Title to use for the album directory (never empty).
    pub fn title_or_default(&self) -> &str {
        non_empty(&self.title).unwrap_or(DEFAULT_ALBUM_TITLE)
    }

    /// Files in manifest order; empty when the list is absent.
    pub fn files(&self) -> &[AlbumFile] {
        self.files.as_deref().unwrap_or(&[])
    }
}

impl AlbumFile {
    pub fn new(source: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            name: Some(name.into()),
        }
    }

    pub fn source(&self) -> Option<&str> {
        non_empty(&self.source)
    }

    pub fn name(&self) -> Option<&str> {
        non_empty(&self.name)
    }

    /// Source and name, or `None` when either is empty or absent.
    pub fn target(&self) -> Option<(&str, &str)> {
        Some((self.source()?, self.name()?))
    }

    /// True when the downloader will skip this entry without trying it.
    pub fn is_skippable(&self) -> bool {
        self.target().is_none()
    }
}
