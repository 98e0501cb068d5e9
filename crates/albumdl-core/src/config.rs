use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// HTTP transport settings (`[transport]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Seconds to wait for the TCP/TLS connection.
    pub connect_timeout_secs: u64,
    /// Abort when throughput stays below this many bytes/s for `low_speed_time_secs`.
    pub low_speed_limit_bytes: u32,
    pub low_speed_time_secs: u64,
    /// Hard cap on a single file transfer, in seconds.
    pub timeout_secs: u64,
    /// Maximum number of redirects followed per file.
    pub max_redirects: u32,
    /// Optional User-Agent header.
    pub user_agent: Option<String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            low_speed_limit_bytes: 1024,
            low_speed_time_secs: 60,
            timeout_secs: 3600,
            max_redirects: 10,
            user_agent: None,
        }
    }
}

/// Global configuration loaded from `~/.config/albumdl/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlbumdlConfig {
    /// Root directory albums are downloaded into (None = current directory).
    pub download_dir: Option<PathBuf>,
    pub transport: TransportConfig,
}

impl AlbumdlConfig {
    /// Download root: `override_dir` if given, else the configured dir, else `fallback`.
    pub fn download_root(&self, override_dir: Option<&Path>, fallback: &Path) -> PathBuf {
        override_dir
            .or(self.download_dir.as_deref())
            .unwrap_or(fallback)
            .to_path_buf()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("albumdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from `path`, creating it with defaults if missing.
pub fn load_or_init_at(path: &Path) -> Result<AlbumdlConfig> {
    if !path.exists() {
        let default_cfg = AlbumdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)
            .with_context(|| format!("failed to write default config {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: AlbumdlConfig =
        toml::from_str(&data).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

/// Load configuration from the XDG config dir, creating a default file if none exists.
pub fn load_or_init() -> Result<AlbumdlConfig> {
    load_or_init_at(&config_path()?)
}
