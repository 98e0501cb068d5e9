//! Logging init: file under XDG state dir, or graceful fallback to stderr.
//!
//! Both paths install the same `fmt` subscriber (env filter, no ANSI); only the
//! writer differs. `RUST_LOG` overrides the default filter.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,albumdl=debug,albumdl_core=debug";
const LOG_FILE_NAME: &str = "albumdl.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber writing to `writer`. Fails if one is already set.
fn install<W>(writer: W) -> Result<()>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{e}"))
}

/// Initialize structured logging to `~/.local/state/albumdl/albumdl.log`.
/// On failure (e.g. log dir unwritable), returns Err so the caller can fall back to stderr.
pub fn init_logging() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("albumdl")?;
    let log_file_path = xdg_dirs.place_state_file(LOG_FILE_NAME)?;

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)?;
    // `&File` is a writer, so events share the handle instead of cloning it per line.
    install(Arc::new(file))?;

    tracing::info!("albumdl logging initialized at {}", log_file_path.display());
    Ok(log_file_path)
}

/// Initialize logging to stderr only. Use when init_logging() fails so the CLI doesn't crash.
pub fn init_logging_stderr() {
    let _ = install(io::stderr);
}
