//! CLI for the albumdl album downloader.

mod commands;

use anyhow::Result;
use albumdl_core::config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{run_fetch, run_inspect};

/// Top-level CLI for albumdl.
#[derive(Debug, Parser)]
#[command(name = "albumdl")]
#[command(about = "albumdl: download every file of an album manifest into one directory", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/albumdl/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download an album. Files already present are skipped; Ctrl-C cancels.
    Fetch {
        /// Path to the album manifest (JSON).
        manifest: PathBuf,
        /// Root directory; the album goes into <DIR>/<title>. Defaults to config, then cwd.
        #[arg(long, value_name = "DIR")]
        dest: Option<PathBuf>,
    },

    /// Show where an album would go and what would be downloaded, without downloading.
    Inspect {
        /// Path to the album manifest (JSON).
        manifest: PathBuf,
        /// Root directory, as for `fetch`.
        #[arg(long, value_name = "DIR")]
        dest: Option<PathBuf>,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = match cli.config.as_deref() {
            Some(path) => config::load_or_init_at(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);
        let cwd = std::env::current_dir()?;

        match cli.command {
            CliCommand::Fetch { manifest, dest } => {
                let root = cfg.download_root(dest.as_deref(), &cwd);
                run_fetch(&cfg, &manifest, &root).await?;
            }
            CliCommand::Inspect { manifest, dest } => {
                let root = cfg.download_root(dest.as_deref(), &cwd);
                run_inspect(&manifest, &root)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
