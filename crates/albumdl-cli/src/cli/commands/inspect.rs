//! `albumdl inspect <manifest>` – dry run: album directory and per-file action.

use albumdl_core::downloader::{album_dir, plan};
use albumdl_core::storage::LocalStorage;
use albumdl_core::{Album, FileAction};
use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;

pub(crate) fn action_label(action: &FileAction<'_>) -> &'static str {
    match action {
        FileAction::Download { .. } => "download",
        FileAction::SkipExisting { .. } => "present",
        FileAction::SkipIncomplete => "incomplete",
    }
}

pub fn run_inspect(manifest: &Path, download_root: &Path) -> Result<()> {
    write_inspect(manifest, download_root, &mut io::stdout().lock())
}

pub(crate) fn write_inspect(manifest: &Path, download_root: &Path, out: &mut impl Write) -> Result<()> {
    let album = Album::load(manifest)
        .with_context(|| format!("cannot load album from {}", manifest.display()))?;

    writeln!(out, "Album:     {}", album.title_or_default())?;
    writeln!(
        out,
        "Directory: {}",
        album_dir(&LocalStorage, &album, download_root).display()
    )?;
    if album.files().is_empty() {
        writeln!(out, "No files.")?;
        return Ok(());
    }
    let actions = plan(&LocalStorage, &album, download_root);
    for (i, (file, action)) in album.files().iter().zip(&actions).enumerate() {
        writeln!(
            out,
            "{:>3}  {:<10}  {}",
            i + 1,
            action_label(action),
            file.name().unwrap_or("<unnamed>")
        )?;
    }
    let pending = actions
        .iter()
        .filter(|a| matches!(a, FileAction::Download { .. }))
        .count();
    writeln!(out, "{} of {} file(s) to download", pending, actions.len())?;
    Ok(())
}
