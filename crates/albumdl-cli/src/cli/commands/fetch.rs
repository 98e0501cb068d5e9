//! `albumdl fetch <manifest>` – download an album with console progress.

use albumdl_core::config::AlbumdlConfig;
use albumdl_core::transport::CurlTransport;
use albumdl_core::{Album, AlbumDownloader, CancelToken, EventHub};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Prints file changes, progress and errors as they happen.
fn attach_console(events: &EventHub) {
    let current: Arc<Mutex<String>> = Arc::default();
    {
        let current = Arc::clone(&current);
        events.on_file_changed(move |file| {
            let name = file.name().unwrap_or("<unnamed>").to_string();
            println!("{name}");
            *current.lock().unwrap_or_else(|e| e.into_inner()) = name;
        });
    }
    events.on_progress(|pct| {
        if pct == 0 {
            return;
        }
        let mut out = std::io::stdout().lock();
        let _ = write!(out, "\r  {pct:>3}%");
        if pct == 100 {
            let _ = writeln!(out);
        }
        let _ = out.flush();
    });
    events.on_error(move |message| {
        let name = current.lock().unwrap_or_else(|e| e.into_inner()).clone();
        eprintln!("\n  {name}: {message}");
    });
    events.on_download_finished(|dir| println!("Saved to {}", dir.display()));
}

pub async fn run_fetch(cfg: &AlbumdlConfig, manifest: &Path, download_root: &Path) -> Result<()> {
    let album = Album::load(manifest)
        .with_context(|| format!("cannot load album from {}", manifest.display()))?;

    let cancel = CancelToken::new();
    let ctrl_c = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Ctrl-C received, cancelling");
                cancel.cancel();
            }
        })
    };

    let transport = CurlTransport::new(cfg.transport.clone());
    let root = download_root.to_path_buf();
    let result = tokio::task::spawn_blocking(move || {
        let dl = AlbumDownloader::new(transport);
        attach_console(dl.events());
        dl.run(&album, &root, &cancel)
    })
    .await
    .context("download task panicked")?;
    ctrl_c.abort();

    let summary = result?;
    println!(
        "{} downloaded, {} skipped, {} failed",
        summary.downloaded, summary.skipped, summary.failed
    );
    Ok(())
}
