//! HTTP(S) transport on libcurl's easy interface.
//!
//! Streams the response body sequentially into the sink. Timeouts live here,
//! not in the downloader: connect timeout, a low-speed abort and a hard cap.

use super::{Transport, TransferError};
use crate::config::TransportConfig;
use crate::control::CancelToken;
use std::cell::Cell;
use std::io::Write;
use std::time::Duration;

/// [`Transport`] for `http` and `https` sources.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    opts: TransportConfig,
}

impl CurlTransport {
    pub fn new(opts: TransportConfig) -> Self {
        Self { opts }
    }

    fn configure(&self, easy: &mut curl::easy::Easy, source: &str) -> Result<(), TransferError> {
        let o = &self.opts;
        easy.url(source)?;
        easy.follow_location(true)?;
        easy.max_redirections(o.max_redirects)?;
        easy.connect_timeout(Duration::from_secs(o.connect_timeout_secs))?;
        // Abort if throughput stays under the limit for the whole window.
        easy.low_speed_limit(o.low_speed_limit_bytes)?;
        easy.low_speed_time(Duration::from_secs(o.low_speed_time_secs))?;
        easy.timeout(Duration::from_secs(o.timeout_secs))?;
        if let Some(agent) = o.user_agent.as_deref() {
            easy.useragent(agent)?;
        }
        // Error statuses abort before any body byte reaches the sink.
        easy.fail_on_error(true)?;
        easy.progress(true)?;
        Ok(())
    }
}

fn check_source(source: &str) -> Result<(), TransferError> {
    let invalid = |reason: String| TransferError::InvalidSource {
        url: source.to_string(),
        reason,
    };
    let parsed = url::Url::parse(source).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}

/// Fraction of the body received, or `None` while the total is unknown.
fn fraction(total: f64, now: f64) -> Option<f64> {
    (total > 0.0).then(|| (now / total).clamp(0.0, 1.0))
}

impl Transport for CurlTransport {
    fn transfer(
        &self,
        source: &str,
        sink: &mut dyn Write,
        on_progress: &mut dyn FnMut(f64),
        cancel: &CancelToken,
    ) -> Result<(), TransferError> {
        check_source(source)?;
        cancel.check()?;

        let mut easy = curl::easy::Easy::new();
        self.configure(&mut easy, source)?;

        let sink_error: Cell<Option<std::io::Error>> = Cell::new(None);
        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match sink.write_all(data) {
                Ok(()) => Ok(data.len()),
                Err(e) => {
                    sink_error.set(Some(e));
                    Ok(0) // abort transfer
                }
            })?;
            transfer.progress_function(|dltotal, dlnow, _, _| {
                if cancel.is_cancelled() {
                    return false;
                }
                if let Some(f) = fraction(dltotal, dlnow) {
                    on_progress(f);
                }
                true
            })?;
            transfer.perform()
        };

        if let Err(e) = performed {
            if e.is_aborted_by_callback() && cancel.is_cancelled() {
                tracing::debug!(source, "transfer aborted by cancellation");
                return Err(TransferError::Cancelled);
            }
            if e.is_http_returned_error() {
                return Err(TransferError::Http {
                    status: easy.response_code()?,
                    url: source.to_string(),
                });
            }
            if e.is_write_error() {
                if let Some(io_err) = sink_error.take() {
                    return Err(TransferError::Sink(io_err));
                }
            }
            return Err(TransferError::Curl(e));
        }

        let status = easy.response_code()?;
        if !(200..300).contains(&status) {
            return Err(TransferError::Http {
                status,
                url: source.to_string(),
            });
        }
        on_progress(1.0);
        Ok(())
    }
}
