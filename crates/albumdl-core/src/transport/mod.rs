//! Byte transfer from a remote source into a local sink.
//!
//! The downloader never talks to the network directly; it hands each file to a
//! [`Transport`] together with a progress callback and the cancel token.
//! [`CurlTransport`] is the HTTP(S) implementation built on libcurl.

mod error;
mod http;

pub use error::TransferError;
pub use http::CurlTransport;

use crate::control::CancelToken;
use std::io::Write;

/// Copies one remote resource into `sink`.
///
/// Implementations call `on_progress` with a fraction in `[0.0, 1.0]` as bytes
/// arrive (when the total size is known), poll `cancel` while transferring and
/// return [`TransferError::Cancelled`] once it is set. Any other `Err` is a
/// failure of this resource only.
pub trait Transport {
    fn transfer(
        &self,
        source: &str,
        sink: &mut dyn Write,
        on_progress: &mut dyn FnMut(f64),
        cancel: &CancelToken,
    ) -> Result<(), TransferError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn transfer(
        &self,
        source: &str,
        sink: &mut dyn Write,
        on_progress: &mut dyn FnMut(f64),
        cancel: &CancelToken,
    ) -> Result<(), TransferError> {
        (**self).transfer(source, sink, on_progress, cancel)
    }
}
