//! Pluggable HTTP transport
//!
//! [`open`](crate::open::open) dispatches requests through the [`HttpClient`]
//! trait so callers can substitute their own transport (custom timeouts,
//! connection pools, test fakes). The default is a process-wide
//! [`ReqwestClient`] shared by every call that does not override it.

use crate::error::{Error, Result};
use http::{Request, Response};
use std::io::Read;
use std::sync::LazyLock;

/// The readable/closable stream capability set of a response body.
///
/// A single stream is meant for one consumer; it is not safe to share one
/// across threads.
pub trait BodyStream: Read + Send {
    /// Release the underlying resources. Further reads are undefined.
    fn close(&mut self) -> std::io::Result<()>;
}

/// One-operation HTTP transport: execute a request, produce a response whose
/// body streams.
///
/// Implementations must not retry; any timeout policy lives inside the
/// implementation, not in the caller.
pub trait HttpClient: Send + Sync {
    /// Send the request and block until the response headers arrive.
    ///
    /// # Errors
    /// Returns [`Error::Transport`] when the request could not be completed.
    fn execute(&self, request: Request<()>) -> Result<Response<Box<dyn BodyStream>>>;
}

/// Shared transport used when a configuration carries no client override.
pub(crate) static SHARED_CLIENT: LazyLock<ReqwestClient> = LazyLock::new(ReqwestClient::new);

/// Default blocking transport backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestClient {
    inner: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Create a client with reqwest's default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing `reqwest` client, keeping its pool and timeouts.
    #[must_use]
    pub const fn from_client(inner: reqwest::blocking::Client) -> Self {
        Self { inner }
    }
}

impl HttpClient for ReqwestClient {
    fn execute(&self, request: Request<()>) -> Result<Response<Box<dyn BodyStream>>> {
        let (parts, ()) = request.into_parts();
        let response = self
            .inner
            .request(parts.method, parts.uri.to_string())
            .headers(parts.headers)
            .send()
            .map_err(|e| Error::Transport(Box::new(e)))?;

        let mut builder = Response::builder().status(response.status());
        if let Some(headers) = builder.headers_mut() {
            headers.clone_from(response.headers());
        }
        let body: Box<dyn BodyStream> = Box::new(ReqwestBody { inner: response });
        builder
            .body(body)
            .map_err(|e| Error::Transport(Box::new(e)))
    }
}

/// Streaming body of a `reqwest` response. The connection itself is returned
/// to the pool when the value is dropped.
struct ReqwestBody {
    inner: reqwest::blocking::Response,
}

impl Read for ReqwestBody {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.inner.read(buf)
    }
}

impl BodyStream for ReqwestBody {
    fn close(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
