//! Error types for object opens

use http::{HeaderMap, StatusCode};
use thiserror::Error;

/// Common result type for open operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by [`open`](crate::open::open)
#[derive(Debug, Error)]
pub enum Error {
    /// The URL could not be turned into a GET request.
    #[error("invalid url: {0}")]
    InvalidUrl(#[source] http::Error),

    /// The request never completed: network, DNS, or TLS failure at the
    /// transport level. The underlying client error is preserved as the
    /// source, never substituted by a response error.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The request completed but the response status was not 200. Any other
    /// status, including other 2xx codes, lands here.
    #[error("unwanted http status {}: {body:?}", .status.as_u16())]
    Status {
        status: StatusCode,
        headers: HeaderMap,
        body: String,
    },
}

impl Error {
    /// Status code of the error response, if this is a status error.
    #[must_use]
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
