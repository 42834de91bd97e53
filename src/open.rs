//! Object Opener: signed GET returning a metrics-decorated stream

use crate::client::{BodyStream, HttpClient, SHARED_CLIENT};
use crate::config::{Config, DEFAULT_CONFIG};
use crate::error::{Error, Result};
use crate::metrics::MetricsReader;
use chrono::Utc;
use http::{HeaderValue, Method, Request, Response, StatusCode, header};
use std::io::Read;
use std::time::Instant;

/// RFC 7231 HTTP-date, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Request the object at `url`. An HTTP status other than 200 is considered
/// an error.
///
/// The request is dated, signed with the configuration's keys, and sent
/// through the configured client (or the shared default). The call blocks
/// until the response headers arrive; the returned stream reports transfer
/// metrics to the configured callback after every read.
///
/// If `config` is `None`, [`DEFAULT_CONFIG`] is used.
///
/// # Errors
/// [`Error::InvalidUrl`] if `url` does not parse, [`Error::Transport`] if the
/// request never completes, [`Error::Status`] for any non-200 response.
pub fn open(url: &str, config: Option<&Config>) -> Result<MetricsReader> {
    let config = config.unwrap_or(&DEFAULT_CONFIG);

    let mut request = Request::builder()
        .method(Method::GET)
        .uri(url)
        .body(())
        .map_err(Error::InvalidUrl)?;
    let date = Utc::now().format(HTTP_DATE_FORMAT).to_string();
    request.headers_mut().insert(
        header::DATE,
        HeaderValue::from_str(&date).expect("HTTP-date is ASCII"),
    );
    config.signer.sign(&mut request, &config.keys);

    let client: &dyn HttpClient = match &config.client {
        Some(client) => client.as_ref(),
        None => &*SHARED_CLIENT,
    };

    tracing::debug!(%url, "dispatching object GET");
    let start = Instant::now();
    let response = client.execute(request)?;
    // Headers-received time, deliberately excluding body transfer.
    let total_time = start.elapsed();

    if response.status() != StatusCode::OK {
        return Err(response_error(response));
    }

    let (_, body) = response.into_parts();
    Ok(MetricsReader::new(
        body,
        config.metrics_callback.clone(),
        total_time,
    ))
}

/// Drain a non-200 response into a status error carrying its headers and
/// body for diagnostics.
fn response_error(response: Response<Box<dyn BodyStream>>) -> Error {
    let (parts, mut body) = response.into_parts();
    tracing::debug!(status = %parts.status, "unwanted http status");

    let mut buf = Vec::new();
    // An unreadable error body still yields a status error.
    let _ = body.read_to_end(&mut buf);
    let _ = body.close();

    Error::Status {
        status: parts.status,
        headers: parts.headers,
        body: String::from_utf8_lossy(&buf).into_owned(),
    }
}
