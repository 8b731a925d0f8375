//! Shared plumbing for dispatching a request and interpreting the response.

use reqwest::blocking::{Client, Response};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::params::Query;

/// Maps a non-2xx response to [`Error::Http`], keeping the status code,
/// final URL, and body for the caller.
pub(crate) fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().unwrap_or_default();
    warn!(target: "request", "{} returned {}", url, status);

    Err(Error::Http {
        status: status.as_u16(),
        url,
        body,
    })
}

/// Parses a response body as JSON. Some endpoints (DONKI in particular)
/// answer an empty body when nothing matched the query; that maps to an
/// empty JSON object rather than a decode error.
pub(crate) fn read_json(response: Response) -> Result<Value> {
    let text = response.text()?;
    if text.trim().is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    Ok(serde_json::from_str(&text)?)
}

/// One GET round trip: dispatch, status check, JSON decode.
pub(crate) fn get_json(client: &Client, url: &str, query: &Query) -> Result<Value> {
    debug!(target: "request", "GET {}", url);

    let mut request = client.get(url);
    if !query.is_empty() {
        request = request.query(query.pairs());
    }

    read_json(check_status(request.send()?)?)
}
