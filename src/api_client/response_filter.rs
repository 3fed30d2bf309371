//! Response filters
//!
//! A filter post-processes the outcome of a single HTTP call. The default
//! filter turns any status outside 200-299 into [`ClientError::Status`];
//! callers can swap in their own through
//! [`HttpClientConfig::response_filter`](super::HttpClientConfig).

use std::sync::Arc;

use reqwest::Response;

use super::error::ClientError;

/// Post-processes a response or transport error
pub type ResponseFilter =
    Arc<dyn Fn(Result<Response, ClientError>) -> Result<Response, ClientError> + Send + Sync>;

/// The filter every client uses unless configured otherwise
pub fn default_filter() -> ResponseFilter {
    Arc::new(invalid_status_as_error)
}

/// Treat any status outside 200-299 as an error
///
/// Transport errors pass through unchanged. On a rejected status the
/// response, including its body, is dropped.
pub fn invalid_status_as_error(
    result: Result<Response, ClientError>,
) -> Result<Response, ClientError> {
    reject_status_outside(result, 200..=299)
}

/// Looser filter that also accepts 3xx responses
pub fn accept_redirects_as_success(
    result: Result<Response, ClientError>,
) -> Result<Response, ClientError> {
    reject_status_outside(result, 200..=399)
}

fn reject_status_outside(
    result: Result<Response, ClientError>,
    accepted: std::ops::RangeInclusive<u16>,
) -> Result<Response, ClientError> {
    let response = result?;
    let status = response.status();
    if accepted.contains(&status.as_u16()) {
        return Ok(response);
    }
    Err(ClientError::Status {
        status,
        url: response.url().to_string(),
    })
}
