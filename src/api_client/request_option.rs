//! Composable request options
//!
//! A [`RequestOption`] mutates an outgoing [`reqwest::Request`] before it is
//! sent. Options are applied strictly in order, so a later option overwrites
//! whatever an earlier option wrote to the same field. Any option may fail,
//! which aborts the whole build.

use std::fmt;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Request};
use serde::Serialize;

use super::error::ClientError;

type ApplyFn = dyn Fn(&mut Request) -> Result<(), ClientError> + Send + Sync;

/// A single mutation applied to an in-flight request
#[derive(Clone)]
pub struct RequestOption {
    name: &'static str,
    apply: Arc<ApplyFn>,
}

impl RequestOption {
    /// Create a custom option from a closure
    pub fn new<F>(name: &'static str, apply: F) -> Self
    where
        F: Fn(&mut Request) -> Result<(), ClientError> + Send + Sync + 'static,
    {
        Self {
            name,
            apply: Arc::new(apply),
        }
    }

    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Apply this option to a request
    pub fn apply(&self, request: &mut Request) -> Result<(), ClientError> {
        (self.apply)(request)
    }
}

impl fmt::Debug for RequestOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestOption")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Apply options in order, stopping at the first failure
pub fn apply_all<'a, I>(request: &mut Request, options: I) -> Result<(), ClientError>
where
    I: IntoIterator<Item = &'a RequestOption>,
{
    for option in options {
        option.apply(request).map_err(|err| {
            tracing::debug!(option = option.name(), error = %err, "request option failed");
            err
        })?;
    }
    Ok(())
}

/// Set the request method
pub fn method(method: Method) -> RequestOption {
    RequestOption::new("method", move |req| {
        *req.method_mut() = method.clone();
        Ok(())
    })
}

/// Set the request path, replacing any path already on the url
pub fn path(path: impl Into<String>) -> RequestOption {
    let path = path.into();
    RequestOption::new("path", move |req| {
        req.url_mut().set_path(&path);
        Ok(())
    })
}

/// Set the request path from format arguments
///
/// ```
/// use lametric_notify::api_client::path_fmt;
///
/// let option = path_fmt(format_args!("/api/v2/device/notifications/{}", 42));
/// assert_eq!(option.name(), "path");
/// ```
pub fn path_fmt(args: fmt::Arguments<'_>) -> RequestOption {
    path(fmt::format(args))
}

/// Set a header, replacing any existing value for the same key
pub fn header(key: impl Into<String>, value: impl Into<String>) -> RequestOption {
    let key = key.into();
    let value = value.into();
    RequestOption::new("header", move |req| {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| ClientError::build(format!("invalid header name '{key}'"), e))?;
        let value = HeaderValue::from_str(&value)
            .map_err(|e| ClientError::build(format!("invalid value for header '{key}'"), e))?;
        req.headers_mut().insert(name, value);
        Ok(())
    })
}

/// Set basic auth credentials on the `Authorization` header
pub fn basic_auth(username: impl Into<String>, password: impl Into<String>) -> RequestOption {
    let credentials = format!("{}:{}", username.into(), password.into());
    RequestOption::new("basic_auth", move |req| {
        let encoded = STANDARD.encode(credentials.as_bytes());
        let mut value = HeaderValue::from_str(&format!("Basic {encoded}"))
            .map_err(|e| ClientError::build("invalid basic auth credentials", e))?;
        value.set_sensitive(true);
        req.headers_mut().insert(AUTHORIZATION, value);
        Ok(())
    })
}

/// Serialize `body` as the JSON request body and set the content type
pub fn json_body<T>(body: T) -> RequestOption
where
    T: Serialize + Send + Sync + 'static,
{
    RequestOption::new("json_body", move |req| {
        let contents = serde_json::to_vec(&body)
            .map_err(|e| ClientError::build("failed to serialize json body", e))?;
        req.headers_mut().insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        *req.body_mut() = Some(contents.into());
        Ok(())
    })
}
