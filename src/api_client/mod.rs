//! Generic HTTP API client
//!
//! This module provides the plumbing every device call goes through:
//!
//! - **RequestOption**: ordered, fallible mutations that compose a request
//! - **ResponseFilter**: turns unacceptable statuses into typed errors
//! - **Interceptor**: middleware chain for retries and tracing
//! - **HttpClient**: base address + defaults, exposing `send`, `bytes`,
//!   `json` and `discard`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lametric_notify::api_client::{method, path, HttpClient, HttpClientConfig};
//! use reqwest::Method;
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let client = HttpClient::new("http://192.168.1.20:8080", HttpClientConfig::default())?;
//! let (meta, body) = client
//!     .json::<serde_json::Value>(&[method(Method::GET), path("/api/v2/device")])
//!     .await?;
//! println!("{} {}", meta.status, body);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod interceptor;
pub mod request_option;
pub mod response_filter;

pub use client::{HttpClient, HttpClientConfig, ResponseMeta};
pub use error::ClientError;
pub use interceptor::{Interceptor, Next, RetryInterceptor, RetryPolicy, TracingInterceptor};
pub use request_option::{
    apply_all, basic_auth, header, json_body, method, path, path_fmt, RequestOption,
};
pub use response_filter::{
    accept_redirects_as_success, default_filter, invalid_status_as_error, ResponseFilter,
};
