//! LaMetric notification library
//!
//! Pushes notification payloads to LaMetric displays over their local HTTP
//! API, fanning one notification out to every configured device at once.

pub mod api_client;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod lametric;

// Re-export commonly used types for convenience
pub use api_client::{ClientError, HttpClient, HttpClientConfig};
pub use config::{Config, Device};
pub use dispatch::{DispatchReport, Dispatcher, MultiError};
pub use lametric::{LaMetricClient, Notification, NotificationClient};
