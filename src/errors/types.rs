//! Application error types
//!
//! Errors raised outside a single API call: loading configuration, reading
//! files and validating command arguments. Per-request failures live in
//! [`ClientError`](crate::api_client::ClientError).

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::api_client::ClientError;
use crate::dispatch::MultiError;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("File I/O error for '{path}': {operation}")]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Invalid command argument '{argument}': {reason}")]
    InvalidArgument { argument: String, reason: String },

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Dispatch(#[from] MultiError),
}

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn io_with_source(
        path: impl AsRef<Path>,
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            operation: operation.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn invalid_argument(argument: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error comes from configuration rather than the network
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Config { .. } | Self::ConfigNotFound { .. })
    }
}
