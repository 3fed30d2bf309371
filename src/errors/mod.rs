//! Centralized error handling module
//!
//! Library code returns [`AppError`]; the binary converts it into
//! `anyhow::Error` at the command boundary.

pub mod types;

pub use types::{AppError, AppResult};
