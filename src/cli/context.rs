//! CLI Context for dependency injection and shared state
//!
//! This module provides the CliContext abstraction that loads the
//! configuration once and hands it to every handler.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;

/// CLI execution context containing shared dependencies and configuration
#[derive(Clone)]
pub struct CliContext {
    pub config_path: PathBuf,
    pub verbose: bool,
    pub config: Arc<Config>,
}

impl CliContext {
    /// Create a new CLI context by loading the configuration at `config_path`
    pub fn new(config_path: PathBuf, verbose: bool) -> Result<Self> {
        let config = Arc::new(Config::load(&config_path)?);

        Ok(Self {
            config_path,
            verbose,
            config,
        })
    }

    /// Initialize logging subsystem based on verbosity and configuration
    pub fn init_logging(&self) -> Result<()> {
        let log_level: &str = if self.verbose {
            "debug"
        } else {
            &self.config.log_level
        };

        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive(log_level.parse().unwrap_or_else(|_| {
                        tracing::Level::INFO.into()
                    })),
            )
            .init();

        if self.verbose {
            tracing::debug!("Verbose logging enabled");
            tracing::debug!("Config path: {:?}", self.config_path);
            tracing::debug!("Devices configured: {}", self.config.devices.len());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_context_creation() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yml");
        std::fs::write(&path, "devices:\n  - addr: display\n    token: abc\n").unwrap();

        let context = CliContext::new(path.clone(), false).unwrap();
        assert_eq!(context.config_path, path);
        assert!(!context.verbose);
        assert_eq!(context.config.devices.len(), 1);
    }

    #[test]
    fn test_context_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let context_result = CliContext::new(temp_dir.path().join("nope.yml"), true);
        assert!(context_result.is_err());
    }
}
