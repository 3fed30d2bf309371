use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::api_client::{HttpClientConfig, RetryInterceptor, RetryPolicy, TracingInterceptor};
use crate::errors::{AppError, AppResult};

/// Default location of the configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "_config/config.yml";

/// Root configuration for the notifier
///
/// Loaded from YAML:
///
/// ```yaml
/// devices:
///   - addr: 192.168.1.20
///     token: 6f9c...
///   - addr: office-display.local
///     token: 1b2d...
/// timeout_secs: 10
/// log_level: info
/// retry:
///   max_attempts: 3
///   base_delay_ms: 200
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub devices: Vec<Device>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Retry settings; no retries when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry: Option<RetrySettings>,
}

/// One LaMetric display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// `host`, `host:port` or a full base url
    #[serde(rename = "addr", alias = "address")]
    pub address: String,
    /// Device API key, sent as the basic auth password
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrySettings {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_attempts() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    100
}

impl Default for Config {
    fn default() -> Self {
        Config {
            devices: Vec::new(),
            timeout_secs: None,
            log_level: default_log_level(),
            retry: None,
        }
    }
}

impl Device {
    pub fn new(address: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            token: token.into(),
        }
    }

    /// Token with everything but the first four characters hidden
    pub fn masked_token(&self) -> String {
        let visible: String = self.token.chars().take(4).collect();
        if self.token.chars().count() <= 4 {
            "****".to_string()
        } else {
            format!("{visible}****")
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ConfigNotFound`] when the file does not exist and
    /// [`AppError::Config`] when it cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                AppError::ConfigNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                AppError::io_with_source(path, "read config file", e)
            }
        })?;
        let config = Self::from_yaml(&content)?;
        tracing::debug!(
            path = %path.display(),
            devices = config.devices.len(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(content: &str) -> AppResult<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| AppError::config_with_source("Failed to parse config file", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make every request fail before it is sent
    pub fn validate(&self) -> AppResult<()> {
        if self.timeout_secs == Some(0) {
            return Err(AppError::config("timeout_secs must be at least 1"));
        }
        if let Some(retry) = &self.retry {
            if retry.max_attempts == 0 {
                return Err(AppError::config("retry.max_attempts must be at least 1"));
            }
        }
        Ok(())
    }

    /// Client settings shared by every device call
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut config = HttpClientConfig {
            timeout_secs: self.timeout_secs.or(Some(30)),
            ..Default::default()
        };

        if let Some(retry) = &self.retry {
            config = config.with_interceptor(RetryInterceptor::new(RetryPolicy::exponential(
                retry.max_attempts,
                retry.base_delay_ms,
            )));
        }

        // innermost, so every retry attempt is logged on its own
        config.with_interceptor(TracingInterceptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_devices() {
        let config = Config::from_yaml(
            r#"
devices:
  - addr: 192.168.1.20
    token: abcdef
  - address: office.local:9000
    token: xyz
"#,
        )
        .unwrap();

        assert_eq!(
            config.devices,
            vec![
                Device::new("192.168.1.20", "abcdef"),
                Device::new("office.local:9000", "xyz"),
            ]
        );
        assert_eq!(config.log_level, "info");
        assert!(config.retry.is_none());
    }

    #[test]
    fn test_parse_retry_defaults() {
        let config = Config::from_yaml("retry: {}\ntimeout_secs: 5\n").unwrap();
        let retry = config.retry.unwrap();
        assert_eq!(retry.max_attempts, 3);
        assert_eq!(retry.base_delay_ms, 100);
        assert_eq!(config.timeout_secs, Some(5));
        assert!(config.devices.is_empty());
    }

    #[test]
    fn test_parse_error() {
        let err = Config::from_yaml("devices: [ {addr: 1").unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_zero_retry_attempts_rejected() {
        let err = Config::from_yaml("retry:\n  max_attempts: 0\n").unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("retry.max_attempts"));

        let config = Config::from_yaml("retry:\n  max_attempts: 1\n").unwrap();
        assert_eq!(config.retry.unwrap().max_attempts, 1);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = Config::from_yaml("timeout_secs: 0\n").unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yml");
        let yaml = "devices:\n  - addr: display\n    token: t\nretry:\n  max_attempts: 0\n";
        fs::write(&path, yaml).unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = Config::load(temp_dir.path().join("missing.yml")).unwrap_err();
        assert!(matches!(err, AppError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yml");
        fs::write(&path, "devices:\n  - addr: display\n    token: t0k3n\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.devices[0].address, "display");
    }

    #[test]
    fn test_http_client_config_interceptors() {
        let mut config = Config::default();
        assert_eq!(config.http_client_config().interceptors.len(), 1);

        config.retry = Some(RetrySettings {
            max_attempts: 2,
            base_delay_ms: 10,
        });
        config.timeout_secs = Some(3);
        let http = config.http_client_config();
        assert_eq!(http.interceptors.len(), 2);
        assert_eq!(http.timeout_secs, Some(3));
    }

    #[test]
    fn test_masked_token() {
        assert_eq!(Device::new("a", "abcdef").masked_token(), "abcd****");
        assert_eq!(Device::new("a", "abc").masked_token(), "****");
    }
}
