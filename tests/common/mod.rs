//! Common test utilities and helpers
//!
//! Builders for running the `lametric-notify` binary against a temporary
//! configuration file.

#![allow(dead_code)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test command builder for the lametric-notify CLI
pub struct TestCommand {
    cmd: Command,
}

impl TestCommand {
    /// Create a new test command for the lametric-notify binary
    pub fn new() -> Self {
        let mut cmd = Command::cargo_bin("lametric-notify")
            .expect("Failed to find lametric-notify binary");
        cmd.env_remove("LAMETRIC_CONFIG").env_remove("RUST_LOG");
        Self { cmd }
    }

    /// Add arguments to the command
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for arg in args {
            self.cmd.arg(arg.as_ref());
        }
        self
    }

    /// Add a single argument to the command
    pub fn arg<S: AsRef<str>>(mut self, arg: S) -> Self {
        self.cmd.arg(arg.as_ref());
        self
    }

    /// Set environment variable
    pub fn env<K, V>(mut self, key: K, val: V) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.cmd.env(key.as_ref(), val.as_ref());
        self
    }

    /// Execute and expect success
    pub fn expect_success(mut self) -> TestAssertion {
        let assert = self.cmd.assert().success();
        TestAssertion { assert }
    }

    /// Execute and expect failure
    pub fn expect_failure(mut self) -> TestAssertion {
        let assert = self.cmd.assert().failure();
        TestAssertion { assert }
    }
}

impl Default for TestCommand {
    fn default() -> Self {
        Self::new()
    }
}

/// Test assertion wrapper with convenient methods
pub struct TestAssertion {
    assert: assert_cmd::assert::Assert,
}

impl TestAssertion {
    /// Assert stdout contains text
    pub fn stdout_contains<S: AsRef<str>>(self, text: S) -> Self {
        let assert = self.assert.stdout(predicate::str::contains(text.as_ref()));
        Self { assert }
    }

    /// Assert stderr contains text
    pub fn stderr_contains<S: AsRef<str>>(self, text: S) -> Self {
        let assert = self.assert.stderr(predicate::str::contains(text.as_ref()));
        Self { assert }
    }

    /// Assert stdout does not contain text
    pub fn stdout_lacks<S: AsRef<str>>(self, text: S) -> Self {
        let assert = self
            .assert
            .stdout(predicate::str::contains(text.as_ref()).not());
        Self { assert }
    }

    pub fn stderr_lacks<S: AsRef<str>>(self, text: S) -> Self {
        let assert = self
            .assert
            .stderr(predicate::str::contains(text.as_ref()).not());
        Self { assert }
    }

    /// Finish the assertion
    pub fn done(self) -> assert_cmd::assert::Assert {
        self.assert
    }
}

/// Temporary directory holding a config file
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub config_path: PathBuf,
}

impl TestEnvironment {
    /// Create an environment whose config lists the given `(address, token)` pairs
    pub fn with_devices(devices: &[(&str, &str)]) -> Self {
        let mut yaml = String::from("devices:\n");
        if devices.is_empty() {
            yaml = String::from("devices: []\n");
        }
        for (address, token) in devices {
            yaml.push_str(&format!("  - addr: \"{address}\"\n    token: \"{token}\"\n"));
        }
        Self::with_yaml(&yaml)
    }

    /// Create an environment with raw YAML config content
    pub fn with_yaml(yaml: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("config.yml");
        std::fs::write(&config_path, yaml).expect("Failed to write config");
        Self {
            temp_dir,
            config_path,
        }
    }

    /// Create a command pointed at this environment's config
    pub fn command(&self) -> TestCommand {
        TestCommand::new()
            .arg("--config")
            .arg(self.config_path.to_string_lossy())
    }
}
