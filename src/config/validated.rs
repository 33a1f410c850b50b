//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Keep-alive timer period
    pub heartbeat_interval: Duration,

    /// Stop after this many events. `None` runs until shutdown.
    pub max_events: Option<u64>,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let max_events = self
            .max_events
            .map_or_else(|| "unlimited".to_string(), |n| n.to_string());

        write!(
            f,
            "Config {{ heartbeat_interval: {}s, max_events: {} }}",
            self.heartbeat_interval.as_secs(),
            max_events,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The heartbeat interval is zero or too large
    /// - `max_events` is zero
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let heartbeat_interval = Self::resolve_heartbeat_interval(cli, toml)?;
        let max_events = Self::resolve_max_events(cli, toml)?;

        Ok(Self {
            heartbeat_interval,
            max_events,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_heartbeat_interval(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .heartbeat_interval
            .or_else(|| toml.and_then(|t| t.monitor.heartbeat_interval))
            .unwrap_or(defaults::HEARTBEAT_INTERVAL_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: field::HEARTBEAT_INTERVAL,
                reason: "must be greater than 0".to_string(),
            });
        }

        if seconds > defaults::MAX_HEARTBEAT_INTERVAL_SECS {
            return Err(ConfigError::InvalidDuration {
                field: field::HEARTBEAT_INTERVAL,
                reason: format!("must not exceed {}s", defaults::MAX_HEARTBEAT_INTERVAL_SECS),
            });
        }

        Ok(Duration::from_secs(seconds))
    }

    fn resolve_max_events(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Option<u64>, ConfigError> {
        let max_events = cli
            .max_events
            .or_else(|| toml.and_then(|t| t.monitor.max_events));

        if max_events == Some(0) {
            return Err(ConfigError::InvalidCount {
                field: field::MAX_EVENTS,
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(max_events)
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
