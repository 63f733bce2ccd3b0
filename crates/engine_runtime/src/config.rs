//! Runtime configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::RuntimeError;

/// Configuration for a script runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Name of the script domain, used in logs.
    pub domain_name: String,
    /// Target ticks per second.
    pub tick_rate: f64,
    /// Maximum number of ticks to run (0 = unlimited).
    pub max_ticks: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            domain_name: "script_runtime".to_string(),
            tick_rate: 60.0,
            max_ticks: 0,
        }
    }
}

impl RuntimeConfig {
    /// Create a config with the given domain name and default timing.
    #[must_use]
    pub fn new(domain_name: impl Into<String>) -> Self {
        Self {
            domain_name: domain_name.into(),
            ..Self::default()
        }
    }

    /// Override the tick rate.
    #[must_use]
    pub fn with_tick_rate(mut self, tick_rate: f64) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Stop after `max_ticks` ticks (0 = unlimited).
    #[must_use]
    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    /// Parse and validate a JSON config. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::ConfigParse`] for malformed JSON and
    /// [`RuntimeError::InvalidConfig`] for unusable values.
    pub fn from_json_str(json: &str) -> Result<Self, RuntimeError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::ConfigIo`] if the file cannot be read, or the
    /// errors of [`RuntimeConfig::from_json_str`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RuntimeError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| RuntimeError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check that the values are usable.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::InvalidConfig`] describing the first problem.
    pub fn validate(&self) -> Result<(), RuntimeError> {
        if !(self.tick_rate.is_finite() && self.tick_rate > 0.0) {
            return Err(RuntimeError::InvalidConfig(format!(
                "tick_rate must be a positive number, got {}",
                self.tick_rate
            )));
        }
        match Duration::try_from_secs_f64(1.0 / self.tick_rate) {
            Ok(interval) if !interval.is_zero() => {}
            _ => {
                return Err(RuntimeError::InvalidConfig(format!(
                    "tick_rate {} has no representable tick interval",
                    self.tick_rate
                )));
            }
        }
        if self.domain_name.trim().is_empty() {
            return Err(RuntimeError::InvalidConfig(
                "domain_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Wall-clock time between ticks. Only meaningful for a config that
    /// passed [`RuntimeConfig::validate`].
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate)
    }

    /// Fixed timestep handed to scripts, in seconds.
    #[must_use]
    pub fn fixed_dt(&self) -> f32 {
        (1.0 / self.tick_rate) as f32
    }
}
