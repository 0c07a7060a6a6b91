//! Coalescer configuration.
//!
//! Only the browser scheduler reads these values; the core engine has no
//! tunables. Config arrives from JavaScript as a plain object, so field names
//! are camelCase and every field is optional.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts::DEFAULT_FALLBACK_INTERVAL_MS;
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Period of the timer fallback used when `requestAnimationFrame` is unavailable.
    pub fallback_interval_ms: u32,
    /// Always use the timer, even when `requestAnimationFrame` exists.
    pub force_timer_fallback: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { fallback_interval_ms: DEFAULT_FALLBACK_INTERVAL_MS, force_timer_fallback: false }
    }
}

impl Config {
    /// Parse and validate a JSON config object. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::ZeroInterval`] when `fallbackIntervalMs` is zero.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroInterval`] when the fallback interval is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fallback_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }
}
