//! Spring configuration
//!
//! `SpringConfig` bundles the physical parameters and rest policy of a spring.
//! It is what the driver and commands pass around and what gets persisted as
//! JSON. The integrator accepts any values; `validate` is the only place bad
//! numbers are rejected.

use crate::physics::integrator::{
    DEFAULT_DISPLACEMENT_FROM_REST_THRESHOLD, DEFAULT_FRICTION, DEFAULT_REST_SPEED_THRESHOLD,
    DEFAULT_TENSION,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading or validating a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {field}: {value}")]
    InvalidValue { field: &'static str, value: f64 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Spring physics configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpringConfig {
    /// Stiffness; 0 means no restoring force
    pub tension: f64,
    /// Damping
    pub friction: f64,
    /// Speed at or below which the spring may rest
    pub rest_speed_threshold: f64,
    /// Distance from the end value at or below which the spring may rest
    pub displacement_from_rest_threshold: f64,
    /// End the motion as soon as the value passes the end value
    pub overshoot_clamping: bool,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            tension: DEFAULT_TENSION,
            friction: DEFAULT_FRICTION,
            rest_speed_threshold: DEFAULT_REST_SPEED_THRESHOLD,
            displacement_from_rest_threshold: DEFAULT_DISPLACEMENT_FROM_REST_THRESHOLD,
            overshoot_clamping: false,
        }
    }
}

impl SpringConfig {
    /// Config with the given tension and friction and default rest policy
    pub fn new(tension: f64, friction: f64) -> Self {
        Self {
            tension,
            friction,
            ..Self::default()
        }
    }

    /// Builder-style overshoot clamping toggle
    pub fn with_overshoot_clamping(mut self, enabled: bool) -> Self {
        self.overshoot_clamping = enabled;
        self
    }

    /// Check that every value is finite and that tension and both thresholds
    /// are non-negative. Negative friction is allowed.
    pub fn validate(&self) -> ConfigResult<()> {
        let non_negative = [
            ("tension", self.tension),
            ("restSpeedThreshold", self.rest_speed_threshold),
            (
                "displacementFromRestThreshold",
                self.displacement_from_rest_threshold,
            ),
        ];

        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }

        if !self.friction.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "friction",
                value: self.friction,
            });
        }

        Ok(())
    }

    /// Load and validate a configuration from a JSON file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SpringConfig = serde_json::from_str(&content)?;
        config.validate()?;

        tracing::debug!(
            "Loaded spring config from {:?}: tension={}, friction={}",
            path,
            config.tension,
            config.friction
        );

        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let data = serde_json::to_vec_pretty(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }
}
