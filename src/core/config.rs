//! Movement configuration
//!
//! Builder-style settings shared by the movement policies, loadable from RON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::input::TriggerMode;
use crate::movement::WanderMode;

/// Movement configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Travel speed in world units per second
    pub speed: f32,
    /// How random movers pick where to go
    pub wander_mode: WanderMode,
    /// Seed for random movers, so runs are reproducible
    pub random_seed: u64,
    /// Key transition that drives keyboard movers
    pub trigger_mode: TriggerMode,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            speed: 64.0,
            wander_mode: WanderMode::Step,
            random_seed: 0,
            trigger_mode: TriggerMode::OnKeyDown,
        }
    }
}

impl MovementConfig {
    /// Set travel speed
    #[must_use]
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Set wander mode
    #[must_use]
    pub fn with_wander_mode(mut self, mode: WanderMode) -> Self {
        self.wander_mode = mode;
        self
    }

    /// Set the random seed
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    /// Set keyboard trigger mode
    #[must_use]
    pub fn with_trigger_mode(mut self, mode: TriggerMode) -> Self {
        self.trigger_mode = mode;
        self
    }

    /// Check that every value is usable
    ///
    /// # Errors
    ///
    /// Returns an error if the speed is negative or not finite
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(ConfigError::InvalidValue(format!(
                "speed must be a finite, non-negative number (got {})",
                self.speed
            )));
        }
        Ok(())
    }

    /// Parse and validate a configuration from RON text.
    ///
    /// Missing fields keep their default values.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid RON or a value is out of range
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self =
            ron::from_str(source).map_err(|e| ConfigError::DeserializeError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are invalid
    pub fn load_ron(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_ron_str(&content)
    }
}

/// Errors that can occur while loading a configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// IO error
    IoError(String),
    /// Deserialization error
    DeserializeError(String),
    /// A value is out of range
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {e}"),
            Self::DeserializeError(e) => write!(f, "Deserialization error: {e}"),
            Self::InvalidValue(e) => write!(f, "Invalid value: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}
