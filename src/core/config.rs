//! Trauma configuration with documented constants
//!
//! The consequence handlers read their tuning from here: how organ damage
//! turns into pain, and how long an organ's destruction slows the body down.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{Result, TraumaError};

/// Configuration for organ damage consequences
///
/// Loaded from TOML when present; every field falls back to its default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TraumaConfig {
    // === PAIN ===
    /// Identifier of the pain modifier that organ damage writes on a body part
    ///
    /// One modifier per part, so repeated organ damage in the same part
    /// replaces the previous amount instead of stacking.
    pub organ_damage_pain_identifier: String,

    /// Divisor applied to missing integrity before it becomes pain
    ///
    /// At 2, a part whose organs are missing 60 integrity in total
    /// carries 30 traumatic pain.
    pub pain_divisor: i64,

    // === DESTRUCTION ===
    /// Stun duration (seconds) used when a body's nerve system does not set one
    pub default_stun_time: f32,

    /// Slowdown lasts this many times the stun duration
    ///
    /// At 4.0, a 2 second paralysis is followed by 8 seconds of reduced speed.
    pub slowdown_time_multiplier: f32,

    /// Walk speed multiplier while slowed (1.0 = unaffected)
    pub walk_speed_slowdown: f32,

    /// Run speed multiplier while slowed (1.0 = unaffected)
    pub run_speed_slowdown: f32,
}

impl Default for TraumaConfig {
    fn default() -> Self {
        Self {
            organ_damage_pain_identifier: "OrganDamage".to_string(),
            pain_divisor: 2,
            default_stun_time: 2.0,
            slowdown_time_multiplier: 4.0,
            walk_speed_slowdown: 0.6,
            run_speed_slowdown: 0.6,
        }
    }
}

impl TraumaConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.organ_damage_pain_identifier.is_empty() {
            return Err("organ_damage_pain_identifier must not be empty".into());
        }

        if self.pain_divisor <= 0 {
            return Err(format!("pain_divisor ({}) must be positive", self.pain_divisor));
        }

        if self.default_stun_time < 0.0 || self.slowdown_time_multiplier < 0.0 {
            return Err("Durations must not be negative".into());
        }

        // Speed multipliers outside (0, 1] would stop or speed up the body
        for (name, value) in [
            ("walk_speed_slowdown", self.walk_speed_slowdown),
            ("run_speed_slowdown", self.run_speed_slowdown),
        ] {
            if value <= 0.0 || value > 1.0 {
                return Err(format!("{} ({}) must be in (0, 1]", name, value));
            }
        }

        Ok(())
    }

    /// Parse and validate a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TraumaConfig = toml::from_str(content)?;
        config.validate().map_err(TraumaError::Validation)?;
        Ok(config)
    }
}

/// Load config from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> Result<TraumaConfig> {
    let content = fs::read_to_string(path.as_ref())?;
    TraumaConfig::from_toml_str(&content)
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<TraumaConfig> = OnceLock::new();

/// Get the global trauma config (initializes with defaults if not set)
pub fn config() -> &'static TraumaConfig {
    CONFIG.get_or_init(TraumaConfig::default)
}

/// Set the global trauma config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: TraumaConfig) -> std::result::Result<(), TraumaConfig> {
    CONFIG.set(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(TraumaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = TraumaConfig::from_toml_str("slowdown_time_multiplier = 2.5").unwrap();
        assert_eq!(config.slowdown_time_multiplier, 2.5);
        assert_eq!(config.pain_divisor, 2);
        assert_eq!(config.organ_damage_pain_identifier, "OrganDamage");
    }

    #[test]
    fn test_invalid_speed_rejected() {
        let err = TraumaConfig::from_toml_str("walk_speed_slowdown = 0.0").unwrap_err();
        assert!(matches!(err, TraumaError::Validation(_)));
    }

    #[test]
    fn test_zero_divisor_rejected() {
        let config = TraumaConfig {
            pain_divisor: 0,
            ..TraumaConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let err = TraumaConfig::from_toml_str("pain_divisor = \"two\"").unwrap_err();
        assert!(matches!(err, TraumaError::TomlError(_)));
    }
}
