//! Controller tuning values.
//!
//! All values use metric units (meters, seconds, radians) unless the field
//! name says otherwise. Every field has a default, so a TOML file only needs
//! the values it overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;
use stride_core::{Result, StrideError};

/// Configuration for the movement controller, fixed for the controller's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    // ========================================================================
    // Look
    // ========================================================================
    /// Radians of rotation per pixel of pointer motion.
    pub look_sensitivity: f32,

    /// Camera pitch limit in degrees, applied symmetrically up and down.
    pub pitch_limit_degrees: f32,

    // ========================================================================
    // Ground movement (meters/second)
    // ========================================================================
    pub walk_speed: f32,
    pub sprint_speed: f32,
    pub crouch_speed: f32,

    // ========================================================================
    // Vertical
    // ========================================================================
    /// Upward velocity set on jump (meters/second).
    pub jump_velocity: f32,

    /// Gravity acceleration (meters/second²).
    pub gravity: f32,

    /// Jump on every grounded tick while jump is held, not only on the press.
    pub bunny_hop: bool,

    // ========================================================================
    // Air movement
    // ========================================================================
    /// Highest speed along the wish direction that air acceleration can reach.
    pub air_cap: f32,

    /// Air acceleration factor, multiplied by `air_move_speed`.
    pub air_accel: f32,

    /// Wish speed while airborne.
    pub air_move_speed: f32,

    // ========================================================================
    // Headbob
    // ========================================================================
    /// Camera displacement at the peak of a bob (meters).
    pub headbob_amplitude: f32,

    /// Bob cycles per meter travelled, scaled by 2π.
    pub headbob_frequency: f32,

    // ========================================================================
    // Crouch
    // ========================================================================
    /// Capsule height while standing (meters).
    pub standing_height: f32,

    /// How far the head and capsule drop when crouched (meters).
    pub crouch_depth: f32,

    /// Rate at which head offset and capsule height approach their targets
    /// (meters/second).
    pub crouch_rate: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            look_sensitivity: 0.006,
            pitch_limit_degrees: 60.0,

            walk_speed: 5.0,
            sprint_speed: 8.0,
            crouch_speed: 3.0,

            jump_velocity: 4.5,
            gravity: 9.8,
            bunny_hop: false,

            air_cap: 0.85,
            air_accel: 800.0,
            air_move_speed: 500.0,

            headbob_amplitude: 0.06,
            headbob_frequency: 2.4,

            standing_height: 2.0,
            crouch_depth: 0.7,
            crouch_rate: 7.0,
        }
    }
}

impl ControllerConfig {
    /// Parse and validate a config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every value lies in a range the controller can run with.
    pub fn validate(&self) -> Result<()> {
        check_range("look_sensitivity", self.look_sensitivity, 0.0, 1.0)?;
        check_range("pitch_limit_degrees", self.pitch_limit_degrees, 0.0, 90.0)?;
        check_range("walk_speed", self.walk_speed, 0.0, 100.0)?;
        check_range("sprint_speed", self.sprint_speed, 0.0, 100.0)?;
        check_range("crouch_speed", self.crouch_speed, 0.0, 100.0)?;
        check_range("jump_velocity", self.jump_velocity, 0.0, 100.0)?;
        check_range("gravity", self.gravity, 0.0, 1000.0)?;
        check_range("air_cap", self.air_cap, 0.0, 100.0)?;
        check_range("air_accel", self.air_accel, 0.0, 10_000.0)?;
        check_range("air_move_speed", self.air_move_speed, 0.0, 10_000.0)?;
        check_range("headbob_amplitude", self.headbob_amplitude, 0.0, 1.0)?;
        check_range("headbob_frequency", self.headbob_frequency, 0.0, 100.0)?;
        check_range("standing_height", self.standing_height, 0.1, 10.0)?;
        check_range("crouch_depth", self.crouch_depth, 0.0, self.standing_height)?;
        check_range("crouch_rate", self.crouch_rate, 0.0, 1000.0)?;

        if self.crouch_depth >= self.standing_height {
            return Err(StrideError::InvalidConfig(format!(
                "crouch_depth ({}) must be smaller than standing_height ({})",
                self.crouch_depth, self.standing_height
            )));
        }
        Ok(())
    }

    /// Pitch limit in radians.
    pub fn pitch_limit(&self) -> f32 {
        self.pitch_limit_degrees.to_radians()
    }

    /// Capsule height while crouched.
    pub fn crouched_height(&self) -> f32 {
        self.standing_height - self.crouch_depth
    }

    /// Ground speed for the current modifiers. Crouching overrides sprinting.
    pub fn ground_speed(&self, sprinting: bool, crouched: bool) -> f32 {
        if crouched {
            self.crouch_speed
        } else if sprinting {
            self.sprint_speed
        } else {
            self.walk_speed
        }
    }
}

fn check_range(field: &str, value: f32, min: f32, max: f32) -> Result<()> {
    // NaN fails both comparisons, so test for containment
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(StrideError::ValueOutOfRange {
            field: field.to_string(),
            min: min as f64,
            max: max as f64,
            value: value as f64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ControllerConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.pitch_limit() - 60f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn test_ground_speed_priority() {
        let config = ControllerConfig::default();

        assert_eq!(config.ground_speed(false, false), config.walk_speed);
        assert_eq!(config.ground_speed(true, false), config.sprint_speed);
        assert_eq!(config.ground_speed(false, true), config.crouch_speed);
        // Crouching overrides sprinting
        assert_eq!(config.ground_speed(true, true), config.crouch_speed);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ControllerConfig::from_toml_str(
            r#"
            walk_speed = 4.0
            bunny_hop = true
            "#,
        )
        .unwrap();

        assert_eq!(config.walk_speed, 4.0);
        assert!(config.bunny_hop);
        assert_eq!(config.sprint_speed, ControllerConfig::default().sprint_speed);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ControllerConfig {
            air_cap: 1.25,
            ..Default::default()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(ControllerConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = ControllerConfig::from_toml_str("walk_speed = -1.0").unwrap_err();
        assert!(matches!(
            err,
            StrideError::ValueOutOfRange { ref field, .. } if field == "walk_speed"
        ));
    }

    #[test]
    fn test_nan_rejected() {
        let config = ControllerConfig {
            gravity: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_crouch_deeper_than_standing_rejected() {
        let config = ControllerConfig {
            standing_height: 1.0,
            crouch_depth: 1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(StrideError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_unknown_field_type_is_parse_error() {
        let err = ControllerConfig::from_toml_str("walk_speed = \"fast\"").unwrap_err();
        assert!(matches!(err, StrideError::TomlParseError(_)));
    }
}
