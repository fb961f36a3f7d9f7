//! Configuration for lasers and the simulation.
//!
//! All settings deserialize from JSON (or any serde format) and fall back to
//! the stock values of the shooter when fields are omitted.
//!
//! ```
//! use laserline_core::config::{LaserTuning, SimulationConfig};
//!
//! let tuning = LaserTuning::default();
//! assert_eq!(tuning.speed, 8.0);
//! assert!(SimulationConfig::default().validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::entity::Tint;
use crate::error::ConfigError;
use crate::laser::{LevelBounds, VariantPolicy};

/// Per-laser tunables, fixed for the laser's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaserTuning {
    /// Distance travelled per time unit.
    pub speed: f32,
    /// Maximum turn rate of a homing laser, in degrees per time unit.
    pub rotation_speed: f32,
    /// A homing laser closer than this to its target is spent.
    pub homing_distance: f32,
}

impl Default for LaserTuning {
    fn default() -> Self {
        Self {
            speed: 8.0,
            rotation_speed: 300.0,
            homing_distance: 2.0,
        }
    }
}

impl LaserTuning {
    /// Returns tuning with the given speed and stock homing values.
    #[must_use]
    pub fn with_speed(speed: f32) -> Self {
        Self {
            speed,
            ..Self::default()
        }
    }

    /// Checks every tunable is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTunable`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_tunable("speed", self.speed)?;
        check_tunable("rotation_speed", self.rotation_speed)?;
        check_tunable("homing_distance", self.homing_distance)
    }
}

fn check_tunable(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidTunable { field, value })
    }
}

/// Settings of the freeze effect applied by a Spinner hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreezeSettings {
    /// Time units the player stays frozen.
    pub duration: f64,
    /// Movement speed restored when the freeze ends.
    pub restore_speed: f32,
    /// Sprite tint while frozen.
    pub frozen_tint: Tint,
    /// Sprite tint restored when the freeze ends.
    pub restored_tint: Tint,
}

impl Default for FreezeSettings {
    fn default() -> Self {
        Self {
            duration: 2.0,
            restore_speed: 5.0,
            frozen_tint: Tint::FROZEN,
            restored_tint: Tint::WHITE,
        }
    }
}

impl FreezeSettings {
    /// Checks the duration and restore speed.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-positive duration or a bad restore speed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(ConfigError::InvalidFreezeDuration(self.duration));
        }
        check_tunable("restore_speed", self.restore_speed)
    }
}

/// Top-level simulation settings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Initial play area.
    pub bounds: LevelBounds,
    /// Freeze effect settings.
    pub freeze: FreezeSettings,
    /// How legacy variant flag sets are interpreted at spawn.
    pub variant_policy: VariantPolicy,
}

impl SimulationConfig {
    /// Validates every section.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bounds.validate()?;
        self.freeze.validate()
    }
}
