// ABOUTME: Immutable fix-validation thresholds and the four named presets
// ABOUTME: Construction rejects non-positive thresholds so every instance is usable as-is
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Fix validation thresholds
//!
//! Presets, from strictest to loosest accuracy:
//!
//! | preset | max accuracy | max speed | max jump | min gap | min distance | adaptive |
//! |---|---|---|---|---|---|---|
//! | `high_precision` | 20 m | 50 m/s | 500 m | 1 s | 2 m | no |
//! | `default` | 50 m | 50 m/s | 1000 m | 5 s | 5 m | yes |
//! | `efficient` | 100 m | 150 m/s | 5000 m | 10 s | 25 m | yes |
//! | `permissive` | 200 m | 100 m/s | 5000 m | 1 s | none | no |

use super::ConfigError;
use crate::constants::presets::{default, efficient, high_precision, permissive};
use serde::{Deserialize, Serialize};

/// Thresholds applied by the fix validator
///
/// Fields are private; use a preset or [`ValidationConfig::new`], which validates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawValidationConfig")]
pub struct ValidationConfig {
    max_horizontal_accuracy: f64,
    max_reasonable_speed: f64,
    max_distance_jump: f64,
    min_time_between_updates: f64,
    min_distance_between_points: Option<f64>,
    adaptive_sampling: bool,
}

/// Unvalidated mirror used for deserialization
#[derive(Deserialize)]
struct RawValidationConfig {
    max_horizontal_accuracy: f64,
    max_reasonable_speed: f64,
    max_distance_jump: f64,
    min_time_between_updates: f64,
    #[serde(default)]
    min_distance_between_points: Option<f64>,
    #[serde(default)]
    adaptive_sampling: bool,
}

fn require_positive(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

impl ValidationConfig {
    /// Create a custom configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NonPositive` naming the first threshold that is zero,
    /// negative, or not finite. A present `min_distance_between_points` must also be positive.
    pub fn new(
        max_horizontal_accuracy: f64,
        max_reasonable_speed: f64,
        max_distance_jump: f64,
        min_time_between_updates: f64,
        min_distance_between_points: Option<f64>,
        adaptive_sampling: bool,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            max_horizontal_accuracy: require_positive(
                "max_horizontal_accuracy",
                max_horizontal_accuracy,
            )?,
            max_reasonable_speed: require_positive("max_reasonable_speed", max_reasonable_speed)?,
            max_distance_jump: require_positive("max_distance_jump", max_distance_jump)?,
            min_time_between_updates: require_positive(
                "min_time_between_updates",
                min_time_between_updates,
            )?,
            min_distance_between_points: min_distance_between_points
                .map(|d| require_positive("min_distance_between_points", d))
                .transpose()?,
            adaptive_sampling,
        })
    }

    /// Balanced thresholds for everyday recording
    #[must_use]
    pub const fn default_preset() -> Self {
        Self {
            max_horizontal_accuracy: default::MAX_HORIZONTAL_ACCURACY_M,
            max_reasonable_speed: default::MAX_REASONABLE_SPEED_MPS,
            max_distance_jump: default::MAX_DISTANCE_JUMP_M,
            min_time_between_updates: default::MIN_TIME_BETWEEN_UPDATES_S,
            min_distance_between_points: Some(default::MIN_DISTANCE_BETWEEN_POINTS_M),
            adaptive_sampling: true,
        }
    }

    /// Strictest accuracy and tightest spacing
    #[must_use]
    pub const fn high_precision() -> Self {
        Self {
            max_horizontal_accuracy: high_precision::MAX_HORIZONTAL_ACCURACY_M,
            max_reasonable_speed: high_precision::MAX_REASONABLE_SPEED_MPS,
            max_distance_jump: high_precision::MAX_DISTANCE_JUMP_M,
            min_time_between_updates: high_precision::MIN_TIME_BETWEEN_UPDATES_S,
            min_distance_between_points: Some(high_precision::MIN_DISTANCE_BETWEEN_POINTS_M),
            adaptive_sampling: false,
        }
    }

    /// Widest spacing and highest speed tolerance
    #[must_use]
    pub const fn efficient() -> Self {
        Self {
            max_horizontal_accuracy: efficient::MAX_HORIZONTAL_ACCURACY_M,
            max_reasonable_speed: efficient::MAX_REASONABLE_SPEED_MPS,
            max_distance_jump: efficient::MAX_DISTANCE_JUMP_M,
            min_time_between_updates: efficient::MIN_TIME_BETWEEN_UPDATES_S,
            min_distance_between_points: Some(efficient::MIN_DISTANCE_BETWEEN_POINTS_M),
            adaptive_sampling: true,
        }
    }

    /// Loosest thresholds; no distance sampling
    #[must_use]
    pub const fn permissive() -> Self {
        Self {
            max_horizontal_accuracy: permissive::MAX_HORIZONTAL_ACCURACY_M,
            max_reasonable_speed: permissive::MAX_REASONABLE_SPEED_MPS,
            max_distance_jump: permissive::MAX_DISTANCE_JUMP_M,
            min_time_between_updates: permissive::MIN_TIME_BETWEEN_UPDATES_S,
            min_distance_between_points: None,
            adaptive_sampling: false,
        }
    }

    /// Maximum reported horizontal accuracy in meters
    #[must_use]
    pub const fn max_horizontal_accuracy(&self) -> f64 {
        self.max_horizontal_accuracy
    }

    /// Maximum implied speed in m/s
    #[must_use]
    pub const fn max_reasonable_speed(&self) -> f64 {
        self.max_reasonable_speed
    }

    /// Maximum displacement from the last accepted point in meters
    #[must_use]
    pub const fn max_distance_jump(&self) -> f64 {
        self.max_distance_jump
    }

    /// Minimum seconds since the last accepted point
    #[must_use]
    pub const fn min_time_between_updates(&self) -> f64 {
        self.min_time_between_updates
    }

    /// Minimum spacing from the last accepted point, if distance sampling is on
    #[must_use]
    pub const fn min_distance_between_points(&self) -> Option<f64> {
        self.min_distance_between_points
    }

    /// Whether spacing may relax at high implied speed
    #[must_use]
    pub const fn adaptive_sampling(&self) -> bool {
        self.adaptive_sampling
    }

    /// Copy with a different accuracy threshold
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NonPositive` if `meters` is not positive
    pub fn with_max_horizontal_accuracy(self, meters: f64) -> Result<Self, ConfigError> {
        Self::new(
            meters,
            self.max_reasonable_speed,
            self.max_distance_jump,
            self.min_time_between_updates,
            self.min_distance_between_points,
            self.adaptive_sampling,
        )
    }

    /// Copy with a different minimum spacing (`None` disables distance sampling)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NonPositive` if `meters` is present and not positive
    pub fn with_min_distance_between_points(
        self,
        meters: Option<f64>,
    ) -> Result<Self, ConfigError> {
        Self::new(
            self.max_horizontal_accuracy,
            self.max_reasonable_speed,
            self.max_distance_jump,
            self.min_time_between_updates,
            meters,
            self.adaptive_sampling,
        )
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self::default_preset()
    }
}

impl TryFrom<RawValidationConfig> for ValidationConfig {
    type Error = ConfigError;

    fn try_from(raw: RawValidationConfig) -> Result<Self, Self::Error> {
        Self::new(
            raw.max_horizontal_accuracy,
            raw.max_reasonable_speed,
            raw.max_distance_jump,
            raw.min_time_between_updates,
            raw.min_distance_between_points,
            raw.adaptive_sampling,
        )
    }
}
