// ABOUTME: Named tracking profiles bundling validation thresholds with smoothing settings
// ABOUTME: Some profiles switch smoothing off entirely so accepted fixes pass through unchanged
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{ConfigError, SmootherConfig, ValidationConfig};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Predefined tracking profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingProfile {
    /// Balanced thresholds, smoothing on
    #[default]
    Default,
    /// Strict accuracy, dense trail, smoothing on
    HighPrecision,
    /// Sparse trail for long or fast trips, smoothing off
    Efficient,
    /// Keep nearly everything, smoothing off
    Permissive,
}

impl TrackingProfile {
    /// All profiles, strictest first
    pub const ALL: [Self; 4] = [
        Self::HighPrecision,
        Self::Default,
        Self::Efficient,
        Self::Permissive,
    ];

    /// Stable profile name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::HighPrecision => "high_precision",
            Self::Efficient => "efficient",
            Self::Permissive => "permissive",
        }
    }

    /// Validation thresholds for this profile
    #[must_use]
    pub const fn validation(self) -> ValidationConfig {
        match self {
            Self::Default => ValidationConfig::default_preset(),
            Self::HighPrecision => ValidationConfig::high_precision(),
            Self::Efficient => ValidationConfig::efficient(),
            Self::Permissive => ValidationConfig::permissive(),
        }
    }

    /// Smoother settings, `None` when the profile disables smoothing
    #[must_use]
    pub fn smoothing(self) -> Option<SmootherConfig> {
        match self {
            Self::Default | Self::HighPrecision => Some(SmootherConfig::default()),
            Self::Efficient | Self::Permissive => None,
        }
    }

    /// Full tracking configuration for this profile
    #[must_use]
    pub fn config(self) -> TrackingConfig {
        TrackingConfig {
            validation: self.validation(),
            smoothing: self.smoothing(),
        }
    }

    /// Parse a profile name, falling back to `Default` with a warning
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        s.parse().unwrap_or_else(|e: ConfigError| {
            warn!("{e}, using default profile");
            Self::Default
        })
    }
}

impl FromStr for TrackingProfile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "default" => Ok(Self::Default),
            "high_precision" | "highprecision" => Ok(Self::HighPrecision),
            "efficient" => Ok(Self::Efficient),
            "permissive" => Ok(Self::Permissive),
            _ => Err(ConfigError::UnknownProfile(s.to_owned())),
        }
    }
}

impl fmt::Display for TrackingProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Validation thresholds plus optional smoothing, as consumed by the coordinator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Validator thresholds
    pub validation: ValidationConfig,
    /// Smoother settings; `None` disables smoothing
    pub smoothing: Option<SmootherConfig>,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        TrackingProfile::Default.config()
    }
}
