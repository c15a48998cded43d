// ABOUTME: Tuning for the recursive position smoother
// ABOUTME: Process noise controls how quickly the estimate follows new fixes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ConfigError;
use crate::constants::smoothing::DEFAULT_PROCESS_NOISE_MPS;
use serde::{Deserialize, Serialize};

/// Position smoother configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSmootherConfig")]
pub struct SmootherConfig {
    process_noise_mps: f64,
}

#[derive(Deserialize)]
struct RawSmootherConfig {
    process_noise_mps: f64,
}

impl SmootherConfig {
    /// Create a smoother config
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NonPositive` if the process noise is not a positive finite number
    pub fn new(process_noise_mps: f64) -> Result<Self, ConfigError> {
        if !(process_noise_mps.is_finite() && process_noise_mps > 0.0) {
            return Err(ConfigError::NonPositive {
                field: "process_noise_mps",
                value: process_noise_mps,
            });
        }
        Ok(Self { process_noise_mps })
    }

    /// Expected drift of the true position per second, in m/s
    #[must_use]
    pub const fn process_noise_mps(&self) -> f64 {
        self.process_noise_mps
    }
}

impl Default for SmootherConfig {
    fn default() -> Self {
        Self {
            process_noise_mps: DEFAULT_PROCESS_NOISE_MPS,
        }
    }
}

impl TryFrom<RawSmootherConfig> for SmootherConfig {
    type Error = ConfigError;

    fn try_from(raw: RawSmootherConfig) -> Result<Self, Self::Error> {
        Self::new(raw.process_noise_mps)
    }
}
