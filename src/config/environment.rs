// ABOUTME: Environment configuration for the tracking engine and its store
// ABOUTME: Resolves the tracking profile, threshold overrides, and database settings from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration
//!
//! A profile supplies every threshold; individual `TRAILKEEPER_*` variables
//! override single values on top of it. Overrides go through the validating
//! constructors, so a bad value fails loading instead of producing a validator
//! that silently rejects everything.

use super::database::DatabaseConfig;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use tracing::info;
use trailkeeper_core::config::{SmootherConfig, TrackingConfig, TrackingProfile, ValidationConfig};

/// Complete runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Profile the thresholds were derived from
    pub profile: TrackingProfile,
    /// Validation and smoothing settings after overrides
    pub tracking: TrackingConfig,
    /// Store location and pool settings
    pub database: DatabaseConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::for_profile(TrackingProfile::Default)
    }
}

impl TrackerConfig {
    /// Configuration for `profile` with default database settings
    #[must_use]
    pub fn for_profile(profile: TrackingProfile) -> Self {
        Self {
            profile,
            tracking: profile.config(),
            database: DatabaseConfig::default(),
        }
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if the profile name is unknown or an override is not a
    /// valid threshold
    pub fn from_env() -> AppResult<Self> {
        let profile = match env::var("TRAILKEEPER_PROFILE") {
            Ok(name) => name.parse::<TrackingProfile>()?,
            Err(_) => TrackingProfile::Default,
        };
        Self::from_env_with_profile(profile)
    }

    /// Load overrides and database settings from the environment on top of `profile`
    ///
    /// # Errors
    ///
    /// Returns an error if an override is not a valid threshold
    pub fn from_env_with_profile(profile: TrackingProfile) -> AppResult<Self> {
        let tracking = TrackingConfig {
            validation: validation_overrides(profile.validation())?,
            smoothing: smoothing_overrides(profile.smoothing())?,
        };
        let config = Self {
            profile,
            tracking,
            database: DatabaseConfig::from_env()?,
        };
        info!(
            profile = %config.profile,
            database = %config.database.url,
            smoothing = config.tracking.smoothing.is_some(),
            "tracker configuration loaded"
        );
        Ok(config)
    }
}

fn validation_overrides(base: ValidationConfig) -> AppResult<ValidationConfig> {
    let min_distance = match env::var("TRAILKEEPER_MIN_DISTANCE_M") {
        Ok(v) if v.trim().eq_ignore_ascii_case("none") => None,
        Ok(v) => Some(parse_value::<f64>("TRAILKEEPER_MIN_DISTANCE_M", &v)?),
        Err(_) => base.min_distance_between_points(),
    };

    ValidationConfig::new(
        env_override("TRAILKEEPER_MAX_ACCURACY_M")?.unwrap_or(base.max_horizontal_accuracy()),
        env_override("TRAILKEEPER_MAX_SPEED_MPS")?.unwrap_or(base.max_reasonable_speed()),
        env_override("TRAILKEEPER_MAX_JUMP_M")?.unwrap_or(base.max_distance_jump()),
        env_override("TRAILKEEPER_MIN_INTERVAL_S")?.unwrap_or(base.min_time_between_updates()),
        min_distance,
        env_override("TRAILKEEPER_ADAPTIVE_SAMPLING")?.unwrap_or(base.adaptive_sampling()),
    )
    .map_err(AppError::from)
}

fn smoothing_overrides(base: Option<SmootherConfig>) -> AppResult<Option<SmootherConfig>> {
    let enabled = env_override::<bool>("TRAILKEEPER_SMOOTHING")?.unwrap_or(base.is_some());
    if !enabled {
        return Ok(None);
    }
    match env_override::<f64>("TRAILKEEPER_SMOOTHING_NOISE_MPS")? {
        Some(noise) => Ok(Some(SmootherConfig::new(noise)?)),
        None => Ok(Some(base.unwrap_or_default())),
    }
}

fn env_override<T>(key: &str) -> AppResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env::var(key)
        .ok()
        .map(|v| parse_value(key, &v))
        .transpose()
}

fn parse_value<T>(key: &str, value: &str) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| AppError::invalid_input(format!("Invalid {key} value '{value}': {e}")))
}
