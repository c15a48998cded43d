// ABOUTME: Configuration management module for the tracking engine
// ABOUTME: Environment loading for tracking profiles, threshold overrides, and the store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! - **environment**: `TrackerConfig` assembled from `TRAILKEEPER_*` variables
//! - **database**: store location and pool settings
//!
//! Threshold types and presets live in `trailkeeper_core::config` and are
//! re-exported here.

/// Database location and pool configuration
pub mod database;
/// Environment-driven tracker configuration
pub mod environment;

pub use database::{DatabaseConfig, DatabaseUrl};
pub use environment::TrackerConfig;
pub use trailkeeper_core::config::{
    ConfigError, SmootherConfig, TrackingConfig, TrackingProfile, ValidationConfig,
};
