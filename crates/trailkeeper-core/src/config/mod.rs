// ABOUTME: Validation thresholds, smoother tuning, and named tracking profiles
// ABOUTME: Every constructor validates its thresholds so invalid configs cannot exist
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Tracking configuration
//!
//! - `validation` - `ValidationConfig` and its four presets
//! - `smoothing` - `SmootherConfig` for the position smoother
//! - `profiles` - `TrackingProfile`, a named bundle of both

pub mod error;
pub mod profiles;
pub mod smoothing;
pub mod validation;

pub use error::ConfigError;
pub use profiles::{TrackingConfig, TrackingProfile};
pub use smoothing::SmootherConfig;
pub use validation::ValidationConfig;
