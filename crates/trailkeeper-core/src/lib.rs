// ABOUTME: Core types and constants for the Trailkeeper tracking engine
// ABOUTME: Foundation crate with error handling, domain models, validation presets, and geodesy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Trailkeeper Core
//!
//! Foundation crate providing shared types and constants for the Trailkeeper
//! tracking engine. This crate has no I/O and is designed to change infrequently.
//!
//! ## Modules
//!
//! - **errors**: `AppError`/`ErrorCode` plus domain errors (`DatabaseError`, `TrackingError`, `ConfigError`)
//! - **constants**: Geodesy constants, preset thresholds, and channel sizes
//! - **models**: `Fix`, `TrailPoint`, `Session`
//! - **config**: `ValidationConfig` presets and `TrackingProfile` bundles
//! - **geo**: Great-circle distance and implied speed

/// Unified error handling with standard error codes and domain-specific errors
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (fixes, trail points, sessions)
pub mod models;

/// Validation thresholds, presets, and tracking profiles
pub mod config;

/// Geodesy helpers used by the validator and smoother
pub mod geo;
