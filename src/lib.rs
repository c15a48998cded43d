// ABOUTME: Main library entry point for the Trailkeeper tracking engine
// ABOUTME: Validates and smooths GPS fixes and records them into crash-safe sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Trailkeeper
//!
//! Continuously ingests noisy positional fixes, keeps the trustworthy ones,
//! optionally smooths them, and appends them to the trail of the single active
//! recording session. Sessions left open by a crash are closed at startup.
//!
//! ## Architecture
//!
//! - **validation**: ordered plausibility checks against the last accepted point
//! - **smoothing**: accuracy-weighted Kalman position estimate
//! - **database**: `SQLite` store with `SessionRepository` / `LocationRepository`
//! - **tracking**: `TrackingCoordinator` state machine and change notifications
//! - **config**: tracking profiles and environment loading
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use trailkeeper::config::TrackingProfile;
//! use trailkeeper::database::Database;
//! use trailkeeper::tracking::{StaticAuthorization, TrackingCoordinator};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new("sqlite:./data/trailkeeper.db").await?;
//! let coordinator = TrackingCoordinator::with_database(
//!     &db,
//!     Arc::new(StaticAuthorization::always()),
//!     TrackingProfile::Default.config(),
//! );
//! coordinator.on_startup().await;
//! let session = coordinator.start_tracking(Some("Morning walk".into())).await?;
//! println!("recording {}", session.id);
//! # Ok(())
//! # }
//! ```

/// Configuration management and environment loading
pub mod config;

/// `SQLite` persistence for sessions and trail points
pub mod database;

/// Error types re-exported from the core crate
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Accuracy-weighted position smoothing
pub mod smoothing;

/// Session lifecycle coordination and fix ingestion
pub mod tracking;

/// Fix plausibility checks
pub mod validation;

/// Constants shared with the core crate
pub use trailkeeper_core::constants;

/// Domain models shared with the core crate
pub use trailkeeper_core::models;

/// Geodesy helpers shared with the core crate
pub use trailkeeper_core::geo;
