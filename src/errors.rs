// ABOUTME: Application error surface re-exported from the core crate
// ABOUTME: AppError and ErrorCode for config and CLI, domain errors for the engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Error Handling
//!
//! The types live in `trailkeeper-core` so the foundation crate can use them
//! without depending on the engine. `DatabaseError` converts from `sqlx::Error`
//! because this crate enables the core crate's `database-errors` feature.

pub use trailkeeper_core::errors::{
    AppError, AppResult, DatabaseError, DatabaseResult, ErrorCode, TrackingError,
};
