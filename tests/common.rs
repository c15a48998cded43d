// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides database setup, coordinator wiring, and synthetic fix builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `trailkeeper`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use anyhow::Result;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::{Arc, Once};
use tempfile::TempDir;
use trailkeeper::{
    config::{DatabaseConfig, DatabaseUrl, TrackingConfig},
    database::Database,
    models::Fix,
    tracking::{StaticAuthorization, TrackingCoordinator},
};

static INIT_LOGGER: Once = Once::new();

/// Meters per degree of latitude at the mean earth radius
pub const METERS_PER_DEGREE: f64 = 111_195.0;

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard in-memory test database
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Ok(Database::new("sqlite::memory:").await?)
}

/// File-backed database with a multi-connection pool
///
/// The `TempDir` must outlive the database.
pub async fn create_file_database() -> Result<(TempDir, Database)> {
    init_test_logging();
    let dir = tempfile::tempdir()?;
    let database = open_file_database(&dir).await?;
    Ok((dir, database))
}

/// Open (or reopen) the store inside `dir`, as a restarted process would
pub async fn open_file_database(dir: &TempDir) -> Result<Database> {
    let config = DatabaseConfig {
        url: DatabaseUrl::SQLite {
            path: dir.path().join("trail.db"),
        },
        max_connections: 4,
        ..DatabaseConfig::default()
    };
    Ok(Database::connect(&config).await?)
}

/// Coordinator over `database` with "always" authorization
pub fn create_coordinator(database: &Database, config: TrackingConfig) -> Arc<TrackingCoordinator> {
    Arc::new(TrackingCoordinator::with_database(
        database,
        Arc::new(StaticAuthorization::always()),
        config,
    ))
}

/// Fixed reference instant for synthetic fixes
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap()
}

/// Fix `north_m` meters north of (45.0, 7.0), taken `secs` after [`t0`]
pub fn fix_at(secs: i64, north_m: f64, accuracy: f64) -> Fix {
    Fix::new(
        t0() + Duration::seconds(secs),
        45.0 + north_m / METERS_PER_DEGREE,
        7.0,
        accuracy,
    )
}

/// A plausible walk: one fix every `step_secs`, `step_m` meters apart
pub fn walk(count: usize, step_secs: i64, step_m: f64) -> Vec<Fix> {
    (0..count)
        .map(|i| fix_at(i as i64 * step_secs, i as f64 * step_m, 8.0))
        .collect()
}
