// ABOUTME: SQLite store for recording sessions and their trail points
// ABOUTME: Owns the connection pool, applies idempotent migrations, and exposes the managers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! `Database` wraps a `SqlitePool`. File-backed stores run in WAL mode with a
//! busy timeout so several connections (and several processes) can share one
//! file; an in-memory store is pinned to a single connection because each
//! `SQLite` memory connection is its own database.
//!
//! Foreign keys are enabled on every connection, which is what makes trail
//! points cascade with their session and what rejects points for sessions
//! that were never persisted.

/// Trail point SQL
pub mod locations;
/// Repository traits and their `SQLite` implementations
pub mod repositories;
/// Session SQL
pub mod sessions;
/// Row mapping and transaction helpers
pub mod shared;

pub use locations::LocationManager;
pub use repositories::{
    LocationRepository, LocationRepositoryImpl, SessionRepository, SessionRepositoryImpl,
};
pub use sessions::SessionManager;

use crate::config::{DatabaseConfig, DatabaseUrl};
use crate::errors::{DatabaseError, DatabaseResult};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// Session and trail store
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to `database_url` with default pool settings and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the connection fails, or a
    /// migration fails
    pub async fn new(database_url: &str) -> DatabaseResult<Self> {
        let url = DatabaseUrl::parse_url(database_url)
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;
        Self::connect(&DatabaseConfig {
            url,
            ..DatabaseConfig::default()
        })
        .await
    }

    /// Connect using an explicit configuration and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails or a migration fails
    pub async fn connect(config: &DatabaseConfig) -> DatabaseResult<Self> {
        let busy_timeout = Duration::from_millis(config.busy_timeout_ms);
        let base = SqliteConnectOptions::from_str(&config.url.to_connection_string())
            .map_err(|e| DatabaseError::ConnectionError(format!("Invalid database URL: {e}")))?
            .foreign_keys(true)
            .busy_timeout(busy_timeout);

        let pool = match &config.url {
            DatabaseUrl::Memory => {
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect_with(base)
                    .await
            }
            DatabaseUrl::SQLite { path } => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await.map_err(|e| {
                        DatabaseError::ConnectionError(format!(
                            "Failed to create database directory {}: {e}",
                            parent.display()
                        ))
                    })?;
                }
                let options = base
                    .create_if_missing(true)
                    .journal_mode(SqliteJournalMode::Wal)
                    .synchronous(SqliteSynchronous::Normal);
                SqlitePoolOptions::new()
                    .max_connections(config.max_connections.max(1))
                    .connect_with(options)
                    .await
            }
        }
        .map_err(|e| {
            DatabaseError::ConnectionError(format!("Failed to connect to {}: {e}", config.url))
        })?;

        let db = Self { pool };
        db.migrate().await?;
        info!(database = %config.url, "database ready");
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run database migrations
    ///
    /// Every statement is `IF NOT EXISTS`, so running this again is harmless.
    ///
    /// # Errors
    ///
    /// Returns an error if a schema statement fails
    pub async fn migrate(&self) -> DatabaseResult<()> {
        self.migrate_sessions().await?;
        self.migrate_trail_points().await?;
        debug!("database migrations applied");
        Ok(())
    }

    async fn migrate_sessions(&self) -> DatabaseResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS sessions (
                id TEXT PRIMARY KEY,
                label TEXT,
                start_time TEXT NOT NULL,
                end_time TEXT,
                is_active INTEGER NOT NULL DEFAULT 1 CHECK (is_active IN (0, 1))
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| migration_error("create sessions table", &e))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_sessions_is_active ON sessions(is_active)")
            .execute(&self.pool)
            .await
            .map_err(|e| migration_error("create sessions active index", &e))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_sessions_start_time ON sessions(start_time)")
            .execute(&self.pool)
            .await
            .map_err(|e| migration_error("create sessions start index", &e))?;

        Ok(())
    }

    async fn migrate_trail_points(&self) -> DatabaseResult<()> {
        // seq preserves insertion order for points sharing a timestamp
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS trail_points (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                session_id TEXT NOT NULL REFERENCES sessions(id) ON DELETE CASCADE,
                timestamp TEXT NOT NULL,
                latitude REAL NOT NULL,
                longitude REAL NOT NULL,
                altitude REAL NOT NULL,
                horizontal_accuracy REAL NOT NULL,
                speed REAL NOT NULL,
                course REAL NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| migration_error("create trail_points table", &e))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_trail_points_session_time ON trail_points(session_id, timestamp, seq)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| migration_error("create trail_points session index", &e))?;

        Ok(())
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn migration_error(step: &str, e: &sqlx::Error) -> DatabaseError {
    DatabaseError::MigrationError {
        context: format!("{step}: {e}"),
    }
}
