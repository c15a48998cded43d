// ABOUTME: Database configuration types for the SQLite session and trail store
// ABOUTME: Parses database URLs and pool settings from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::database;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Path to `SQLite` database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns an error if the URL names a non-`SQLite` backend or an empty path
    pub fn parse_url(s: &str) -> AppResult<Self> {
        let trimmed = s.trim();
        if trimmed.contains("://") && !trimmed.starts_with("sqlite://") {
            return Err(AppError::config(format!(
                "Unsupported database URL '{trimmed}': only sqlite is supported"
            )));
        }

        let path_str = trimmed
            .strip_prefix("sqlite://")
            .or_else(|| trimmed.strip_prefix("sqlite:"))
            .unwrap_or(trimmed);
        let path_str = path_str.split('?').next().unwrap_or(path_str);

        match path_str {
            ":memory:" => Ok(Self::Memory),
            "" => Err(AppError::config("Database path must not be empty")),
            path => Ok(Self::SQLite {
                path: PathBuf::from(path),
            }),
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".into(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::parse_url(database::DEFAULT_DATABASE_URL).unwrap_or(Self::Memory)
    }
}

impl Display for DatabaseUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Database connection and pool configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Where the store lives
    pub url: DatabaseUrl,
    /// Maximum pooled connections for file-backed stores (memory stores always use one)
    pub max_connections: u32,
    /// How long a writer waits on a locked database before failing, in milliseconds
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DatabaseUrl::default(),
            max_connections: database::DEFAULT_MAX_CONNECTIONS,
            busy_timeout_ms: database::DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

impl DatabaseConfig {
    /// Configuration for a private in-memory store
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            url: DatabaseUrl::Memory,
            ..Self::default()
        }
    }

    /// Configuration for a file-backed store at `url`
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed
    pub fn for_url(url: &str) -> AppResult<Self> {
        Ok(Self {
            url: DatabaseUrl::parse_url(url)?,
            ..Self::default()
        })
    }

    /// Load database configuration from environment
    ///
    /// # Errors
    ///
    /// Returns an error if database environment variables are invalid
    pub fn from_env() -> AppResult<Self> {
        let url = DatabaseUrl::parse_url(&env_var_or(
            "TRAILKEEPER_DATABASE_URL",
            database::DEFAULT_DATABASE_URL,
        ))?;

        let max_connections: u32 = env_var_or(
            "TRAILKEEPER_DB_MAX_CONNECTIONS",
            &database::DEFAULT_MAX_CONNECTIONS.to_string(),
        )
        .parse()
        .map_err(|e| {
            AppError::invalid_input(format!("Invalid TRAILKEEPER_DB_MAX_CONNECTIONS value: {e}"))
        })?;
        if max_connections == 0 {
            return Err(AppError::config(
                "TRAILKEEPER_DB_MAX_CONNECTIONS must be at least 1",
            ));
        }

        let busy_timeout_ms = env_var_or(
            "TRAILKEEPER_DB_BUSY_TIMEOUT_MS",
            &database::DEFAULT_BUSY_TIMEOUT_MS.to_string(),
        )
        .parse()
        .map_err(|e| {
            AppError::invalid_input(format!("Invalid TRAILKEEPER_DB_BUSY_TIMEOUT_MS value: {e}"))
        })?;

        Ok(Self {
            url,
            max_connections,
            busy_timeout_ms,
        })
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
