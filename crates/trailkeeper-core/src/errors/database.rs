// ABOUTME: Structured error types for session and trail-point persistence
// ABOUTME: Provides domain-specific errors with context, plus sqlx conversion behind a feature
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;
use uuid::Uuid;

/// Errors returned by the session and location stores
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Entity not found in database
    #[error("{entity_type} not found: {entity_id}")]
    NotFound {
        /// Kind of entity that was looked up
        entity_type: &'static str,
        /// Identifier that was looked up
        entity_id: String,
    },

    /// Session was already ended; ending it again is a no-op
    #[error("session {session_id} has already ended")]
    AlreadyEnded {
        /// Session that was already ended
        session_id: Uuid,
    },

    /// End time edited on a session that is still recording
    #[error("session {session_id} is still active; end it before editing its end time")]
    StillActive {
        /// Session that is still active
        session_id: Uuid,
    },

    /// Trail point was saved for a session that was never persisted
    #[error("owning session {session_id} does not exist")]
    OwningSessionMissing {
        /// Identifier carried by the owning session reference
        session_id: Uuid,
    },

    /// Stored data could not be decoded into a domain type
    #[error("invalid stored data: {context}")]
    InvalidData {
        /// What failed to decode
        context: String,
    },

    /// Database connection or pool failure
    #[error("database connection error: {0}")]
    ConnectionError(String),

    /// Schema migration failure
    #[error("database migration failed: {context}")]
    MigrationError {
        /// Failing migration step
        context: String,
    },

    /// Query execution failure
    #[error("database query failed: {context}")]
    QueryError {
        /// Operation that failed
        context: String,
    },

    /// Transaction commit or rollback failure
    #[error("transaction failed: {context}")]
    TransactionError {
        /// Transaction stage that failed
        context: String,
    },

    /// Raw driver error
    #[cfg(feature = "database-errors")]
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Session lookup miss
    #[must_use]
    pub fn session_not_found(session_id: Uuid) -> Self {
        Self::NotFound {
            entity_type: "session",
            entity_id: session_id.to_string(),
        }
    }

    /// Wrap a query failure with the operation that produced it
    #[must_use]
    pub fn query(context: impl Into<String>) -> Self {
        Self::QueryError {
            context: context.into(),
        }
    }

    /// Whether this error signals a programmer mistake rather than an I/O failure
    #[must_use]
    pub const fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::AlreadyEnded { .. }
                | Self::StillActive { .. }
                | Self::OwningSessionMissing { .. }
        )
    }
}

/// Result type for persistence operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
