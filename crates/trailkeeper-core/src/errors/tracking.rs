// ABOUTME: Error types returned by the tracking coordinator
// ABOUTME: Covers the single-active-session invariant, authorization, and persistence failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::DatabaseError;
use crate::models::AuthorizationStatus;
use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by `start_tracking`, `on_fix` and `stop_tracking`
///
/// Validator rejections are not errors and never appear here.
#[derive(Debug, Error)]
pub enum TrackingError {
    /// Another session is already recording
    #[error("session {session_id} is already active")]
    SessionAlreadyActive {
        /// The session that is currently active
        session_id: Uuid,
    },

    /// The authorization collaborator did not grant "always" access
    #[error("location authorization is {status}, tracking requires always")]
    AuthorizationDenied {
        /// Status reported by the authorization collaborator
        status: AuthorizationStatus,
    },

    /// A store operation failed; tracking continues
    #[error("persistence failure: {0}")]
    Persistence(#[from] DatabaseError),
}
