// ABOUTME: Observable tracking state: snapshots, change notifications, and ingest outcomes
// ABOUTME: Broadcast payloads for UI or remote consumers; no direct binding to any of them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::TrackingError;
use crate::models::{Session, TrailPoint};
use crate::validation::RejectionReason;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Coordinator state machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingPhase {
    /// No session is recording
    #[default]
    Idle,
    /// A session is recording
    Tracking,
}

/// Point-in-time view of the coordinator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackingSnapshot {
    /// Current phase
    pub phase: TrackingPhase,
    /// Session being recorded, if tracking
    pub session: Option<Session>,
    /// Points saved for the current session
    pub location_count: u64,
    /// Most recently saved point of the current session
    pub last_point: Option<TrailPoint>,
}

/// Change notification published on the coordinator's broadcast channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TrackingEvent {
    /// Startup recovery ended sessions left active by a previous run
    OrphansRecovered {
        /// Sessions ended
        count: u64,
    },
    /// A session started recording
    SessionStarted {
        /// The new session
        session: Session,
    },
    /// A fix was accepted and its point saved
    FixAccepted {
        /// Session the point was saved to
        session_id: Uuid,
        /// Saved point (smoothed when smoothing is on)
        point: TrailPoint,
    },
    /// A fix was rejected by the validator
    FixRejected {
        /// Session being recorded
        session_id: Uuid,
        /// First failing check
        reason: RejectionReason,
    },
    /// An accepted point could not be saved; tracking continues
    PersistenceFailed {
        /// Session the save was for
        session_id: Uuid,
        /// Error description
        error: String,
    },
    /// Recording stopped
    SessionStopped {
        /// Session that stopped
        session_id: Uuid,
        /// Points saved while it was recording
        location_count: u64,
    },
}

/// What happened to one fix
#[derive(Debug, Clone, PartialEq)]
pub enum FixOutcome {
    /// Validated and saved
    Accepted(TrailPoint),
    /// Dropped by the validator
    Rejected(RejectionReason),
    /// Arrived while idle
    Ignored,
}

/// Running totals of ingest outcomes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    /// Fixes validated and saved
    pub accepted: u64,
    /// Fixes dropped by the validator
    pub rejected: u64,
    /// Rejections per reason
    pub rejected_by_reason: HashMap<RejectionReason, u64>,
    /// Fixes that arrived while idle
    pub ignored: u64,
    /// Accepted fixes whose save failed
    pub failed: u64,
}

impl IngestStats {
    /// Fold one `on_fix` result into the totals
    pub fn record(&mut self, result: &Result<FixOutcome, TrackingError>) {
        match result {
            Ok(FixOutcome::Accepted(_)) => self.accepted += 1,
            Ok(FixOutcome::Rejected(reason)) => {
                self.rejected += 1;
                *self.rejected_by_reason.entry(*reason).or_default() += 1;
            }
            Ok(FixOutcome::Ignored) => self.ignored += 1,
            Err(_) => self.failed += 1,
        }
    }

    /// Total fixes seen
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.accepted + self.rejected + self.ignored + self.failed
    }
}
