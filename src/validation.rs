// ABOUTME: Stateful fix validator that decides which sensor readings join the trail
// ABOUTME: Ordered plausibility checks (accuracy, gap, speed, jump, spacing) against a per-session cursor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Fix Validation
//!
//! Each fix is compared against the last accepted point of the current session
//! (the cursor). Checks run in a fixed order and stop at the first failure so the
//! reported reason is deterministic:
//!
//! 1. position and accuracy
//! 2. time gap since the cursor
//! 3. implied speed
//! 4. raw displacement (independent of speed)
//! 5. minimum spacing, unless adaptive sampling waives it at the current speed
//!
//! The first fix of a session only has to pass the accuracy check.
//!
//! Rejections are expected outcomes and are logged at `debug`.

use crate::constants::sampling::ADAPTIVE_WAIVER_SPEED_MPS;
use crate::models::{Fix, TrailPoint};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use trailkeeper_core::config::ValidationConfig;
use trailkeeper_core::geo::{
    elapsed_seconds, haversine_distance, implied_speed, is_valid_coordinate,
};
use uuid::Uuid;

/// Why a fix was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// Latitude or longitude is not a finite coordinate on the globe
    InvalidPosition,
    /// Reported accuracy is missing, invalid, or worse than the threshold
    PoorAccuracy,
    /// Arrived sooner after the cursor than the minimum gap
    TooSoon,
    /// Implies a speed above the plausible maximum
    TooFast,
    /// Displacement from the cursor exceeds the maximum jump
    TooFarJump,
    /// Closer to the cursor than the minimum spacing
    TooClose,
}

impl RejectionReason {
    /// Stable reason code
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidPosition => "invalid_position",
            Self::PoorAccuracy => "poor_accuracy",
            Self::TooSoon => "too_soon",
            Self::TooFast => "too_fast",
            Self::TooFarJump => "too_far_jump",
            Self::TooClose => "too_close",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Outcome of evaluating one fix
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// The fix became a trail point and the cursor advanced to it
    Accept(TrailPoint),
    /// The fix was dropped
    Reject(RejectionReason),
}

impl Verdict {
    /// Whether the fix was accepted
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accept(_))
    }
}

/// Last accepted point for the active session
#[derive(Debug, Clone)]
pub struct ValidatorCursor {
    session_id: Uuid,
    last_accepted: Option<TrailPoint>,
}

impl ValidatorCursor {
    /// Empty cursor for a freshly started session
    #[must_use]
    pub const fn new(session_id: Uuid) -> Self {
        Self {
            session_id,
            last_accepted: None,
        }
    }

    /// Session the cursor belongs to
    #[must_use]
    pub const fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Most recently accepted point, if any
    #[must_use]
    pub const fn last_accepted(&self) -> Option<&TrailPoint> {
        self.last_accepted.as_ref()
    }
}

/// Run the ordered checks for `fix` against an optional previous point
///
/// # Errors
///
/// Returns the first failing check as a `RejectionReason`
pub fn check_fix(
    fix: &Fix,
    previous: Option<&TrailPoint>,
    config: &ValidationConfig,
) -> Result<(), RejectionReason> {
    if !is_valid_coordinate(fix.latitude, fix.longitude) {
        return Err(RejectionReason::InvalidPosition);
    }

    let accuracy = fix.horizontal_accuracy;
    if !accuracy.is_finite() || accuracy <= 0.0 || accuracy > config.max_horizontal_accuracy() {
        return Err(RejectionReason::PoorAccuracy);
    }

    let Some(prev) = previous else {
        return Ok(());
    };

    let elapsed = elapsed_seconds(prev.timestamp, fix.timestamp);
    if elapsed < config.min_time_between_updates() {
        return Err(RejectionReason::TooSoon);
    }

    let distance = haversine_distance(prev.latitude, prev.longitude, fix.latitude, fix.longitude);
    let speed = implied_speed(distance, elapsed);
    if speed > config.max_reasonable_speed() {
        return Err(RejectionReason::TooFast);
    }

    if distance > config.max_distance_jump() {
        return Err(RejectionReason::TooFarJump);
    }

    if let Some(min_distance) = config.min_distance_between_points() {
        let waived = config.adaptive_sampling() && speed >= ADAPTIVE_WAIVER_SPEED_MPS;
        if !waived && distance < min_distance {
            return Err(RejectionReason::TooClose);
        }
    }

    Ok(())
}

/// Fix validator bound to one session's cursor
#[derive(Debug, Clone)]
pub struct FixValidator {
    config: ValidationConfig,
    cursor: ValidatorCursor,
}

impl FixValidator {
    /// Validator for a new session with an empty cursor
    #[must_use]
    pub const fn new(config: ValidationConfig, session_id: Uuid) -> Self {
        Self {
            config,
            cursor: ValidatorCursor::new(session_id),
        }
    }

    /// Thresholds in use
    #[must_use]
    pub const fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Current cursor
    #[must_use]
    pub const fn cursor(&self) -> &ValidatorCursor {
        &self.cursor
    }

    /// Evaluate a fix; on acceptance the cursor advances to the new point
    pub fn evaluate(&mut self, fix: &Fix) -> Verdict {
        match check_fix(fix, self.cursor.last_accepted.as_ref(), &self.config) {
            Ok(()) => {
                let point = TrailPoint::from_fix(fix, self.cursor.session_id);
                self.cursor.last_accepted = Some(point.clone());
                Verdict::Accept(point)
            }
            Err(reason) => {
                debug!(
                    session_id = %self.cursor.session_id,
                    reason = reason.code(),
                    accuracy = fix.horizontal_accuracy,
                    "fix rejected"
                );
                Verdict::Reject(reason)
            }
        }
    }

    /// Forget the cursor, as at the start of a session
    pub fn reset(&mut self, session_id: Uuid) {
        self.cursor = ValidatorCursor::new(session_id);
    }
}
