// ABOUTME: Accepted, persisted trail point owned by exactly one recording session
// ABOUTME: Also defines the query shape used to read a session's trail back in order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::Fix;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A fix that passed validation and belongs to a session's trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    /// Unique point ID
    pub id: Uuid,
    /// Owning session
    pub session_id: Uuid,
    /// When the underlying fix was taken
    pub timestamp: DateTime<Utc>,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Altitude in meters
    pub altitude: f64,
    /// Horizontal accuracy radius in meters
    pub horizontal_accuracy: f64,
    /// Ground speed in m/s, negative when unknown
    pub speed: f64,
    /// Course in degrees, negative when unknown
    pub course: f64,
}

impl TrailPoint {
    /// Create a new point for `session_id` from an accepted fix
    ///
    /// Non-finite altitude becomes 0; non-finite speed or course becomes unknown.
    #[must_use]
    pub fn from_fix(fix: &Fix, session_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            timestamp: fix.timestamp,
            latitude: fix.latitude,
            longitude: fix.longitude,
            altitude: finite_or(fix.altitude, 0.0),
            horizontal_accuracy: fix.horizontal_accuracy,
            speed: finite_or(fix.speed, -1.0),
            course: finite_or(fix.course, -1.0),
        }
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Timestamp ordering for trail reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Oldest first
    #[default]
    Ascending,
    /// Newest first
    Descending,
}

/// Trail read parameters; the default reads the whole trail oldest first
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationQuery {
    /// Timestamp order
    pub order: SortOrder,
    /// Maximum number of points to return
    pub limit: Option<u32>,
    /// Number of points to skip, for batched reads
    pub offset: Option<u32>,
}

impl LocationQuery {
    /// One batch of `size` points starting at `offset`, oldest first
    #[must_use]
    pub const fn batch(offset: u32, size: u32) -> Self {
        Self {
            order: SortOrder::Ascending,
            limit: Some(size),
            offset: Some(offset),
        }
    }

    /// Newest `limit` points first
    #[must_use]
    pub const fn latest(limit: u32) -> Self {
        Self {
            order: SortOrder::Descending,
            limit: Some(limit),
            offset: None,
        }
    }
}
