// ABOUTME: Recording session record plus typed filters, sorts, and per-field change sets
// ABOUTME: A session owns one ordered trail; at most one session is active at a time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recording session
///
/// `label` is genuinely optional. Substituting display text for a missing label
/// is the presentation layer's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session ID
    pub id: Uuid,
    /// Free-text narrative
    pub label: Option<String>,
    /// When recording started
    pub start_time: DateTime<Utc>,
    /// When recording ended, if it has
    pub end_time: Option<DateTime<Utc>>,
    /// Whether the session is still recording
    pub is_active: bool,
}

impl Session {
    /// Build a fresh active session
    #[must_use]
    pub fn new(label: Option<String>, start_time: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            label,
            start_time,
            end_time: None,
            is_active: true,
        }
    }

    /// Recording duration, if ended
    #[must_use]
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.end_time.map(|end| end - self.start_time)
    }
}

/// Fields to change on a stored session
///
/// Only fields that are `Some` are written, so concurrent writers touching
/// different fields do not overwrite each other. The active flag is not
/// editable here: sessions end through `end_session` or orphan recovery, and
/// an ended session never becomes active again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionChanges {
    /// New label; `Some(None)` clears it
    pub label: Option<Option<String>>,
    /// Corrected end time for an already-ended session
    pub end_time: Option<DateTime<Utc>>,
}

impl SessionChanges {
    /// Change only the label
    #[must_use]
    pub fn label(label: Option<String>) -> Self {
        Self {
            label: Some(label),
            ..Self::default()
        }
    }

    /// Change only the end time
    #[must_use]
    pub fn end_time(end_time: DateTime<Utc>) -> Self {
        Self {
            end_time: Some(end_time),
            ..Self::default()
        }
    }

    /// Whether no field would be written
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.label.is_none() && self.end_time.is_none()
    }
}

/// Typed session query filter; unset fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFilter {
    /// Match on the active flag
    pub active: Option<bool>,
    /// Sessions that started at or after this instant
    pub started_after: Option<DateTime<Utc>>,
    /// Sessions that started before this instant
    pub started_before: Option<DateTime<Utc>>,
    /// Case-insensitive substring of the label
    pub label_contains: Option<String>,
    /// Maximum number of sessions to return
    pub limit: Option<u32>,
}

impl SessionFilter {
    /// Only active sessions
    #[must_use]
    pub fn active() -> Self {
        Self {
            active: Some(true),
            ..Self::default()
        }
    }
}

/// Session ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionSort {
    /// Oldest start first
    StartTimeAscending,
    /// Most recent start first
    #[default]
    StartTimeDescending,
    /// Most recently ended first, open sessions last
    EndTimeDescending,
}
