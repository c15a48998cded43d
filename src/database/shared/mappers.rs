// ABOUTME: Model to SQL row conversion helpers for sessions and trail points
// ABOUTME: Fixed-width RFC 3339 timestamp encoding so text order matches time order

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Model ↔ SQL row conversion helpers
//!
//! Timestamps are written as UTC RFC 3339 with microseconds and a `Z` suffix
//! (`2025-06-01T08:00:00.000000Z`). Every stored value has the same width, so
//! `ORDER BY timestamp` on the text column sorts chronologically.

use crate::errors::{DatabaseError, DatabaseResult};
use crate::models::{Session, TrailPoint};
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

/// Encode a timestamp for storage
#[must_use]
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Decode a stored timestamp
///
/// # Errors
///
/// Returns `InvalidData` if the text is not RFC 3339
pub fn parse_timestamp(value: &str) -> DatabaseResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DatabaseError::InvalidData {
            context: format!("timestamp '{value}': {e}"),
        })
}

/// Decode a stored UUID
///
/// # Errors
///
/// Returns `InvalidData` if the text is not a UUID
pub fn parse_uuid(value: &str) -> DatabaseResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| DatabaseError::InvalidData {
        context: format!("uuid '{value}': {e}"),
    })
}

fn column<'r, T>(row: &'r SqliteRow, name: &str) -> DatabaseResult<T>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(name)
        .map_err(|e| DatabaseError::query(format!("Failed to get column '{name}': {e}")))
}

/// Parse a `sessions` row
///
/// # Errors
///
/// Returns an error if a column is missing or holds undecodable data
pub fn parse_session_from_row(row: &SqliteRow) -> DatabaseResult<Session> {
    let id: String = column(row, "id")?;
    let start_time: String = column(row, "start_time")?;
    let end_time: Option<String> = column(row, "end_time")?;

    Ok(Session {
        id: parse_uuid(&id)?,
        label: column(row, "label")?,
        start_time: parse_timestamp(&start_time)?,
        end_time: end_time.as_deref().map(parse_timestamp).transpose()?,
        is_active: column(row, "is_active")?,
    })
}

/// Parse a `trail_points` row
///
/// # Errors
///
/// Returns an error if a column is missing or holds undecodable data
pub fn parse_trail_point_from_row(row: &SqliteRow) -> DatabaseResult<TrailPoint> {
    let id: String = column(row, "id")?;
    let session_id: String = column(row, "session_id")?;
    let timestamp: String = column(row, "timestamp")?;

    Ok(TrailPoint {
        id: parse_uuid(&id)?,
        session_id: parse_uuid(&session_id)?,
        timestamp: parse_timestamp(&timestamp)?,
        latitude: column(row, "latitude")?,
        longitude: column(row, "longitude")?,
        altitude: column(row, "altitude")?,
        horizontal_accuracy: column(row, "horizontal_accuracy")?,
        speed: column(row, "speed")?,
        course: column(row, "course")?,
    })
}
