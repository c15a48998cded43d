// ABOUTME: Database operations for trail points owned by recording sessions
// ABOUTME: Ownership-checked inserts and time-ordered, batched reads of a session's trail
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::shared::mappers::{format_timestamp, parse_trail_point_from_row};
use crate::errors::{DatabaseError, DatabaseResult};
use crate::models::{LocationQuery, SortOrder, TrailPoint};
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use uuid::Uuid;

/// Trail point database operations manager
pub struct LocationManager {
    pool: SqlitePool,
}

impl LocationManager {
    /// Create a new location manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist one trail point owned by `session_id`
    ///
    /// The stored point always carries `session_id` as its owner.
    ///
    /// # Errors
    ///
    /// Returns `OwningSessionMissing` if the id is nil or no such session is
    /// stored, or a query error
    pub async fn save_location(
        &self,
        point: &TrailPoint,
        session_id: Uuid,
    ) -> DatabaseResult<TrailPoint> {
        if session_id.is_nil() {
            return Err(DatabaseError::OwningSessionMissing { session_id });
        }

        sqlx::query(
            r"
            INSERT INTO trail_points (
                id, session_id, timestamp, latitude, longitude, altitude,
                horizontal_accuracy, speed, course
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(point.id.to_string())
        .bind(session_id.to_string())
        .bind(format_timestamp(point.timestamp))
        .bind(point.latitude)
        .bind(point.longitude)
        .bind(point.altitude)
        .bind(point.horizontal_accuracy)
        .bind(point.speed)
        .bind(point.course)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                DatabaseError::OwningSessionMissing { session_id }
            }
            _ => DatabaseError::query(format!("Failed to save trail point: {e}")),
        })?;

        Ok(TrailPoint {
            session_id,
            ..point.clone()
        })
    }

    /// Read a session's trail
    ///
    /// Points are ordered by timestamp, ties broken by insertion order, in the
    /// direction `query.order` asks for.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn fetch_locations(
        &self,
        session_id: Uuid,
        query: &LocationQuery,
    ) -> DatabaseResult<Vec<TrailPoint>> {
        let mut sql: QueryBuilder<'_, Sqlite> = QueryBuilder::new(
            r"
            SELECT id, session_id, timestamp, latitude, longitude, altitude,
                   horizontal_accuracy, speed, course
            FROM trail_points
            WHERE session_id = ",
        );
        sql.push_bind(session_id.to_string());
        sql.push(match query.order {
            SortOrder::Ascending => " ORDER BY timestamp ASC, seq ASC",
            SortOrder::Descending => " ORDER BY timestamp DESC, seq DESC",
        });

        match (query.limit, query.offset) {
            (Some(limit), offset) => {
                sql.push(" LIMIT ").push_bind(i64::from(limit));
                if let Some(offset) = offset {
                    sql.push(" OFFSET ").push_bind(i64::from(offset));
                }
            }
            // SQLite only accepts OFFSET after a LIMIT; -1 means unbounded
            (None, Some(offset)) => {
                sql.push(" LIMIT -1 OFFSET ").push_bind(i64::from(offset));
            }
            (None, None) => {}
        }

        let rows = sql
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DatabaseError::query(format!("Failed to fetch trail points: {e}")))?;

        rows.iter().map(parse_trail_point_from_row).collect()
    }

    /// Remove every trail point of a session, keeping the session itself
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn delete_locations(&self, session_id: Uuid) -> DatabaseResult<u64> {
        let result = sqlx::query("DELETE FROM trail_points WHERE session_id = $1")
            .bind(session_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::query(format!("Failed to delete trail points: {e}")))?;

        Ok(result.rows_affected())
    }

    /// Number of trail points owned by a session
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn location_count(&self, session_id: Uuid) -> DatabaseResult<u64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM trail_points WHERE session_id = $1")
            .bind(session_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DatabaseError::query(format!("Failed to count trail points: {e}")))?;

        let count: i64 = row.try_get("count")?;
        Ok(u64::try_from(count).unwrap_or_default())
    }
}
