// ABOUTME: Database operations for recording sessions
// ABOUTME: Guarded creation, column-level updates, ending, orphan recovery, and cascading delete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::shared::mappers::{format_timestamp, parse_session_from_row};
use super::shared::transactions::TransactionGuard;
use crate::errors::{DatabaseError, DatabaseResult};
use crate::models::{Session, SessionChanges, SessionFilter, SessionSort};
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use tracing::debug;
use uuid::Uuid;

/// Session database operations manager
pub struct SessionManager {
    pool: SqlitePool,
}

impl SessionManager {
    /// Create a new session manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new active session without looking at other sessions
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn create_session(
        &self,
        label: Option<&str>,
        start_time: DateTime<Utc>,
    ) -> DatabaseResult<Session> {
        let session = Session::new(label.map(ToOwned::to_owned), start_time);

        sqlx::query(
            r"
            INSERT INTO sessions (id, label, start_time, end_time, is_active)
            VALUES ($1, $2, $3, NULL, 1)
            ",
        )
        .bind(session.id.to_string())
        .bind(&session.label)
        .bind(format_timestamp(session.start_time))
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::query(format!("Failed to create session: {e}")))?;

        Ok(session)
    }

    /// Insert a new active session only if no session is active
    ///
    /// The existence check and the insert are one statement, so two callers
    /// racing on different connections cannot both succeed.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn create_session_if_idle(
        &self,
        label: Option<&str>,
        start_time: DateTime<Utc>,
    ) -> DatabaseResult<Option<Session>> {
        let session = Session::new(label.map(ToOwned::to_owned), start_time);

        let inserted = sqlx::query(
            r"
            INSERT INTO sessions (id, label, start_time, end_time, is_active)
            SELECT $1, $2, $3, NULL, 1
            WHERE NOT EXISTS (SELECT 1 FROM sessions WHERE is_active = 1)
            ",
        )
        .bind(session.id.to_string())
        .bind(&session.label)
        .bind(format_timestamp(session.start_time))
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::query(format!("Failed to create session: {e}")))?
        .rows_affected();

        Ok((inserted == 1).then_some(session))
    }

    /// Get a session by ID
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get_session(&self, session_id: Uuid) -> DatabaseResult<Option<Session>> {
        let row = sqlx::query(
            "SELECT id, label, start_time, end_time, is_active FROM sessions WHERE id = $1",
        )
        .bind(session_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::query(format!("Failed to get session: {e}")))?;

        row.as_ref().map(parse_session_from_row).transpose()
    }

    /// Mark an active session ended at `end_time`
    ///
    /// # Errors
    ///
    /// Returns `AlreadyEnded` if the session is not active, `NotFound` if it
    /// does not exist, or a query error
    pub async fn end_session(
        &self,
        session_id: Uuid,
        end_time: DateTime<Utc>,
    ) -> DatabaseResult<Session> {
        let row = sqlx::query(
            r"
            UPDATE sessions SET is_active = 0, end_time = $2
            WHERE id = $1 AND is_active = 1
            RETURNING id, label, start_time, end_time, is_active
            ",
        )
        .bind(session_id.to_string())
        .bind(format_timestamp(end_time))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::query(format!("Failed to end session: {e}")))?;

        if let Some(row) = row {
            return parse_session_from_row(&row);
        }

        match self.get_session(session_id).await? {
            Some(_) => Err(DatabaseError::AlreadyEnded { session_id }),
            None => Err(DatabaseError::session_not_found(session_id)),
        }
    }

    /// List sessions matching `filter`, ordered by `sort`
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn fetch_sessions(
        &self,
        filter: &SessionFilter,
        sort: SessionSort,
    ) -> DatabaseResult<Vec<Session>> {
        let mut query: QueryBuilder<'_, Sqlite> = QueryBuilder::new(
            "SELECT id, label, start_time, end_time, is_active FROM sessions WHERE 1 = 1",
        );

        if let Some(active) = filter.active {
            query.push(" AND is_active = ").push_bind(i64::from(active));
        }
        if let Some(after) = filter.started_after {
            query
                .push(" AND start_time >= ")
                .push_bind(format_timestamp(after));
        }
        if let Some(before) = filter.started_before {
            query
                .push(" AND start_time < ")
                .push_bind(format_timestamp(before));
        }
        if let Some(needle) = &filter.label_contains {
            query
                .push(" AND instr(lower(label), lower(")
                .push_bind(needle.clone())
                .push(")) > 0");
        }

        query.push(match sort {
            SessionSort::StartTimeAscending => " ORDER BY start_time ASC, rowid ASC",
            SessionSort::StartTimeDescending => " ORDER BY start_time DESC, rowid DESC",
            SessionSort::EndTimeDescending => {
                " ORDER BY end_time IS NULL, end_time DESC, start_time DESC"
            }
        });

        if let Some(limit) = filter.limit {
            query.push(" LIMIT ").push_bind(i64::from(limit));
        }

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DatabaseError::query(format!("Failed to fetch sessions: {e}")))?;

        rows.iter().map(parse_session_from_row).collect()
    }

    /// Write only the fields present in `changes`
    ///
    /// Columns absent from `changes` are not part of the `UPDATE`, so a
    /// concurrent writer's edit to another field survives. When two writers set
    /// the same field the later commit wins. An end time can only be corrected
    /// on a session that has already ended.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the session does not exist, `StillActive` if an end
    /// time is given for a recording session, or a query error
    pub async fn update_session(
        &self,
        session_id: Uuid,
        changes: &SessionChanges,
    ) -> DatabaseResult<Session> {
        if changes.is_empty() {
            return self
                .get_session(session_id)
                .await?
                .ok_or_else(|| DatabaseError::session_not_found(session_id));
        }

        let mut query: QueryBuilder<'_, Sqlite> = QueryBuilder::new("UPDATE sessions SET ");
        {
            let mut set = query.separated(", ");
            if let Some(label) = &changes.label {
                set.push("label = ").push_bind_unseparated(label.clone());
            }
            if let Some(end_time) = changes.end_time {
                set.push("end_time = ")
                    .push_bind_unseparated(format_timestamp(end_time));
            }
        }
        query.push(" WHERE id = ").push_bind(session_id.to_string());
        if changes.end_time.is_some() {
            query.push(" AND is_active = 0");
        }
        query.push(" RETURNING id, label, start_time, end_time, is_active");

        let row = query
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::query(format!("Failed to update session: {e}")))?;

        match row {
            Some(row) => parse_session_from_row(&row),
            None => match self.get_session(session_id).await? {
                Some(_) => Err(DatabaseError::StillActive { session_id }),
                None => Err(DatabaseError::session_not_found(session_id)),
            },
        }
    }

    /// Delete a session and all of its trail points in one transaction
    ///
    /// Returns the number of trail points removed.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the session does not exist, or a query error
    pub async fn delete_session(&self, session_id: Uuid) -> DatabaseResult<u64> {
        let id = session_id.to_string();
        let mut guard = TransactionGuard::begin(&self.pool, "delete_session").await?;

        let points = sqlx::query("DELETE FROM trail_points WHERE session_id = $1")
            .bind(&id)
            .execute(guard.conn()?)
            .await
            .map_err(|e| DatabaseError::query(format!("Failed to delete trail points: {e}")))?
            .rows_affected();

        let sessions = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(&id)
            .execute(guard.conn()?)
            .await
            .map_err(|e| DatabaseError::query(format!("Failed to delete session: {e}")))?
            .rows_affected();

        if sessions == 0 {
            guard.rollback().await?;
            return Err(DatabaseError::session_not_found(session_id));
        }

        guard.commit().await?;
        debug!(session_id = %session_id, points, "session deleted");
        Ok(points)
    }

    /// End every active session at `end_time`, returning the sessions ended
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn recover_orphaned_sessions(
        &self,
        end_time: DateTime<Utc>,
    ) -> DatabaseResult<Vec<Session>> {
        let rows = sqlx::query(
            r"
            UPDATE sessions SET is_active = 0, end_time = $1
            WHERE is_active = 1
            RETURNING id, label, start_time, end_time, is_active
            ",
        )
        .bind(format_timestamp(end_time))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DatabaseError::query(format!("Failed to recover orphaned sessions: {e}")))?;

        rows.iter().map(parse_session_from_row).collect()
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
