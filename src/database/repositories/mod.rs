// ABOUTME: Repository contracts for sessions and trail points
// ABOUTME: async_trait interfaces injected into the coordinator, with SQLite implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Repositories
//!
//! The coordinator only sees these traits, so tests and embedders can swap in
//! their own stores. Both `*RepositoryImpl` types delegate to the `SQLite`
//! managers.

mod location_repository;
mod session_repository;

pub use location_repository::LocationRepositoryImpl;
pub use session_repository::SessionRepositoryImpl;

use crate::errors::DatabaseResult;
use crate::models::{LocationQuery, Session, SessionChanges, SessionFilter, SessionSort, TrailPoint};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Persistence contract for recording sessions
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Create an active session unconditionally
    async fn create_session(
        &self,
        label: Option<&str>,
        start_time: DateTime<Utc>,
    ) -> DatabaseResult<Session>;

    /// Create an active session only if none is active, atomically
    ///
    /// Returns `None` when another session is already active.
    async fn create_session_if_idle(
        &self,
        label: Option<&str>,
        start_time: DateTime<Utc>,
    ) -> DatabaseResult<Option<Session>>;

    /// Look up one session
    async fn get_session(&self, session_id: Uuid) -> DatabaseResult<Option<Session>>;

    /// End an active session; `AlreadyEnded` if it was not active
    async fn end_session(
        &self,
        session_id: Uuid,
        end_time: DateTime<Utc>,
    ) -> DatabaseResult<Session>;

    /// Sessions matching `filter` in `sort` order
    async fn fetch_sessions(
        &self,
        filter: &SessionFilter,
        sort: SessionSort,
    ) -> DatabaseResult<Vec<Session>>;

    /// All sessions currently marked active
    async fn fetch_active_sessions(&self) -> DatabaseResult<Vec<Session>> {
        self.fetch_sessions(&SessionFilter::active(), SessionSort::StartTimeDescending)
            .await
    }

    /// Every session, most recent start first
    async fn fetch_all_sessions(&self) -> DatabaseResult<Vec<Session>> {
        self.fetch_sessions(&SessionFilter::default(), SessionSort::StartTimeDescending)
            .await
    }

    /// Write only the fields present in `changes`
    async fn update_session(
        &self,
        session_id: Uuid,
        changes: &SessionChanges,
    ) -> DatabaseResult<Session>;

    /// Delete a session together with its trail; returns the points removed
    async fn delete_session(&self, session_id: Uuid) -> DatabaseResult<u64>;

    /// Number of trail points owned by the session
    async fn location_count(&self, session_id: Uuid) -> DatabaseResult<u64>;

    /// End every active session as of now; returns how many were ended
    async fn recover_orphaned_sessions(&self) -> DatabaseResult<u64>;
}

/// Persistence contract for trail points
#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Persist a point owned by `session_id`
    async fn save_location(
        &self,
        point: &TrailPoint,
        session_id: Uuid,
    ) -> DatabaseResult<TrailPoint>;

    /// Read a session's trail in timestamp order
    async fn fetch_locations(
        &self,
        session_id: Uuid,
        query: &LocationQuery,
    ) -> DatabaseResult<Vec<TrailPoint>>;

    /// Remove a session's points, keeping the session
    async fn delete_locations(&self, session_id: Uuid) -> DatabaseResult<u64>;

    /// Number of points owned by the session
    async fn location_count(&self, session_id: Uuid) -> DatabaseResult<u64>;
}
