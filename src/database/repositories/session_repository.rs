// ABOUTME: SQLite implementation of the session repository
// ABOUTME: Delegates to SessionManager and logs each orphaned session it closes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::SessionRepository;
use crate::database::{Database, SessionManager};
use crate::errors::DatabaseResult;
use crate::models::{Session, SessionChanges, SessionFilter, SessionSort};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

/// `SQLite` implementation of `SessionRepository`
#[derive(Clone)]
pub struct SessionRepositoryImpl {
    db: Database,
}

impl SessionRepositoryImpl {
    /// Create a new `SessionRepository` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    fn manager(&self) -> SessionManager {
        SessionManager::new(self.db.pool().clone())
    }
}

#[async_trait]
impl SessionRepository for SessionRepositoryImpl {
    async fn create_session(
        &self,
        label: Option<&str>,
        start_time: DateTime<Utc>,
    ) -> DatabaseResult<Session> {
        self.manager().create_session(label, start_time).await
    }

    async fn create_session_if_idle(
        &self,
        label: Option<&str>,
        start_time: DateTime<Utc>,
    ) -> DatabaseResult<Option<Session>> {
        self.manager().create_session_if_idle(label, start_time).await
    }

    async fn get_session(&self, session_id: Uuid) -> DatabaseResult<Option<Session>> {
        self.manager().get_session(session_id).await
    }

    async fn end_session(
        &self,
        session_id: Uuid,
        end_time: DateTime<Utc>,
    ) -> DatabaseResult<Session> {
        self.manager().end_session(session_id, end_time).await
    }

    async fn fetch_sessions(
        &self,
        filter: &SessionFilter,
        sort: SessionSort,
    ) -> DatabaseResult<Vec<Session>> {
        self.manager().fetch_sessions(filter, sort).await
    }

    async fn update_session(
        &self,
        session_id: Uuid,
        changes: &SessionChanges,
    ) -> DatabaseResult<Session> {
        self.manager().update_session(session_id, changes).await
    }

    async fn delete_session(&self, session_id: Uuid) -> DatabaseResult<u64> {
        self.manager().delete_session(session_id).await
    }

    async fn location_count(&self, session_id: Uuid) -> DatabaseResult<u64> {
        self.manager().location_count(session_id).await
    }

    async fn recover_orphaned_sessions(&self) -> DatabaseResult<u64> {
        let recovered = self.manager().recover_orphaned_sessions(Utc::now()).await?;
        for session in &recovered {
            warn!(
                session_id = %session.id,
                start_time = %session.start_time,
                "ended session left active by a previous run"
            );
        }
        if !recovered.is_empty() {
            info!(count = recovered.len(), "orphaned sessions recovered");
        }
        Ok(recovered.len() as u64)
    }
}
