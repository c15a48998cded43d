// ABOUTME: SQLite implementation of the location repository
// ABOUTME: Delegates trail point persistence and reads to LocationManager
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::LocationRepository;
use crate::database::{Database, LocationManager};
use crate::errors::DatabaseResult;
use crate::models::{LocationQuery, TrailPoint};
use async_trait::async_trait;
use uuid::Uuid;

/// `SQLite` implementation of `LocationRepository`
#[derive(Clone)]
pub struct LocationRepositoryImpl {
    db: Database,
}

impl LocationRepositoryImpl {
    /// Create a new `LocationRepository` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    fn manager(&self) -> LocationManager {
        LocationManager::new(self.db.pool().clone())
    }
}

#[async_trait]
impl LocationRepository for LocationRepositoryImpl {
    async fn save_location(
        &self,
        point: &TrailPoint,
        session_id: Uuid,
    ) -> DatabaseResult<TrailPoint> {
        self.manager().save_location(point, session_id).await
    }

    async fn fetch_locations(
        &self,
        session_id: Uuid,
        query: &LocationQuery,
    ) -> DatabaseResult<Vec<TrailPoint>> {
        self.manager().fetch_locations(session_id, query).await
    }

    async fn delete_locations(&self, session_id: Uuid) -> DatabaseResult<u64> {
        self.manager().delete_locations(session_id).await
    }

    async fn location_count(&self, session_id: Uuid) -> DatabaseResult<u64> {
        self.manager().location_count(session_id).await
    }
}
