// ABOUTME: Trail export command for trailkeeper-cli
// ABOUTME: Prints a session's trail points as a JSON array for downstream exporters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use trailkeeper::{
    database::{Database, LocationRepository, LocationRepositoryImpl},
    errors::AppResult,
    models::{LocationQuery, SortOrder},
};
use uuid::Uuid;

/// Print a session's trail as pretty JSON
pub async fn export(
    database: &Database,
    session_id: Uuid,
    limit: Option<u32>,
    offset: Option<u32>,
    descending: bool,
) -> AppResult<()> {
    let repo = LocationRepositoryImpl::new(database.clone());
    let query = LocationQuery {
        order: if descending {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        },
        limit,
        offset,
    };
    let points = repo.fetch_locations(session_id, &query).await?;
    println!("{}", serde_json::to_string_pretty(&points)?);
    Ok(())
}
