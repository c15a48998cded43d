// ABOUTME: Session maintenance commands for trailkeeper-cli
// ABOUTME: List, show, rename, delete, and orphan recovery against the session store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use trailkeeper::{
    database::{Database, SessionRepository, SessionRepositoryImpl},
    errors::{AppError, AppResult},
    models::{SessionChanges, SessionFilter, SessionSort},
};
use tracing::info;
use uuid::Uuid;

use crate::helpers::display::{display_session_detail, display_session_table};

type Result<T> = AppResult<T>;

/// End every session still marked active
pub async fn recover(database: &Database) -> Result<()> {
    let repo = SessionRepositoryImpl::new(database.clone());
    let count = repo.recover_orphaned_sessions().await?;
    if count == 0 {
        println!("No orphaned sessions.");
    } else {
        println!("Ended {count} orphaned session(s).");
    }
    Ok(())
}

/// List sessions, most recent start first
pub async fn list(
    database: &Database,
    active_only: bool,
    label: Option<String>,
    limit: Option<u32>,
) -> Result<()> {
    let repo = SessionRepositoryImpl::new(database.clone());
    let filter = SessionFilter {
        active: active_only.then_some(true),
        label_contains: label,
        limit,
        ..SessionFilter::default()
    };
    let sessions = repo
        .fetch_sessions(&filter, SessionSort::StartTimeDescending)
        .await?;

    let mut rows = Vec::with_capacity(sessions.len());
    for session in sessions {
        let count = repo.location_count(session.id).await?;
        rows.push((session, count));
    }
    display_session_table(&rows);
    Ok(())
}

/// Show one session
pub async fn show(database: &Database, session_id: Uuid) -> Result<()> {
    let repo = SessionRepositoryImpl::new(database.clone());
    let session = repo
        .get_session(session_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Session {session_id}")))?;
    let count = repo.location_count(session_id).await?;
    display_session_detail(&session, count);
    Ok(())
}

/// Set or clear a session label
pub async fn rename(database: &Database, session_id: Uuid, label: Option<String>) -> Result<()> {
    let repo = SessionRepositoryImpl::new(database.clone());
    let session = repo
        .update_session(session_id, &SessionChanges::label(label))
        .await?;
    info!(session_id = %session_id, label = ?session.label, "session relabelled");
    println!(
        "Session {} label: {}",
        session.id,
        session.label.as_deref().unwrap_or("(none)")
    );
    Ok(())
}

/// Delete a session and its trail
pub async fn delete(database: &Database, session_id: Uuid) -> Result<()> {
    let repo = SessionRepositoryImpl::new(database.clone());
    let points = repo.delete_session(session_id).await?;
    println!("Deleted session {session_id} and {points} trail point(s).");
    Ok(())
}
