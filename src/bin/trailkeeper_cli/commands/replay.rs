// ABOUTME: Fix-file replay command for trailkeeper-cli
// ABOUTME: Drives a full startup, start, ingest, stop cycle from a JSON-lines file of fixes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use trailkeeper::{
    config::TrackerConfig,
    database::Database,
    errors::{AppError, AppResult},
    models::Fix,
    tracking::{fix_queue, StaticAuthorization, TrackingCoordinator},
};

use crate::helpers::display::display_replay_summary;

/// Parse a JSON-lines fix file; blank lines and `#` comments are skipped
fn parse_fixes(content: &str) -> AppResult<Vec<Fix>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| {
            serde_json::from_str::<Fix>(line).map_err(|e| {
                AppError::invalid_input(format!("Line {}: invalid fix: {e}", index + 1))
            })
        })
        .collect()
}

/// Record one session from `file`
pub async fn run(
    database: &Database,
    config: &TrackerConfig,
    file: &Path,
    label: Option<String>,
) -> AppResult<()> {
    let content = tokio::fs::read_to_string(file).await.map_err(|e| {
        AppError::invalid_input(format!("Failed to read {}: {e}", file.display()))
    })?;
    let fixes = parse_fixes(&content)?;
    info!(file = %file.display(), fixes = fixes.len(), profile = %config.profile, "replaying fixes");

    let coordinator = Arc::new(TrackingCoordinator::with_database(
        database,
        Arc::new(StaticAuthorization::always()),
        config.tracking,
    ));

    let recovered = coordinator.on_startup().await;
    if recovered > 0 {
        warn!(recovered, "ended orphaned sessions before replay");
    }

    let session = coordinator.start_tracking(label).await?;

    let (sender, receiver) = fix_queue();
    let consumer = coordinator.spawn_fix_consumer(receiver);
    for fix in fixes {
        sender
            .send(fix)
            .await
            .map_err(|e| AppError::internal(format!("Fix consumer stopped early: {e}")))?;
    }
    drop(sender);

    let stats = consumer
        .await
        .map_err(|e| AppError::internal(format!("Fix consumer task failed: {e}")))?;

    let ended = coordinator.stop_tracking().await?.unwrap_or(session);
    display_replay_summary(&ended, &stats);
    Ok(())
}
