// ABOUTME: Output formatting helpers for trailkeeper-cli
// ABOUTME: Session tables, session detail, and replay statistics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use trailkeeper::models::Session;
use trailkeeper::tracking::IngestStats;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

fn format_duration(session: &Session) -> String {
    session.duration().map_or_else(
        || "-".to_owned(),
        |d| {
            let secs = d.num_seconds().max(0);
            format!("{}h{:02}m{:02}s", secs / 3600, (secs % 3600) / 60, secs % 60)
        },
    )
}

/// Print sessions with their point counts
pub fn display_session_table(rows: &[(Session, u64)]) {
    if rows.is_empty() {
        println!("No sessions.");
        return;
    }
    println!(
        "{:<36}  {:<6}  {:<23}  {:>10}  {:>7}  LABEL",
        "ID", "ACTIVE", "STARTED", "DURATION", "POINTS"
    );
    println!("{}", "=".repeat(100));
    for (session, count) in rows {
        println!(
            "{:<36}  {:<6}  {:<23}  {:>10}  {:>7}  {}",
            session.id,
            if session.is_active { "yes" } else { "no" },
            session.start_time.format(TIME_FORMAT),
            format_duration(session),
            count,
            session.label.as_deref().unwrap_or("")
        );
    }
}

/// Print one session in detail
pub fn display_session_detail(session: &Session, location_count: u64) {
    println!("Session {}", session.id);
    println!("{}", "=".repeat(50));
    println!("   Label: {}", session.label.as_deref().unwrap_or("(none)"));
    println!("   Active: {}", session.is_active);
    println!("   Started: {}", session.start_time.format(TIME_FORMAT));
    match session.end_time {
        Some(end) => println!("   Ended: {}", end.format(TIME_FORMAT)),
        None => println!("   Ended: -"),
    }
    println!("   Duration: {}", format_duration(session));
    println!("   Points: {location_count}");
}

/// Print the outcome of a replay
pub fn display_replay_summary(session: &Session, stats: &IngestStats) {
    println!("\nReplay finished for session {}", session.id);
    println!("{}", "=".repeat(50));
    println!("   Fixes read: {}", stats.total());
    println!("   Accepted: {}", stats.accepted);
    println!("   Rejected: {}", stats.rejected);

    let mut reasons: Vec<_> = stats.rejected_by_reason.iter().collect();
    reasons.sort_by_key(|(reason, _)| reason.code());
    for (reason, count) in reasons {
        println!("      {:<14} {count}", reason.code());
    }

    if stats.failed > 0 {
        println!("   Save failures: {}", stats.failed);
    }
    if stats.ignored > 0 {
        println!("   Ignored: {}", stats.ignored);
    }
    println!("   Duration: {}", format_duration(session));
}
