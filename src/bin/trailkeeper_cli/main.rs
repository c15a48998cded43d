// ABOUTME: Trailkeeper CLI - inspect, maintain, and replay recorded trails
// ABOUTME: Session listing and editing, trail export as JSON, orphan recovery, and fix-file replay
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Close sessions left active by a crashed recorder
//! trailkeeper-cli recover
//!
//! # List sessions, or only the active one
//! trailkeeper-cli sessions list
//! trailkeeper-cli sessions list --active
//!
//! # Show, relabel or delete a session
//! trailkeeper-cli sessions show 7f1c...
//! trailkeeper-cli sessions rename 7f1c... "Coastal loop"
//! trailkeeper-cli sessions delete 7f1c...
//!
//! # Export a trail as JSON
//! trailkeeper-cli points 7f1c... --limit 100
//!
//! # Record a session from a JSON-lines fix file
//! trailkeeper-cli --profile high_precision replay fixes.jsonl --label "Bench run"
//! ```

mod commands;
mod helpers;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use trailkeeper::{
    config::{DatabaseUrl, TrackerConfig, TrackingProfile},
    database::Database,
    logging::LoggingConfig,
};
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "trailkeeper-cli",
    about = "Trailkeeper session and trail management CLI",
    long_about = "Inspect and maintain recorded sessions, export trails, and replay fix files through the tracking pipeline."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Tracking profile override (default, high_precision, efficient, permissive)
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// End every session left active by a previous run
    Recover,

    /// Session management commands
    Sessions {
        #[command(subcommand)]
        action: SessionCommand,
    },

    /// Print a session's trail points as JSON
    Points {
        /// Session ID
        session_id: Uuid,

        /// Maximum number of points
        #[arg(long)]
        limit: Option<u32>,

        /// Number of points to skip
        #[arg(long)]
        offset: Option<u32>,

        /// Newest points first
        #[arg(long)]
        descending: bool,
    },

    /// Record a new session from a JSON-lines file of fixes
    Replay {
        /// File with one JSON fix per line
        file: PathBuf,

        /// Session label
        #[arg(long)]
        label: Option<String>,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum SessionCommand {
    /// List sessions, most recent first
    List {
        /// Only active sessions
        #[arg(long)]
        active: bool,

        /// Only sessions whose label contains this text
        #[arg(long)]
        label: Option<String>,

        /// Maximum number of sessions
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Show one session with its point count
    Show {
        /// Session ID
        session_id: Uuid,
    },

    /// Set or clear a session's label
    Rename {
        /// Session ID
        session_id: Uuid,

        /// New label (omit to clear)
        label: Option<String>,
    },

    /// Delete a session and its trail
    Delete {
        /// Session ID
        session_id: Uuid,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    LoggingConfig::for_cli(cli.verbose).init()?;

    let mut config = match cli.profile.as_deref() {
        Some(name) => TrackerConfig::from_env_with_profile(name.parse::<TrackingProfile>()?)?,
        None => TrackerConfig::from_env()?,
    };
    if let Some(url) = cli.database_url.as_deref() {
        config.database.url = DatabaseUrl::parse_url(url)?;
    }

    info!("Connecting to database: {}", config.database.url);
    let database = Database::connect(&config.database).await?;

    match cli.command {
        Command::Recover => commands::sessions::recover(&database).await?,
        Command::Sessions { action } => match action {
            SessionCommand::List {
                active,
                label,
                limit,
            } => commands::sessions::list(&database, active, label, limit).await?,
            SessionCommand::Show { session_id } => {
                commands::sessions::show(&database, session_id).await?;
            }
            SessionCommand::Rename { session_id, label } => {
                commands::sessions::rename(&database, session_id, label).await?;
            }
            SessionCommand::Delete { session_id } => {
                commands::sessions::delete(&database, session_id).await?;
            }
        },
        Command::Points {
            session_id,
            limit,
            offset,
            descending,
        } => commands::points::export(&database, session_id, limit, offset, descending).await?,
        Command::Replay { file, label } => {
            commands::replay::run(&database, &config, &file, label).await?;
        }
    }

    database.close().await;
    Ok(())
}
