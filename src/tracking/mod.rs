// ABOUTME: Tracking orchestration: session lifecycle, fix ingestion, and change notifications
// ABOUTME: Re-exports the coordinator, authorization collaborator, and event types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Authorization collaborator
pub mod authorization;
/// Session lifecycle state machine
pub mod coordinator;
/// Snapshots, notifications, and ingest outcomes
pub mod events;

pub use authorization::{AuthorizationProvider, StaticAuthorization};
pub use coordinator::{fix_queue, TrackingCoordinator};
pub use events::{FixOutcome, IngestStats, TrackingEvent, TrackingPhase, TrackingSnapshot};
