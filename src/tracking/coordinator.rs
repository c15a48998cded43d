// ABOUTME: Session lifecycle state machine tying the validator, smoother, and stores together
// ABOUTME: Enforces one active session, ingests fixes sequentially, and recovers orphans at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tracking Coordinator
//!
//! ```text
//!            start_tracking                 stop_tracking
//!   Idle ───────────────────▶ Tracking ───────────────────▶ Idle
//!                              │    ▲
//!                              └────┘ on_fix
//! ```
//!
//! Three locks, always taken in this order when nested:
//!
//! - `lifecycle` serializes `on_startup`, `start_tracking` and `stop_tracking`
//! - `ingest` serializes `on_fix`, so fixes are validated one at a time
//! - `state` guards the in-memory session, cursor, smoother and count and is
//!   never held across a store call
//!
//! `stop_tracking` does not take `ingest`, so it never waits on an in-flight
//! save. The owning session is captured when a fix is validated; a save that
//! completes after stop lands in the old session and does not touch the count
//! of whatever session is current by then.

use super::authorization::AuthorizationProvider;
use super::events::{FixOutcome, IngestStats, TrackingEvent, TrackingPhase, TrackingSnapshot};
use crate::constants::tracking::{EVENT_CHANNEL_CAPACITY, FIX_QUEUE_CAPACITY};
use crate::database::{
    Database, LocationRepository, LocationRepositoryImpl, SessionRepository,
    SessionRepositoryImpl,
};
use crate::errors::{DatabaseError, TrackingError};
use crate::models::{Fix, Session, TrailPoint};
use crate::smoothing::PositionSmoother;
use crate::validation::{FixValidator, Verdict};
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use trailkeeper_core::config::TrackingConfig;

/// Guarded create attempts before `start_tracking` gives up
const START_ATTEMPTS: u32 = 2;

/// Per-session state that lives only while tracking
struct ActiveTracking {
    session: Session,
    validator: FixValidator,
    smoother: Option<PositionSmoother>,
    location_count: u64,
    last_point: Option<TrailPoint>,
}

/// Orchestrates recording sessions
pub struct TrackingCoordinator {
    sessions: Arc<dyn SessionRepository>,
    locations: Arc<dyn LocationRepository>,
    authorization: Arc<dyn AuthorizationProvider>,
    config: TrackingConfig,
    state: Mutex<Option<ActiveTracking>>,
    ingest: Mutex<()>,
    lifecycle: Mutex<()>,
    startup_done: AtomicBool,
    events: broadcast::Sender<TrackingEvent>,
}

impl TrackingCoordinator {
    /// Create an idle coordinator over the given collaborators
    #[must_use]
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        locations: Arc<dyn LocationRepository>,
        authorization: Arc<dyn AuthorizationProvider>,
        config: TrackingConfig,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            sessions,
            locations,
            authorization,
            config,
            state: Mutex::new(None),
            ingest: Mutex::new(()),
            lifecycle: Mutex::new(()),
            startup_done: AtomicBool::new(false),
            events,
        }
    }

    /// Coordinator backed by the `SQLite` repositories of `db`
    #[must_use]
    pub fn with_database(
        db: &Database,
        authorization: Arc<dyn AuthorizationProvider>,
        config: TrackingConfig,
    ) -> Self {
        Self::new(
            Arc::new(SessionRepositoryImpl::new(db.clone())),
            Arc::new(LocationRepositoryImpl::new(db.clone())),
            authorization,
            config,
        )
    }

    /// Validation and smoothing settings in use
    #[must_use]
    pub const fn config(&self) -> &TrackingConfig {
        &self.config
    }

    /// Receive change notifications from now on
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<TrackingEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: TrackingEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    /// Close sessions left active by a previous run
    ///
    /// Runs at most once per coordinator and never fails: a store error is
    /// logged and startup proceeds. Returns the number of sessions ended.
    pub async fn on_startup(&self) -> u64 {
        let _lifecycle = self.lifecycle.lock().await;
        self.recover_once().await
    }

    async fn recover_once(&self) -> u64 {
        if self.startup_done.swap(true, Ordering::SeqCst) {
            return 0;
        }
        match self.sessions.recover_orphaned_sessions().await {
            Ok(count) => {
                if count > 0 {
                    self.emit(TrackingEvent::OrphansRecovered { count });
                }
                count
            }
            Err(e) => {
                error!(error = %e, "orphaned session recovery failed, continuing startup");
                0
            }
        }
    }

    /// Start recording a new session
    ///
    /// # Errors
    ///
    /// - `AuthorizationDenied` unless the provider reports `Always`
    /// - `SessionAlreadyActive` if this coordinator or any writer sharing the
    ///   store already has an active session
    /// - `Persistence` if the store fails
    pub async fn start_tracking(&self, label: Option<String>) -> Result<Session, TrackingError> {
        let _lifecycle = self.lifecycle.lock().await;

        let status = self.authorization.status();
        if !status.allows_tracking() {
            warn!(status = %status, "start refused: location authorization insufficient");
            return Err(TrackingError::AuthorizationDenied { status });
        }

        if let Some(active) = self.state.lock().await.as_ref() {
            return Err(TrackingError::SessionAlreadyActive {
                session_id: active.session.id,
            });
        }

        if !self.startup_done.load(Ordering::SeqCst) {
            warn!("start_tracking called before on_startup, recovering orphaned sessions first");
            self.recover_once().await;
        }

        let session = self.claim_session(label.as_deref()).await?;

        *self.state.lock().await = Some(ActiveTracking {
            session: session.clone(),
            validator: FixValidator::new(self.config.validation, session.id),
            smoother: self.config.smoothing.map(PositionSmoother::new),
            location_count: 0,
            last_point: None,
        });

        info!(session_id = %session.id, label = ?session.label, "tracking started");
        self.emit(TrackingEvent::SessionStarted {
            session: session.clone(),
        });
        Ok(session)
    }

    /// Guarded create that names the blocking session on refusal
    ///
    /// A refusal whose blocker has ended by the time it is looked up is retried
    /// once before giving up.
    async fn claim_session(&self, label: Option<&str>) -> Result<Session, TrackingError> {
        for attempt in 1..=START_ATTEMPTS {
            if let Some(session) = self
                .sessions
                .create_session_if_idle(label, Utc::now())
                .await?
            {
                return Ok(session);
            }
            if let Some(active) = self.sessions.fetch_active_sessions().await?.first() {
                warn!(active_session = %active.id, "start refused: another session is active");
                return Err(TrackingError::SessionAlreadyActive {
                    session_id: active.id,
                });
            }
            debug!(attempt, "blocking session ended during start, retrying");
        }
        Err(TrackingError::Persistence(DatabaseError::TransactionError {
            context: format!(
                "session start refused {START_ATTEMPTS} times with no active session visible"
            ),
        }))
    }

    /// Feed one fix through validation, smoothing and persistence
    ///
    /// Rejections are ordinary outcomes. A fix arriving while idle is ignored.
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if the accepted point could not be saved; the
    /// coordinator stays in `Tracking`
    pub async fn on_fix(&self, fix: Fix) -> Result<FixOutcome, TrackingError> {
        let _ingest = self.ingest.lock().await;

        let (session_id, point) = {
            let mut state = self.state.lock().await;
            let Some(active) = state.as_mut() else {
                debug!("fix ignored while idle");
                return Ok(FixOutcome::Ignored);
            };
            let session_id = active.session.id;
            match active.validator.evaluate(&fix) {
                Verdict::Reject(reason) => {
                    self.emit(TrackingEvent::FixRejected { session_id, reason });
                    return Ok(FixOutcome::Rejected(reason));
                }
                Verdict::Accept(point) => {
                    let point = match active.smoother.as_mut() {
                        Some(smoother) => smoother.update(&point),
                        None => point,
                    };
                    (session_id, point)
                }
            }
        };

        match self.locations.save_location(&point, session_id).await {
            Ok(saved) => {
                if let Some(active) = self
                    .state
                    .lock()
                    .await
                    .as_mut()
                    .filter(|a| a.session.id == session_id)
                {
                    active.location_count += 1;
                    active.last_point = Some(saved.clone());
                }
                self.emit(TrackingEvent::FixAccepted {
                    session_id,
                    point: saved.clone(),
                });
                Ok(FixOutcome::Accepted(saved))
            }
            Err(e) => {
                error!(session_id = %session_id, error = %e, "failed to save trail point");
                self.emit(TrackingEvent::PersistenceFailed {
                    session_id,
                    error: e.to_string(),
                });
                Err(TrackingError::Persistence(e))
            }
        }
    }

    /// Stop recording and end the session in the store
    ///
    /// The coordinator is idle afterwards whether or not the store call
    /// succeeds. Returns `None` when there was nothing to stop.
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if ending the session failed
    pub async fn stop_tracking(&self) -> Result<Option<Session>, TrackingError> {
        let _lifecycle = self.lifecycle.lock().await;

        let Some(active) = self.state.lock().await.take() else {
            return Ok(None);
        };
        let session_id = active.session.id;
        let location_count = active.location_count;

        self.emit(TrackingEvent::SessionStopped {
            session_id,
            location_count,
        });

        match self.sessions.end_session(session_id, Utc::now()).await {
            Ok(session) => {
                info!(session_id = %session_id, location_count, "tracking stopped");
                Ok(Some(session))
            }
            Err(e) => {
                error!(session_id = %session_id, error = %e, "failed to end session");
                Err(TrackingError::Persistence(e))
            }
        }
    }

    /// Current phase, session, count and last point
    pub async fn snapshot(&self) -> TrackingSnapshot {
        self.state
            .lock()
            .await
            .as_ref()
            .map_or_else(TrackingSnapshot::default, |active| TrackingSnapshot {
                phase: TrackingPhase::Tracking,
                session: Some(active.session.clone()),
                location_count: active.location_count,
                last_point: active.last_point.clone(),
            })
    }

    /// Whether a session is recording
    pub async fn is_tracking(&self) -> bool {
        self.state.lock().await.is_some()
    }

    /// Drain `fixes` into `on_fix`, one at a time, until every sender is dropped
    ///
    /// The task resolves to the ingest totals.
    #[must_use]
    pub fn spawn_fix_consumer(
        self: &Arc<Self>,
        mut fixes: mpsc::Receiver<Fix>,
    ) -> JoinHandle<IngestStats> {
        let coordinator = Arc::clone(self);
        tokio::spawn(async move {
            let mut stats = IngestStats::default();
            while let Some(fix) = fixes.recv().await {
                let result = coordinator.on_fix(fix).await;
                stats.record(&result);
            }
            debug!(total = stats.total(), accepted = stats.accepted, "fix consumer finished");
            stats
        })
    }
}

/// Bounded single-consumer queue for feeding [`TrackingCoordinator::spawn_fix_consumer`]
#[must_use]
pub fn fix_queue() -> (mpsc::Sender<Fix>, mpsc::Receiver<Fix>) {
    mpsc::channel(FIX_QUEUE_CAPACITY)
}
