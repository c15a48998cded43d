// ABOUTME: Integration tests for the tracking coordinator
// ABOUTME: Covers lifecycle rules, recovery, ingestion, persistence failures, and change events
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{
    create_coordinator, create_file_database, create_test_database, fix_at, open_file_database,
    t0, walk,
};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, Notify};
use trailkeeper::config::{TrackingConfig, TrackingProfile};
use trailkeeper::database::{
    Database, LocationRepository, LocationRepositoryImpl, SessionRepository, SessionRepositoryImpl,
};
use trailkeeper::errors::{DatabaseError, DatabaseResult, TrackingError};
use trailkeeper::models::{
    AuthorizationStatus, Fix, LocationQuery, Session, SessionChanges, SessionFilter, SessionSort,
    TrailPoint,
};
use trailkeeper::tracking::{
    fix_queue, FixOutcome, StaticAuthorization, TrackingCoordinator, TrackingEvent, TrackingPhase,
};
use trailkeeper::validation::RejectionReason;
use uuid::Uuid;

// ============================================================================
// Test doubles
// ============================================================================

/// Location store whose saves fail while `failing` is set
struct FlakyLocations {
    inner: LocationRepositoryImpl,
    failing: AtomicBool,
}

#[async_trait]
impl LocationRepository for FlakyLocations {
    async fn save_location(
        &self,
        point: &TrailPoint,
        session_id: Uuid,
    ) -> DatabaseResult<TrailPoint> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DatabaseError::query("disk I/O error"));
        }
        self.inner.save_location(point, session_id).await
    }

    async fn fetch_locations(
        &self,
        session_id: Uuid,
        query: &LocationQuery,
    ) -> DatabaseResult<Vec<TrailPoint>> {
        self.inner.fetch_locations(session_id, query).await
    }

    async fn delete_locations(&self, session_id: Uuid) -> DatabaseResult<u64> {
        self.inner.delete_locations(session_id).await
    }

    async fn location_count(&self, session_id: Uuid) -> DatabaseResult<u64> {
        self.inner.location_count(session_id).await
    }
}

/// Location store that parks every save until released
struct GatedLocations {
    inner: LocationRepositoryImpl,
    entered: Notify,
    release: Notify,
}

#[async_trait]
impl LocationRepository for GatedLocations {
    async fn save_location(
        &self,
        point: &TrailPoint,
        session_id: Uuid,
    ) -> DatabaseResult<TrailPoint> {
        self.entered.notify_one();
        self.release.notified().await;
        self.inner.save_location(point, session_id).await
    }

    async fn fetch_locations(
        &self,
        session_id: Uuid,
        query: &LocationQuery,
    ) -> DatabaseResult<Vec<TrailPoint>> {
        self.inner.fetch_locations(session_id, query).await
    }

    async fn delete_locations(&self, session_id: Uuid) -> DatabaseResult<u64> {
        self.inner.delete_locations(session_id).await
    }

    async fn location_count(&self, session_id: Uuid) -> DatabaseResult<u64> {
        self.inner.location_count(session_id).await
    }
}

/// Session store that can fail ending and recovery, and can refuse creates
/// while reporting no active session
struct FailingSessions {
    inner: SessionRepositoryImpl,
    fail_end: AtomicBool,
    fail_recovery: AtomicBool,
    phantom_refusals: AtomicU32,
}

impl FailingSessions {
    fn new(db: &Database) -> Self {
        Self {
            inner: SessionRepositoryImpl::new(db.clone()),
            fail_end: AtomicBool::new(false),
            fail_recovery: AtomicBool::new(false),
            phantom_refusals: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl SessionRepository for FailingSessions {
    async fn create_session(
        &self,
        label: Option<&str>,
        start_time: DateTime<Utc>,
    ) -> DatabaseResult<Session> {
        self.inner.create_session(label, start_time).await
    }

    async fn create_session_if_idle(
        &self,
        label: Option<&str>,
        start_time: DateTime<Utc>,
    ) -> DatabaseResult<Option<Session>> {
        let refused = self
            .phantom_refusals
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if refused {
            return Ok(None);
        }
        self.inner.create_session_if_idle(label, start_time).await
    }

    async fn get_session(&self, session_id: Uuid) -> DatabaseResult<Option<Session>> {
        self.inner.get_session(session_id).await
    }

    async fn end_session(
        &self,
        session_id: Uuid,
        end_time: DateTime<Utc>,
    ) -> DatabaseResult<Session> {
        if self.fail_end.load(Ordering::SeqCst) {
            return Err(DatabaseError::query("database is locked"));
        }
        self.inner.end_session(session_id, end_time).await
    }

    async fn fetch_sessions(
        &self,
        filter: &SessionFilter,
        sort: SessionSort,
    ) -> DatabaseResult<Vec<Session>> {
        self.inner.fetch_sessions(filter, sort).await
    }

    async fn update_session(
        &self,
        session_id: Uuid,
        changes: &SessionChanges,
    ) -> DatabaseResult<Session> {
        self.inner.update_session(session_id, changes).await
    }

    async fn delete_session(&self, session_id: Uuid) -> DatabaseResult<u64> {
        self.inner.delete_session(session_id).await
    }

    async fn location_count(&self, session_id: Uuid) -> DatabaseResult<u64> {
        self.inner.location_count(session_id).await
    }

    async fn recover_orphaned_sessions(&self) -> DatabaseResult<u64> {
        if self.fail_recovery.load(Ordering::SeqCst) {
            return Err(DatabaseError::query("disk I/O error"));
        }
        self.inner.recover_orphaned_sessions().await
    }
}

fn coordinator_with_locations(
    db: &Database,
    locations: Arc<dyn LocationRepository>,
) -> TrackingCoordinator {
    TrackingCoordinator::new(
        Arc::new(SessionRepositoryImpl::new(db.clone())),
        locations,
        Arc::new(StaticAuthorization::always()),
        TrackingConfig::default(),
    )
}

fn coordinator_with_sessions(db: &Database, sessions: Arc<FailingSessions>) -> TrackingCoordinator {
    TrackingCoordinator::new(
        sessions,
        Arc::new(LocationRepositoryImpl::new(db.clone())),
        Arc::new(StaticAuthorization::always()),
        TrackingConfig::default(),
    )
}

fn drain(events: &mut broadcast::Receiver<TrackingEvent>) -> Vec<TrackingEvent> {
    let mut out = Vec::new();
    while let Ok(event) = events.try_recv() {
        out.push(event);
    }
    out
}

// ============================================================================
// Lifecycle
// ============================================================================

#[tokio::test]
async fn test_start_while_active_is_refused_without_new_session() -> Result<()> {
    let db = create_test_database().await?;
    let coordinator = create_coordinator(&db, TrackingConfig::default());
    let sessions = SessionRepositoryImpl::new(db);

    coordinator.on_startup().await;
    let first = coordinator.start_tracking(Some("first".to_owned())).await?;
    let before = sessions.fetch_all_sessions().await?.len();

    let err = coordinator.start_tracking(None).await.unwrap_err();
    assert!(
        matches!(err, TrackingError::SessionAlreadyActive { session_id } if session_id == first.id)
    );
    assert_eq!(sessions.fetch_all_sessions().await?.len(), before);
    assert_eq!(sessions.fetch_active_sessions().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_start_refused_when_another_writer_holds_active_session() -> Result<()> {
    let db = create_test_database().await?;
    let coordinator = create_coordinator(&db, TrackingConfig::default());
    let sessions = SessionRepositoryImpl::new(db);
    coordinator.on_startup().await;

    let foreign = sessions.create_session(Some("other device"), t0()).await?;
    let err = coordinator.start_tracking(None).await.unwrap_err();
    assert!(
        matches!(err, TrackingError::SessionAlreadyActive { session_id } if session_id == foreign.id)
    );
    assert!(!coordinator.is_tracking().await);
    assert_eq!(sessions.fetch_all_sessions().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_starts_produce_one_session() -> Result<()> {
    let db = create_test_database().await?;
    let coordinator = create_coordinator(&db, TrackingConfig::default());
    coordinator.on_startup().await;

    let (a, b) = tokio::join!(
        coordinator.start_tracking(Some("a".to_owned())),
        coordinator.start_tracking(Some("b".to_owned())),
    );
    assert!(a.is_ok() ^ b.is_ok());
    let refused = if a.is_ok() { b } else { a };
    assert!(matches!(
        refused,
        Err(TrackingError::SessionAlreadyActive { .. })
    ));

    let sessions = SessionRepositoryImpl::new(db);
    assert_eq!(sessions.fetch_all_sessions().await?.len(), 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_coordinators_sharing_a_store_cannot_both_track() -> Result<()> {
    let (_dir, db) = create_file_database().await?;
    let phone = create_coordinator(&db, TrackingConfig::default());
    let watch = create_coordinator(&db, TrackingConfig::default());
    phone.on_startup().await;
    watch.on_startup().await;

    let (a, b) = tokio::join!(phone.start_tracking(None), watch.start_tracking(None));
    assert!(a.is_ok() ^ b.is_ok());

    let sessions = SessionRepositoryImpl::new(db);
    assert_eq!(sessions.fetch_active_sessions().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_authorization_required_to_start() -> Result<()> {
    let db = create_test_database().await?;
    let auth = Arc::new(StaticAuthorization::new(AuthorizationStatus::WhenInUse));
    let coordinator = TrackingCoordinator::with_database(&db, auth.clone(), TrackingConfig::default());
    let sessions = SessionRepositoryImpl::new(db);

    let err = coordinator.start_tracking(None).await.unwrap_err();
    assert!(matches!(
        err,
        TrackingError::AuthorizationDenied {
            status: AuthorizationStatus::WhenInUse
        }
    ));
    assert!(sessions.fetch_all_sessions().await?.is_empty());

    auth.set(AuthorizationStatus::Always);
    coordinator.start_tracking(None).await?;
    assert!(coordinator.is_tracking().await);
    Ok(())
}

#[tokio::test]
async fn test_idle_fix_and_stop_are_no_ops() -> Result<()> {
    let db = create_test_database().await?;
    let coordinator = create_coordinator(&db, TrackingConfig::default());

    assert_eq!(
        coordinator.on_fix(fix_at(0, 0.0, 5.0)).await?,
        FixOutcome::Ignored
    );
    assert!(coordinator.stop_tracking().await?.is_none());

    let snapshot = coordinator.snapshot().await;
    assert_eq!(snapshot.phase, TrackingPhase::Idle);
    assert!(snapshot.session.is_none());
    Ok(())
}

#[tokio::test]
async fn test_stop_ends_session_and_returns_to_idle() -> Result<()> {
    let db = create_test_database().await?;
    let coordinator = create_coordinator(&db, TrackingConfig::default());
    coordinator.on_startup().await;

    let session = coordinator.start_tracking(Some("loop".to_owned())).await?;
    assert_eq!(coordinator.snapshot().await.phase, TrackingPhase::Tracking);

    let ended = coordinator.stop_tracking().await?.unwrap();
    assert_eq!(ended.id, session.id);
    assert!(!ended.is_active);
    assert!(ended.end_time.is_some());
    assert!(!coordinator.is_tracking().await);

    // A new session may start right away
    let next = coordinator.start_tracking(None).await?;
    assert_ne!(next.id, session.id);
    Ok(())
}

#[tokio::test]
async fn test_stop_returns_to_idle_when_ending_fails() -> Result<()> {
    let db = create_test_database().await?;
    let sessions = Arc::new(FailingSessions::new(&db));
    let coordinator = coordinator_with_sessions(&db, sessions.clone());
    coordinator.on_startup().await;
    let session = coordinator.start_tracking(None).await?;

    sessions.fail_end.store(true, Ordering::SeqCst);
    let err = coordinator.stop_tracking().await.unwrap_err();
    assert!(matches!(err, TrackingError::Persistence(_)));
    assert!(!coordinator.is_tracking().await);
    assert_eq!(coordinator.snapshot().await.phase, TrackingPhase::Idle);
    assert_eq!(
        coordinator.on_fix(fix_at(0, 0.0, 5.0)).await?,
        FixOutcome::Ignored
    );

    // Left active in the store; the next launch recovers it
    let stored = sessions.get_session(session.id).await?.unwrap();
    assert!(stored.is_active);
    Ok(())
}

#[tokio::test]
async fn test_start_retries_when_blocking_session_vanishes() -> Result<()> {
    let db = create_test_database().await?;
    let sessions = Arc::new(FailingSessions::new(&db));
    let coordinator = coordinator_with_sessions(&db, sessions.clone());
    coordinator.on_startup().await;

    sessions.phantom_refusals.store(1, Ordering::SeqCst);
    let session = coordinator.start_tracking(None).await?;
    assert!(coordinator.is_tracking().await);
    assert_eq!(sessions.fetch_active_sessions().await?[0].id, session.id);
    Ok(())
}

#[tokio::test]
async fn test_start_never_reports_a_nil_active_session() -> Result<()> {
    let db = create_test_database().await?;
    let sessions = Arc::new(FailingSessions::new(&db));
    let coordinator = coordinator_with_sessions(&db, sessions.clone());
    coordinator.on_startup().await;

    sessions.phantom_refusals.store(u32::MAX, Ordering::SeqCst);
    let err = coordinator.start_tracking(None).await.unwrap_err();
    assert!(matches!(err, TrackingError::Persistence(_)), "{err}");
    assert!(!coordinator.is_tracking().await);
    assert!(sessions.fetch_all_sessions().await?.is_empty());
    Ok(())
}

// ============================================================================
// Recovery
// ============================================================================

#[tokio::test]
async fn test_startup_recovers_orphans_once() -> Result<()> {
    let db = create_test_database().await?;
    let sessions = SessionRepositoryImpl::new(db.clone());
    for _ in 0..3 {
        sessions.create_session(None, t0()).await?;
    }

    let coordinator = create_coordinator(&db, TrackingConfig::default());
    let mut events = coordinator.subscribe();

    assert_eq!(coordinator.on_startup().await, 3);
    assert!(sessions.fetch_active_sessions().await?.is_empty());
    assert_eq!(
        drain(&mut events),
        vec![TrackingEvent::OrphansRecovered { count: 3 }]
    );

    sessions.create_session(None, t0()).await?;
    assert_eq!(coordinator.on_startup().await, 0);
    assert_eq!(sessions.fetch_active_sessions().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_start_without_startup_recovers_first() -> Result<()> {
    let db = create_test_database().await?;
    let sessions = SessionRepositoryImpl::new(db.clone());
    let orphan = sessions.create_session(Some("crashed"), t0()).await?;

    let coordinator = create_coordinator(&db, TrackingConfig::default());
    let session = coordinator.start_tracking(None).await?;

    assert_ne!(session.id, orphan.id);
    let orphan = sessions.get_session(orphan.id).await?.unwrap();
    assert!(!orphan.is_active);
    let active = sessions.fetch_active_sessions().await?;
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, session.id);
    Ok(())
}

#[tokio::test]
async fn test_crash_then_restart_recovers_session() -> Result<()> {
    let (dir, db) = create_file_database().await?;
    let crashed = {
        let coordinator = create_coordinator(&db, TrackingConfig::default());
        coordinator.on_startup().await;
        let session = coordinator.start_tracking(None).await?;
        for fix in walk(3, 10, 30.0) {
            coordinator.on_fix(fix).await?;
        }
        session
        // dropped without stop_tracking
    };
    db.close().await;

    let db = open_file_database(&dir).await?;
    let coordinator = create_coordinator(&db, TrackingConfig::default());
    assert_eq!(coordinator.on_startup().await, 1);

    let sessions = SessionRepositoryImpl::new(db);
    let recovered = sessions.get_session(crashed.id).await?.unwrap();
    assert!(!recovered.is_active);
    assert_eq!(sessions.location_count(crashed.id).await?, 3);

    coordinator.start_tracking(None).await?;
    Ok(())
}

#[tokio::test]
async fn test_recovery_failure_does_not_block_start() -> Result<()> {
    let db = create_test_database().await?;
    let sessions = Arc::new(FailingSessions::new(&db));
    let coordinator = coordinator_with_sessions(&db, sessions.clone());
    let mut events = coordinator.subscribe();

    sessions.fail_recovery.store(true, Ordering::SeqCst);
    assert_eq!(coordinator.on_startup().await, 0);
    assert!(!drain(&mut events)
        .iter()
        .any(|e| matches!(e, TrackingEvent::OrphansRecovered { .. })));

    let session = coordinator.start_tracking(Some("after failed recovery".to_owned())).await?;
    assert!(coordinator.is_tracking().await);
    assert_eq!(sessions.fetch_active_sessions().await?[0].id, session.id);
    Ok(())
}

// ============================================================================
// Ingestion
// ============================================================================

#[tokio::test]
async fn test_accepted_fixes_are_persisted_and_counted() -> Result<()> {
    let db = create_test_database().await?;
    let coordinator = create_coordinator(&db, TrackingProfile::Permissive.config());
    let locations = LocationRepositoryImpl::new(db);
    coordinator.on_startup().await;
    let session = coordinator.start_tracking(None).await?;

    let mut fixes = walk(5, 10, 30.0);
    fixes.insert(2, fix_at(15, 45.0, 500.0));
    let mut accepted = Vec::new();
    for fix in fixes {
        match coordinator.on_fix(fix).await? {
            FixOutcome::Accepted(point) => accepted.push(point),
            FixOutcome::Rejected(reason) => assert_eq!(reason, RejectionReason::PoorAccuracy),
            FixOutcome::Ignored => panic!("fix ignored while tracking"),
        }
    }
    assert_eq!(accepted.len(), 5);

    let trail = locations
        .fetch_locations(session.id, &LocationQuery::default())
        .await?;
    assert_eq!(trail, accepted);
    assert_eq!(locations.location_count(session.id).await?, 5);

    let snapshot = coordinator.snapshot().await;
    assert_eq!(snapshot.location_count, 5);
    assert_eq!(snapshot.last_point.as_ref(), accepted.last());
    Ok(())
}

#[tokio::test]
async fn test_smoothing_profile_stores_smoothed_positions() -> Result<()> {
    let db = create_test_database().await?;
    let coordinator = create_coordinator(&db, TrackingProfile::Default.config());
    coordinator.on_startup().await;
    coordinator.start_tracking(None).await?;

    let first = fix_at(0, 0.0, 10.0);
    let second = fix_at(10, 40.0, 30.0);
    let FixOutcome::Accepted(a) = coordinator.on_fix(first).await? else {
        panic!("first fix rejected");
    };
    let FixOutcome::Accepted(b) = coordinator.on_fix(second).await? else {
        panic!("second fix rejected");
    };

    assert!((a.latitude - first.latitude).abs() < f64::EPSILON);
    // Pulled back toward the more precise first fix
    assert!(b.latitude < second.latitude);
    assert!(b.latitude > first.latitude);
    assert_eq!(b.timestamp, second.timestamp);
    Ok(())
}

#[tokio::test]
async fn test_unusable_position_is_rejected_and_tracking_continues() -> Result<()> {
    let db = create_test_database().await?;
    let coordinator = create_coordinator(&db, TrackingProfile::Default.config());
    let locations = LocationRepositoryImpl::new(db);
    coordinator.on_startup().await;
    let session = coordinator.start_tracking(None).await?;

    assert!(matches!(
        coordinator.on_fix(fix_at(0, 0.0, 10.0)).await?,
        FixOutcome::Accepted(_)
    ));
    let start = fix_at(10, 0.0, 10.0);
    let nan = Fix::new(start.timestamp, f64::NAN, 7.0, 10.0);
    assert_eq!(
        coordinator.on_fix(nan).await?,
        FixOutcome::Rejected(RejectionReason::InvalidPosition)
    );

    // Plausibility checks still apply against the last real point
    assert_eq!(
        coordinator.on_fix(fix_at(20, 1_000_000.0, 10.0)).await?,
        FixOutcome::Rejected(RejectionReason::TooFast)
    );
    let FixOutcome::Accepted(point) = coordinator.on_fix(fix_at(30, 60.0, 10.0)).await? else {
        panic!("normal fix after a bad one was not accepted");
    };
    assert!(point.latitude.is_finite() && point.longitude.is_finite());
    assert_eq!(locations.location_count(session.id).await?, 2);
    Ok(())
}

#[tokio::test]
async fn test_save_failure_keeps_tracking() -> Result<()> {
    let db = create_test_database().await?;
    let flaky = Arc::new(FlakyLocations {
        inner: LocationRepositoryImpl::new(db.clone()),
        failing: AtomicBool::new(true),
    });
    let coordinator = coordinator_with_locations(&db, flaky.clone());
    let mut events = coordinator.subscribe();
    coordinator.on_startup().await;
    let session = coordinator.start_tracking(None).await?;

    let err = coordinator.on_fix(fix_at(0, 0.0, 5.0)).await.unwrap_err();
    assert!(matches!(err, TrackingError::Persistence(_)));
    assert!(coordinator.is_tracking().await);
    assert_eq!(coordinator.snapshot().await.location_count, 0);
    assert!(drain(&mut events).iter().any(|e| matches!(
        e,
        TrackingEvent::PersistenceFailed { session_id, .. } if *session_id == session.id
    )));

    flaky.failing.store(false, Ordering::SeqCst);
    let outcome = coordinator.on_fix(fix_at(10, 30.0, 5.0)).await?;
    assert!(matches!(outcome, FixOutcome::Accepted(_)));
    assert_eq!(coordinator.snapshot().await.location_count, 1);
    assert_eq!(flaky.location_count(session.id).await?, 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_late_save_lands_in_its_own_session() -> Result<()> {
    let db = create_test_database().await?;
    let gated = Arc::new(GatedLocations {
        inner: LocationRepositoryImpl::new(db.clone()),
        entered: Notify::new(),
        release: Notify::new(),
    });
    let coordinator = Arc::new(coordinator_with_locations(&db, gated.clone()));
    coordinator.on_startup().await;
    let first = coordinator.start_tracking(None).await?;

    let in_flight = {
        let coordinator = Arc::clone(&coordinator);
        tokio::spawn(async move { coordinator.on_fix(fix_at(0, 0.0, 5.0)).await })
    };
    gated.entered.notified().await;

    // Stop and restart while the save is parked
    coordinator.stop_tracking().await?;
    let second = coordinator.start_tracking(None).await?;
    gated.release.notify_one();

    let FixOutcome::Accepted(point) = in_flight.await?? else {
        panic!("in-flight fix was not accepted");
    };
    assert_eq!(point.session_id, first.id);

    let sessions = SessionRepositoryImpl::new(db);
    assert_eq!(sessions.location_count(first.id).await?, 1);
    assert_eq!(sessions.location_count(second.id).await?, 0);
    let snapshot = coordinator.snapshot().await;
    assert_eq!(snapshot.session.map(|s| s.id), Some(second.id));
    assert_eq!(snapshot.location_count, 0);
    assert!(snapshot.last_point.is_none());
    Ok(())
}

#[tokio::test]
async fn test_events_follow_the_session_lifecycle() -> Result<()> {
    let db = create_test_database().await?;
    let coordinator = create_coordinator(&db, TrackingProfile::Permissive.config());
    let mut events = coordinator.subscribe();
    coordinator.on_startup().await;

    let session = coordinator.start_tracking(None).await?;
    coordinator.on_fix(fix_at(0, 0.0, 5.0)).await?;
    coordinator.on_fix(fix_at(0, 0.0, 500.0)).await?;
    coordinator.stop_tracking().await?;

    let events = drain(&mut events);
    assert_eq!(events.len(), 4);
    assert!(matches!(&events[0], TrackingEvent::SessionStarted { session: s } if s.id == session.id));
    assert!(matches!(&events[1], TrackingEvent::FixAccepted { session_id, .. } if *session_id == session.id));
    assert!(matches!(
        &events[2],
        TrackingEvent::FixRejected {
            reason: RejectionReason::PoorAccuracy,
            ..
        }
    ));
    assert_eq!(
        events[3],
        TrackingEvent::SessionStopped {
            session_id: session.id,
            location_count: 1
        }
    );
    Ok(())
}

#[tokio::test]
async fn test_fix_consumer_drains_queue() -> Result<()> {
    let db = create_test_database().await?;
    let coordinator = create_coordinator(&db, TrackingProfile::Permissive.config());
    coordinator.on_startup().await;
    let session = coordinator.start_tracking(None).await?;

    let (sender, receiver) = fix_queue();
    let consumer = coordinator.spawn_fix_consumer(receiver);
    for fix in walk(8, 5, 20.0) {
        sender.send(fix).await?;
    }
    sender.send(fix_at(100, 0.0, 999.0)).await?;
    drop(sender);

    let stats = consumer.await?;
    assert_eq!(stats.total(), 9);
    assert_eq!(stats.accepted, 8);
    assert_eq!(stats.rejected, 1);
    assert_eq!(
        stats.rejected_by_reason.get(&RejectionReason::PoorAccuracy),
        Some(&1)
    );
    assert_eq!(stats.failed, 0);

    let stopped = coordinator.stop_tracking().await?.unwrap();
    assert_eq!(stopped.id, session.id);
    let sessions = SessionRepositoryImpl::new(db);
    assert_eq!(sessions.location_count(session.id).await?, 8);
    Ok(())
}
