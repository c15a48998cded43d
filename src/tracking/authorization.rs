// ABOUTME: Authorization collaborator consulted before a recording session starts
// ABOUTME: Trait for platform permission sources plus a settable in-process implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::AuthorizationStatus;
use tokio::sync::watch;

/// Source of the current location authorization status
pub trait AuthorizationProvider: Send + Sync {
    /// Status at the moment of the call
    fn status(&self) -> AuthorizationStatus;
}

/// Authorization status held in process and changed explicitly
///
/// Useful for the CLI, where there is no permission prompt, and for tests.
#[derive(Debug)]
pub struct StaticAuthorization {
    status: watch::Sender<AuthorizationStatus>,
}

impl StaticAuthorization {
    /// Provider reporting `status` until changed
    #[must_use]
    pub fn new(status: AuthorizationStatus) -> Self {
        Self {
            status: watch::Sender::new(status),
        }
    }

    /// Provider that always grants background tracking
    #[must_use]
    pub fn always() -> Self {
        Self::new(AuthorizationStatus::Always)
    }

    /// Replace the reported status
    pub fn set(&self, status: AuthorizationStatus) {
        self.status.send_replace(status);
    }

    /// Receiver observing status changes
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<AuthorizationStatus> {
        self.status.subscribe()
    }
}

impl Default for StaticAuthorization {
    fn default() -> Self {
        Self::new(AuthorizationStatus::default())
    }
}

impl AuthorizationProvider for StaticAuthorization {
    fn status(&self) -> AuthorizationStatus {
        *self.status.borrow()
    }
}
