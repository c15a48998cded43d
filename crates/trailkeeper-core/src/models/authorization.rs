// ABOUTME: Location authorization status consumed from the platform permission collaborator
// ABOUTME: Only the Always state allows a recording session to start
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

/// Authorization state reported by the permission collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationStatus {
    /// The user has not been asked yet
    #[default]
    NotDetermined,
    /// The user refused
    Denied,
    /// Policy forbids location access
    Restricted,
    /// Allowed only while the app is in the foreground
    WhenInUse,
    /// Allowed at all times
    Always,
}

impl AuthorizationStatus {
    /// Whether background recording may start
    #[must_use]
    pub const fn allows_tracking(self) -> bool {
        matches!(self, Self::Always)
    }

    /// Stable lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotDetermined => "not_determined",
            Self::Denied => "denied",
            Self::Restricted => "restricted",
            Self::WhenInUse => "when_in_use",
            Self::Always => "always",
        }
    }
}

impl fmt::Display for AuthorizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
