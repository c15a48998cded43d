// ABOUTME: Raw positional reading delivered by the sensor feed before validation
// ABOUTME: Carries position, altitude, reported accuracy, speed, course, and timestamp
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One raw reading from the sensor feed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fix {
    /// When the reading was taken
    pub timestamp: DateTime<Utc>,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Altitude in meters
    #[serde(default)]
    pub altitude: f64,
    /// Reported horizontal accuracy radius in meters (larger is worse)
    pub horizontal_accuracy: f64,
    /// Reported ground speed in m/s, negative when unknown
    #[serde(default = "unknown")]
    pub speed: f64,
    /// Reported course in degrees from true north, negative when unknown
    #[serde(default = "unknown")]
    pub course: f64,
}

const fn unknown() -> f64 {
    -1.0
}

impl Fix {
    /// Build a fix with unknown altitude, speed and course
    #[must_use]
    pub const fn new(
        timestamp: DateTime<Utc>,
        latitude: f64,
        longitude: f64,
        horizontal_accuracy: f64,
    ) -> Self {
        Self {
            timestamp,
            latitude,
            longitude,
            altitude: 0.0,
            horizontal_accuracy,
            speed: unknown(),
            course: unknown(),
        }
    }
}
