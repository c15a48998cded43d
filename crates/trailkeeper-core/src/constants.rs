// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Geodesy, preset thresholds, smoothing, and persistence constants for Trailkeeper
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.

/// Geodesy constants
pub mod geo {
    /// Mean Earth radius in meters (IUGG)
    pub const EARTH_RADIUS_M: f64 = 6_371_000.0;
}

/// Threshold values for the four named validation presets
pub mod presets {
    /// `default` preset: balanced thresholds for everyday recording
    pub mod default {
        /// Maximum horizontal accuracy in meters
        pub const MAX_HORIZONTAL_ACCURACY_M: f64 = 50.0;
        /// Maximum implied speed in m/s (180 km/h)
        pub const MAX_REASONABLE_SPEED_MPS: f64 = 50.0;
        /// Maximum displacement between consecutive points in meters
        pub const MAX_DISTANCE_JUMP_M: f64 = 1000.0;
        /// Minimum seconds between accepted points
        pub const MIN_TIME_BETWEEN_UPDATES_S: f64 = 5.0;
        /// Minimum spacing between accepted points in meters
        pub const MIN_DISTANCE_BETWEEN_POINTS_M: f64 = 5.0;
    }

    /// `high_precision` preset: strict accuracy, dense trail
    pub mod high_precision {
        /// Maximum horizontal accuracy in meters
        pub const MAX_HORIZONTAL_ACCURACY_M: f64 = 20.0;
        /// Maximum implied speed in m/s
        pub const MAX_REASONABLE_SPEED_MPS: f64 = 50.0;
        /// Maximum displacement between consecutive points in meters
        pub const MAX_DISTANCE_JUMP_M: f64 = 500.0;
        /// Minimum seconds between accepted points
        pub const MIN_TIME_BETWEEN_UPDATES_S: f64 = 1.0;
        /// Minimum spacing between accepted points in meters
        pub const MIN_DISTANCE_BETWEEN_POINTS_M: f64 = 2.0;
    }

    /// `efficient` preset: sparse trail, tolerant of fast travel
    pub mod efficient {
        /// Maximum horizontal accuracy in meters
        pub const MAX_HORIZONTAL_ACCURACY_M: f64 = 100.0;
        /// Maximum implied speed in m/s (540 km/h)
        pub const MAX_REASONABLE_SPEED_MPS: f64 = 150.0;
        /// Maximum displacement between consecutive points in meters
        pub const MAX_DISTANCE_JUMP_M: f64 = 5000.0;
        /// Minimum seconds between accepted points
        pub const MIN_TIME_BETWEEN_UPDATES_S: f64 = 10.0;
        /// Minimum spacing between accepted points in meters
        pub const MIN_DISTANCE_BETWEEN_POINTS_M: f64 = 25.0;
    }

    /// `permissive` preset: keeps almost everything the sensor reports
    pub mod permissive {
        /// Maximum horizontal accuracy in meters
        pub const MAX_HORIZONTAL_ACCURACY_M: f64 = 200.0;
        /// Maximum implied speed in m/s
        pub const MAX_REASONABLE_SPEED_MPS: f64 = 100.0;
        /// Maximum displacement between consecutive points in meters
        pub const MAX_DISTANCE_JUMP_M: f64 = 5000.0;
        /// Minimum seconds between accepted points
        pub const MIN_TIME_BETWEEN_UPDATES_S: f64 = 1.0;
    }
}

/// Adaptive sampling behaviour
pub mod sampling {
    /// Implied speed (m/s) at or above which adaptive sampling waives the spacing rule
    pub const ADAPTIVE_WAIVER_SPEED_MPS: f64 = 5.0;
}

/// Position smoother tuning
pub mod smoothing {
    /// Default process noise in m/s (how fast the true position may drift between fixes)
    pub const DEFAULT_PROCESS_NOISE_MPS: f64 = 3.0;
    /// Accuracy floor in meters, keeps the gain finite for over-optimistic receivers
    pub const MIN_MEASUREMENT_ACCURACY_M: f64 = 1.0;
}

/// Tracking coordinator limits
pub mod tracking {
    /// Capacity of the change-notification broadcast channel
    pub const EVENT_CHANNEL_CAPACITY: usize = 256;
    /// Default capacity of the single-consumer fix queue
    pub const FIX_QUEUE_CAPACITY: usize = 1024;
}

/// Database defaults
pub mod database {
    /// Default database URL
    pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/trailkeeper.db";
    /// Default maximum pool connections for file-backed stores
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
    /// Default `SQLite` busy timeout in milliseconds
    pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
}

/// Service identity used in structured logs
pub mod service_names {
    /// Service name for the tracking engine
    pub const TRAILKEEPER: &str = "trailkeeper";
}
