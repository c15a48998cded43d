// ABOUTME: Benchmark fixtures generating realistic GPS fix feeds
// ABOUTME: Deterministic walks with periodic bad readings for reproducible measurements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Deterministic fix feeds.
//!
//! Every tenth fix has poor accuracy and every thirty-seventh is a multipath
//! jump, so the validator exercises its rejection paths as well as acceptance.

use chrono::{DateTime, Duration, TimeZone, Utc};
use trailkeeper::models::Fix;

/// Predefined feed sizes for benchmark scenarios
#[derive(Debug, Clone, Copy)]
pub enum FeedSize {
    /// A short errand, 100 fixes
    Short,
    /// An afternoon hike, 1,000 fixes
    Long,
}

impl FeedSize {
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            Self::Short => 100,
            Self::Long => 1_000,
        }
    }
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Generate one fix of the feed (internal use only)
#[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
fn generate_fix(index: usize, start: DateTime<Utc>) -> Fix {
    let north_m = index as f64 * 9.0 + ((index * 37) % 11) as f64;
    let east_m = ((index * 53) % 17) as f64 - 8.0;
    let glitch_m = if index % 37 == 36 { 3_000.0 } else { 0.0 };
    let accuracy = if index % 10 == 9 {
        120.0
    } else {
        5.0 + ((index * 13) % 20) as f64
    };

    let mut fix = Fix::new(
        start + Duration::seconds(index as i64 * 6),
        45.0 + (north_m + glitch_m) / 111_195.0,
        7.0 + east_m / 78_850.0,
        accuracy,
    );
    fix.speed = 1.5;
    fix
}

/// Generate a feed of `size` fixes
#[must_use]
pub fn generate_feed(size: FeedSize) -> Vec<Fix> {
    let start = base_time();
    (0..size.count()).map(|i| generate_fix(i, start)).collect()
}
