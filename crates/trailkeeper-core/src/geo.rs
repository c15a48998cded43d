// ABOUTME: Geodesy helpers for plausibility checks on consecutive positions
// ABOUTME: Haversine great-circle distance and implied speed between two timestamps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::geo::EARTH_RADIUS_M;
use chrono::{DateTime, Utc};

/// Whether `latitude`/`longitude` are finite degrees inside [-90, 90] / [-180, 180]
#[must_use]
pub fn is_valid_coordinate(latitude: f64, longitude: f64) -> bool {
    (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude)
}

/// Great-circle distance in meters between two coordinates given in degrees
#[must_use]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

/// Seconds elapsed from `earlier` to `later`, negative if out of order
#[must_use]
pub fn elapsed_seconds(earlier: DateTime<Utc>, later: DateTime<Utc>) -> f64 {
    let delta = later - earlier;
    delta
        .num_microseconds()
        .map_or_else(|| delta.num_milliseconds() as f64 / 1e3, |us| us as f64 / 1e6)
}

/// Speed in m/s implied by covering `distance_m` in `elapsed_s`
///
/// Zero elapsed time with non-zero distance is infinitely fast.
#[must_use]
pub fn implied_speed(distance_m: f64, elapsed_s: f64) -> f64 {
    if elapsed_s > 0.0 {
        distance_m / elapsed_s
    } else if distance_m > 0.0 {
        f64::INFINITY
    } else {
        0.0
    }
}
