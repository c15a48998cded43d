// ABOUTME: Recursive position smoother blending accepted fixes weighted by reported accuracy
// ABOUTME: Scalar-variance Kalman estimate over latitude/longitude, resettable per session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Position Smoother
//!
//! A constant-position Kalman filter with one shared variance (in m²) for both
//! axes. Between fixes the variance grows by `q² · dt`, where `q` is the
//! configured process noise. Each fix is then blended in with gain
//! `K = P / (P + σ²)`, `σ` being the fix's reported accuracy, so precise fixes
//! pull the estimate harder than vague ones.

use crate::constants::smoothing::MIN_MEASUREMENT_ACCURACY_M;
use crate::models::TrailPoint;
use chrono::{DateTime, Utc};
use trailkeeper_core::config::SmootherConfig;
use trailkeeper_core::geo::elapsed_seconds;

/// Running estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmootherState {
    /// Estimated latitude in degrees
    pub latitude: f64,
    /// Estimated longitude in degrees
    pub longitude: f64,
    /// Estimate variance in m²
    pub variance: f64,
    /// Timestamp of the last blended fix
    pub timestamp: DateTime<Utc>,
}

/// Accuracy-weighted position smoother
#[derive(Debug, Clone)]
pub struct PositionSmoother {
    config: SmootherConfig,
    state: Option<SmootherState>,
}

impl PositionSmoother {
    /// Create an uninitialized smoother
    #[must_use]
    pub const fn new(config: SmootherConfig) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Current estimate, `None` before the first update
    #[must_use]
    pub const fn state(&self) -> Option<&SmootherState> {
        self.state.as_ref()
    }

    /// Drop the estimate
    pub fn reset(&mut self) {
        self.state = None;
    }

    /// Blend an accepted point into the estimate and return the smoothed point
    ///
    /// The returned point keeps the input's id, owner, timestamp, altitude, speed
    /// and course; position and accuracy come from the estimate.
    pub fn update(&mut self, point: &TrailPoint) -> TrailPoint {
        let accuracy = point.horizontal_accuracy.max(MIN_MEASUREMENT_ACCURACY_M);
        let measurement_variance = accuracy * accuracy;

        let next = match self.state {
            None => SmootherState {
                latitude: point.latitude,
                longitude: point.longitude,
                variance: measurement_variance,
                timestamp: point.timestamp,
            },
            Some(prev) => {
                let dt = elapsed_seconds(prev.timestamp, point.timestamp).max(0.0);
                let q = self.config.process_noise_mps();
                let predicted = q.mul_add(q * dt, prev.variance);
                let gain = predicted / (predicted + measurement_variance);
                SmootherState {
                    latitude: gain.mul_add(point.latitude - prev.latitude, prev.latitude),
                    longitude: gain.mul_add(point.longitude - prev.longitude, prev.longitude),
                    variance: (1.0 - gain) * predicted,
                    timestamp: point.timestamp.max(prev.timestamp),
                }
            }
        };
        self.state = Some(next);

        TrailPoint {
            latitude: next.latitude,
            longitude: next.longitude,
            horizontal_accuracy: next.variance.sqrt(),
            ..point.clone()
        }
    }
}
