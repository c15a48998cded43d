// ABOUTME: Configuration error type for threshold and profile validation
// ABOUTME: Raised when a preset override or deserialized config violates its constraints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

/// Configuration validation failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A threshold that must be strictly positive was not
    #[error("{field} must be a finite value greater than zero, got {value}")]
    NonPositive {
        /// Offending field
        field: &'static str,
        /// Offending value
        value: f64,
    },

    /// Unknown tracking profile name
    #[error("unknown tracking profile '{0}' (expected default, high_precision, efficient, permissive)")]
    UnknownProfile(String),
}
