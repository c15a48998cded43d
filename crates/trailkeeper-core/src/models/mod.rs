// ABOUTME: Core data models for fixes, trail points, sessions, and authorization status
// ABOUTME: Plain value types shared by the validator, smoother, stores, and coordinator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain models

mod authorization;
mod fix;
mod session;
mod trail_point;

pub use authorization::AuthorizationStatus;
pub use fix::Fix;
pub use session::{Session, SessionChanges, SessionFilter, SessionSort};
pub use trail_point::{LocationQuery, SortOrder, TrailPoint};
