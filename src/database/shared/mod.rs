// ABOUTME: Shared database helpers used by the session and location managers
// ABOUTME: Row mapping, timestamp encoding, and RAII transaction handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Model ↔ SQL row conversion helpers (row parsing, timestamp encoding)
pub mod mappers;

/// Write transaction guard with rollback on drop
pub mod transactions;
