// ABOUTME: Re-exports command modules for trailkeeper-cli
// ABOUTME: Session maintenance, trail export, and fix-file replay
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod points;
pub mod replay;
pub mod sessions;
