// ABOUTME: Re-exports helper modules for trailkeeper-cli
// ABOUTME: Provides terminal formatting for sessions and replay results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod display;
