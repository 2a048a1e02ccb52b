// ABOUTME: Track intelligence engine for speed reconstruction, denoising, and statistics
// ABOUTME: Pure, synchronous algorithms over in-memory track point sequences
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacer Track Intelligence

#![deny(unsafe_code)]

//! # Pacer Intelligence
//!
//! The algorithmic heart of the track import pipeline:
//!
//! - **geo**: haversine great-circle distance
//! - **time**: timestamp parsing and wall-clock deltas
//! - **reconstruction**: fills missing speeds from cumulative distance or positions
//! - **speed_fixer**: causal clamp filter suppressing dropouts, spikes, and teleports
//! - **analysis**: the statistics capability and its reference implementation
//!
//! Every pass is a pure function of its input and processes points strictly in
//! order with at most a one-point lookback.

// Re-export pacer-core modules so algorithm files can keep `use crate::errors::*` etc.
pub use pacer_core::constants;
pub use pacer_core::errors;
pub use pacer_core::models;

/// Statistics capability and the reference single-pass implementation
pub mod analysis;
/// Threshold configuration and validation errors
pub mod config;
/// Great-circle distance on a spherical Earth
pub mod geo;
/// Speed reconstruction from cumulative distance and positions
pub mod reconstruction;
/// Causal speed clamp filter
pub mod speed_fixer;
/// Timestamp parsing and deltas
pub mod time;

pub use analysis::{Analysis, AnalysisBase};
pub use config::{ConfigError, FixOptions};
pub use geo::haversine_distance;
pub use reconstruction::{ReconstructionReport, SpeedReconstructor};
pub use speed_fixer::{FixReport, SpeedFixer};
