// ABOUTME: Main library entry point for the Pacer track import service
// ABOUTME: GPX parsing, speed cleaning pipeline, session assembly, and HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacer Track Intelligence

#![deny(unsafe_code)]

//! # Pacer Track Server
//!
//! Turns a GPX recording from a fitness or navigation device into a cleaned,
//! per-point speed series plus a session summary.
//!
//! ## Architecture
//!
//! - **Parsers**: the [`parsers::TrackParser`] capability and the GPX implementation
//!   (extract, reconstruct missing speeds, fix noisy speeds)
//! - **Importer**: orchestrates a parser and an analysis, normalizing unset fields
//! - **External**: reverse geocoding against OpenStreetMap Nominatim
//! - **Session**: assembles the response document and strips unset values
//! - **Routes**: axum HTTP surface
//! - **Config / Logging**: environment-driven configuration and `tracing` setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pacer_track_server::importer::{Importer, ImporterMain};
//! use pacer_track_server::parsers::GpxParser;
//! use pacer_track_server::errors::AppResult;
//!
//! # async fn example(gpx: &str) -> AppResult<()> {
//! let points = ImporterMain.get_track_points(gpx, &GpxParser::default()).await?;
//! println!("{} cleaned points", points.len());
//! # Ok(())
//! # }
//! ```

// Re-export pacer-core modules so the rest of the crate can keep `use crate::errors::*` etc.
pub use pacer_core::constants;
pub use pacer_core::errors;
pub use pacer_core::models;

/// Track intelligence algorithms (re-exported from `pacer-intelligence`)
pub use pacer_intelligence as intelligence;

/// Environment-based configuration
pub mod config;

/// External service clients (reverse geocoding)
pub mod external;

/// Pipeline orchestration: parse, normalize, analyze
pub mod importer;

/// Logging configuration and structured logging setup
pub mod logging;

/// Track document parsers
pub mod parsers;

/// HTTP route handlers
pub mod routes;

/// Session document assembly and output filtering
pub mod session;

/// Shared utilities
pub mod utils;
