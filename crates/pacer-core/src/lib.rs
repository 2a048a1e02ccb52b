// ABOUTME: Core types and constants for the Pacer track import service
// ABOUTME: Foundation crate with error handling, track point models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacer Track Intelligence

#![deny(unsafe_code)]

//! # Pacer Core
//!
//! Foundation crate providing shared types and constants for the Pacer track
//! import service. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Geodesy constants and speed fixer defaults
//! - **models**: Track points (raw and cleaned) and track statistics

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (`TrackPoint`, `CleanTrackPoint`, `TrackStatistics`)
pub mod models;
