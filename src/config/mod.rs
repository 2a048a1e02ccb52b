// ABOUTME: Configuration management module for centralized server settings and parameters
// ABOUTME: Environment-only configuration for networking, speed fixing, and geocoding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacer Track Intelligence
//! Configuration module for the Pacer track server
//!
//! All settings come from environment variables; there is no configuration file.

/// Environment and server configuration
pub mod environment;

pub use environment::{Environment, GeocodingServiceConfig, ServerConfig};
