// ABOUTME: Application constants for geodesy, speed fixing, and service defaults
// ABOUTME: Single source of truth for thresholds shared by parser, fixer, and configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacer Track Intelligence

//! Application constants organized by domain

/// Geodesy constants
pub mod geo {
    /// Mean Earth radius used by the haversine formula, in meters
    pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;
}

/// Speed fixer defaults, all in meters per second
pub mod speed_fixer {
    /// Absolute physical ceiling for an accepted speed
    pub const DEFAULT_MAX_SPEED_MPS: f64 = 20.0;
    /// Maximum frame-to-frame change in speed
    pub const DEFAULT_MAX_JUMP_MPS: f64 = 2.0;
    /// Maximum plausible speed implied by raw position and time deltas
    pub const DEFAULT_MAX_GAP_MPS: f64 = 25.0;
}

/// Statistics thresholds
pub mod analysis {
    /// Speeds at or below this value count as standing still
    pub const IDLE_SPEED_MPS: f64 = 0.5;
}

/// Session document defaults
pub mod session {
    /// Name used when the caller supplies none
    pub const DEFAULT_NAME: &str = "No name";
    /// Location display name when geocoding has none
    pub const DEFAULT_LOCATION: &str = "No location";
    /// Country name when geocoding has none
    pub const DEFAULT_COUNTRY: &str = "No country";
    /// Village name when geocoding has none
    pub const DEFAULT_VILLAGE: &str = "No village";
    /// Hamlet name when geocoding has none
    pub const DEFAULT_HAMLET: &str = "No hamlet";
}

/// Service naming
pub mod service_names {
    /// Service name used in structured logs
    pub const PACER_TRACK_SERVER: &str = "pacer-track-server";
}

/// Network defaults
pub mod network {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 3000;
    /// Default bind address
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    /// Default request body limit (50 MiB)
    pub const DEFAULT_MAX_BODY_BYTES: usize = 50 * 1024 * 1024;
    /// Default Nominatim endpoint
    pub const DEFAULT_GEOCODING_BASE_URL: &str = "https://nominatim.openstreetmap.org";
    /// Default geocoding request timeout in seconds
    pub const DEFAULT_GEOCODING_TIMEOUT_SECS: u64 = 10;
    /// Default number of reverse geocoding results kept in memory
    pub const DEFAULT_GEOCODING_CACHE_CAPACITY: usize = 1000;
    /// Default lifetime of a cached reverse geocoding result (24 hours)
    pub const DEFAULT_GEOCODING_CACHE_TTL_SECS: u64 = 24 * 60 * 60;
}
