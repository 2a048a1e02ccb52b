// ABOUTME: External API client modules (OpenStreetMap Nominatim reverse geocoding)
// ABOUTME: Clients sit behind capability traits so tests and alternate services can swap them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacer Track Intelligence

//! External API Clients

pub mod location;

// Re-export commonly used types
pub use location::{
    Location, LocationAddress, LocationDescriptor, LocationOpenStreetmap, LocationServiceConfig,
};
