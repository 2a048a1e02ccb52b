// ABOUTME: Great-circle distance between two latitude/longitude pairs
// ABOUTME: Haversine formula on a sphere of mean Earth radius
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacer Track Intelligence

use crate::constants::geo::EARTH_RADIUS_METERS;

/// Haversine distance in meters between two positions given in degrees
#[must_use]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (phi1.cos() * phi2.cos())
        .mul_add((d_lambda / 2.0).sin().powi(2), (d_phi / 2.0).sin().powi(2));
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}
