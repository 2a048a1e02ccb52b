// ABOUTME: Track data models shared by the parser, the intelligence pipeline, and collaborators
// ABOUTME: Raw track points with optional sensor fields, cleaned points, and track statistics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacer Track Intelligence

//! Core data models
//!
//! A [`TrackPoint`] is one GPS fix as extracted from a track document. Optional
//! sensor fields are `None` when the device did not report them, which keeps a
//! genuine zero reading distinguishable from "not reported". The importer turns
//! the fixed series into [`CleanTrackPoint`]s where every field consumed by the
//! statistics collaborator is concrete.

use serde::{Deserialize, Serialize};

/// One observation along a recorded track
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackPoint {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
    /// Timestamp as found in the document (ISO-8601), empty when absent
    pub time: String,
    /// Speed in meters per second
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// Heart rate in beats per minute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hr: Option<f64>,
    /// Cumulative distance reported by the device, in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl TrackPoint {
    /// Create a point with position and time and no sensor data
    #[must_use]
    pub fn new(lat: f64, lon: f64, time: impl Into<String>) -> Self {
        Self {
            lat,
            lon,
            time: time.into(),
            speed: None,
            hr: None,
            distance: None,
        }
    }

    /// Set the reported speed
    #[must_use]
    pub const fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Set the reported heart rate
    #[must_use]
    pub const fn with_hr(mut self, hr: f64) -> Self {
        self.hr = Some(hr);
        self
    }

    /// Set the reported cumulative distance
    #[must_use]
    pub const fn with_distance(mut self, distance: f64) -> Self {
        self.distance = Some(distance);
        self
    }
}

/// A track point with every field the statistics collaborator reads made concrete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanTrackPoint {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
    /// Timestamp (ISO-8601), empty when the document had none
    pub time: String,
    /// Fixed speed in meters per second
    pub speed: f64,
    /// Heart rate in beats per minute, 0 when not reported
    pub hr: f64,
    /// Cumulative distance reported by the device, in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl From<TrackPoint> for CleanTrackPoint {
    fn from(point: TrackPoint) -> Self {
        Self {
            lat: point.lat,
            lon: point.lon,
            time: point.time,
            speed: point.speed.unwrap_or(0.0),
            hr: point.hr.unwrap_or(0.0),
            distance: point.distance,
        }
    }
}

/// Min / max / average of one metric over a track
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricSummary {
    /// Smallest observed value
    pub min: Option<f64>,
    /// Largest observed value
    pub max: Option<f64>,
    /// Arithmetic mean of observed values
    pub average: Option<f64>,
}

/// Aggregate metrics over a cleaned track
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackStatistics {
    /// Number of points in the track
    pub point_count: usize,
    /// Timestamp of the first point
    pub start_time: Option<String>,
    /// Timestamp of the last point
    pub end_time: Option<String>,
    /// Wall-clock time between first and last point
    pub duration_seconds: Option<f64>,
    /// Time spent above the idle speed threshold
    pub moving_time_seconds: f64,
    /// Sum of haversine distances between consecutive points
    pub distance_meters: f64,
    /// Speed summary in meters per second
    pub speed: MetricSummary,
    /// Heart rate summary in beats per minute, ignoring unreported (zero) samples
    pub heart_rate: MetricSummary,
}
