// ABOUTME: Fills in missing track point speeds from cumulative distance or position deltas
// ABOUTME: Reported speed wins, then device distance, then haversine between consecutive fixes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacer Track Intelligence

//! # Speed Reconstruction
//!
//! Two ordered passes over an extracted track:
//!
//! 1. **Cumulative distance**: a point without a reported speed but with a
//!    device distance gets `(distance[i] - distance[i-1]) / dt`. A previous
//!    point without a distance counts as 0 m.
//! 2. **Positional fallback**: any point still without a speed gets the
//!    haversine distance to its predecessor divided by `dt`.
//!
//! Both passes skip a step when `dt` is zero, negative, or a timestamp is
//! unparseable, leaving the speed unset for the fixer to fill. The first
//! point never has a predecessor and is always left alone.

use crate::geo::haversine_distance;
use crate::models::TrackPoint;
use crate::time::{parse_timestamp, positive_delta};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

/// What the reconstruction passes did to a track
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconstructionReport {
    /// Speeds derived from cumulative device distance
    pub from_distance: usize,
    /// Speeds derived from haversine distance between fixes
    pub from_position: usize,
    /// Steps left unset because the time delta was missing or not positive
    pub skipped: usize,
    /// Points whose timestamp is earlier than or equal to their predecessor's
    pub non_increasing_timestamps: usize,
}

/// Derives speeds for points whose device did not report one
#[derive(Debug, Clone, Copy, Default)]
pub struct SpeedReconstructor;

impl SpeedReconstructor {
    /// Run both passes in place
    pub fn reconstruct(points: &mut [TrackPoint]) -> ReconstructionReport {
        let times: Vec<Option<DateTime<Utc>>> =
            points.iter().map(|p| parse_timestamp(&p.time)).collect();
        let mut report = ReconstructionReport {
            non_increasing_timestamps: count_non_increasing(&times),
            ..ReconstructionReport::default()
        };

        Self::from_cumulative_distance(points, &times, &mut report);
        Self::from_positions(points, &times, &mut report);

        if report.non_increasing_timestamps > 0 {
            warn!(
                non_increasing = report.non_increasing_timestamps,
                "Track timestamps are not strictly increasing; affected steps were skipped"
            );
        }
        debug!(
            points = points.len(),
            from_distance = report.from_distance,
            from_position = report.from_position,
            skipped = report.skipped,
            "Speed reconstruction complete"
        );

        report
    }

    fn from_cumulative_distance(
        points: &mut [TrackPoint],
        times: &[Option<DateTime<Utc>>],
        report: &mut ReconstructionReport,
    ) {
        for i in 1..points.len() {
            if points[i].speed.is_some() {
                continue;
            }
            let Some(distance) = points[i].distance else {
                continue;
            };
            let Some(dt) = positive_delta(times[i - 1].as_ref(), times[i].as_ref()) else {
                report.skipped += 1;
                continue;
            };

            let previous_distance = points[i - 1].distance.unwrap_or(0.0);
            points[i].speed = Some((distance - previous_distance) / dt);
            report.from_distance += 1;
        }
    }

    fn from_positions(
        points: &mut [TrackPoint],
        times: &[Option<DateTime<Utc>>],
        report: &mut ReconstructionReport,
    ) {
        for i in 1..points.len() {
            if points[i].speed.is_some() {
                continue;
            }
            let Some(dt) = positive_delta(times[i - 1].as_ref(), times[i].as_ref()) else {
                // Already counted when the distance pass skipped this point
                if points[i].distance.is_none() {
                    report.skipped += 1;
                }
                continue;
            };

            let previous = &points[i - 1];
            let meters = haversine_distance(previous.lat, previous.lon, points[i].lat, points[i].lon);
            points[i].speed = Some(meters / dt);
            report.from_position += 1;
        }
    }
}

fn count_non_increasing(times: &[Option<DateTime<Utc>>]) -> usize {
    times
        .windows(2)
        .filter(|pair| matches!(pair, [Some(previous), Some(current)] if current <= previous))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(seconds: u32) -> String {
        format!("2024-05-01T10:{:02}:{:02}Z", seconds / 60, seconds % 60)
    }

    #[test]
    fn test_reported_speed_is_kept() {
        let mut points = vec![
            TrackPoint::new(0.0, 0.0, at(0)).with_speed(3.0),
            TrackPoint::new(0.0, 0.001, at(10))
                .with_speed(4.0)
                .with_distance(500.0),
        ];
        let report = SpeedReconstructor::reconstruct(&mut points);
        assert_eq!(points[1].speed, Some(4.0));
        assert_eq!(report.from_distance, 0);
        assert_eq!(report.from_position, 0);
    }

    #[test]
    fn test_distance_wins_over_position() {
        // Positions are ~111 m apart, device distance says 30 m
        let mut points = vec![
            TrackPoint::new(0.0, 0.0, at(0)).with_distance(100.0),
            TrackPoint::new(0.0, 0.001, at(10)).with_distance(130.0),
        ];
        let report = SpeedReconstructor::reconstruct(&mut points);
        assert_eq!(points[1].speed, Some(3.0));
        assert_eq!(report.from_distance, 1);
        assert_eq!(report.from_position, 0);
    }

    #[test]
    fn test_missing_previous_distance_counts_as_zero() {
        let mut points = vec![
            TrackPoint::new(0.0, 0.0, at(0)),
            TrackPoint::new(0.0, 0.0, at(20)).with_distance(40.0),
        ];
        SpeedReconstructor::reconstruct(&mut points);
        assert_eq!(points[1].speed, Some(2.0));
    }

    #[test]
    fn test_positional_fallback() {
        let mut points = vec![
            TrackPoint::new(0.0, 0.0, at(0)),
            TrackPoint::new(0.0, 1.0, at(100)),
        ];
        let report = SpeedReconstructor::reconstruct(&mut points);
        let speed = points[1].speed.unwrap();
        assert!((speed - 1111.95).abs() < 0.01, "got {speed}");
        assert_eq!(report.from_position, 1);
    }

    #[test]
    fn test_first_point_stays_unset() {
        let mut points = vec![TrackPoint::new(0.0, 0.0, at(0)).with_distance(10.0)];
        SpeedReconstructor::reconstruct(&mut points);
        assert!(points[0].speed.is_none());
    }

    #[test]
    fn test_non_positive_delta_is_skipped() {
        let mut points = vec![
            TrackPoint::new(0.0, 0.0, at(10)),
            TrackPoint::new(0.0, 0.001, at(10)),
            TrackPoint::new(0.0, 0.002, at(5)).with_distance(50.0),
            TrackPoint::new(0.0, 0.003, String::new()),
        ];
        let report = SpeedReconstructor::reconstruct(&mut points);
        assert!(points.iter().all(|p| p.speed.is_none()));
        assert_eq!(report.skipped, 3);
        assert_eq!(report.non_increasing_timestamps, 2);
    }
}
