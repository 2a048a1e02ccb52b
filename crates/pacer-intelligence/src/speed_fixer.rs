// ABOUTME: Causal clamp filter suppressing GPS speed dropouts, spikes, and teleport artifacts
// ABOUTME: Substitutes the previous accepted speed whenever a point fails a plausibility check
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacer Track Intelligence

//! # Speed Fixer
//!
//! A single forward pass that only ever looks at the previous *output* point.
//! For each point the candidate speed is:
//!
//! 1. the reported/reconstructed speed, or the previous output speed (0 for the
//!    first point) when it is missing, NaN, infinite, or negative;
//! 2. replaced by the previous output speed when the speed implied by the raw
//!    positions and a positive time delta exceeds `max_gap_mps`;
//! 3. replaced by the previous output speed when above `max_speed_mps`;
//! 4. replaced by the previous output speed when it differs from it by more
//!    than `max_jump_mps`.
//!
//! Nothing is averaged or interpolated, so a bad observation carries the last
//! accepted speed forward until a plausible one arrives. Because every
//! substitution uses the previous output, running the filter on its own output
//! changes nothing.

use crate::config::FixOptions;
use crate::geo::haversine_distance;
use crate::models::TrackPoint;
use crate::time::{parse_timestamp, positive_delta};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Per-check counters for one run of the fixer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixReport {
    /// Points whose speed was missing or unusable and got carried forward
    pub filled: usize,
    /// Points rejected because the raw position jump was implausible
    pub gap_clamped: usize,
    /// Points rejected for exceeding the absolute ceiling
    pub ceiling_clamped: usize,
    /// Points rejected for changing too fast relative to the previous output
    pub jump_clamped: usize,
}

impl FixReport {
    /// Total number of points whose speed was replaced by a check
    #[must_use]
    pub const fn clamped(&self) -> usize {
        self.gap_clamped + self.ceiling_clamped + self.jump_clamped
    }
}

/// Causal clamp filter over a reconstructed speed series
#[derive(Debug, Clone, Copy, Default)]
pub struct SpeedFixer {
    options: FixOptions,
}

impl SpeedFixer {
    /// Create a fixer with the given thresholds
    #[must_use]
    pub const fn new(options: FixOptions) -> Self {
        Self { options }
    }

    /// Thresholds in use
    #[must_use]
    pub const fn options(&self) -> &FixOptions {
        &self.options
    }

    /// Fix a track, returning a new sequence where every point has a speed
    #[must_use]
    pub fn fix(&self, points: &[TrackPoint]) -> Vec<TrackPoint> {
        self.fix_with_report(points).0
    }

    /// Fix a track and report which checks fired
    #[must_use]
    pub fn fix_with_report(&self, points: &[TrackPoint]) -> (Vec<TrackPoint>, FixReport) {
        let times: Vec<Option<DateTime<Utc>>> =
            points.iter().map(|p| parse_timestamp(&p.time)).collect();
        let mut fixed: Vec<TrackPoint> = Vec::with_capacity(points.len());
        let mut report = FixReport::default();

        for (i, point) in points.iter().enumerate() {
            let previous = fixed.last();
            let previous_speed = previous.and_then(|p| p.speed).unwrap_or(0.0);

            let mut speed = match point.speed {
                Some(s) if s.is_finite() && s >= 0.0 => s,
                _ => {
                    report.filled += 1;
                    previous_speed
                }
            };

            if let Some(previous) = previous {
                if let Some(dt) = positive_delta(times[i - 1].as_ref(), times[i].as_ref()) {
                    let implied =
                        haversine_distance(previous.lat, previous.lon, point.lat, point.lon) / dt;
                    if implied > self.options.max_gap_mps {
                        speed = previous_speed;
                        report.gap_clamped += 1;
                    }
                }

                if speed > self.options.max_speed_mps {
                    speed = previous_speed;
                    report.ceiling_clamped += 1;
                }

                if (speed - previous_speed).abs() > self.options.max_jump_mps {
                    speed = previous_speed;
                    report.jump_clamped += 1;
                }
            }

            let mut output = point.clone();
            output.speed = Some(speed);
            fixed.push(output);
        }

        debug!(
            points = fixed.len(),
            filled = report.filled,
            gap_clamped = report.gap_clamped,
            ceiling_clamped = report.ceiling_clamped,
            jump_clamped = report.jump_clamped,
            "Speed fixing complete"
        );

        (fixed, report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(seconds: u32) -> String {
        format!("2024-05-01T10:{:02}:{:02}Z", seconds / 60, seconds % 60)
    }

    fn speeds(points: &[TrackPoint]) -> Vec<f64> {
        points.iter().map(|p| p.speed.unwrap()).collect()
    }

    #[test]
    fn test_teleport_inherits_previous_speed() {
        // p1 is ~1000 m from p0 after 10 s: implied 100 m/s
        let points = vec![
            TrackPoint::new(0.0, 0.0, at(0)).with_speed(5.0),
            TrackPoint::new(0.0, 0.008_993, at(10)).with_speed(5.5),
            TrackPoint::new(0.0, 0.008_993, at(11)).with_speed(5.5),
        ];
        let (fixed, report) = SpeedFixer::default().fix_with_report(&points);
        assert_eq!(speeds(&fixed), vec![5.0, 5.0, 5.5]);
        assert_eq!(report.gap_clamped, 1);
    }

    #[test]
    fn test_jump_is_clamped() {
        let points = vec![
            TrackPoint::new(0.0, 0.0, at(0)).with_speed(5.0),
            TrackPoint::new(0.0, 0.0001, at(1)).with_speed(8.5),
        ];
        let (fixed, report) = SpeedFixer::default().fix_with_report(&points);
        assert_eq!(speeds(&fixed), vec![5.0, 5.0]);
        assert_eq!(report.jump_clamped, 1);
    }

    #[test]
    fn test_ceiling_is_clamped_even_without_time() {
        let points = vec![
            TrackPoint::new(0.0, 0.0, String::new()).with_speed(19.0),
            TrackPoint::new(0.0, 0.0, String::new()).with_speed(20.5),
        ];
        let (fixed, report) = SpeedFixer::default().fix_with_report(&points);
        assert_eq!(speeds(&fixed), vec![19.0, 19.0]);
        assert_eq!(report.ceiling_clamped, 1);
        assert_eq!(report.jump_clamped, 0);
    }

    #[test]
    fn test_single_point_defaults_to_zero() {
        let fixed = SpeedFixer::default().fix(&[TrackPoint::new(0.0, 0.0, at(0))]);
        assert_eq!(speeds(&fixed), vec![0.0]);
    }

    #[test]
    fn test_unusable_speeds_are_carried_forward() {
        let points = vec![
            TrackPoint::new(0.0, 0.0, at(0)).with_speed(3.0),
            TrackPoint::new(0.0, 0.0, at(1)).with_speed(f64::NAN),
            TrackPoint::new(0.0, 0.0, at(2)).with_speed(f64::INFINITY),
            TrackPoint::new(0.0, 0.0, at(3)).with_speed(-1.0),
            TrackPoint::new(0.0, 0.0, at(4)),
        ];
        let (fixed, report) = SpeedFixer::default().fix_with_report(&points);
        assert_eq!(speeds(&fixed), vec![3.0; 5]);
        assert_eq!(report.filled, 4);
        assert_eq!(report.clamped(), 0);
    }

    #[test]
    fn test_preserves_length_order_and_other_fields() {
        let points = vec![
            TrackPoint::new(1.0, 2.0, at(0)).with_hr(120.0),
            TrackPoint::new(1.0, 2.00001, at(1))
                .with_speed(1.0)
                .with_distance(1.1),
        ];
        let fixed = SpeedFixer::default().fix(&points);
        assert_eq!(fixed.len(), 2);
        assert_eq!(fixed[0].hr, Some(120.0));
        assert_eq!(fixed[1].distance, Some(1.1));
        assert!((fixed[1].lon - 2.00001).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fixing_is_idempotent() {
        let points = vec![
            TrackPoint::new(0.0, 0.0, at(0)).with_speed(25.0),
            TrackPoint::new(0.0, 0.0001, at(1)).with_speed(3.0),
            TrackPoint::new(0.0, 0.0002, at(2)),
            TrackPoint::new(0.0, 0.05, at(3)).with_speed(4.0),
            TrackPoint::new(0.0, 0.0501, at(3)).with_speed(40.0),
            TrackPoint::new(0.0, 0.0502, at(4)).with_speed(f64::NAN),
            TrackPoint::new(0.0, 0.0503, at(5)).with_speed(2.5),
        ];
        let fixer = SpeedFixer::default();
        let once = fixer.fix(&points);
        let twice = fixer.fix(&once);
        assert_eq!(once, twice);
    }
}
