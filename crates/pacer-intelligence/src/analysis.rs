// ABOUTME: Statistics capability over cleaned tracks and its reference single-pass implementation
// ABOUTME: Computes distance, duration, moving time, and speed/heart-rate summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacer Track Intelligence

//! # Track Analysis
//!
//! The importer hands its cleaned series to any [`Analysis`] implementation,
//! so alternative statistics strategies can be plugged in without touching the
//! pipeline. [`AnalysisBase`] is the default: one pass, one accumulator per
//! metric.

use crate::constants::analysis::IDLE_SPEED_MPS;
use crate::errors::AppResult;
use crate::geo::haversine_distance;
use crate::models::{CleanTrackPoint, MetricSummary, TrackStatistics};
use crate::time::{parse_timestamp, positive_delta, seconds_between};
use async_trait::async_trait;

/// Computes aggregate statistics from a cleaned track
#[async_trait]
pub trait Analysis: Send + Sync {
    /// Summarize the given points
    ///
    /// # Errors
    ///
    /// Implementations may fail; the reference implementation never does
    async fn get_statistics(&self, points: &[CleanTrackPoint]) -> AppResult<TrackStatistics>;
}

/// Running min / max / mean for one metric
#[derive(Debug, Clone, Copy, Default)]
struct MetricAccumulator {
    min: Option<f64>,
    max: Option<f64>,
    sum: f64,
    count: usize,
}

impl MetricAccumulator {
    fn add(&mut self, value: f64) {
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
        self.sum += value;
        self.count += 1;
    }

    fn summary(&self) -> MetricSummary {
        MetricSummary {
            min: self.min,
            max: self.max,
            average: (self.count > 0).then(|| self.sum / self.count as f64),
        }
    }
}

/// Reference statistics implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisBase;

impl AnalysisBase {
    /// Compute statistics synchronously
    #[must_use]
    pub fn compute(points: &[CleanTrackPoint]) -> TrackStatistics {
        let mut speed = MetricAccumulator::default();
        let mut heart_rate = MetricAccumulator::default();
        let mut distance_meters = 0.0;
        let mut moving_time_seconds = 0.0;
        let mut previous: Option<&CleanTrackPoint> = None;
        let mut previous_time = None;

        for point in points {
            let time = parse_timestamp(&point.time);
            speed.add(point.speed);
            // Zero means the device never reported a heart rate
            if point.hr > 0.0 {
                heart_rate.add(point.hr);
            }

            if let Some(prev) = previous {
                distance_meters += haversine_distance(prev.lat, prev.lon, point.lat, point.lon);
                if let Some(dt) = positive_delta(previous_time.as_ref(), time.as_ref()) {
                    if point.speed > IDLE_SPEED_MPS {
                        moving_time_seconds += dt;
                    }
                }
            }

            previous = Some(point);
            previous_time = time;
        }

        let start = points.first().and_then(|p| parse_timestamp(&p.time));
        let end = points.last().and_then(|p| parse_timestamp(&p.time));

        TrackStatistics {
            point_count: points.len(),
            start_time: points.first().map(|p| p.time.clone()).filter(|t| !t.is_empty()),
            end_time: points.last().map(|p| p.time.clone()).filter(|t| !t.is_empty()),
            duration_seconds: start
                .zip(end)
                .map(|(start, end)| seconds_between(&start, &end)),
            moving_time_seconds,
            distance_meters,
            speed: speed.summary(),
            heart_rate: heart_rate.summary(),
        }
    }
}

#[async_trait]
impl Analysis for AnalysisBase {
    async fn get_statistics(&self, points: &[CleanTrackPoint]) -> AppResult<TrackStatistics> {
        Ok(Self::compute(points))
    }
}
