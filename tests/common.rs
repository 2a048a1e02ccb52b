// ABOUTME: Shared test utilities and GPX fixtures for integration tests
// ABOUTME: Provides quiet logging setup and small document builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacer Track Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::uninlined_format_args
)]
//! Shared test utilities for `pacer_track_server`

use std::fmt::Write;
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

pub const GPX_NAMESPACE: &str = "http://www.topografix.com/GPX/1/1";
pub const GARMIN_NAMESPACE: &str = "http://www.garmin.com/xmlschemas/TrackPointExtension/v1";

/// Wrap track point markup in a GPX 1.1 document declaring the Garmin extension prefix
pub fn gpx_document(track_points: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="pacer-tests" xmlns="{GPX_NAMESPACE}" xmlns:gpxtpx="{GARMIN_NAMESPACE}">
  <trk>
    <name>Test ride</name>
    <trkseg>
{track_points}
    </trkseg>
  </trk>
</gpx>"#
    )
}

/// A stationary track with one point every ten seconds and the given device speeds
pub fn stationary_track(speeds: &[f64]) -> String {
    let mut points = String::new();
    for (i, speed) in speeds.iter().enumerate() {
        let _ = writeln!(
            points,
            r#"      <trkpt lat="47.3769" lon="8.5417"><time>2024-05-01T10:{:02}:{:02}Z</time><extensions><speed>{}</speed></extensions></trkpt>"#,
            i * 10 / 60,
            i * 10 % 60,
            speed
        );
    }
    gpx_document(&points)
}
