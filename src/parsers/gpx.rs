// ABOUTME: GPX track point extraction with namespace-tolerant extension lookup
// ABOUTME: Runs extraction, speed reconstruction, and speed fixing over one document
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacer Track Intelligence

//! # GPX Parser
//!
//! Reads every `trkpt` element in document order. Position comes from the
//! `lat`/`lon` attributes (0 when missing or not a number) and time from the
//! first `time` element (empty when absent). Heart rate, speed, and
//! cumulative distance are looked up inside `extensions`, accepting both plain
//! elements (`<speed>`) and vendor-prefixed ones (`<gpxtpx:hr>`,
//! `<ns3:speed>`). An element written without a prefix wins, whatever
//! namespace it is bound to. Optional values that are missing or not
//! numeric stay unset.
//!
//! One bad point never aborts the parse; only text that is not well-formed
//! XML at all is rejected.

use super::TrackParser;
use crate::errors::{AppError, AppResult};
use crate::intelligence::{FixOptions, SpeedFixer, SpeedReconstructor};
use crate::models::TrackPoint;
use async_trait::async_trait;
use roxmltree::{Document, Node, ParsingOptions};
use tracing::{debug, instrument};

const TRACK_POINT_TAG: &str = "trkpt";
const TIME_TAG: &str = "time";
const EXTENSIONS_TAG: &str = "extensions";
const HEART_RATE_TAG: &str = "hr";
const SPEED_TAG: &str = "speed";
const DISTANCE_TAG: &str = "distance";

/// GPX document parser
#[derive(Debug, Clone, Copy, Default)]
pub struct GpxParser {
    fixer: SpeedFixer,
}

impl GpxParser {
    /// Create a parser whose speed fixer uses the given thresholds
    #[must_use]
    pub const fn new(options: FixOptions) -> Self {
        Self {
            fixer: SpeedFixer::new(options),
        }
    }

    /// Speed fixer thresholds in use
    #[must_use]
    pub const fn fix_options(&self) -> &FixOptions {
        self.fixer.options()
    }

    /// Extract raw track points without reconstructing or fixing speeds
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::InvalidFormat` when the text is not well-formed XML
    pub fn extract(content: &str) -> AppResult<Vec<TrackPoint>> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let document = Document::parse_with_options(content, options)
            .map_err(|e| AppError::unparseable(e.to_string()).with_source(e))?;

        Ok(document
            .descendants()
            .filter(|node| node.is_element() && node.tag_name().name() == TRACK_POINT_TAG)
            .map(read_track_point)
            .collect())
    }

    /// Extract, reconstruct missing speeds, and fix noisy speeds
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::InvalidFormat` when the text is not well-formed XML
    pub fn parse_document(&self, content: &str) -> AppResult<Vec<TrackPoint>> {
        let mut points = Self::extract(content)?;
        debug!(points = points.len(), "Extracted GPX track points");

        SpeedReconstructor::reconstruct(&mut points);
        Ok(self.fixer.fix(&points))
    }
}

#[async_trait]
impl TrackParser for GpxParser {
    fn format(&self) -> &'static str {
        "gpx"
    }

    #[instrument(skip(self, content), fields(parser = "gpx", bytes = content.len()))]
    async fn parse(&self, content: &str) -> AppResult<Vec<TrackPoint>> {
        self.parse_document(content)
    }
}

fn read_track_point(node: Node<'_, '_>) -> TrackPoint {
    let mut point = TrackPoint::new(
        read_coordinate(node, "lat"),
        read_coordinate(node, "lon"),
        find_element(node, TIME_TAG)
            .and_then(|time| time.text())
            .map(|text| text.trim().to_owned())
            .unwrap_or_default(),
    );

    if let Some(extensions) = find_element(node, EXTENSIONS_TAG) {
        point.hr = read_number(extensions, HEART_RATE_TAG);
        point.speed = read_number(extensions, SPEED_TAG);
        point.distance = read_number(extensions, DISTANCE_TAG);
    }

    point
}

fn read_coordinate(node: Node<'_, '_>, attribute: &str) -> f64 {
    node.attribute(attribute)
        .and_then(parse_number)
        .unwrap_or(0.0)
}

/// First descendant with the given local name, preferring one written without a prefix
fn find_element<'a, 'input>(
    parent: Node<'a, 'input>,
    local_name: &str,
) -> Option<Node<'a, 'input>> {
    let mut candidates = parent
        .descendants()
        .skip(1)
        .filter(|n| n.is_element() && n.tag_name().name() == local_name);

    let first = candidates.next()?;
    if is_unprefixed(first) {
        return Some(first);
    }
    candidates.find(|n| is_unprefixed(*n)).or(Some(first))
}

/// Whether the start tag in the source reads `<name` rather than `<prefix:name`
fn is_unprefixed(node: Node<'_, '_>) -> bool {
    node.document()
        .input_text()
        .get(node.range())
        .and_then(|raw| raw.strip_prefix('<'))
        .and_then(|raw| raw.strip_prefix(node.tag_name().name()))
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c == '>' || c == '/' || c.is_whitespace())
}

fn read_number(extensions: Node<'_, '_>, local_name: &str) -> Option<f64> {
    find_element(extensions, local_name)
        .and_then(|element| element.text())
        .and_then(parse_number)
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}
