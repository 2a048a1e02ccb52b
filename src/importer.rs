// ABOUTME: Pipeline orchestration from document text to cleaned track points and statistics
// ABOUTME: Normalizes unset point fields so downstream consumers never see missing values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacer Track Intelligence

//! Track import orchestration
//!
//! The importer depends only on the [`TrackParser`] and [`Analysis`]
//! capabilities. It adds no failure modes of its own: errors surface from the
//! parser or the analysis.

use crate::errors::AppResult;
use crate::intelligence::Analysis;
use crate::models::{CleanTrackPoint, TrackStatistics};
use crate::parsers::TrackParser;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Sequences parsing, normalization, and analysis of one track
#[async_trait]
pub trait Importer: Send + Sync {
    /// Parse a document and normalize every point
    ///
    /// # Errors
    ///
    /// Propagates parser failures (e.g., unparseable markup)
    async fn get_track_points(
        &self,
        content: &str,
        parser: &dyn TrackParser,
    ) -> AppResult<Vec<CleanTrackPoint>>;

    /// Summarize a cleaned track
    ///
    /// # Errors
    ///
    /// Propagates analysis failures
    async fn get_statistics(
        &self,
        points: &[CleanTrackPoint],
        analysis: &dyn Analysis,
    ) -> AppResult<TrackStatistics>;
}

/// Default importer
#[derive(Debug, Clone, Copy, Default)]
pub struct ImporterMain;

#[async_trait]
impl Importer for ImporterMain {
    #[instrument(skip(self, content, parser), fields(format = parser.format()))]
    async fn get_track_points(
        &self,
        content: &str,
        parser: &dyn TrackParser,
    ) -> AppResult<Vec<CleanTrackPoint>> {
        let points = parser.parse(content).await?;
        let cleaned: Vec<CleanTrackPoint> = points.into_iter().map(CleanTrackPoint::from).collect();
        debug!(points = cleaned.len(), "Track points normalized");
        Ok(cleaned)
    }

    async fn get_statistics(
        &self,
        points: &[CleanTrackPoint],
        analysis: &dyn Analysis,
    ) -> AppResult<TrackStatistics> {
        analysis.get_statistics(points).await
    }
}
