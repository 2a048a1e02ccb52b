// ABOUTME: Builds the session document for an uploaded track and filters unset values
// ABOUTME: Combines cleaned points, statistics, and the start location into one response
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacer Track Intelligence

//! # Session Assembly
//!
//! [`SessionBuilder::handle_gpx_file`] runs the importer, the analysis, and a
//! reverse-geocoding lookup of the first point, then serializes the result
//! through [`strip_unset`] so no `null` ever leaves the service.

use crate::constants::session::{
    DEFAULT_COUNTRY, DEFAULT_HAMLET, DEFAULT_LOCATION, DEFAULT_NAME, DEFAULT_VILLAGE,
};
use crate::errors::{AppError, AppResult};
use crate::external::Location;
use crate::importer::{Importer, ImporterMain};
use crate::intelligence::Analysis;
use crate::models::TrackStatistics;
use crate::parsers::TrackParser;
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};

/// Summary of one uploaded track
#[derive(Debug, Clone, Serialize)]
pub struct SessionData {
    /// Session name supplied by the caller
    pub name: String,
    /// Timestamp of the first point
    pub date: String,
    /// Display name of the start location
    pub location: String,
    /// Country of the start location
    pub country: String,
    /// Village of the start location
    pub village: String,
    /// Hamlet of the start location
    pub hamlet: String,
    /// Aggregate track statistics
    pub statistics: TrackStatistics,
}

/// Collaborators needed to turn a track document into a session
#[derive(Clone)]
pub struct SessionBuilder {
    importer: Arc<dyn Importer>,
    parser: Arc<dyn TrackParser>,
    analysis: Arc<dyn Analysis>,
    location: Arc<dyn Location>,
}

impl SessionBuilder {
    /// Create a builder using the default importer
    #[must_use]
    pub fn new(
        parser: Arc<dyn TrackParser>,
        analysis: Arc<dyn Analysis>,
        location: Arc<dyn Location>,
    ) -> Self {
        Self {
            importer: Arc::new(ImporterMain),
            parser,
            analysis,
            location,
        }
    }

    /// Build the session for a track document
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::InvalidFormat` for unparseable documents,
    /// `ErrorCode::InvalidInput` for tracks without points, and propagates
    /// analysis and geocoding failures
    pub async fn build(&self, content: &str, name: Option<&str>) -> AppResult<SessionData> {
        let points = self
            .importer
            .get_track_points(content, self.parser.as_ref())
            .await?;
        let first = points
            .first()
            .ok_or_else(|| AppError::invalid_input("Track contains no track points"))?;

        let statistics = self
            .importer
            .get_statistics(&points, self.analysis.as_ref())
            .await?;
        let location = self.location.get_location(first.lat, first.lon).await?;

        let date = if first.time.is_empty() {
            Utc::now().to_rfc3339()
        } else {
            first.time.clone()
        };

        Ok(SessionData {
            name: name.unwrap_or(DEFAULT_NAME).to_owned(),
            date,
            location: location
                .display_name
                .unwrap_or_else(|| DEFAULT_LOCATION.into()),
            country: location
                .address
                .country
                .unwrap_or_else(|| DEFAULT_COUNTRY.into()),
            village: location
                .address
                .village
                .unwrap_or_else(|| DEFAULT_VILLAGE.into()),
            hamlet: location
                .address
                .hamlet
                .unwrap_or_else(|| DEFAULT_HAMLET.into()),
            statistics,
        })
    }

    /// Build the session and serialize it without unset values
    ///
    /// # Errors
    ///
    /// Same as [`Self::build`], plus serialization failures
    #[instrument(skip(self, content), fields(bytes = content.len()))]
    pub async fn handle_gpx_file(&self, content: &str, name: Option<&str>) -> AppResult<Value> {
        let session = self.build(content, name).await?;
        info!(
            session.name = %session.name,
            points = session.statistics.point_count,
            distance_m = session.statistics.distance_meters,
            "Track session assembled"
        );
        Ok(strip_unset(serde_json::to_value(session)?))
    }
}

/// Remove object keys whose value is `null`, recursing into objects and arrays
///
/// `false`, `0`, and `""` are kept. Array elements are never removed, only
/// the keys of objects inside them.
#[must_use]
pub fn strip_unset(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_unset(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_unset).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_unset_recurses_and_keeps_falsy_values() {
        let input = json!({
            "name": "ride",
            "missing": null,
            "flags": { "ok": false, "zero": 0, "empty": "", "gone": null },
            "list": [ { "a": null, "b": 1 }, null, 2 ]
        });

        let stripped = strip_unset(input);

        assert_eq!(
            stripped,
            json!({
                "name": "ride",
                "flags": { "ok": false, "zero": 0, "empty": "" },
                "list": [ { "b": 1 }, null, 2 ]
            })
        );
    }

    #[test]
    fn test_strip_unset_leaves_scalars_alone() {
        assert_eq!(strip_unset(json!(3.5)), json!(3.5));
        assert_eq!(strip_unset(Value::Null), Value::Null);
    }
}
