// ABOUTME: Track upload route handlers turning a posted GPX body into a session document
// ABOUTME: Thin handlers delegating to the session builder; errors render as JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacer Track Intelligence

//! Track upload routes
//!
//! `POST /` takes the raw GPX document as the request body and an optional
//! `name` query parameter, and answers with `{"result": <session>}`.

use super::ServerResources;
use crate::errors::AppError;
use crate::logging::AppLogger;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;

/// Query parameters for track uploads
#[derive(Debug, Deserialize, Default)]
struct UploadQuery {
    #[serde(default)]
    name: Option<String>,
}

/// Track routes
pub struct TrackRoutes;

impl TrackRoutes {
    /// Create all track routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/", get(Self::handle_index).post(Self::handle_upload))
            .with_state(resources)
    }

    async fn handle_index() -> Json<Value> {
        Json(json!({ "message": "Hello from GET!" }))
    }

    async fn handle_upload(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<UploadQuery>,
        body: String,
    ) -> Result<Json<Value>, AppError> {
        let started = Instant::now();
        let name = query.name.as_deref();

        let result = resources.sessions.handle_gpx_file(&body, name).await;
        AppLogger::log_track_import(
            name.unwrap_or_default(),
            body.len(),
            result.is_ok(),
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );

        Ok(Json(json!({ "result": result? })))
    }
}
