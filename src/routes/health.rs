// ABOUTME: Liveness and readiness endpoints describing the running import pipeline
// ABOUTME: Readiness reports the environment, speed fixer thresholds, and geocoding settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacer Track Intelligence

//! Service status routes
//!
//! `GET /health` answers as long as the process serves requests. `GET /ready`
//! additionally describes the configuration uploads are processed with.

use super::ServerResources;
use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the status routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::handle_health))
            .route("/ready", get(Self::handle_ready))
            .with_state(resources)
    }

    async fn handle_health(State(resources): State<Arc<ServerResources>>) -> Json<Value> {
        Json(json!({
            "status": "healthy",
            "version": env!("CARGO_PKG_VERSION"),
            "uptime_seconds": resources.started_at.elapsed().as_secs(),
        }))
    }

    async fn handle_ready(State(resources): State<Arc<ServerResources>>) -> Json<Value> {
        let fixer = &resources.fixer;
        let geocoding = &resources.geocoding;
        Json(json!({
            "status": "ready",
            "environment": resources.environment.to_string(),
            "max_body_bytes": resources.max_body_bytes,
            "speed_fixer": {
                "max_speed_mps": fixer.max_speed_mps,
                "max_jump_mps": fixer.max_jump_mps,
                "max_gap_mps": fixer.max_gap_mps,
            },
            "geocoding": {
                "enabled": geocoding.enabled,
                "base_url": geocoding.base_url,
                "cache_capacity": geocoding.cache_capacity,
                "cache_ttl_secs": geocoding.cache_ttl_secs,
            },
        }))
    }
}
