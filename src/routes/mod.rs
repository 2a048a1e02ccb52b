// ABOUTME: Route module organization for Pacer track server HTTP endpoints
// ABOUTME: Assembles track import and health routes with tracing and body limit layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacer Track Intelligence

//! Route module for the Pacer track server
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the session layer.

/// Health check and system status routes
pub mod health;
/// Track upload and session routes
pub mod tracks;

pub use health::HealthRoutes;
pub use tracks::TrackRoutes;

use crate::config::{Environment, GeocodingServiceConfig, ServerConfig};
use crate::external::{LocationOpenStreetmap, LocationServiceConfig};
use crate::intelligence::{AnalysisBase, FixOptions};
use crate::parsers::GpxParser;
use crate::session::SessionBuilder;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;

/// Shared state handed to every request handler
pub struct ServerResources {
    /// Session assembly pipeline
    pub sessions: SessionBuilder,
    /// Maximum accepted request body in bytes
    pub max_body_bytes: usize,
    /// Deployment environment
    pub environment: Environment,
    /// Speed fixer thresholds the parser runs with
    pub fixer: FixOptions,
    /// Reverse geocoding settings
    pub geocoding: GeocodingServiceConfig,
    /// When the resources were created
    pub started_at: Instant,
}

impl ServerResources {
    /// Wire the production collaborators from configuration
    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        let location = LocationOpenStreetmap::new(LocationServiceConfig::from(&config.geocoding));
        let sessions = SessionBuilder::new(
            Arc::new(GpxParser::new(config.fixer)),
            Arc::new(AnalysisBase),
            Arc::new(location),
        );
        Self::with_sessions(sessions, config)
    }

    /// Use a prepared session pipeline; the rest comes from configuration
    #[must_use]
    pub fn with_sessions(sessions: SessionBuilder, config: &ServerConfig) -> Self {
        Self {
            sessions,
            max_body_bytes: config.max_body_bytes,
            environment: config.environment,
            fixer: config.fixer,
            geocoding: config.geocoding.clone(),
            started_at: Instant::now(),
        }
    }
}

/// Build the complete application router
pub fn app_router(resources: Arc<ServerResources>) -> Router {
    let max_body_bytes = resources.max_body_bytes;
    Router::new()
        .merge(TrackRoutes::routes(resources.clone()))
        .merge(HealthRoutes::routes(resources))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
}
