// ABOUTME: Integration tests for the HTTP surface using in-process requests
// ABOUTME: Exercises upload, greeting, health, and error rendering without a socket
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacer Track Intelligence

#![allow(clippy::expect_used)]
#![allow(missing_docs)]

mod common;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use common::{init_test_logging, stationary_track};
use http_body_util::BodyExt;
use pacer_track_server::config::{Environment, ServerConfig};
use pacer_track_server::errors::AppResult;
use pacer_track_server::external::{Location, LocationDescriptor};
use pacer_track_server::intelligence::{AnalysisBase, FixOptions};
use pacer_track_server::parsers::GpxParser;
use pacer_track_server::routes::{app_router, ServerResources};
use pacer_track_server::session::SessionBuilder;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

struct NowhereLocation;

#[async_trait]
impl Location for NowhereLocation {
    async fn get_location(&self, _latitude: f64, _longitude: f64) -> AppResult<LocationDescriptor> {
        Ok(LocationDescriptor::default())
    }
}

fn router_for(config: &ServerConfig) -> Router {
    let sessions = SessionBuilder::new(
        Arc::new(GpxParser::new(config.fixer)),
        Arc::new(AnalysisBase),
        Arc::new(NowhereLocation),
    );
    app_router(Arc::new(ServerResources::with_sessions(sessions, config)))
}

fn test_router(max_body_bytes: usize) -> Router {
    router_for(&ServerConfig {
        max_body_bytes,
        ..ServerConfig::default()
    })
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn upload(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/gpx+xml")
        .body(Body::from(body))
        .expect("request")
}

#[tokio::test]
async fn test_get_root_greets() {
    let request = Request::builder()
        .uri("/")
        .body(Body::empty())
        .expect("request");

    let (status, json) = send(test_router(1024), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Hello from GET!");
}

#[tokio::test]
async fn test_upload_returns_session_result() {
    init_test_logging();

    let (status, json) = send(
        test_router(1024 * 1024),
        upload("/?name=Lunch%20run", stationary_track(&[1.0, 2.0, 3.0])),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let result = &json["result"];
    assert_eq!(result["name"], "Lunch run");
    assert_eq!(result["location"], "No location");
    assert_eq!(result["country"], "No country");
    assert_eq!(result["statistics"]["point_count"], 3);
    assert!(!json.to_string().contains("null"));
}

#[tokio::test]
async fn test_upload_of_malformed_document_is_bad_request() {
    init_test_logging();

    let (status, json) = send(test_router(1024), upload("/", "<gpx><trk>".into())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "INVALID_FORMAT");
}

#[tokio::test]
async fn test_upload_over_body_limit_is_rejected() {
    init_test_logging();

    let (status, _) = send(
        test_router(64),
        upload("/", stationary_track(&[1.0, 2.0, 3.0])),
    )
    .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_health_endpoint() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .expect("request");

    let (status, json) = send(test_router(1024), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["uptime_seconds"].is_u64());
}

#[tokio::test]
async fn test_ready_reports_pipeline_configuration() {
    let mut config = ServerConfig {
        environment: Environment::Production,
        fixer: FixOptions {
            max_speed_mps: 15.0,
            max_jump_mps: 3.0,
            max_gap_mps: 30.0,
        },
        ..ServerConfig::default()
    };
    config.geocoding.enabled = false;

    let request = Request::builder()
        .uri("/ready")
        .body(Body::empty())
        .expect("request");
    let (status, json) = send(router_for(&config), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ready");
    assert_eq!(json["environment"], "production");
    assert_eq!(json["speed_fixer"]["max_speed_mps"], 15.0);
    assert_eq!(json["speed_fixer"]["max_jump_mps"], 3.0);
    assert_eq!(json["speed_fixer"]["max_gap_mps"], 30.0);
    assert_eq!(json["geocoding"]["enabled"], false);
    assert_eq!(json["geocoding"]["cache_capacity"], 1000);
}
