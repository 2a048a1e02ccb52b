// ABOUTME: Integration tests for the Nominatim reverse geocoding client
// ABOUTME: Serves canned responses from a local axum server to exercise the HTTP path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacer Track Intelligence

#![allow(clippy::expect_used)]
#![allow(missing_docs)]

mod common;

use axum::{
    extract::Query,
    http::{header::USER_AGENT, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use common::init_test_logging;
use pacer_track_server::errors::ErrorCode;
use pacer_track_server::external::{
    Location, LocationDescriptor, LocationOpenStreetmap, LocationServiceConfig,
};
use pacer_track_server::utils::http_client::user_agent;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

async fn spawn_mock_nominatim(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let address = listener.local_addr().expect("local address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("mock server");
    });
    format!("http://{address}")
}

fn client_for(base_url: String) -> LocationOpenStreetmap {
    LocationOpenStreetmap::new(LocationServiceConfig {
        base_url,
        timeout_secs: 5,
        ..LocationServiceConfig::default()
    })
}

/// Mock Nominatim answering every reverse lookup, counting the requests it served
async fn spawn_counting_nominatim() -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let router = Router::new().route(
        "/reverse",
        get(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Json(json!({ "display_name": "Somewhere", "address": {} }))
            }
        }),
    );
    (spawn_mock_nominatim(router).await, hits)
}

#[tokio::test]
async fn test_reverse_lookup_parses_and_caches_response() {
    init_test_logging();

    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let router = Router::new().route(
        "/reverse",
        get(move |Query(params): Query<HashMap<String, String>>| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                assert_eq!(params.get("format").map(String::as_str), Some("jsonv2"));
                Json(json!({
                    "place_id": 1234,
                    "lat": params.get("lat"),
                    "lon": params.get("lon"),
                    "display_name": "Oberstrass, Zürich, Switzerland",
                    "address": {
                        "hamlet": "Oberstrass",
                        "city": "Zürich",
                        "country": "Switzerland",
                        "country_code": "ch"
                    }
                }))
            }
        }),
    );
    let client = client_for(spawn_mock_nominatim(router).await);

    let first = client.get_location(47.3769, 8.5417).await.expect("lookup");
    let second = client.get_location(47.3769, 8.5417).await.expect("lookup");

    assert_eq!(first, second);
    assert_eq!(
        first.display_name.as_deref(),
        Some("Oberstrass, Zürich, Switzerland")
    );
    assert_eq!(first.address.country.as_deref(), Some("Switzerland"));
    assert_eq!(first.address.village, None);
    assert_eq!(first.address.hamlet.as_deref(), Some("Oberstrass"));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(client.cached_entries().await, 1);
}

#[tokio::test]
async fn test_reverse_lookup_reports_upstream_errors() {
    init_test_logging();

    let router = Router::new().route(
        "/reverse",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, Json(Value::Null)) }),
    );
    let client = client_for(spawn_mock_nominatim(router).await);

    let error = client
        .get_location(1.0, 2.0)
        .await
        .expect_err("upstream failure");

    assert_eq!(error.code, ErrorCode::ExternalServiceError);
    assert!(error.message.contains("503"));
    assert_eq!(client.cached_entries().await, 0);
}

#[tokio::test]
async fn test_disabled_lookup_returns_empty_descriptor() {
    let client = LocationOpenStreetmap::new(LocationServiceConfig {
        base_url: "http://127.0.0.1:9".into(),
        enabled: false,
        timeout_secs: 1,
        ..LocationServiceConfig::default()
    });

    let location = client.get_location(1.0, 2.0).await.expect("disabled lookup");

    assert_eq!(location, LocationDescriptor::default());
}

#[tokio::test]
async fn test_expired_entry_is_fetched_again() {
    init_test_logging();

    let (base_url, hits) = spawn_counting_nominatim().await;
    let client = LocationOpenStreetmap::new(LocationServiceConfig {
        base_url,
        cache_ttl_secs: 0,
        ..LocationServiceConfig::default()
    });

    client.get_location(47.0, 8.0).await.expect("first lookup");
    client.get_location(47.0, 8.0).await.expect("second lookup");

    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_cache_evicts_least_recently_used_entry() {
    init_test_logging();

    let (base_url, hits) = spawn_counting_nominatim().await;
    let client = LocationOpenStreetmap::new(LocationServiceConfig {
        base_url,
        cache_capacity: 2,
        ..LocationServiceConfig::default()
    });

    client.get_location(1.0, 1.0).await.expect("lookup");
    client.get_location(2.0, 2.0).await.expect("lookup");
    client.get_location(1.0, 1.0).await.expect("cached lookup");
    assert_eq!(hits.load(Ordering::SeqCst), 2);

    // Capacity is two: the third coordinate pushes out (2, 2), not (1, 1)
    client.get_location(3.0, 3.0).await.expect("lookup");
    assert_eq!(client.cached_entries().await, 2);

    client.get_location(1.0, 1.0).await.expect("cached lookup");
    assert_eq!(hits.load(Ordering::SeqCst), 3);

    client.get_location(2.0, 2.0).await.expect("evicted lookup");
    assert_eq!(hits.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_requests_identify_the_service() {
    init_test_logging();

    // Like Nominatim, refuse clients that do not identify themselves
    let router = Router::new().route(
        "/reverse",
        get(|headers: HeaderMap| async move {
            let agent = headers
                .get(USER_AGENT)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
                .to_owned();
            if agent == user_agent() {
                (StatusCode::OK, Json(json!({ "display_name": "Identified" })))
            } else {
                (StatusCode::FORBIDDEN, Json(Value::Null))
            }
        }),
    );
    let client = client_for(spawn_mock_nominatim(router).await);

    let location = client.get_location(1.0, 2.0).await.expect("identified lookup");

    assert_eq!(location.display_name.as_deref(), Some("Identified"));
    assert!(user_agent().starts_with("pacer-track-server/"));
}
