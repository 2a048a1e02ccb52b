// ABOUTME: Shared HTTP client utilities with connection pooling and timeout configuration
// ABOUTME: Builds timeout-configured clients carrying the service user agent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacer Track Intelligence

use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::warn;

/// Connect timeout shared by every client built here
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// User agent sent to external services (Nominatim rejects anonymous clients)
#[must_use]
pub fn user_agent() -> String {
    format!("pacer-track-server/{}", env!("CARGO_PKG_VERSION"))
}

/// Create a new HTTP client with a custom request timeout
///
/// Falls back to a default client, without the user agent, if the builder fails.
#[must_use]
pub fn create_client_with_timeout(timeout_secs: u64) -> Client {
    ClientBuilder::new()
        .user_agent(user_agent())
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|e| {
            warn!(
                "Failed to create HTTP client: {}, using default client without user agent",
                e
            );
            Client::new()
        })
}
