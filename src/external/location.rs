// ABOUTME: Reverse geocoding of a track's start point through OpenStreetMap Nominatim
// ABOUTME: Location capability trait, Nominatim client, and a bounded expiring lookup cache
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacer Track Intelligence

//! Reverse geocoding
//!
//! The session builder asks a [`Location`] for the place a track starts in.
//! [`LocationOpenStreetmap`] answers from Nominatim's `jsonv2` reverse endpoint.
//! Failures are reported, not papered over: the caller decides what a missing
//! location means.

use crate::constants::network::{
    DEFAULT_GEOCODING_BASE_URL, DEFAULT_GEOCODING_CACHE_CAPACITY, DEFAULT_GEOCODING_CACHE_TTL_SECS,
    DEFAULT_GEOCODING_TIMEOUT_SECS,
};
use crate::errors::{AppError, AppResult};
use crate::utils::http_client::create_client_with_timeout;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

/// Place description for a coordinate pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationDescriptor {
    /// Human-readable location description
    #[serde(default)]
    pub display_name: Option<String>,
    /// Structured address parts
    #[serde(default)]
    pub address: LocationAddress,
}

/// Address parts used by the session document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationAddress {
    /// Country name
    #[serde(default)]
    pub country: Option<String>,
    /// Village name
    #[serde(default)]
    pub village: Option<String>,
    /// Hamlet name
    #[serde(default)]
    pub hamlet: Option<String>,
}

/// Resolves coordinates to a place description
#[async_trait]
pub trait Location: Send + Sync {
    /// Look up the place at the given coordinates
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::ExternalServiceError` when the lookup fails
    async fn get_location(&self, latitude: f64, longitude: f64) -> AppResult<LocationDescriptor>;
}

/// Nominatim client configuration
#[derive(Debug, Clone)]
pub struct LocationServiceConfig {
    /// Nominatim root URL
    pub base_url: String,
    /// When false, lookups return an empty descriptor without a network call
    pub enabled: bool,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum number of cached lookups; the least recently used is evicted first
    pub cache_capacity: usize,
    /// Lifetime of a cached lookup in seconds
    pub cache_ttl_secs: u64,
}

impl Default for LocationServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEOCODING_BASE_URL.into(),
            enabled: true,
            timeout_secs: DEFAULT_GEOCODING_TIMEOUT_SECS,
            cache_capacity: DEFAULT_GEOCODING_CACHE_CAPACITY,
            cache_ttl_secs: DEFAULT_GEOCODING_CACHE_TTL_SECS,
        }
    }
}

struct CacheEntry {
    location: LocationDescriptor,
    stored_at: Instant,
}

/// Reverse geocoding against OpenStreetMap Nominatim
pub struct LocationOpenStreetmap {
    client: Client,
    config: LocationServiceConfig,
    cache: Mutex<LruCache<String, CacheEntry>>,
    cache_ttl: Duration,
}

impl LocationOpenStreetmap {
    /// Create a client with the given configuration
    #[must_use]
    pub fn new(config: LocationServiceConfig) -> Self {
        let capacity = NonZeroUsize::new(config.cache_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            client: create_client_with_timeout(config.timeout_secs),
            cache: Mutex::new(LruCache::new(capacity)),
            cache_ttl: Duration::from_secs(config.cache_ttl_secs),
            config,
        }
    }

    /// Number of cached lookups, expired ones included until they are touched
    pub async fn cached_entries(&self) -> usize {
        self.cache.lock().await.len()
    }

    async fn check_cache(&self, cache_key: &str) -> Option<LocationDescriptor> {
        let mut cache = self.cache.lock().await;
        if cache.get(cache_key)?.stored_at.elapsed() >= self.cache_ttl {
            debug!("Cache entry expired for {}", cache_key);
            cache.pop(cache_key);
            return None;
        }
        debug!("Using cached location data for {}", cache_key);
        cache.peek(cache_key).map(|entry| entry.location.clone())
    }

    fn cache_key(latitude: f64, longitude: f64) -> String {
        format!("{latitude:.6},{longitude:.6}")
    }

    #[instrument(
        skip(self),
        fields(
            service = "nominatim",
            api_call = "reverse_geocode",
            lat = %latitude,
            lon = %longitude,
        )
    )]
    async fn fetch_from_api(&self, latitude: f64, longitude: f64) -> AppResult<LocationDescriptor> {
        let url = format!(
            "{}/reverse?format=jsonv2&lat={latitude}&lon={longitude}",
            self.config.base_url.trim_end_matches('/')
        );

        let response = self.client.get(&url).send().await.map_err(|e| {
            AppError::external_service(
                "Nominatim",
                format!("Failed to send reverse geocoding request: {e}"),
            )
        })?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::external_service(
                "Nominatim",
                format!("Reverse geocoding API returned status: {status}"),
            ));
        }

        response.json().await.map_err(|e| {
            AppError::external_service(
                "Nominatim",
                format!("Failed to parse reverse geocoding response: {e}"),
            )
        })
    }
}

impl Default for LocationOpenStreetmap {
    fn default() -> Self {
        Self::new(LocationServiceConfig::default())
    }
}

#[async_trait]
impl Location for LocationOpenStreetmap {
    async fn get_location(&self, latitude: f64, longitude: f64) -> AppResult<LocationDescriptor> {
        if !self.config.enabled {
            return Ok(LocationDescriptor::default());
        }

        let cache_key = Self::cache_key(latitude, longitude);
        if let Some(cached) = self.check_cache(&cache_key).await {
            return Ok(cached);
        }

        info!(
            "Fetching location data for coordinates: {}, {}",
            latitude, longitude
        );
        let location = self.fetch_from_api(latitude, longitude).await?;
        self.cache.lock().await.put(
            cache_key,
            CacheEntry {
                location: location.clone(),
                stored_at: Instant::now(),
            },
        );

        Ok(location)
    }
}
