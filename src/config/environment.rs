// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables for networking, speed fixer thresholds, and geocoding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacer Track Intelligence

//! Environment-based configuration management for production deployment

use crate::constants::network::{
    DEFAULT_GEOCODING_BASE_URL, DEFAULT_GEOCODING_CACHE_CAPACITY, DEFAULT_GEOCODING_CACHE_TTL_SECS,
    DEFAULT_GEOCODING_TIMEOUT_SECS, DEFAULT_HOST, DEFAULT_HTTP_PORT, DEFAULT_MAX_BODY_BYTES,
};
use crate::constants::speed_fixer::{
    DEFAULT_MAX_GAP_MPS, DEFAULT_MAX_JUMP_MPS, DEFAULT_MAX_SPEED_MPS,
};
use crate::external::LocationServiceConfig;
use crate::intelligence::FixOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Environment type for logging and deployment behavior
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Reverse geocoding settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeocodingServiceConfig {
    /// Nominatim root URL
    pub base_url: String,
    /// Whether lookups hit the network
    pub enabled: bool,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum number of cached lookups
    pub cache_capacity: usize,
    /// Lifetime of a cached lookup in seconds
    pub cache_ttl_secs: u64,
}

impl From<&GeocodingServiceConfig> for LocationServiceConfig {
    fn from(config: &GeocodingServiceConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            enabled: config.enabled,
            timeout_secs: config.timeout_secs,
            cache_capacity: config.cache_capacity,
            cache_ttl_secs: config.cache_ttl_secs,
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// HTTP API port
    pub http_port: u16,
    /// Maximum accepted request body in bytes
    pub max_body_bytes: usize,
    /// Deployment environment
    pub environment: Environment,
    /// Speed fixer thresholds
    pub fixer: FixOptions,
    /// Reverse geocoding settings
    pub geocoding: GeocodingServiceConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            http_port: DEFAULT_HTTP_PORT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            environment: Environment::default(),
            fixer: FixOptions::default(),
            geocoding: GeocodingServiceConfig {
                base_url: DEFAULT_GEOCODING_BASE_URL.into(),
                enabled: true,
                timeout_secs: DEFAULT_GEOCODING_TIMEOUT_SECS,
                cache_capacity: DEFAULT_GEOCODING_CACHE_CAPACITY,
                cache_ttl_secs: DEFAULT_GEOCODING_CACHE_TTL_SECS,
            },
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an unparseable value or the
    /// speed fixer thresholds are not finite and positive
    pub fn from_env() -> Result<Self> {
        let fixer = FixOptions {
            max_speed_mps: env_var_or("FIXER_MAX_SPEED_MPS", &DEFAULT_MAX_SPEED_MPS.to_string())?
                .parse()
                .context("Invalid FIXER_MAX_SPEED_MPS value")?,
            max_jump_mps: env_var_or("FIXER_MAX_JUMP_MPS", &DEFAULT_MAX_JUMP_MPS.to_string())?
                .parse()
                .context("Invalid FIXER_MAX_JUMP_MPS value")?,
            max_gap_mps: env_var_or("FIXER_MAX_GAP_MPS", &DEFAULT_MAX_GAP_MPS.to_string())?
                .parse()
                .context("Invalid FIXER_MAX_GAP_MPS value")?,
        };
        fixer
            .validate()
            .context("Invalid speed fixer configuration")?;

        Ok(Self {
            host: env_var_or("HOST", DEFAULT_HOST)?,
            http_port: env_var_or("PORT", &DEFAULT_HTTP_PORT.to_string())?
                .parse()
                .context("Invalid PORT value")?,
            max_body_bytes: env_var_or("MAX_BODY_BYTES", &DEFAULT_MAX_BODY_BYTES.to_string())?
                .parse()
                .context("Invalid MAX_BODY_BYTES value")?,
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )?),
            fixer,
            geocoding: GeocodingServiceConfig {
                base_url: env_var_or("GEOCODING_BASE_URL", DEFAULT_GEOCODING_BASE_URL)?,
                enabled: env_var_or("GEOCODING_SERVICE_ENABLED", "true")?
                    .parse()
                    .context("Invalid GEOCODING_SERVICE_ENABLED value")?,
                timeout_secs: env_var_or(
                    "GEOCODING_TIMEOUT_SECS",
                    &DEFAULT_GEOCODING_TIMEOUT_SECS.to_string(),
                )?
                .parse()
                .context("Invalid GEOCODING_TIMEOUT_SECS value")?,
                cache_capacity: env_var_or(
                    "GEOCODING_CACHE_CAPACITY",
                    &DEFAULT_GEOCODING_CACHE_CAPACITY.to_string(),
                )?
                .parse()
                .context("Invalid GEOCODING_CACHE_CAPACITY value")?,
                cache_ttl_secs: env_var_or(
                    "GEOCODING_CACHE_TTL_SECS",
                    &DEFAULT_GEOCODING_CACHE_TTL_SECS.to_string(),
                )?
                .parse()
                .context("Invalid GEOCODING_CACHE_TTL_SECS value")?,
            },
        })
    }

    /// One-line-per-setting description for startup logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Pacer Track Server Configuration:\n\
             - Listen: {}:{}\n\
             - Environment: {}\n\
             - Max Body: {} bytes\n\
             - Speed Fixer: max_speed={} m/s, max_jump={} m/s, max_gap={} m/s\n\
             - Geocoding: {} ({})",
            self.host,
            self.http_port,
            self.environment,
            self.max_body_bytes,
            self.fixer.max_speed_mps,
            self.fixer.max_jump_mps,
            self.fixer.max_gap_mps,
            if self.geocoding.enabled {
                "Enabled"
            } else {
                "Disabled"
            },
            self.geocoding.base_url,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> Result<String> {
    Ok(env::var(key).unwrap_or_else(|_| default.to_owned()))
}
