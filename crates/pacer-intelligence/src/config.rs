// ABOUTME: Speed fixer thresholds and their validation errors
// ABOUTME: Defaults of 20, 2, and 25 m/s for ceiling, jump, and implied-gap speed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacer Track Intelligence

//! Speed fixer configuration and validation errors.

use crate::constants::speed_fixer::{
    DEFAULT_MAX_GAP_MPS, DEFAULT_MAX_JUMP_MPS, DEFAULT_MAX_SPEED_MPS,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Threshold is NaN or infinite
    #[error("Threshold {name} must be finite, got {value}")]
    NotFinite {
        /// Threshold name
        name: &'static str,
        /// Offending value
        value: f64,
    },

    /// Threshold is zero or negative
    #[error("Threshold {name} must be greater than zero, got {value}")]
    NotPositive {
        /// Threshold name
        name: &'static str,
        /// Offending value
        value: f64,
    },
}

/// Thresholds for the causal speed clamp filter, all in meters per second
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixOptions {
    /// Absolute physical ceiling
    pub max_speed_mps: f64,
    /// Maximum allowed frame-to-frame change
    pub max_jump_mps: f64,
    /// Maximum plausible speed implied by raw position and time
    pub max_gap_mps: f64,
}

impl Default for FixOptions {
    fn default() -> Self {
        Self {
            max_speed_mps: DEFAULT_MAX_SPEED_MPS,
            max_jump_mps: DEFAULT_MAX_JUMP_MPS,
            max_gap_mps: DEFAULT_MAX_GAP_MPS,
        }
    }
}

impl FixOptions {
    /// Validate that every threshold is finite and strictly positive
    ///
    /// # Errors
    ///
    /// Returns the first offending threshold
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("max_speed_mps", self.max_speed_mps),
            ("max_jump_mps", self.max_jump_mps),
            ("max_gap_mps", self.max_gap_mps),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { name, value });
            }
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        Ok(())
    }
}
