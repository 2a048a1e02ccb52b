// ABOUTME: Track document parser capability and its implementations
// ABOUTME: A parser turns raw document text into a fully cleaned track point sequence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacer Track Intelligence

//! Track document parsers
//!
//! The importer only depends on [`TrackParser`], so another track file dialect
//! can be supported by adding an implementation next to [`GpxParser`].

/// GPX 1.0 / 1.1 parser with vendor extension support
pub mod gpx;

pub use gpx::GpxParser;

use crate::errors::AppResult;
use crate::models::TrackPoint;
use async_trait::async_trait;

/// Parses document text into track points with every speed resolved
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so one parser can serve concurrent requests.
#[async_trait]
pub trait TrackParser: Send + Sync {
    /// Short identifier of the document format (e.g., "gpx")
    fn format(&self) -> &'static str;

    /// Parse the whole document
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::InvalidFormat` when the text is not well-formed markup
    async fn parse(&self, content: &str) -> AppResult<Vec<TrackPoint>>;
}
