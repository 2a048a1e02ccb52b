// ABOUTME: Pacer CLI - cleans a local GPX file and prints its points or statistics
// ABOUTME: Runs the same import pipeline as the server without geocoding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacer Track Intelligence
//!
//! Usage:
//! ```bash
//! # Print the cleaned track points as JSON
//! pacer-cli ride.gpx
//!
//! # Print summary statistics with a stricter ceiling
//! pacer-cli ride.gpx --max-speed 15 --stats
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use pacer_track_server::{
    importer::{Importer, ImporterMain},
    intelligence::{AnalysisBase, FixOptions},
    logging::{LogFormat, LoggingConfig},
    parsers::GpxParser,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "pacer-cli",
    about = "Pacer GPX track cleaner",
    long_about = "Extracts track points from a GPX file, reconstructs missing speeds, and removes implausible speed spikes."
)]
struct Cli {
    /// GPX file to import
    file: PathBuf,

    /// Absolute speed ceiling in m/s
    #[arg(long, default_value_t = FixOptions::default().max_speed_mps)]
    max_speed: f64,

    /// Maximum speed change between consecutive points in m/s
    #[arg(long, default_value_t = FixOptions::default().max_jump_mps)]
    max_jump: f64,

    /// Maximum speed implied by position and time in m/s
    #[arg(long, default_value_t = FixOptions::default().max_gap_mps)]
    max_gap: f64,

    /// Print summary statistics instead of points
    #[arg(long)]
    stats: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    LoggingConfig {
        level: if cli.verbose { "debug" } else { "warn" }.to_owned(),
        format: LogFormat::Compact,
        ..LoggingConfig::default()
    }
    .init()?;

    let options = FixOptions {
        max_speed_mps: cli.max_speed,
        max_jump_mps: cli.max_jump,
        max_gap_mps: cli.max_gap,
    };
    options
        .validate()
        .context("Invalid speed fixer thresholds")?;

    let content = tokio::fs::read_to_string(&cli.file)
        .await
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;

    let parser = GpxParser::new(options);
    let importer = ImporterMain;
    let points = importer.get_track_points(&content, &parser).await?;
    info!(points = points.len(), file = %cli.file.display(), "Track imported");

    let output = if cli.stats {
        let statistics = importer.get_statistics(&points, &AnalysisBase).await?;
        serde_json::to_string_pretty(&statistics)?
    } else {
        serde_json::to_string_pretty(&points)?
    };
    println!("{output}");

    Ok(())
}
