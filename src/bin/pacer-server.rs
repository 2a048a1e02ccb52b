// ABOUTME: HTTP server binary accepting GPX uploads and returning session documents
// ABOUTME: Loads environment configuration, initializes logging, and serves the axum router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacer Track Intelligence

//! # Pacer Track Server Binary
//!
//! Starts the HTTP service that cleans uploaded GPX tracks.

use anyhow::{Context, Result};
use clap::Parser;
use pacer_track_server::{
    config::ServerConfig,
    logging,
    routes::{app_router, ServerResources},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Command-line overrides applied on top of the environment configuration
#[derive(Parser)]
#[command(name = "pacer-server")]
#[command(about = "Pacer - GPX track import service")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override bind address
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }

    logging::init_from_env(config.environment)?;

    info!("Starting Pacer track server");
    info!("{}", config.summary());

    let resources = Arc::new(ServerResources::from_config(&config));
    let app = app_router(resources);

    let address = format!("{}:{}", config.host, config.http_port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    info!("App listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated with an error")?;

    info!("Server shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
