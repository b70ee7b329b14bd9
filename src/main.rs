// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Walklog API Server
//!
//! Logs pedestrian walks and recommends new walking routes that steer the
//! user toward under-visited parts of the operating region.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use walklog::{
    config::Config,
    db::WalkStore,
    services::{BoundaryService, OrsClient, RouteRecommender},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Walklog API");

    // Load the operating-region boundary
    tracing::info!(path = %config.boundary_path, "Loading region boundary");
    let boundary = BoundaryService::load_from_file(&config.boundary_path)
        .expect("Failed to load region boundary");

    // Initialize the routing client and recommender
    let ors = OrsClient::new(config.ors_api_key.clone(), config.ors_timeout_secs)
        .expect("Failed to initialize routing client");
    let recommender = RouteRecommender::new(boundary, ors);

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        store: WalkStore::new(),
        recommender,
    });

    // Build router
    let app = walklog::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("walklog=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
