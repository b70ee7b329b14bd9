// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use walklog::config::Config;
use walklog::db::WalkStore;
use walklog::models::{GeoPoint, ResolvedRoute};
use walklog::routes::create_router;
use walklog::services::ors::RoutingError;
use walklog::services::{BoundaryService, OrsClient, RouteRecommender, RoutingApi};
use walklog::AppState;

/// Load the real region boundary shipped with the crate.
#[allow(dead_code)]
pub fn load_test_boundary() -> BoundaryService {
    BoundaryService::load_from_file("data/boundary.geojson")
        .expect("Failed to load region boundary - is data/ committed?")
}

/// A small square region for fast, predictable tests.
#[allow(dead_code)]
pub fn square_boundary() -> BoundaryService {
    BoundaryService::from_ring(vec![
        GeoPoint::new(37.0, 55.0),
        GeoPoint::new(37.2, 55.0),
        GeoPoint::new(37.2, 55.2),
        GeoPoint::new(37.0, 55.2),
    ])
    .expect("square ring is valid")
}

/// Routing stub: fails the first `fail_first` calls, then succeeds.
#[allow(dead_code)]
pub struct StubPlanner {
    fail_first: usize,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl StubPlanner {
    pub fn succeeding() -> Self {
        Self::failing_first(0)
    }

    pub fn failing_first(fail_first: usize) -> Self {
        Self {
            fail_first,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RoutingApi for StubPlanner {
    async fn route_through(&self, waypoints: &[GeoPoint]) -> Result<ResolvedRoute, RoutingError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.fail_first {
            return Err(RoutingError::EmptyRoute);
        }
        Ok(ResolvedRoute {
            duration_seconds: 1800.0,
            distance_meters: 2000.0,
            path: waypoints.to_vec(),
            share_link: None,
        })
    }
}

/// Create a test app with an in-memory store.
///
/// The routing client is real but pointed at a dummy key; tests that hit it
/// stay on code paths that fail before any network call matters.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let boundary = load_test_boundary();
    let ors = OrsClient::new(config.ors_api_key.clone(), config.ors_timeout_secs)
        .expect("Failed to build routing client");

    let state = Arc::new(AppState {
        config,
        store: WalkStore::new(),
        recommender: RouteRecommender::new(boundary, ors),
    });

    (create_router(state.clone()), state)
}
