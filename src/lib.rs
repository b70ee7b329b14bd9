// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Walklog: record pedestrian walks and recommend routes toward
//! under-visited parts of the city.
//!
//! This crate provides the backend API for logging walk tracks, importing
//! location-history exports, and synthesizing new walking routes biased
//! toward cells of the region the user has rarely visited.

pub mod config;
pub mod db;
pub mod error;
pub mod geo_utils;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::WalkStore;
use services::{OrsClient, RouteRecommender};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: WalkStore,
    pub recommender: RouteRecommender<OrsClient>,
}
