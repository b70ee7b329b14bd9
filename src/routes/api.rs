// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes: walk records, route recommendation, history import.

use crate::error::{AppError, Result};
use crate::geo_utils;
use crate::models::{GeoPoint, NewWalk, ResolvedRoute, Walk};
use crate::services::import::{self, HistoryPayload};
use crate::services::RecommendParams;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Date format accepted for manual walk entry.
const WALK_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/walks", get(list_walks).post(add_walk))
        .route("/api/walks/{id}", get(get_walk))
        .route("/api/recommend", post(recommend))
        .route("/api/import", post(import_history))
}

// ─── Walk records ────────────────────────────────────────────

/// All walks, most recent first.
async fn list_walks(State(state): State<Arc<AppState>>) -> Json<Vec<Walk>> {
    Json(state.store.get_walks().await)
}

/// Single walk by ID.
async fn get_walk(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Walk>> {
    let walk = state
        .store
        .get_walk(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Walk {} not found", id)))?;
    Ok(Json(walk))
}

/// Manual walk entry.
#[derive(Deserialize)]
pub struct AddWalkRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// "YYYY-MM-DD HH:MM"; an absent or unparsable date falls back to now
    pub date: Option<String>,
    /// [lon, lat] pairs
    pub coordinates: Vec<GeoPoint>,
}

#[derive(Serialize)]
pub struct AddWalkResponse {
    pub id: u64,
}

/// Record a manually entered walk, deriving distance and CO2 savings.
async fn add_walk(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddWalkRequest>,
) -> Result<Json<AddWalkResponse>> {
    if request.coordinates.is_empty() {
        return Err(AppError::BadRequest("coordinates must not be empty".to_string()));
    }

    let date = request
        .date
        .as_deref()
        .and_then(|text| NaiveDateTime::parse_from_str(text, WALK_DATE_FORMAT).ok())
        .map(|naive| naive.and_utc())
        .unwrap_or_else(Utc::now);

    // A single point is a valid (zero-length) walk record.
    let distance_km = geo_utils::path_length_km(&request.coordinates);

    let id = state
        .store
        .add_walk(NewWalk {
            name: request.name,
            date,
            description: request.description,
            path: request.coordinates,
            distance_km,
            co2_saved_kg: geo_utils::co2_saved_kg(distance_km),
        })
        .await;

    tracing::info!(id, "Walk added");
    Ok(Json(AddWalkResponse { id }))
}

// ─── Route recommendation ────────────────────────────────────

#[derive(Deserialize)]
pub struct RecommendRequest {
    pub duration_minutes: u32,
    #[serde(default = "default_max_turn_degrees")]
    pub max_turn_degrees: u32,
    #[serde(default = "default_segments")]
    pub segments: u32,
    /// Optional explicit start as [lon, lat]
    pub start_point: Option<GeoPoint>,
}

fn default_max_turn_degrees() -> u32 {
    60
}

fn default_segments() -> u32 {
    10
}

/// Recommend a walking route toward under-visited parts of the region.
async fn recommend(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<ResolvedRoute>> {
    let params = RecommendParams {
        duration_minutes: request.duration_minutes,
        max_turn_degrees: request.max_turn_degrees,
        segments: request.segments,
        start_point: request.start_point,
    };

    // Snapshot of history for the lifetime of this request.
    let walks = state.store.get_walks().await;
    let mut rng = StdRng::from_entropy();

    let route = state
        .recommender
        .recommend(params, &walks, &mut rng)
        .await?
        .ok_or(AppError::NoRoute)?;

    Ok(Json(route))
}

// ─── History import ──────────────────────────────────────────

#[derive(Serialize)]
pub struct ImportResponse {
    pub imported: usize,
}

/// Import a location-history payload (semantic-segment or raw-ping shaped).
async fn import_history(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<HistoryPayload>,
) -> Json<ImportResponse> {
    let imported = import::import_history(&state.store, payload).await;
    Json(ImportResponse { imported })
}
