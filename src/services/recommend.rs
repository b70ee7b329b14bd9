// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route recommendation orchestration.
//!
//! Handles the core workflow:
//! 1. Build a coverage grid from historical walks
//! 2. Select under-visited cell centers as start candidates
//! 3. Synthesize a zigzag walk from each candidate
//! 4. Resolve candidates against the routing service until one succeeds
//!
//! The recommender is stateless across requests; the grid lives only for the
//! duration of one call and is never shared.

use rand::Rng;

use crate::models::{GeoPoint, ResolvedRoute, Walk};
use crate::services::coverage::{self, CoverageError, CoverageGrid};
use crate::services::{zigzag, BoundaryService, RoutingApi};

/// Grid cell edge length for recommendation requests, in kilometers.
const CELL_SIZE_KM: f64 = 1.0;

/// Number of under-visited candidates attempted per request.
const CANDIDATE_COUNT: usize = 5;

/// Recommendation parameters, validated before any computation runs.
#[derive(Debug, Clone, Copy)]
pub struct RecommendParams {
    pub duration_minutes: u32,
    pub max_turn_degrees: u32,
    pub segments: u32,
    /// Explicit start; when present it is tried before any grid work happens
    pub start_point: Option<GeoPoint>,
}

impl RecommendParams {
    /// Reject invariant-violating parameters up front. Bad input *data* never
    /// errors elsewhere in the pipeline; bad parameters stop here.
    pub fn validate(&self) -> Result<(), RecommendError> {
        if self.duration_minutes == 0 {
            return Err(RecommendError::InvalidParams(
                "duration_minutes must be positive",
            ));
        }
        if self.segments == 0 {
            return Err(RecommendError::InvalidParams("segments must be positive"));
        }
        if self.max_turn_degrees > 180 {
            return Err(RecommendError::InvalidParams(
                "max_turn_degrees must be at most 180",
            ));
        }
        Ok(())
    }
}

/// Recommends walking routes toward under-visited parts of the region.
pub struct RouteRecommender<P> {
    boundary: BoundaryService,
    planner: P,
}

impl<P: RoutingApi> RouteRecommender<P> {
    pub fn new(boundary: BoundaryService, planner: P) -> Self {
        Self { boundary, planner }
    }

    pub fn planner(&self) -> &P {
        &self.planner
    }

    /// Recommend a new walking route.
    ///
    /// `walks` is a read-only snapshot of history for this request. Returns
    /// `Ok(None)` when every candidate failed resolution — a recoverable
    /// "no recommendation available", not an error.
    pub async fn recommend<R: Rng + ?Sized>(
        &self,
        params: RecommendParams,
        walks: &[Walk],
        rng: &mut R,
    ) -> Result<Option<ResolvedRoute>, RecommendError> {
        params.validate()?;

        if let Some(start) = params.start_point {
            if let Some(route) = self.try_candidate(start, params, rng).await {
                return Ok(Some(route));
            }
        }

        let mut grid = CoverageGrid::build(&self.boundary, CELL_SIZE_KM);
        grid.ingest(&self.boundary, walks);

        let candidates =
            coverage::select_least_visited(&grid, &self.boundary, CANDIDATE_COUNT, rng)?;

        for candidate in candidates {
            if let Some(route) = self.try_candidate(candidate, params, rng).await {
                return Ok(Some(route));
            }
        }

        tracing::info!(
            candidates = CANDIDATE_COUNT,
            "All route candidates exhausted"
        );
        Ok(None)
    }

    /// Synthesize and resolve one candidate. A failure of any flavor —
    /// service error, degenerate geometry — is logged and reported as `None`
    /// so the caller advances to the next candidate.
    async fn try_candidate<R: Rng + ?Sized>(
        &self,
        start: GeoPoint,
        params: RecommendParams,
        rng: &mut R,
    ) -> Option<ResolvedRoute> {
        let waypoints = zigzag::synthesize(
            &self.boundary,
            start,
            params.duration_minutes,
            params.max_turn_degrees,
            params.segments,
            rng,
        );

        match self.planner.route_through(&waypoints).await {
            Ok(route) => Some(route),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    lon = start.lon(),
                    lat = start.lat(),
                    "Route candidate failed"
                );
                None
            }
        }
    }
}

/// Errors from recommendation requests.
#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    #[error("Invalid request: {0}")]
    InvalidParams(&'static str),

    #[error(transparent)]
    Coverage(#[from] CoverageError),
}
