// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Resolved route model returned by the routing service.

use serde::{Deserialize, Serialize};

use crate::models::GeoPoint;

/// A walkable route resolved from a waypoint candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedRoute {
    /// Estimated walking time in seconds
    pub duration_seconds: f64,
    /// Route length in meters
    pub distance_meters: f64,
    /// Resolved path as [lon, lat] pairs (GeoJSON coordinate order)
    pub path: Vec<GeoPoint>,
    /// Deep link to view the route on a map, if one could be built
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_link: Option<String>,
}
