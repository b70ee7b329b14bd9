// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Geographic coordinate type shared across the crate.

use serde::{Deserialize, Serialize};

/// A longitude/latitude pair in GeoJSON axis order.
///
/// Serializes as `[lon, lat]`. Every consumer in this crate (grid, boundary,
/// zigzag, routing client) expects this order; keep it that way to avoid
/// silent axis swaps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint(pub f64, pub f64);

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self(lon, lat)
    }

    pub fn lon(&self) -> f64 {
        self.0
    }

    pub fn lat(&self) -> f64 {
        self.1
    }
}

impl From<GeoPoint> for geo::Point<f64> {
    fn from(p: GeoPoint) -> Self {
        geo::Point::new(p.lon(), p.lat())
    }
}

impl From<GeoPoint> for geo::Coord<f64> {
    fn from(p: GeoPoint) -> Self {
        geo::Coord {
            x: p.lon(),
            y: p.lat(),
        }
    }
}
