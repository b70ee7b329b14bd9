// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Geographic helpers for track length and derived quantities.
//!
//! Distances are great-circle (haversine) over WGS84 coordinates, the
//! standard for GPS polylines.

use geo::{Distance, Haversine, Point};

use crate::models::GeoPoint;

/// CO2 saved per walked kilometer versus driving, in kilograms (150 g/km).
const CO2_KG_PER_KM: f64 = 0.15;

/// Great-circle length of a path in kilometers, summed over consecutive points.
///
/// Paths with fewer than two points have zero length.
pub fn path_length_km(path: &[GeoPoint]) -> f64 {
    path.windows(2)
        .map(|pair| Haversine.distance(Point::from(pair[0]), Point::from(pair[1])))
        .sum::<f64>()
        / 1000.0
}

/// Estimated CO2 savings for a walked distance.
pub fn co2_saved_kg(distance_km: f64) -> f64 {
    distance_km * CO2_KG_PER_KM
}
