// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bounded random-walk waypoint synthesis ("zigzag" routes).
//!
//! A zigzag is the seed handed to the routing service: a heading-perturbed
//! random walk sized so that covering it at walking pace takes roughly the
//! requested duration. The walk reflects off the region boundary; a reflected
//! step that still exits is accepted as-is and left for the routing service
//! to reject.

use std::f64::consts::PI;

use rand::Rng;

use crate::models::GeoPoint;
use crate::services::BoundaryService;

/// Assumed walking speed in meters per second.
const WALKING_SPEED_MPS: f64 = 1.11;

/// Meters per degree of latitude (approximately constant).
const METERS_PER_DEG_LAT: f64 = 111_320.0;

/// Jitter applied on top of the 180° boundary reflection, in degrees.
const REFLECT_JITTER_DEGREES: f64 = 30.0;

/// Convert meters to degrees of latitude.
fn meters_to_deg_lat(meters: f64) -> f64 {
    meters / METERS_PER_DEG_LAT
}

/// Convert meters to degrees of longitude at a given latitude.
fn meters_to_deg_lon(meters: f64, latitude: f64) -> f64 {
    meters / (METERS_PER_DEG_LAT * latitude.to_radians().cos())
}

/// Step `meters` along `heading` from `from`.
///
/// The metric-to-angular conversion is latitude-corrected using the latitude
/// of the point being stepped from, so it is recomputed at every step.
/// (The coverage grid's cell sizing is deliberately NOT corrected this way.)
fn step_from(from: GeoPoint, heading: f64, meters: f64) -> GeoPoint {
    GeoPoint::new(
        from.lon() + meters_to_deg_lon(meters * heading.cos(), from.lat()),
        from.lat() + meters_to_deg_lat(meters * heading.sin()),
    )
}

/// Synthesize a zigzag waypoint sequence from `start`.
///
/// Target total distance is walking speed × duration, split evenly across
/// `segments` steps. The initial heading is uniform in [0, 2π); before each
/// subsequent step the heading is perturbed by a uniform draw in
/// [-max_turn_degrees, +max_turn_degrees]. A step that would exit the
/// boundary reflects the heading by 180° plus a ±30° jitter and is recomputed
/// once, without re-checking the result.
///
/// Returns `segments + 1` points with `start` as element 0. All randomness
/// comes from the injected `rng`, so a seeded source reproduces the walk.
pub fn synthesize<R: Rng + ?Sized>(
    boundary: &BoundaryService,
    start: GeoPoint,
    duration_minutes: u32,
    max_turn_degrees: u32,
    segments: u32,
    rng: &mut R,
) -> Vec<GeoPoint> {
    let total_distance = WALKING_SPEED_MPS * duration_minutes as f64 * 60.0;
    let segment_distance = total_distance / segments as f64;
    let max_turn = (max_turn_degrees as f64).to_radians();

    let mut heading = rng.gen_range(0.0..2.0 * PI);
    let mut current = start;
    let mut waypoints = Vec::with_capacity(segments as usize + 1);
    waypoints.push(start);

    for step in 0..segments {
        if step > 0 {
            heading += rng.gen_range(-max_turn..=max_turn);
        }

        let mut next = step_from(current, heading, segment_distance);
        if !boundary.contains(&next) {
            let jitter = rng
                .gen_range(-REFLECT_JITTER_DEGREES..=REFLECT_JITTER_DEGREES)
                .to_radians();
            heading += PI + jitter;
            next = step_from(current, heading, segment_distance);
        }

        waypoints.push(next);
        current = next;
    }

    waypoints
}
