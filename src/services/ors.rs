// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OpenRouteService directions client.
//!
//! The routing service is consumed as an opaque resolver: waypoints in,
//! walkable route out. Every failure mode (network error, HTTP error, empty
//! geometry) looks the same to the caller, which simply advances to its next
//! candidate.

use std::future::Future;
use std::time::Duration;

use serde::Deserialize;

use crate::models::{GeoPoint, ResolvedRoute};

/// Routing backend seam. Implemented by [`OrsClient`] in production and by
/// stub planners in tests.
pub trait RoutingApi: Send + Sync {
    /// Resolve an ordered waypoint sequence into a walkable route.
    fn route_through(
        &self,
        waypoints: &[GeoPoint],
    ) -> impl Future<Output = Result<ResolvedRoute, RoutingError>> + Send;
}

/// OpenRouteService API client.
#[derive(Clone)]
pub struct OrsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OrsClient {
    /// Create a client with the given API key and per-request timeout.
    ///
    /// The routing call is the only network hop in a recommendation request,
    /// so the timeout here bounds the whole candidate attempt.
    pub fn new(api_key: String, timeout_secs: u64) -> Result<Self, RoutingError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| RoutingError::Http(e.to_string()))?;

        Ok(Self {
            http,
            base_url: "https://api.openrouteservice.org".to_string(),
            api_key,
        })
    }
}

impl RoutingApi for OrsClient {
    async fn route_through(&self, waypoints: &[GeoPoint]) -> Result<ResolvedRoute, RoutingError> {
        let url = format!("{}/v2/directions/foot-walking/geojson", self.base_url);
        let body = serde_json::json!({ "coordinates": waypoints });

        let response = self
            .http
            .post(&url)
            .header("Authorization", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| RoutingError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(RoutingError::Status { status, body });
        }

        let directions: DirectionsResponse = response
            .json()
            .await
            .map_err(|e| RoutingError::Http(e.to_string()))?;

        resolve_directions(directions, waypoints)
    }
}

/// Convert a directions response into a [`ResolvedRoute`], summing duration
/// and distance over the route's segments.
fn resolve_directions(
    directions: DirectionsResponse,
    waypoints: &[GeoPoint],
) -> Result<ResolvedRoute, RoutingError> {
    let feature = directions
        .features
        .into_iter()
        .next()
        .ok_or(RoutingError::EmptyRoute)?;

    if feature.geometry.coordinates.is_empty() {
        return Err(RoutingError::EmptyRoute);
    }

    let duration_seconds: f64 = feature.properties.segments.iter().map(|s| s.duration).sum();
    let distance_meters: f64 = feature.properties.segments.iter().map(|s| s.distance).sum();

    Ok(ResolvedRoute {
        duration_seconds,
        distance_meters,
        path: feature.geometry.coordinates,
        share_link: share_link(waypoints),
    })
}

/// Build a map deep-link for a waypoint sequence.
///
/// The link format wants lat,lon pairs, the reverse of our GeoJSON order.
pub fn share_link(waypoints: &[GeoPoint]) -> Option<String> {
    if waypoints.is_empty() {
        return None;
    }
    let legs: Vec<String> = waypoints
        .iter()
        .map(|p| format!("{}%2C{}", p.lat(), p.lon()))
        .collect();
    Some(format!(
        "https://yandex.com/maps?rtext={}&rtt=pd",
        legs.join("~")
    ))
}

/// GeoJSON directions response (the subset we read).
#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    features: Vec<DirectionsFeature>,
}

#[derive(Debug, Deserialize)]
struct DirectionsFeature {
    properties: DirectionsProperties,
    geometry: DirectionsGeometry,
}

#[derive(Debug, Deserialize)]
struct DirectionsProperties {
    #[serde(default)]
    segments: Vec<DirectionsSegment>,
}

#[derive(Debug, Deserialize)]
struct DirectionsSegment {
    duration: f64,
    distance: f64,
}

#[derive(Debug, Deserialize)]
struct DirectionsGeometry {
    coordinates: Vec<GeoPoint>,
}

/// Errors from the routing service.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    #[error("Routing request failed: {0}")]
    Http(String),

    #[error("Routing service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Routing response contained no usable route")]
    EmptyRoute,
}
