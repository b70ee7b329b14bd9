// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Operating-region boundary: polygon containment and bounding box.
//!
//! The region is a single closed ring (e.g. a city ring road) loaded once at
//! startup and treated as static configuration. Coordinates are [lon, lat]
//! throughout (GeoJSON axis order, lon = x, lat = y).

use crate::models::GeoPoint;
use geo::{BoundingRect, Contains, LineString, Point, Polygon, Rect};
use geojson::GeoJson;
use std::fs;
use std::path::Path;

/// Containment and extent queries for the operating region.
#[derive(Debug, Clone)]
pub struct BoundaryService {
    polygon: Polygon<f64>,
    bbox: Rect<f64>,
}

impl BoundaryService {
    /// Build a boundary from an ordered ring of [lon, lat] vertices.
    ///
    /// The ring is closed implicitly; the first vertex need not be repeated.
    /// The ring is trusted to be simple (non-self-intersecting) and is not
    /// validated at runtime.
    pub fn from_ring(ring: Vec<GeoPoint>) -> Result<Self, BoundaryError> {
        if ring.len() < 3 {
            return Err(BoundaryError::RingTooShort(ring.len()));
        }

        let exterior: LineString<f64> = ring.into_iter().map(geo::Coord::from).collect();
        // Polygon::new closes an open exterior ring.
        let polygon = Polygon::new(exterior, vec![]);
        let bbox = polygon
            .bounding_rect()
            .ok_or(BoundaryError::EmptyGeometry)?;

        Ok(Self { polygon, bbox })
    }

    /// Load the boundary from a GeoJSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, BoundaryError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| BoundaryError::IoError(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    /// Load the boundary from a GeoJSON string.
    ///
    /// Accepts a bare Geometry, a Feature, or a FeatureCollection; the first
    /// Polygon geometry found wins.
    pub fn load_from_json(json_data: &str) -> Result<Self, BoundaryError> {
        let geojson: GeoJson = json_data
            .parse()
            .map_err(|e: geojson::Error| BoundaryError::ParseError(e.to_string()))?;

        let geometry = match geojson {
            GeoJson::Geometry(g) => Some(g),
            GeoJson::Feature(f) => f.geometry,
            GeoJson::FeatureCollection(collection) => collection
                .features
                .into_iter()
                .find_map(|feature| feature.geometry),
        };

        let value = geometry.ok_or(BoundaryError::NoPolygon)?.value;
        let polygon: Polygon<f64> = value
            .try_into()
            .map_err(|_| BoundaryError::NoPolygon)?;
        let bbox = polygon
            .bounding_rect()
            .ok_or(BoundaryError::EmptyGeometry)?;

        tracing::info!(
            vertices = polygon.exterior().0.len(),
            "Loaded region boundary"
        );
        Ok(Self { polygon, bbox })
    }

    /// Point-in-region test.
    ///
    /// Pure function of the static ring; points exactly on the boundary get
    /// whatever `geo`'s containment predicate decides.
    pub fn contains(&self, point: &GeoPoint) -> bool {
        self.polygon.contains(&Point::from(*point))
    }

    /// Axis-aligned bounding box of the region.
    pub fn bounding_box(&self) -> &Rect<f64> {
        &self.bbox
    }
}

/// Errors from boundary loading.
#[derive(Debug, thiserror::Error)]
pub enum BoundaryError {
    #[error("Failed to read file: {0}")]
    IoError(String),

    #[error("Failed to parse GeoJSON: {0}")]
    ParseError(String),

    #[error("No Polygon geometry found in boundary document")]
    NoPolygon,

    #[error("Boundary ring needs at least 3 vertices, got {0}")]
    RingTooShort(usize),

    #[error("Boundary geometry has no extent")]
    EmptyGeometry,
}
