// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Visitation coverage grid and least-visited cell selection.
//!
//! The grid is a plain two-dimensional histogram over the region bounding
//! box: no interpolation, no smoothing, counts only ever grow. It is rebuilt
//! fresh for every recommendation request and never shared across requests.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{GeoPoint, Walk};
use crate::services::BoundaryService;

/// Kilometers per degree on the latitude axis (1° ≈ 111.32 km).
const KM_PER_DEGREE: f64 = 111.32;

/// Attempts allowed when rejection-sampling fallback points.
const MAX_SAMPLING_ATTEMPTS: u32 = 10_000;

/// Per-cell visit counts over the operating region.
#[derive(Debug, Clone)]
pub struct CoverageGrid {
    cell_size_deg: f64,
    lon_steps: usize,
    lat_steps: usize,
    min_lon: f64,
    min_lat: f64,
    cells: HashMap<(i32, i32), u32>,
}

impl CoverageGrid {
    /// Lay a cell lattice over the region's bounding box.
    ///
    /// Cell sizing is latitude-naive on both axes, so cells are approximately,
    /// not exactly, square. (The zigzag synthesizer's step conversion IS
    /// latitude-corrected; the two formulas are deliberately different.)
    /// Only cells whose center lies inside the boundary are populated.
    pub fn build(boundary: &BoundaryService, cell_size_km: f64) -> Self {
        let bbox = boundary.bounding_box();
        let cell_size_deg = cell_size_km / KM_PER_DEGREE;
        let lon_steps = ((bbox.max().x - bbox.min().x) / cell_size_deg) as usize;
        let lat_steps = ((bbox.max().y - bbox.min().y) / cell_size_deg) as usize;

        let mut grid = Self {
            cell_size_deg,
            lon_steps,
            lat_steps,
            min_lon: bbox.min().x,
            min_lat: bbox.min().y,
            cells: HashMap::new(),
        };

        for x in 0..grid.lon_steps as i32 {
            for y in 0..grid.lat_steps as i32 {
                let center = grid.cell_center((x, y));
                if boundary.contains(&center) {
                    grid.cells.insert((x, y), 0);
                }
            }
        }

        tracing::debug!(
            lon_steps = grid.lon_steps,
            lat_steps = grid.lat_steps,
            populated = grid.cells.len(),
            "Coverage grid built"
        );
        grid
    }

    /// Accumulate visit counts from historical walks.
    ///
    /// Every path coordinate inside the boundary increments its owning cell;
    /// coordinates outside the boundary are skipped silently. Ingestion is
    /// order-independent: only the final counts matter.
    pub fn ingest(&mut self, boundary: &BoundaryService, walks: &[Walk]) {
        for walk in walks {
            for point in &walk.path {
                if !boundary.contains(point) {
                    continue;
                }
                let x = ((point.lon() - self.min_lon) / self.cell_size_deg).floor() as i32;
                let y = ((point.lat() - self.min_lat) / self.cell_size_deg).floor() as i32;
                *self.cells.entry((x, y)).or_insert(0) += 1;
            }
        }
    }

    /// Center of a cell in [lon, lat].
    pub fn cell_center(&self, (x, y): (i32, i32)) -> GeoPoint {
        GeoPoint::new(
            self.min_lon + (x as f64 + 0.5) * self.cell_size_deg,
            self.min_lat + (y as f64 + 0.5) * self.cell_size_deg,
        )
    }

    /// Visit count for a cell, if it is populated.
    pub fn visit_count(&self, cell: (i32, i32)) -> Option<u32> {
        self.cells.get(&cell).copied()
    }

    /// Number of populated cells.
    pub fn populated_cells(&self) -> usize {
        self.cells.len()
    }
}

/// Pick `top_n` under-visited cell centers, padding with random points when
/// the grid cannot supply enough.
///
/// Cells are shuffled before a **stable** sort by visit count, so cells
/// sharing the minimum count come back in randomized order rather than
/// grid-scan order. Fallback points are rejection-sampled uniformly from the
/// bounding box until they land inside the boundary, bounded by an attempt
/// guard so a degenerate boundary cannot hang the request.
pub fn select_least_visited<R: Rng + ?Sized>(
    grid: &CoverageGrid,
    boundary: &BoundaryService,
    top_n: usize,
    rng: &mut R,
) -> Result<Vec<GeoPoint>, CoverageError> {
    let mut ranked: Vec<((i32, i32), u32)> = grid.cells.iter().map(|(&c, &n)| (c, n)).collect();
    ranked.shuffle(rng);
    ranked.sort_by_key(|&(_, count)| count);

    let mut selected = Vec::with_capacity(top_n);
    for (cell, _) in ranked {
        let center = grid.cell_center(cell);
        // Re-check containment: edge cells can own ingested points without
        // their center being inside the region.
        if boundary.contains(&center) {
            selected.push(center);
            if selected.len() == top_n {
                return Ok(selected);
            }
        }
    }

    // Sparse or empty grid: fall back to uniform sampling inside the region.
    let bbox = boundary.bounding_box();
    let mut attempts = 0u32;
    while selected.len() < top_n {
        attempts += 1;
        if attempts > MAX_SAMPLING_ATTEMPTS {
            return Err(CoverageError::DegenerateBoundary);
        }
        let candidate = GeoPoint::new(
            rng.gen_range(bbox.min().x..=bbox.max().x),
            rng.gen_range(bbox.min().y..=bbox.max().y),
        );
        if boundary.contains(&candidate) {
            selected.push(candidate);
        }
    }

    Ok(selected)
}

/// Errors from cell selection.
#[derive(Debug, thiserror::Error)]
pub enum CoverageError {
    #[error("Boundary rejected every random sample; region looks degenerate")]
    DegenerateBoundary,
}
