// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Walk record model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::GeoPoint;

/// Stored walk record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Walk {
    /// Store-assigned walk ID
    pub id: u64,
    /// Walk name/title
    pub name: String,
    /// Walk start date/time (UTC)
    pub date: DateTime<Utc>,
    /// Free-form description
    pub description: String,
    /// Walked path as [lon, lat] pairs (GeoJSON coordinate order)
    pub path: Vec<GeoPoint>,
    /// Total walked distance in kilometers
    pub distance_km: f64,
    /// Estimated CO2 saved versus driving, in kilograms
    pub co2_saved_kg: f64,
}

/// A walk record before the store has assigned it an ID.
#[derive(Debug, Clone)]
pub struct NewWalk {
    pub name: String,
    pub date: DateTime<Utc>,
    pub description: String,
    pub path: Vec<GeoPoint>,
    pub distance_km: f64,
    pub co2_saved_kg: f64,
}
