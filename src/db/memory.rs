// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! In-memory Walk Store.
//!
//! The rest of the system talks to the Walk Store through this async
//! `get_*`/`add_*` surface; the backing map is process-local. The core never
//! mutates stored walks — records are written once at import or manual entry
//! and read as a snapshot during recommendation.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::{NewWalk, Walk};

/// Process-local walk storage.
#[derive(Clone, Default)]
pub struct WalkStore {
    inner: Arc<RwLock<StoreInner>>,
}

#[derive(Default)]
struct StoreInner {
    next_id: u64,
    walks: BTreeMap<u64, Walk>,
}

impl WalkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All walks, most recent first.
    pub async fn get_walks(&self) -> Vec<Walk> {
        let inner = self.inner.read().await;
        let mut walks: Vec<Walk> = inner.walks.values().cloned().collect();
        walks.sort_by(|a, b| b.date.cmp(&a.date));
        walks
    }

    /// Look up a single walk by ID.
    pub async fn get_walk(&self, id: u64) -> Option<Walk> {
        self.inner.read().await.walks.get(&id).cloned()
    }

    /// Store a new walk, returning its assigned ID.
    pub async fn add_walk(&self, new_walk: NewWalk) -> u64 {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let id = inner.next_id;
        inner.walks.insert(
            id,
            Walk {
                id,
                name: new_walk.name,
                date: new_walk.date,
                description: new_walk.description,
                path: new_walk.path,
                distance_km: new_walk.distance_km,
                co2_saved_kg: new_walk.co2_saved_kg,
            },
        );
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoPoint;
    use chrono::{TimeZone, Utc};

    fn new_walk(name: &str, day: u32) -> NewWalk {
        NewWalk {
            name: name.to_string(),
            date: Utc.with_ymd_and_hms(2025, 6, day, 12, 0, 0).unwrap(),
            description: String::new(),
            path: vec![GeoPoint::new(37.6, 55.7), GeoPoint::new(37.61, 55.71)],
            distance_km: 1.0,
            co2_saved_kg: 0.15,
        }
    }

    #[tokio::test]
    async fn test_add_assigns_sequential_ids() {
        let store = WalkStore::new();
        let first = store.add_walk(new_walk("a", 1)).await;
        let second = store.add_walk(new_walk("b", 2)).await;
        assert_ne!(first, second);
        assert!(store.get_walk(first).await.is_some());
    }

    #[tokio::test]
    async fn test_walks_come_back_most_recent_first() {
        let store = WalkStore::new();
        store.add_walk(new_walk("older", 1)).await;
        store.add_walk(new_walk("newer", 20)).await;

        let walks = store.get_walks().await;
        assert_eq!(walks.len(), 2);
        assert_eq!(walks[0].name, "newer");
        assert_eq!(walks[1].name, "older");
    }

    #[tokio::test]
    async fn test_missing_walk_is_none() {
        let store = WalkStore::new();
        assert!(store.get_walk(99).await.is_none());
    }
}
