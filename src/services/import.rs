// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Location-history import: segmentation of raw samples into walk tracks.
//!
//! Two export shapes are handled:
//! - semantic-segment exports, where spans are already labelled with an
//!   activity kind and the positions arrive as separate sample batches;
//! - raw-ping exports, a flat time-ordered list of E7-scaled coordinates.
//!
//! Import is best-effort: any sample or interval that fails to parse is
//! dropped and the rest of the batch continues.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use crate::db::WalkStore;
use crate::geo_utils;
use crate::models::{GeoPoint, NewWalk};
use crate::time_utils::parse_timestamp;

/// Activity label marking a walking interval.
const WALKING_KIND: &str = "WALKING";

/// Largest gap between consecutive raw pings within one track, in minutes.
const MAX_PING_GAP_MINUTES: i64 = 5;

/// Minimum points for a track to count as a walk.
const MIN_TRACK_POINTS: usize = 2;

// ─── Payload shapes ──────────────────────────────────────────

/// A raw location-history payload, either export shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum HistoryPayload {
    Semantic(SemanticHistory),
    RawPings(RawPingHistory),
}

/// Semantic-segment export: labelled activity intervals plus batches of raw
/// position samples.
#[derive(Debug, Deserialize)]
pub struct SemanticHistory {
    pub segments: Vec<ActivitySegment>,
    #[serde(default)]
    pub samples: Vec<Vec<RawSample>>,
}

/// A labelled activity interval.
#[derive(Debug, Deserialize)]
pub struct ActivitySegment {
    pub kind: String,
    pub start: String,
    pub end: String,
}

/// One raw position sample. Fields are optional so a malformed record can be
/// skipped instead of failing the whole payload.
#[derive(Debug, Deserialize)]
pub struct RawSample {
    /// Longitude in degrees (GeoJSON axis order: lon before lat)
    pub lon: Option<f64>,
    /// Latitude in degrees
    pub lat: Option<f64>,
    /// ISO-8601-like timestamp
    pub time: Option<String>,
}

/// Raw-ping export (legacy location-history records).
#[derive(Debug, Deserialize)]
pub struct RawPingHistory {
    pub locations: Vec<RawPing>,
}

/// One legacy location record with E7-scaled coordinates.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPing {
    /// Unix epoch milliseconds, as the export's decimal string
    pub timestamp_ms: Option<String>,
    pub latitude_e7: Option<i64>,
    pub longitude_e7: Option<i64>,
}

// ─── Segmentation ────────────────────────────────────────────

/// A timestamped sample ready for interval assignment. Never persisted.
#[derive(Debug, Clone, Copy)]
struct TimedPoint {
    coords: GeoPoint,
    time: DateTime<Utc>,
}

/// One reconstructed walk track.
#[derive(Debug, Clone)]
pub struct SegmentedTrack {
    /// Path in [lon, lat] order, time-ascending
    pub points: Vec<GeoPoint>,
    /// Track start time
    pub start: DateTime<Utc>,
    /// Track end time (known only for semantic-segment imports)
    pub end: Option<DateTime<Utc>>,
}

/// Segment a payload into walk tracks.
pub fn segment(payload: HistoryPayload) -> Vec<SegmentedTrack> {
    match payload {
        HistoryPayload::Semantic(history) => segment_semantic(history),
        HistoryPayload::RawPings(history) => segment_raw_pings(history),
    }
}

/// Semantic mode: flatten all sample batches, sort by time, then collect the
/// samples falling inside each WALKING interval (inclusive on both ends;
/// overlapping intervals simply share points).
fn segment_semantic(history: SemanticHistory) -> Vec<SegmentedTrack> {
    let mut samples: Vec<TimedPoint> = history
        .samples
        .iter()
        .flatten()
        .filter_map(timed_point)
        .collect();
    samples.sort_by_key(|s| s.time);

    let mut tracks = Vec::new();
    for interval in &history.segments {
        if interval.kind != WALKING_KIND {
            continue;
        }
        let (start, end) = match (
            parse_timestamp(&interval.start),
            parse_timestamp(&interval.end),
        ) {
            (Ok(start), Ok(end)) => (start, end),
            _ => {
                tracing::debug!(kind = %interval.kind, "Skipping interval with unparsable bounds");
                continue;
            }
        };

        let points: Vec<GeoPoint> = samples
            .iter()
            .filter(|s| s.time >= start && s.time <= end)
            .map(|s| s.coords)
            .collect();

        if points.len() >= MIN_TRACK_POINTS {
            tracks.push(SegmentedTrack {
                points,
                start,
                end: Some(end),
            });
        }
    }
    tracks
}

/// Raw-ping mode: the samples are already time-ordered; a gap of more than
/// five minutes between consecutive pings starts a new track.
fn segment_raw_pings(history: RawPingHistory) -> Vec<SegmentedTrack> {
    let max_gap = Duration::minutes(MAX_PING_GAP_MINUTES);
    let mut tracks = Vec::new();
    let mut current: Vec<TimedPoint> = Vec::new();

    for ping in &history.locations {
        let point = match ping_point(ping) {
            Some(point) => point,
            None => continue,
        };
        if let Some(prev) = current.last() {
            if point.time - prev.time > max_gap {
                flush_track(&mut current, &mut tracks);
            }
        }
        current.push(point);
    }
    flush_track(&mut current, &mut tracks);

    tracks
}

fn flush_track(current: &mut Vec<TimedPoint>, tracks: &mut Vec<SegmentedTrack>) {
    if current.len() >= MIN_TRACK_POINTS {
        tracks.push(SegmentedTrack {
            start: current[0].time,
            end: None,
            points: current.iter().map(|p| p.coords).collect(),
        });
    }
    current.clear();
}

fn timed_point(sample: &RawSample) -> Option<TimedPoint> {
    let lon = sample.lon?;
    let lat = sample.lat?;
    let time = parse_timestamp(sample.time.as_deref()?).ok()?;
    Some(TimedPoint {
        coords: GeoPoint::new(lon, lat),
        time,
    })
}

fn ping_point(ping: &RawPing) -> Option<TimedPoint> {
    let millis: i64 = ping.timestamp_ms.as_deref()?.parse().ok()?;
    let time = DateTime::from_timestamp_millis(millis)?;
    Some(TimedPoint {
        coords: GeoPoint::new(
            ping.longitude_e7? as f64 / 1e7,
            ping.latitude_e7? as f64 / 1e7,
        ),
        time,
    })
}

// ─── Persistence ─────────────────────────────────────────────

/// Segment a payload and persist every resulting track as a walk.
///
/// Returns the number of walks stored.
pub async fn import_history(store: &WalkStore, payload: HistoryPayload) -> usize {
    let tracks = segment(payload);
    let count = tracks.len();

    for track in tracks {
        let distance_km = geo_utils::path_length_km(&track.points);
        let walk = NewWalk {
            name: format!("Imported walk {}", track.start.format("%d.%m.%Y %H:%M")),
            date: track.start,
            description: "Imported from location history".to_string(),
            path: track.points,
            distance_km,
            co2_saved_kg: geo_utils::co2_saved_kg(distance_km),
        };
        store.add_walk(walk).await;
    }

    tracing::info!(count, "Imported walks from location history");
    count
}
