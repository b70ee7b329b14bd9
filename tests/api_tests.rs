// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP surface tests: walk records and import endpoints.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;

mod common;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_add_then_fetch_walk() {
    let (app, state) = common::create_test_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/walks",
            r#"{
                "name": "Evening stroll",
                "description": "Around the block",
                "date": "2025-06-22 18:00",
                "coordinates": [[37.60, 55.70], [37.60, 55.709]]
            }"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let id = body_json(response).await["id"].as_u64().unwrap();

    let walk = state.store.get_walk(id).await.expect("walk stored");
    assert_eq!(walk.name, "Evening stroll");
    // ~1 km of latitude: distance and CO2 are derived on entry.
    assert!((walk.distance_km - 1.0).abs() < 0.01);
    assert!((walk.co2_saved_kg - 0.15).abs() < 0.01);

    let response = app
        .oneshot(
            Request::builder()
                .uri(&format!("/api/walks/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Evening stroll");
    assert_eq!(body["path"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_single_point_walk_has_zero_distance() {
    let (app, state) = common::create_test_app();

    let response = app
        .oneshot(post_json(
            "/api/walks",
            r#"{"name": "Checkpoint", "coordinates": [[37.60, 55.70]]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let id = body_json(response).await["id"].as_u64().unwrap();

    let walk = state.store.get_walk(id).await.unwrap();
    assert_eq!(walk.distance_km, 0.0);
    assert_eq!(walk.co2_saved_kg, 0.0);
}

#[tokio::test]
async fn test_add_walk_without_coordinates_rejected() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(post_json(
            "/api/walks",
            r#"{"name": "Nowhere", "coordinates": []}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "bad_request");
}

#[tokio::test]
async fn test_unknown_walk_is_404() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/walks/424242")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_walks_listing_is_date_descending() {
    let (app, _state) = common::create_test_app();

    for (name, date) in [
        ("first", "2025-06-01 10:00"),
        ("third", "2025-06-03 10:00"),
        ("second", "2025-06-02 10:00"),
    ] {
        let body = format!(
            r#"{{"name": "{}", "date": "{}", "coordinates": [[37.60, 55.70], [37.61, 55.71]]}}"#,
            name, date
        );
        let response = app
            .clone()
            .oneshot(post_json("/api/walks", &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(Request::builder().uri("/api/walks").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = body_json(response).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["third", "second", "first"]);
}

#[tokio::test]
async fn test_import_endpoint_reports_count() {
    let (app, state) = common::create_test_app();

    let response = app
        .oneshot(post_json(
            "/api/import",
            r#"{
                "locations": [
                    {"timestampMs": "1750000000000", "latitudeE7": 557000000, "longitudeE7": 376000000},
                    {"timestampMs": "1750000060000", "latitudeE7": 557010000, "longitudeE7": 376010000}
                ]
            }"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["imported"], 1);
    assert_eq!(state.store.get_walks().await.len(), 1);
}

#[tokio::test]
async fn test_recommend_with_invalid_params_is_400() {
    let (app, _state) = common::create_test_app();

    // Rejected before any routing attempt, so no network is touched.
    let response = app
        .oneshot(post_json(
            "/api/recommend",
            r#"{"duration_minutes": 0}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "bad_request");
}

#[tokio::test]
async fn test_recommend_rejects_overly_wide_turn() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(post_json(
            "/api/recommend",
            r#"{"duration_minutes": 30, "max_turn_degrees": 200}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
