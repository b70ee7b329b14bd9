// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route recommendation flow tests against a stub routing planner.
//!
//! These exercise the retry-across-candidates behavior: a failed candidate
//! advances to the next one, and only full exhaustion surfaces as "no route".

use rand::rngs::StdRng;
use rand::SeedableRng;
use walklog::models::GeoPoint;
use walklog::services::{RecommendParams, RouteRecommender};

mod common;

fn params() -> RecommendParams {
    RecommendParams {
        duration_minutes: 30,
        max_turn_degrees: 60,
        segments: 10,
        start_point: None,
    }
}

#[tokio::test]
async fn test_explicit_start_point_resolves_in_one_attempt() {
    let planner = common::StubPlanner::succeeding();
    let recommender = RouteRecommender::new(common::load_test_boundary(), planner);
    let mut rng = StdRng::seed_from_u64(1);

    let request = RecommendParams {
        start_point: Some(GeoPoint::new(37.6, 55.75)),
        ..params()
    };
    let route = recommender
        .recommend(request, &[], &mut rng)
        .await
        .unwrap()
        .expect("route should resolve");

    // The stub echoes the waypoints back: segments + 1 points.
    assert_eq!(route.path.len(), 11);
    assert_eq!(route.path[0], GeoPoint::new(37.6, 55.75));
}

#[tokio::test]
async fn test_advances_past_failing_candidates() {
    let planner = common::StubPlanner::failing_first(2);
    let recommender = RouteRecommender::new(common::load_test_boundary(), planner);
    let mut rng = StdRng::seed_from_u64(2);

    let route = recommender.recommend(params(), &[], &mut rng).await.unwrap();

    assert!(route.is_some(), "third candidate should succeed");
}

#[tokio::test]
async fn test_exhausted_candidates_return_none() {
    let planner = common::StubPlanner::failing_first(usize::MAX);
    let recommender = RouteRecommender::new(common::load_test_boundary(), planner);
    let mut rng = StdRng::seed_from_u64(3);

    let route = recommender.recommend(params(), &[], &mut rng).await.unwrap();

    assert!(route.is_none(), "exhaustion is a recoverable None, not an error");
}

#[tokio::test]
async fn test_five_candidates_are_attempted() {
    let planner = common::StubPlanner::failing_first(usize::MAX);
    let recommender = RouteRecommender::new(common::load_test_boundary(), planner);
    let mut rng = StdRng::seed_from_u64(4);

    recommender.recommend(params(), &[], &mut rng).await.unwrap();

    // One resolution attempt per least-visited candidate.
    assert_eq!(recommender.planner().calls(), 5);
}

#[tokio::test]
async fn test_failed_start_point_falls_back_to_grid() {
    let planner = common::StubPlanner::failing_first(1);
    let recommender = RouteRecommender::new(common::load_test_boundary(), planner);
    let mut rng = StdRng::seed_from_u64(5);

    let request = RecommendParams {
        start_point: Some(GeoPoint::new(37.6, 55.75)),
        ..params()
    };
    let route = recommender
        .recommend(request, &[], &mut rng)
        .await
        .unwrap();

    assert!(route.is_some(), "grid candidates should back up a failed start");
    assert_eq!(
        recommender.planner().calls(),
        2,
        "start attempt plus one grid candidate"
    );
}

#[tokio::test]
async fn test_invalid_params_rejected_before_any_attempt() {
    let planner = common::StubPlanner::succeeding();
    let recommender = RouteRecommender::new(common::load_test_boundary(), planner);
    let mut rng = StdRng::seed_from_u64(6);

    let request = RecommendParams {
        duration_minutes: 0,
        ..params()
    };
    let result = recommender.recommend(request, &[], &mut rng).await;

    assert!(result.is_err());
    assert_eq!(recommender.planner().calls(), 0);
}
