// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod boundary;
pub mod coverage;
pub mod import;
pub mod ors;
pub mod recommend;
pub mod zigzag;

pub use boundary::BoundaryService;
pub use coverage::CoverageGrid;
pub use ors::{OrsClient, RoutingApi};
pub use recommend::{RecommendParams, RouteRecommender};
