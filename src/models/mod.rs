// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod point;
pub mod route;
pub mod walk;

pub use point::GeoPoint;
pub use route::ResolvedRoute;
pub use walk::{NewWalk, Walk};
