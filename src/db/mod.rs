// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Walk Store layer.

pub mod memory;

pub use memory::WalkStore;
