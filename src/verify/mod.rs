// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The verification layer: construction errors and runtime contracts.
//!
//! Two complementary approaches to catching bugs:
//!
//! 1. **Construction errors** (`ConstraintError`). A `ConstraintSet` only exists
//!    if every invariant held when it was built, so the engine never re-checks.
//!
//! 2. **Runtime contracts** that panic in debug builds when the builder or the
//!    gate breaks its own promises. Zero-cost in release.

mod types;
pub mod contracts;

pub use types::*;
