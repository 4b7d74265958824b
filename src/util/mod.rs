// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Low-level helpers shared by the engine.
//!
//! Right now that is just the lane vector. Anything in here must stay free of
//! data-dependent branches: the engine's timing guarantee depends on it.

pub mod simd;
