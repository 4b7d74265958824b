// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Length-safety gate: branchless bounds handling for short buffers.
//!
//! For a row at offset `O` and a buffer of length `L`:
//!
//! | condition | read offset | exclusion        |
//! |-----------|-------------|------------------|
//! | `L > O`   | `O`         | `0`              |
//! | `L <= O`  | `0`         | row's exclusion  |
//!
//! Both columns come from the same all-ones/all-zeros mask, produced from the
//! borrow of `O - L`. Nothing here is an `if`: the placeholder read at
//! position 0 happens whether or not the row is in range, and the exclusion
//! bits are folded into the result by the engine.
//!
//! The selection mask passes through `black_box` so the optimiser cannot turn
//! the arithmetic back into a compare-and-jump. Whether the final code is
//! branch-free is still a per-target check (inspect the bench's assembly).

use crate::types::CandidateMask;
use std::hint::black_box;

/// Read position and exclusion contribution for one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateOutput {
    /// Offset safe to read: the row's own offset, or 0.
    pub offset: usize,
    /// Candidates to drop from the result because their byte is missing.
    pub exclusion: CandidateMask,
}

/// All ones if `a < b`, all zeros otherwise.
#[inline(always)]
pub fn lt_mask(a: usize, b: usize) -> usize {
    let (_, borrow) = a.overflowing_sub(b);
    0usize.wrapping_sub(black_box(usize::from(borrow)))
}

/// `a` where `mask` is all ones, `b` where it is all zeros.
#[inline(always)]
pub fn select_usize(mask: usize, a: usize, b: usize) -> usize {
    (a & mask) | (b & !mask)
}

/// `select_usize` for candidate masks; only the low 16 bits of `mask` are used.
#[inline(always)]
pub fn select_u16(mask: usize, a: u16, b: u16) -> u16 {
    let mask = mask as u16;
    (a & mask) | (b & !mask)
}

/// Gate one row.
///
/// # Contract
/// When `length > 0` the returned offset is `< length`. With `length == 0`
/// there is no safe byte at all, so the engine short-circuits before gating.
#[inline(always)]
pub fn gate(length: usize, offset: usize, exclusion: CandidateMask) -> GateOutput {
    let in_range = lt_mask(offset, length);
    GateOutput {
        offset: select_usize(in_range, offset, 0),
        exclusion: select_u16(in_range, 0, exclusion),
    }
}
