// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The matching engine: one pass over the rows, one byte read per row.
//!
//! ```text
//! still_valid = ONES
//! for row in rows:                      // always all J rows
//!     byte = buffer[gated offset]       // one read
//!     eq   = splat(byte) == row.bytes   // N lanes at once
//!     still_valid &= eq | row.ignores
//! result = bitmask(still_valid) & lane_mask & !excluded
//! ```
//!
//! There is no early exit when `still_valid` goes to zero, and nothing in the
//! loop body depends on the byte values. The work done is a function of J
//! alone, so timing does not reveal which candidate (if any) matched.
//!
//! # Entry points
//!
//! - `evaluate`: the buffer covers every row offset. A shorter buffer is a
//!   caller bug and panics on the slice index.
//! - `evaluate_len`: the buffer may be short. Rows past `length` read a
//!   placeholder at position 0 and the candidates that needed them are
//!   excluded from the result.

use crate::gate::gate;
use crate::types::{CandidateMask, ConstraintSet, ConstraintTable, DynConstraintSet};
use crate::util::simd::Lanes;
use crate::verify::contracts::{check_gate_in_bounds, check_result_within_lanes};

/// Evaluate a buffer that covers every row offset of `table`.
///
/// Returns the candidates consistent with every row. An empty buffer is 0.
///
/// # Panics
/// If the buffer is non-empty but shorter than `table.max_offset() + 1`.
#[inline]
pub fn evaluate<T: ConstraintTable + ?Sized>(buffer: &[u8], table: &T) -> CandidateMask {
    if buffer.is_empty() {
        return 0;
    }

    let mut still_valid = Lanes::ONES;
    for row in table.rows() {
        let eq = Lanes::splat(buffer[row.offset]).simd_eq(row.bytes);
        still_valid = still_valid & (eq | row.ignores);
    }

    let result = still_valid.to_bitmask() & table.lane_mask();
    check_result_within_lanes(result, table.lane_mask());
    result
}

/// Evaluate the first `length` bytes of `buffer`.
///
/// Never reads past `min(length, buffer.len())`. Candidates that care about a
/// row beyond that point are excluded from the result, so a short buffer can
/// only narrow the answer, never widen it.
#[inline]
pub fn evaluate_len<T: ConstraintTable + ?Sized>(
    buffer: &[u8],
    length: usize,
    table: &T,
) -> CandidateMask {
    let length = length.min(buffer.len());
    if length == 0 {
        return 0;
    }
    let buffer = &buffer[..length];

    let mut still_valid = Lanes::ONES;
    let mut excluded: CandidateMask = 0;
    for row in table.rows() {
        let gated = gate(length, row.offset, row.exclusion_mask);
        check_gate_in_bounds(gated.offset, length);
        excluded |= gated.exclusion;

        let eq = Lanes::splat(buffer[gated.offset]).simd_eq(row.bytes);
        still_valid = still_valid & (eq | row.ignores);
    }

    let result = still_valid.to_bitmask() & table.lane_mask() & !excluded;
    check_result_within_lanes(result, table.lane_mask());
    result
}

/// The candidate id if exactly one bit is set.
#[inline]
pub fn single_candidate(mask: CandidateMask) -> Option<usize> {
    (mask.count_ones() == 1).then(|| mask.trailing_zeros() as usize)
}

/// Candidate ids set in `mask`, lowest first.
pub fn candidates(mask: CandidateMask) -> impl Iterator<Item = usize> {
    (0..CandidateMask::BITS as usize).filter(move |&i| mask & (1 << i) != 0)
}

impl<const J: usize, const N: usize> ConstraintSet<J, N> {
    /// See [`evaluate`].
    #[inline]
    pub fn evaluate(&self, buffer: &[u8]) -> CandidateMask {
        evaluate(buffer, self)
    }

    /// See [`evaluate_len`].
    #[inline]
    pub fn evaluate_len(&self, buffer: &[u8], length: usize) -> CandidateMask {
        evaluate_len(buffer, length, self)
    }
}

impl DynConstraintSet {
    /// See [`evaluate`].
    #[inline]
    pub fn evaluate(&self, buffer: &[u8]) -> CandidateMask {
        evaluate(buffer, self)
    }

    /// See [`evaluate_len`].
    #[inline]
    pub fn evaluate_len(&self, buffer: &[u8], length: usize) -> CandidateMask {
        evaluate_len(buffer, length, self)
    }
}
