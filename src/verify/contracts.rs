// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for the discriminator.
//!
//! Debug-mode assertions that restate the invariants the builder and the gate
//! are supposed to establish. They:
//!
//! 1. Are **zero-cost in release builds** (`debug_assert!`)
//! 2. Catch a broken builder or gate the first time a test exercises it
//! 3. Never branch on buffer contents, only on offsets, lengths and masks
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract Function            | Property                                     |
//! |------------------------------|----------------------------------------------|
//! | `check_rows_sorted`          | offsets strictly ascending                   |
//! | `check_masks_within_lanes`   | derived masks only use valid candidate bits  |
//! | `check_gate_in_bounds`       | gated read offset `< length`                 |
//! | `check_result_within_lanes`  | result only uses valid candidate bits        |

use crate::types::{CandidateMask, Row};
use crate::util::simd::LANES;

// ============================================================================
// COMPILE-TIME ASSERTIONS
// ============================================================================

const _: () = {
    // INVARIANT: one lane per candidate bit, and lanes fill one SSE/NEON register
    assert!(LANES == 16);
    assert!(core::mem::size_of::<crate::util::simd::Lanes>() == 16);
    assert!(core::mem::align_of::<crate::util::simd::Lanes>() == 16);
};

// ============================================================================
// BUILD CONTRACTS
// ============================================================================

/// Check that row offsets are strictly ascending.
///
/// # Panics (debug builds only)
/// Panics on the first adjacent pair out of order.
#[inline]
pub fn check_rows_sorted(rows: &[Row]) {
    for j in 1..rows.len() {
        debug_assert!(
            rows[j - 1].offset() < rows[j].offset(),
            "Contract violation: rows sorted - rows[{}].offset {} >= rows[{}].offset {}",
            j - 1,
            rows[j - 1].offset(),
            j,
            rows[j].offset()
        );
    }
}

/// Check that derived masks never set bits beyond the candidate lanes.
#[inline]
pub fn check_masks_within_lanes(rows: &[Row], lane_mask: CandidateMask) {
    for (j, row) in rows.iter().enumerate() {
        debug_assert_eq!(
            row.length_mask() & !lane_mask,
            0,
            "Contract violation: rows[{}].length_mask {:#06x} outside lanes {:#06x}",
            j,
            row.length_mask(),
            lane_mask
        );
        debug_assert_eq!(
            row.exclusion_mask() & !lane_mask,
            0,
            "Contract violation: rows[{}].exclusion_mask {:#06x} outside lanes {:#06x}",
            j,
            row.exclusion_mask(),
            lane_mask
        );
    }
}

// ============================================================================
// EVALUATION CONTRACTS
// ============================================================================

/// Check that the gate produced an offset inside the buffer.
///
/// # Panics (debug builds only)
/// Panics if `offset >= length`.
#[inline(always)]
pub fn check_gate_in_bounds(offset: usize, length: usize) {
    debug_assert!(
        offset < length,
        "Contract violation: gated offset {} >= length {}",
        offset,
        length
    );
}

/// Check that an evaluation result only names valid candidates.
#[inline(always)]
pub fn check_result_within_lanes(result: CandidateMask, lane_mask: CandidateMask) {
    debug_assert_eq!(
        result & !lane_mask,
        0,
        "Contract violation: result {:#06x} outside lanes {:#06x}",
        result,
        lane_mask
    );
}
