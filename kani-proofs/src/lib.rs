// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Kani model checking proofs for the lanegate length gate and lane compare.
//!
//! This standalone crate extracts the branchless selection arithmetic and
//! proves it over every input, not a sample of them.
//!
//! Run with: `cargo kani`
//!
//! ## Verified Properties
//!
//! 1. **Gate safety**: the gated offset is `< length` whenever `length > 0`
//! 2. **Gate selection**: in range keeps the offset and clears the exclusion,
//!    out of range substitutes 0 and passes the exclusion through
//! 3. **Lane equality**: the arithmetic compare is exactly `a == b`
//! 4. **Truncated evaluation**: a two-row table never reads past `length`
//!    and never reports a candidate that needed a missing byte

// ============================================================================
// GATE (mirrors src/gate.rs, without black_box)
// ============================================================================

/// All ones if `a < b`, all zeros otherwise.
pub fn lt_mask(a: usize, b: usize) -> usize {
    let (_, borrow) = a.overflowing_sub(b);
    0usize.wrapping_sub(usize::from(borrow))
}

pub fn select_usize(mask: usize, a: usize, b: usize) -> usize {
    (a & mask) | (b & !mask)
}

pub fn select_u16(mask: usize, a: u16, b: u16) -> u16 {
    let mask = mask as u16;
    (a & mask) | (b & !mask)
}

/// Returns (safe offset, exclusion contribution).
pub fn gate(length: usize, offset: usize, exclusion: u16) -> (usize, u16) {
    let in_range = lt_mask(offset, length);
    (
        select_usize(in_range, offset, 0),
        select_u16(in_range, 0, exclusion),
    )
}

// ============================================================================
// LANE COMPARE (mirrors src/util/simd.rs, one lane)
// ============================================================================

/// `0xFF` if equal, `0x00` otherwise.
pub fn lane_eq(a: u8, b: u8) -> u8 {
    let diff = a ^ b;
    let nonzero = (diff | diff.wrapping_neg()) >> 7;
    (nonzero ^ 1).wrapping_neg()
}

// ============================================================================
// TWO-ROW MODEL
// ============================================================================

/// One row over two candidates: expected bytes and care flags.
#[derive(Debug, Clone, Copy)]
pub struct ModelRow {
    pub offset: usize,
    pub bytes: [u8; 2],
    pub care: [bool; 2],
}

/// Gated evaluation of two candidates, the way the engine folds rows.
pub fn evaluate_len(buffer: &[u8], length: usize, rows: &[ModelRow]) -> u16 {
    let length = length.min(buffer.len());
    if length == 0 {
        return 0;
    }
    let mut still_valid = [0xFFu8; 2];
    let mut excluded = 0u16;
    for row in rows {
        let exclusion = u16::from(row.care[0]) | (u16::from(row.care[1]) << 1);
        let (offset, mask) = gate(length, row.offset, exclusion);
        excluded |= mask;
        let byte = buffer[offset];
        for lane in 0..2 {
            let ignore = if row.care[lane] { 0x00 } else { 0xFF };
            still_valid[lane] &= lane_eq(byte, row.bytes[lane]) | ignore;
        }
    }
    let bits = u16::from(still_valid[0] >> 7) | (u16::from(still_valid[1] >> 7) << 1);
    bits & 0b11 & !excluded
}

// ============================================================================
// KANI MODEL CHECKING PROOFS
// ============================================================================

#[cfg(kani)]
mod kani_proofs {
    use super::*;

    /// The gated offset is always inside a non-empty buffer.
    #[kani::proof]
    fn verify_gate_offset_in_bounds() {
        let length: usize = kani::any();
        let offset: usize = kani::any();
        let exclusion: u16 = kani::any();
        kani::assume(length > 0);

        let (safe, _) = gate(length, offset, exclusion);
        kani::assert(safe < length, "gated offset must be < length");
    }

    /// In range: offset kept, no exclusion. Out of range: placeholder 0, full exclusion.
    #[kani::proof]
    fn verify_gate_selection() {
        let length: usize = kani::any();
        let offset: usize = kani::any();
        let exclusion: u16 = kani::any();

        let (safe, mask) = gate(length, offset, exclusion);
        if offset < length {
            kani::assert(safe == offset, "in-range offset must be kept");
            kani::assert(mask == 0, "in-range row must not exclude");
        } else {
            kani::assert(safe == 0, "out-of-range offset must be 0");
            kani::assert(mask == exclusion, "out-of-range row must exclude");
        }
    }

    /// lt_mask is all ones or all zeros and agrees with `<`.
    #[kani::proof]
    fn verify_lt_mask() {
        let a: usize = kani::any();
        let b: usize = kani::any();
        let mask = lt_mask(a, b);
        kani::assert(mask == 0 || mask == usize::MAX, "mask must be saturated");
        kani::assert((mask == usize::MAX) == (a < b), "mask must match a < b");
    }

    /// The arithmetic lane compare is exact for every byte pair.
    #[kani::proof]
    fn verify_lane_eq() {
        let a: u8 = kani::any();
        let b: u8 = kani::any();
        let expected = if a == b { 0xFF } else { 0x00 };
        kani::assert(lane_eq(a, b) == expected, "lane_eq must equal a == b");
    }

    /// Truncated evaluation never indexes past `length` (the slice would
    /// panic) and never reports a candidate whose cared row is missing.
    #[kani::proof]
    #[kani::unwind(5)]
    fn verify_truncated_evaluation() {
        let buffer: [u8; 4] = kani::any();
        let length: usize = kani::any_where(|&n| n <= 4);
        let rows = [
            ModelRow {
                offset: 1,
                bytes: kani::any(),
                care: [true, true],
            },
            ModelRow {
                offset: 3,
                bytes: kani::any(),
                care: [true, false],
            },
        ];

        let result = evaluate_len(&buffer[..length], length, &rows);
        kani::assert(result & !0b11 == 0, "result must stay within two lanes");
        if length <= 3 {
            kani::assert(result & 0b01 == 0, "candidate 0 needs offset 3");
        }
        if length <= 1 {
            kani::assert(result == 0, "every candidate needs offset 1");
        }
    }
}

// ============================================================================
// REGULAR TESTS (for sanity checking without Kani)
// ============================================================================
