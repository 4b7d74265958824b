// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Sixteen-lane byte vectors for the per-row candidate compare.
//!
//! Every row of a constraint set is one `Lanes` of expected bytes and one
//! `Lanes` of ignore flags. Evaluating the row is a splat, a lane-wise equality,
//! an OR with the ignores and an AND into the accumulator. No step looks at the
//! lane values to decide what to do next.
//!
//! # Backends
//!
//! - **Default**: an unrolled scalar loop over all 16 lanes. Equality is
//!   computed arithmetically (`x | -x` sign trick), so there is no per-lane
//!   compare-and-jump even before the optimiser vectorises it.
//! - **`portable-simd`** (nightly): `std::simd::u8x16`, which lowers to a
//!   single `pcmpeqb`/`vceqq_u8`/`i8x16.eq` on every target that has one.
//!
//! Lanes past the candidate count carry zero bytes and zero ignores. Their
//! result bits are masked off by the engine, never trusted.

use std::ops::{BitAnd, BitOr};

#[cfg(feature = "portable-simd")]
use std::simd::{cmp::SimdPartialEq, u8x16};

/// Number of candidate lanes processed per row.
pub const LANES: usize = 16;

/// A 16-byte aligned vector of per-candidate lanes.
///
/// Comparison results use `0xFF` for true and `0x00` for false, matching the
/// layout of SSE2 and NEON compare results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(C, align(16))]
pub struct Lanes(pub [u8; LANES]);

impl Lanes {
    /// All lanes false.
    pub const ZERO: Self = Self([0x00; LANES]);
    /// All lanes true.
    pub const ONES: Self = Self([0xFF; LANES]);

    /// Broadcast one byte into every lane.
    #[inline(always)]
    pub fn splat(byte: u8) -> Self {
        Self([byte; LANES])
    }

    /// Lane-wise equality: `0xFF` where the bytes match, `0x00` elsewhere.
    #[cfg(not(feature = "portable-simd"))]
    #[inline(always)]
    pub fn simd_eq(self, other: Self) -> Self {
        let mut out = [0u8; LANES];
        for i in 0..LANES {
            let diff = self.0[i] ^ other.0[i];
            // High bit of (diff | -diff) is set iff diff != 0.
            let nonzero = (diff | diff.wrapping_neg()) >> 7;
            out[i] = (nonzero ^ 1).wrapping_neg();
        }
        Self(out)
    }

    /// Lane-wise equality: `0xFF` where the bytes match, `0x00` elsewhere.
    #[cfg(feature = "portable-simd")]
    #[inline(always)]
    pub fn simd_eq(self, other: Self) -> Self {
        let eq = u8x16::from_array(self.0).simd_eq(u8x16::from_array(other.0));
        Self(
            eq.select(u8x16::splat(0xFF), u8x16::splat(0x00))
                .to_array(),
        )
    }

    /// Collect the high bit of every lane into a 16-bit mask (lane `i` -> bit `i`).
    ///
    /// Scalar equivalent of `_mm_movemask_epi8`.
    #[inline(always)]
    pub fn to_bitmask(self) -> u16 {
        let mut bits = 0u16;
        for i in 0..LANES {
            bits |= u16::from(self.0[i] >> 7) << i;
        }
        bits
    }
}

impl BitAnd for Lanes {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        let mut out = [0u8; LANES];
        for i in 0..LANES {
            out[i] = self.0[i] & rhs.0[i];
        }
        Self(out)
    }
}

impl BitOr for Lanes {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        let mut out = [0u8; LANES];
        for i in 0..LANES {
            out[i] = self.0[i] | rhs.0[i];
        }
        Self(out)
    }
}

// ============================================================================
// Tests
// ============================================================================
