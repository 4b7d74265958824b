// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Building and validating constraint sets.
//!
//! Validation runs once, exhaustively, over every row and every candidate pair.
//! J and N are small (N is at most 16), so the quadratic scans cost nothing
//! next to the guarantee they buy: a set that exists is a set the engine can
//! always use to separate its candidates.
//!
//! The compile-time shaped path is `const fn` throughout. Declaring a set in a
//! `const` or `static` item moves every check into the build:
//!
//! ```
//! use lanegate::{make_constraint, make_constraint_with_care, ConstraintSet};
//!
//! static HEADERS: ConstraintSet<2, 3> = ConstraintSet::validated([
//!     make_constraint(1, *b"ABC"),
//!     make_constraint_with_care(7, *b"BCA", [true, false, true]),
//! ]);
//!
//! assert_eq!(HEADERS.evaluate(b"_A_____B"), 0b001);
//! ```
//!
//! # Validation order
//!
//! 1. Row shape: care flags neither explicitly all-true nor all-false
//! 2. Offsets pairwise distinct
//! 3. Every candidate pair separated by some row
//! 4. Offsets strictly ascending

use crate::types::{
    lane_mask, CandidateMask, ConstraintSet, ConstraintSpec, DynConstraintSet, Row, RowSpec,
};
use crate::util::simd::LANES;
use crate::verify::contracts::{check_masks_within_lanes, check_rows_sorted};
use crate::verify::ConstraintError;

// ============================================================================
// SPEC CONSTRUCTORS
// ============================================================================

/// Row where every candidate cares about the byte at `offset`.
pub const fn make_constraint<const N: usize>(offset: usize, bytes: [u8; N]) -> ConstraintSpec<N> {
    ConstraintSpec {
        offset,
        bytes,
        care: None,
    }
}

/// Row with explicit care flags. `care[i] == false` means candidate `i` ignores this offset.
///
/// The flags are checked when the set is built: all-true is rejected (omit
/// the flags instead) and so is all-false.
pub const fn make_constraint_with_care<const N: usize>(
    offset: usize,
    bytes: [u8; N],
    care: [bool; N],
) -> ConstraintSpec<N> {
    ConstraintSpec {
        offset,
        bytes,
        care: Some(care),
    }
}

// ============================================================================
// ROW ENCODING
// ============================================================================

/// Pack one constraint row into lanes, rejecting degenerate care arrays.
const fn encode_row(
    index: usize,
    offset: usize,
    bytes: &[u8],
    care: Option<&[bool]>,
) -> Result<Row, ConstraintError> {
    let mut row = Row::EMPTY;
    row.offset = offset;

    let mut i = 0;
    while i < bytes.len() {
        row.bytes.0[i] = bytes[i];
        i += 1;
    }

    if let Some(care) = care {
        let mut all_care = true;
        let mut all_ignore = true;
        let mut i = 0;
        while i < care.len() {
            all_care &= care[i];
            all_ignore &= !care[i];
            row.ignores.0[i] = if care[i] { 0x00 } else { 0xFF };
            i += 1;
        }

        if all_care {
            return Err(ConstraintError::AllCare { row: index });
        }
        if all_ignore {
            return Err(ConstraintError::AllIgnore { row: index });
        }
    }

    Ok(row)
}

// ============================================================================
// SET VALIDATION
// ============================================================================

/// Check the cross-row invariants: distinct offsets, separable pairs, ascending order.
pub(crate) const fn validate_rows(rows: &[Row], candidates: usize) -> Result<(), ConstraintError> {
    if rows.is_empty() {
        return Err(ConstraintError::NoRows);
    }

    // INVARIANT: offsets are pairwise distinct
    let mut j = 0;
    while j < rows.len() {
        let mut jj = j + 1;
        while jj < rows.len() {
            if rows[j].offset == rows[jj].offset {
                return Err(ConstraintError::DuplicateOffset {
                    first: j,
                    second: jj,
                    offset: rows[j].offset,
                });
            }
            jj += 1;
        }
        j += 1;
    }

    // INVARIANT: every candidate pair is separated by a row both care about
    let mut i = 0;
    while i < candidates {
        let mut ii = i + 1;
        while ii < candidates {
            if distinguishing_row(rows, i, ii).is_none() {
                return Err(ConstraintError::AmbiguousPair {
                    first: i,
                    second: ii,
                });
            }
            ii += 1;
        }
        i += 1;
    }

    // INVARIANT: offsets are strictly ascending
    let mut j = 1;
    while j < rows.len() {
        if rows[j - 1].offset > rows[j].offset {
            return Err(ConstraintError::UnsortedOffsets {
                position: j - 1,
                offset: rows[j - 1].offset,
                next: rows[j].offset,
            });
        }
        j += 1;
    }

    Ok(())
}

/// First row where both candidates care and expect different bytes.
pub(crate) const fn distinguishing_row(rows: &[Row], first: usize, second: usize) -> Option<usize> {
    let mut j = 0;
    while j < rows.len() {
        let row = &rows[j];
        if row.cares(first) && row.cares(second) && row.expected(first) != row.expected(second) {
            return Some(j);
        }
        j += 1;
    }
    None
}

// ============================================================================
// DERIVED MASKS
// ============================================================================

/// Bit `i` set iff row ignores candidate `i`.
const fn ignore_bits(row: &Row, candidates: usize) -> CandidateMask {
    let mut bits: CandidateMask = 0;
    let mut i = 0;
    while i < candidates {
        if !row.cares(i) {
            bits |= 1 << i;
        }
        i += 1;
    }
    bits
}

/// Union of this row's and the next row's ignore bits; the last row uses its own only.
pub(crate) const fn row_length_mask(rows: &[Row], j: usize, candidates: usize) -> CandidateMask {
    let own = ignore_bits(&rows[j], candidates);
    if j + 1 < rows.len() {
        own | ignore_bits(&rows[j + 1], candidates)
    } else {
        own
    }
}

/// Candidates that need this row's byte.
pub(crate) const fn row_exclusion_mask(row: &Row, candidates: usize) -> CandidateMask {
    !ignore_bits(row, candidates) & lane_mask(candidates)
}

// ============================================================================
// COMPILE-TIME SHAPED SETS
// ============================================================================

impl<const J: usize, const N: usize> ConstraintSet<J, N> {
    const SHAPE: () = {
        assert!(J > 0, "a constraint set needs at least one row");
        assert!(N > 0, "a constraint set needs at least one candidate");
        assert!(N <= LANES, "a constraint set holds at most 16 candidates");
    };

    /// Build and validate a set.
    ///
    /// Shape errors (J = 0, N = 0, N > 16) are compile errors. Everything
    /// else is reported as a `ConstraintError`.
    pub const fn new(specs: [ConstraintSpec<N>; J]) -> Result<Self, ConstraintError> {
        #[allow(clippy::let_unit_value)]
        let () = Self::SHAPE;

        let mut rows = [Row::EMPTY; J];
        let mut j = 0;
        while j < J {
            let spec = &specs[j];
            let care = match &spec.care {
                Some(care) => Some(care.as_slice()),
                None => None,
            };
            rows[j] = match encode_row(j, spec.offset, spec.bytes.as_slice(), care) {
                Ok(row) => row,
                Err(e) => return Err(e),
            };
            j += 1;
        }

        if let Err(e) = validate_rows(&rows, N) {
            return Err(e);
        }

        let mut j = 0;
        while j < J {
            rows[j].length_mask = row_length_mask(&rows, j, N);
            rows[j].exclusion_mask = row_exclusion_mask(&rows[j], N);
            j += 1;
        }

        Ok(Self { rows })
    }

    /// Build a set that is known to be valid, panicking otherwise.
    ///
    /// In a `const` or `static` initializer the panic becomes a compile error
    /// carrying `ConstraintError::reason`.
    pub const fn validated(specs: [ConstraintSpec<N>; J]) -> Self {
        match Self::new(specs) {
            Ok(set) => set,
            Err(e) => panic!("{}", e.reason()),
        }
    }
}

// ============================================================================
// RUN-TIME SHAPED SETS
// ============================================================================

impl DynConstraintSet {
    /// Build and validate a set whose shape comes from the specs themselves.
    ///
    /// The candidate count is the first row's width; every other row must match it.
    pub fn from_specs(specs: &[RowSpec]) -> Result<Self, ConstraintError> {
        let candidates = specs
            .first()
            .map(|spec| spec.bytes.len())
            .ok_or(ConstraintError::NoRows)?;
        if candidates == 0 {
            return Err(ConstraintError::NoCandidates);
        }
        if candidates > LANES {
            return Err(ConstraintError::TooManyCandidates { count: candidates });
        }

        let mut rows = Vec::with_capacity(specs.len());
        for (j, spec) in specs.iter().enumerate() {
            let care_width = spec.care.as_ref().map_or(candidates, Vec::len);
            if spec.bytes.len() != candidates || care_width != candidates {
                return Err(ConstraintError::RowWidthMismatch {
                    row: j,
                    expected: candidates,
                    found: if spec.bytes.len() != candidates {
                        spec.bytes.len()
                    } else {
                        care_width
                    },
                });
            }
            rows.push(encode_row(j, spec.offset, &spec.bytes, spec.care.as_deref())?);
        }

        validate_rows(&rows, candidates)?;

        for j in 0..rows.len() {
            rows[j].length_mask = row_length_mask(&rows, j, candidates);
            rows[j].exclusion_mask = row_exclusion_mask(&rows[j], candidates);
        }

        check_rows_sorted(&rows);
        check_masks_within_lanes(&rows, lane_mask(candidates));

        tracing::debug!(
            rows = rows.len(),
            candidates,
            max_offset = rows.last().map_or(0, Row::offset),
            "constraint set accepted"
        );

        Ok(Self {
            rows: rows.into_boxed_slice(),
            candidates,
            labels: None,
        })
    }
}
