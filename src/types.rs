// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Core data types: constraint rows and the sets built from them.
//!
//! A spec row (`ConstraintSpec` / `RowSpec`) is what the caller writes.
//! A `Row` is the normalized, lane-packed form the engine reads: expected bytes
//! and ignore flags as 16-byte vectors plus the masks derived at build time.
//!
//! Sets only come out of the builder, so every `ConstraintSet` and
//! `DynConstraintSet` in existence has passed validation.

use crate::util::simd::{Lanes, LANES};

/// Bitmask of candidates, bit `i` for candidate `i`.
pub type CandidateMask = u16;

/// Mask with the low `candidates` bits set, saturating at `LANES`.
#[inline]
pub const fn lane_mask(candidates: usize) -> CandidateMask {
    let n = if candidates < LANES { candidates } else { LANES };
    ((1u32 << n) - 1) as CandidateMask
}

// ============================================================================
// SPEC ROWS
// ============================================================================

/// One row of a compile-time shaped constraint set spec.
///
/// `care` of `None` means every candidate cares about this offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintSpec<const N: usize> {
    pub offset: usize,
    pub bytes: [u8; N],
    pub care: Option<[bool; N]>,
}

/// One row of a run-time shaped constraint set spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSpec {
    pub offset: usize,
    pub bytes: Vec<u8>,
    pub care: Option<Vec<bool>>,
}

impl RowSpec {
    /// Row where every candidate cares.
    pub fn new(offset: usize, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            offset,
            bytes: bytes.into(),
            care: None,
        }
    }

    /// Row with explicit care flags.
    pub fn with_care(offset: usize, bytes: impl Into<Vec<u8>>, care: impl Into<Vec<bool>>) -> Self {
        Self {
            offset,
            bytes: bytes.into(),
            care: Some(care.into()),
        }
    }
}

impl<const N: usize> From<ConstraintSpec<N>> for RowSpec {
    fn from(spec: ConstraintSpec<N>) -> Self {
        Self {
            offset: spec.offset,
            bytes: spec.bytes.to_vec(),
            care: spec.care.map(|c| c.to_vec()),
        }
    }
}

// ============================================================================
// VALIDATED ROWS
// ============================================================================

/// A lane-packed constraint row.
///
/// # Invariants (established by the builder)
/// - `ignores` lanes are `0xFF` (ignore) or `0x00` (care)
/// - lanes at or beyond the candidate count are `0x00` in both vectors
/// - `length_mask` and `exclusion_mask` only carry bits below the candidate count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row {
    pub(crate) bytes: Lanes,
    pub(crate) ignores: Lanes,
    pub(crate) offset: usize,
    pub(crate) length_mask: CandidateMask,
    pub(crate) exclusion_mask: CandidateMask,
}

impl Row {
    pub(crate) const EMPTY: Row = Row {
        bytes: Lanes::ZERO,
        ignores: Lanes::ZERO,
        offset: 0,
        length_mask: 0,
        exclusion_mask: 0,
    };

    /// Buffer offset this row checks.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Byte candidate `candidate` expects at this offset.
    #[inline]
    pub const fn expected(&self, candidate: usize) -> u8 {
        self.bytes.0[candidate]
    }

    /// Whether candidate `candidate` depends on this row's byte.
    #[inline]
    pub const fn cares(&self, candidate: usize) -> bool {
        self.ignores.0[candidate] == 0
    }

    /// Candidates that do not need this row's byte because this row or the
    /// next one ignores them.
    #[inline]
    pub const fn length_mask(&self) -> CandidateMask {
        self.length_mask
    }

    /// Candidates excluded from the result when the buffer ends before this row.
    #[inline]
    pub const fn exclusion_mask(&self) -> CandidateMask {
        self.exclusion_mask
    }

    /// Expected byte lanes.
    #[inline]
    pub const fn byte_lanes(&self) -> &Lanes {
        &self.bytes
    }

    /// Ignore flag lanes.
    #[inline]
    pub const fn ignore_lanes(&self) -> &Lanes {
        &self.ignores
    }
}

// ============================================================================
// CONSTRAINT SETS
// ============================================================================

mod sealed {
    pub trait Sealed {}

    impl<const J: usize, const N: usize> Sealed for super::ConstraintSet<J, N> {}
    impl Sealed for super::DynConstraintSet {}
}

/// Read access the engine needs from a validated set.
///
/// Implemented by both the compile-time shaped `ConstraintSet` and the
/// run-time shaped `DynConstraintSet`; the engine is generic over it.
/// The trait is sealed, so only sets that went through the builder reach
/// the engine:
///
/// ```compile_fail
/// use lanegate::{ConstraintTable, Row};
///
/// struct Unchecked(Vec<Row>);
///
/// impl ConstraintTable for Unchecked {
///     fn rows(&self) -> &[Row] {
///         &self.0
///     }
///     fn candidate_count(&self) -> usize {
///         40
///     }
/// }
/// ```
pub trait ConstraintTable: sealed::Sealed {
    /// Rows in ascending offset order.
    fn rows(&self) -> &[Row];

    /// Number of candidates (N).
    fn candidate_count(&self) -> usize;

    /// Mask of the valid candidate lanes.
    #[inline]
    fn lane_mask(&self) -> CandidateMask {
        lane_mask(self.candidate_count())
    }

    /// Largest checked offset. A buffer longer than this covers every row.
    #[inline]
    fn max_offset(&self) -> usize {
        // Rows are sorted ascending and never empty.
        self.rows().last().map_or(0, Row::offset)
    }

    /// First row that tells candidates `first` and `second` apart.
    fn distinguishing_row(&self, first: usize, second: usize) -> Option<usize> {
        crate::builder::distinguishing_row(self.rows(), first, second)
    }
}

/// A validated constraint set with `J` rows and `N` candidates fixed at compile time.
///
/// Built with `ConstraintSet::new` or `ConstraintSet::validated`, both `const fn`,
/// so a set can live in a `static` or `const` item and be checked at build time.
///
/// # Invariants (enforced at construction)
/// - offsets are pairwise distinct and strictly ascending
/// - no row ignores every candidate, no explicit care array selects every candidate
/// - every candidate pair is separated by at least one row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintSet<const J: usize, const N: usize> {
    pub(crate) rows: [Row; J],
}

impl<const J: usize, const N: usize> ConstraintSet<J, N> {
    /// Number of rows (J).
    pub const ROWS: usize = J;
    /// Number of candidates (N).
    pub const CANDIDATES: usize = N;

    /// Rows in ascending offset order.
    pub const fn rows(&self) -> &[Row; J] {
        &self.rows
    }

    /// Copy into a run-time shaped set.
    pub fn to_dyn(&self) -> DynConstraintSet {
        DynConstraintSet {
            rows: self.rows.to_vec().into_boxed_slice(),
            candidates: N,
            labels: None,
        }
    }
}

impl<const J: usize, const N: usize> ConstraintTable for ConstraintSet<J, N> {
    #[inline]
    fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[inline]
    fn candidate_count(&self) -> usize {
        N
    }
}

/// A validated constraint set whose shape is chosen at run time.
///
/// Used for sets loaded from spec files. Same invariants as `ConstraintSet`,
/// plus `1 <= candidates <= 16` and a uniform row width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynConstraintSet {
    pub(crate) rows: Box<[Row]>,
    pub(crate) candidates: usize,
    pub(crate) labels: Option<Vec<String>>,
}

impl DynConstraintSet {
    /// Candidate labels, if any were attached.
    pub fn labels(&self) -> Option<&[String]> {
        self.labels.as_deref()
    }

    /// Label for one candidate, falling back to its index.
    pub fn label(&self, candidate: usize) -> String {
        self.labels
            .as_ref()
            .and_then(|labels| labels.get(candidate).cloned())
            .unwrap_or_else(|| format!("#{candidate}"))
    }

    /// Attach candidate labels. The count must match the candidate count.
    pub fn with_labels(
        mut self,
        labels: Vec<String>,
    ) -> Result<Self, crate::verify::ConstraintError> {
        if labels.len() != self.candidates {
            return Err(crate::verify::ConstraintError::LabelCountMismatch {
                expected: self.candidates,
                found: labels.len(),
            });
        }
        self.labels = Some(labels);
        Ok(self)
    }

    /// Row specs equivalent to this set, for serialization.
    pub fn to_specs(&self) -> Vec<RowSpec> {
        self.rows
            .iter()
            .map(|row| {
                let bytes: Vec<u8> = (0..self.candidates).map(|i| row.expected(i)).collect();
                let care: Vec<bool> = (0..self.candidates).map(|i| row.cares(i)).collect();
                if care.iter().all(|&c| c) {
                    RowSpec::new(row.offset, bytes)
                } else {
                    RowSpec::with_care(row.offset, bytes, care)
                }
            })
            .collect()
    }
}

impl ConstraintTable for DynConstraintSet {
    #[inline]
    fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[inline]
    fn candidate_count(&self) -> usize {
        self.candidates
    }
}

// INVARIANT: every candidate lane maps to one bit of CandidateMask.
const _: () = assert!(LANES <= CandidateMask::BITS as usize);
