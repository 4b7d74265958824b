// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Construction-time errors.
//!
//! A constraint set either satisfies every invariant or does not exist. Each
//! variant names the first rule a constraint set broke and enough indices to
//! find the offending row or candidate pair in the source.

use thiserror::Error;

/// Error type for invariant violations found while building a constraint set.
///
/// All of these are configuration errors: they are detected once, before the
/// set can be used, and can never surface from evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConstraintError {
    /// No rows were given.
    #[error("constraint set has no rows")]
    NoRows,
    /// Rows have zero candidate lanes.
    #[error("rows have no candidates")]
    NoCandidates,
    /// More candidates than there are lanes.
    #[error("{count} candidates exceed the 16 available lanes")]
    TooManyCandidates { count: usize },
    /// A row's byte or care array has a different width than the first row.
    #[error("row {row} has {found} lanes, expected {expected}")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// An explicit care array where every candidate cares.
    #[error("row {row} explicitly cares about every candidate; omit the care flags instead")]
    AllCare { row: usize },
    /// A care array where no candidate cares.
    #[error("row {row} ignores every candidate")]
    AllIgnore { row: usize },
    /// Two rows check the same offset.
    #[error("rows {first} and {second} both check offset {offset}")]
    DuplicateOffset {
        first: usize,
        second: usize,
        offset: usize,
    },
    /// Offsets are not strictly ascending.
    #[error("row {position} has offset {offset} but the next row has offset {next}")]
    UnsortedOffsets {
        position: usize,
        offset: usize,
        next: usize,
    },
    /// No row separates these two candidates.
    #[error("candidates {first} and {second} are never told apart by any row")]
    AmbiguousPair { first: usize, second: usize },
    /// Candidate labels do not line up with the lanes.
    #[error("{found} candidate labels given for {expected} candidates")]
    LabelCountMismatch { expected: usize, found: usize },
}

impl ConstraintError {
    /// Static description of the violated rule.
    ///
    /// Usable in const evaluation, where `Display` is not, so that
    /// `ConstraintSet::validated` can fail the build with a readable message.
    pub const fn reason(&self) -> &'static str {
        match self {
            ConstraintError::NoRows => "constraint set has no rows",
            ConstraintError::NoCandidates => "rows have no candidates",
            ConstraintError::TooManyCandidates { .. } => "more candidates than lanes",
            ConstraintError::RowWidthMismatch { .. } => "rows disagree on the candidate count",
            ConstraintError::AllCare { .. } => "explicit care flags select every candidate",
            ConstraintError::AllIgnore { .. } => "care flags select no candidate",
            ConstraintError::DuplicateOffset { .. } => "two rows check the same offset",
            ConstraintError::UnsortedOffsets { .. } => "row offsets are not strictly ascending",
            ConstraintError::AmbiguousPair { .. } => "two candidates are never told apart",
            ConstraintError::LabelCountMismatch { .. } => {
                "candidate labels do not match the candidate count"
            }
        }
    }
}
