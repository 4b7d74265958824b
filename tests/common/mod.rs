//! Shared test utilities and fixtures.

#![allow(dead_code, unused_imports)]

use lanegate::{CandidateMask, ConstraintTable, DynConstraintSet, RowSpec};
use proptest::prelude::*;

// Re-export canonical fixtures from lanegate::testing
pub use lanegate::testing::{
    key_value_specs, KEY_VALUE_HEADERS, KEY_VALUE_JSON, KEY_VALUE_LABELS, KEY_VALUE_MESSAGES,
    ROTATING_HEADERS,
};

// ============================================================================
// ORACLE
// ============================================================================

/// Straightforward per-candidate evaluation with early exits.
///
/// Candidate `c` survives iff every row it cares about lies inside the first
/// `length` bytes and holds its expected byte. This is the behavior the
/// branchless engine must reproduce.
pub fn oracle<T: ConstraintTable + ?Sized>(table: &T, buffer: &[u8], length: usize) -> CandidateMask {
    let length = length.min(buffer.len());
    let mut mask = 0;
    'candidates: for c in 0..table.candidate_count() {
        for row in table.rows() {
            if !row.cares(c) {
                continue;
            }
            if row.offset() >= length || buffer[row.offset()] != row.expected(c) {
                continue 'candidates;
            }
        }
        mask |= 1 << c;
    }
    mask
}

/// A buffer of `len` bytes holding candidate `c`'s expected byte at every
/// row it cares about and `filler` everywhere else.
pub fn message_for<T: ConstraintTable + ?Sized>(table: &T, c: usize, len: usize, filler: &[u8]) -> Vec<u8> {
    let mut buffer: Vec<u8> = (0..len)
        .map(|i| filler.get(i).copied().unwrap_or(0))
        .collect();
    for row in table.rows() {
        if row.cares(c) && row.offset() < len {
            buffer[row.offset()] = row.expected(c);
        }
    }
    buffer
}

// ============================================================================
// STRATEGIES
// ============================================================================

/// Row specs with ascending distinct offsets, N candidates and random care.
pub fn row_specs_strategy() -> impl Strategy<Value = Vec<RowSpec>> {
    (1usize..=16, 1usize..=8).prop_flat_map(|(n, j)| {
        let offsets = prop::collection::btree_set(0usize..64, j);
        let rows = prop::collection::vec(
            (
                prop::collection::vec(any::<u8>(), n),
                prop::option::weighted(0.5, prop::collection::vec(any::<bool>(), n)),
            ),
            j,
        );
        (offsets, rows).prop_map(|(offsets, rows)| {
            offsets
                .into_iter()
                .zip(rows)
                .map(|(offset, (bytes, care))| RowSpec {
                    offset,
                    bytes,
                    care,
                })
                .collect()
        })
    })
}

/// Valid run-time constraint sets.
pub fn constraint_set_strategy() -> impl Strategy<Value = DynConstraintSet> {
    row_specs_strategy().prop_filter_map("set failed validation", |specs| {
        DynConstraintSet::from_specs(&specs).ok()
    })
}

/// A valid set plus a buffer that covers every row.
pub fn set_and_buffer_strategy() -> impl Strategy<Value = (DynConstraintSet, Vec<u8>)> {
    constraint_set_strategy().prop_flat_map(|set| {
        let len = set.max_offset() + 1;
        (Just(set), prop::collection::vec(any::<u8>(), len..len + 8))
    })
}
