//! Fixtures shared across unit tests, integration tests, benches and the CLI demo.
//!
//! This module is always compiled but hidden from documentation.
//! It provides the canonical constraint sets and sample messages so every
//! consumer pins the same expected masks.

#![doc(hidden)]

use crate::builder::{make_constraint, make_constraint_with_care};
use crate::types::{CandidateMask, ConstraintSet, RowSpec};

// ============================================================================
// ROTATING HEADERS
// ============================================================================

/// Offsets {1, 7, 13}; each candidate expects its own letter at all three.
pub static ROTATING_HEADERS: ConstraintSet<3, 3> = ConstraintSet::validated([
    make_constraint(1, *b"ABC"),
    make_constraint_with_care(7, *b"BCA", [true, false, true]),
    make_constraint_with_care(13, *b"CAB", [true, true, false]),
]);

// ============================================================================
// KEY/VALUE HEADERS
// ============================================================================

/// Offsets {2, 8, 17, 19}; candidate 3 ignores offset 8.
pub static KEY_VALUE_HEADERS: ConstraintSet<4, 4> = ConstraintSet::validated([
    make_constraint(2, *b"aaaq"),
    make_constraint_with_care(8, *b"@@==", [true, true, true, false]),
    make_constraint(17, *b"=@=@"),
    make_constraint(19, *b":c#c"),
]);

/// Labels used by the demo and the sample spec file.
pub const KEY_VALUE_LABELS: [&str; 4] = ["alpha", "beta", "gamma", "quote"];

/// Sample messages and the mask each one must produce.
pub const KEY_VALUE_MESSAGES: [(&str, CandidateMask); 5] = [
    ("@=a:abcd@=b:text@=c:12", 0b0001),
    ("@=a:afce@=b:text2@=c:12", 0b0010),
    ("@=a:acf@=b:text2@=c#9", 0b0100),
    ("@-q:ccd@=q:text23@=c$123", 0b1000),
    ("@=a:ccd@=q:text23@=d$123", 0),
];

/// `KEY_VALUE_HEADERS` as run-time row specs.
pub fn key_value_specs() -> Vec<RowSpec> {
    vec![
        RowSpec::new(2, *b"aaaq"),
        RowSpec::with_care(8, *b"@@==", [true, true, true, false]),
        RowSpec::new(17, *b"=@=@"),
        RowSpec::new(19, *b":c#c"),
    ]
}

/// `KEY_VALUE_HEADERS` in the on-disk JSON format, mixing both byte encodings.
pub const KEY_VALUE_JSON: &str = r#"{
  "candidates": ["alpha", "beta", "gamma", "quote"],
  "rows": [
    { "offset": 2,  "bytes": "aaaq" },
    { "offset": 8,  "bytes": "@@==", "care": [true, true, true, false] },
    { "offset": 17, "bytes": [61, 64, 61, 64] },
    { "offset": 19, "bytes": ":c#c" }
  ]
}"#;

// ============================================================================
// BENCH MESSAGE: three headers separated by bulk
// ============================================================================

pub const BENCH_HEADER_A: &[u8] = b"=A:abcd";
pub const BENCH_HEADER_B: &[u8] = b"=B:abcd";
pub const BENCH_HEADER_C: &[u8] = b"=C:abcd";
pub const BENCH_BULK: &[u8] = b"@=a:123@=c:q@=d:much bigger message mix things up@=e:medium";

/// Bulk segments between consecutive headers.
pub const BENCH_BULK_REPEAT: usize = 6;

const HEADER_LEN: usize = BENCH_HEADER_A.len();
const BULK_SPAN: usize = BENCH_BULK_REPEAT * BENCH_BULK.len();

/// Offset of the distinguishing letter in each header.
pub const BENCH_A_OFFSET: usize = 1;
pub const BENCH_B_OFFSET: usize = HEADER_LEN + BULK_SPAN + 1;
pub const BENCH_C_OFFSET: usize = 2 * HEADER_LEN + 2 * BULK_SPAN + 1;

/// Three candidates, each keyed on one header letter.
pub static BENCH_SET: ConstraintSet<3, 3> = ConstraintSet::validated([
    make_constraint_with_care(BENCH_A_OFFSET, *b"ABC", [false, true, true]),
    make_constraint_with_care(BENCH_B_OFFSET, *b"BCA", [true, false, true]),
    make_constraint_with_care(BENCH_C_OFFSET, *b"CAB", [true, true, false]),
]);

/// `A + BULK*6 + B + BULK*6 + C`.
pub fn bench_message() -> Vec<u8> {
    let mut data = Vec::with_capacity(3 * HEADER_LEN + 2 * BULK_SPAN);
    data.extend_from_slice(BENCH_HEADER_A);
    for _ in 0..BENCH_BULK_REPEAT {
        data.extend_from_slice(BENCH_BULK);
    }
    data.extend_from_slice(BENCH_HEADER_B);
    for _ in 0..BENCH_BULK_REPEAT {
        data.extend_from_slice(BENCH_BULK);
    }
    data.extend_from_slice(BENCH_HEADER_C);
    data
}

/// Early-exit reference classifier for the bench message layout.
///
/// Branches on content and stops at the first hit: the behavior the engine
/// exists to avoid. A message too short to hold a header letter never matches it.
#[inline(never)]
pub fn branching_baseline(message: &[u8]) -> i32 {
    if message.get(BENCH_A_OFFSET) == Some(&b'A') {
        1
    } else if message.get(BENCH_B_OFFSET) == Some(&b'B') {
        2
    } else if message.get(BENCH_C_OFFSET) == Some(&b'C') {
        3
    } else {
        -1
    }
}
