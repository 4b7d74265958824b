// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for gated evaluation over arbitrary buffers and lengths.
//!
//! The buffer handed to the engine is cut to exactly `length` bytes, so any
//! read past the stated length panics on the slice index.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lanegate::testing::{ROTATING_HEADERS, KEY_VALUE_HEADERS};
use lanegate::{evaluate, evaluate_len, ConstraintTable};

#[derive(Debug, Arbitrary)]
struct EvalInput {
    buffer: Vec<u8>,
    length: usize,
}

fn check<T: ConstraintTable>(table: &T, buffer: &[u8], length: usize) {
    let length = length.min(buffer.len());
    let truncated = &buffer[..length];

    // Property 1: never reads past length (would panic)
    let gated = evaluate_len(truncated, length, table);

    // Property 2: result stays inside the candidate lanes
    assert_eq!(gated & !table.lane_mask(), 0, "result {gated:#x} outside lanes");

    // Property 3: a buffer that covers every row agrees with the ungated path,
    // and a short one can only narrow it
    if length > table.max_offset() {
        assert_eq!(gated, evaluate(truncated, table));
    } else if buffer.len() > table.max_offset() {
        let full = evaluate(buffer, table);
        assert_eq!(gated & !full, 0, "truncated {gated:#b} not within full {full:#b}");
    }

    // Property 4: at most one candidate survives full coverage
    if length > table.max_offset() {
        assert!(gated.count_ones() <= 1, "distinguishable set produced {gated:#b}");
    }
}

fuzz_target!(|input: EvalInput| {
    check(&ROTATING_HEADERS, &input.buffer, input.length);
    check(&KEY_VALUE_HEADERS, &input.buffer, input.length);
});
