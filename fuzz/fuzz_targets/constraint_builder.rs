// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the run-time builder.
//!
//! Arbitrary row specs either fail validation with an error or produce a set
//! that keeps every promise the engine relies on. The builder must never panic.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lanegate::{ConstraintTable, DynConstraintSet, RowSpec};

#[derive(Debug, Arbitrary)]
struct FuzzRow {
    offset: u8,
    bytes: Vec<u8>,
    care: Option<Vec<bool>>,
}

#[derive(Debug, Arbitrary)]
struct BuildInput {
    rows: Vec<FuzzRow>,
    probe: Vec<u8>,
}

fuzz_target!(|input: BuildInput| {
    if input.rows.len() > 32 {
        return;
    }
    let specs: Vec<RowSpec> = input
        .rows
        .iter()
        .map(|row| RowSpec {
            offset: usize::from(row.offset),
            bytes: row.bytes.clone(),
            care: row.care.clone(),
        })
        .collect();

    let Ok(set) = DynConstraintSet::from_specs(&specs) else {
        return;
    };

    // Property 1: offsets strictly ascending
    for pair in set.rows().windows(2) {
        assert!(pair[0].offset() < pair[1].offset());
    }

    // Property 2: every candidate pair has a separating row
    let n = set.candidate_count();
    for i in 0..n {
        for j in (i + 1)..n {
            let row = set.distinguishing_row(i, j).expect("accepted set must separate every pair");
            let row = &set.rows()[row];
            assert!(row.cares(i) && row.cares(j));
            assert_ne!(row.expected(i), row.expected(j));
        }
    }

    // Property 3: evaluating an accepted set never panics and stays in lanes
    let mask = set.evaluate_len(&input.probe, input.probe.len());
    assert_eq!(mask & !set.lane_mask(), 0);
    assert!(mask.count_ones() <= 1 || input.probe.len() <= set.max_offset());

    // Property 4: the spec file form rebuilds the same set
    let json = set.to_spec_file().to_json().expect("spec file serializes");
    assert_eq!(lanegate::schema::from_json(&json).expect("round trip"), set);
});
