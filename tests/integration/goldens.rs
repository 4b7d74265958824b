//! Pinned goldens: three rotating headers, key/value messages, truncation.

use crate::common::{message_for, oracle, KEY_VALUE_HEADERS, KEY_VALUE_MESSAGES, ROTATING_HEADERS};
use lanegate::testing::{bench_message, BENCH_SET};
use lanegate::{
    make_constraint, make_constraint_with_care, single_candidate, ConstraintSet, ConstraintTable,
};

// ============================================================================
// ROTATING HEADERS
// ============================================================================

#[test]
fn test_rotating_headers_each_candidate_selects_itself() {
    for c in 0..3 {
        let message = message_for(&ROTATING_HEADERS, c, 14, b"..............");
        assert_eq!(ROTATING_HEADERS.evaluate(&message), 1 << c, "candidate {c}");
    }
}

#[test]
fn test_rotating_headers_letters_at_offsets() {
    let mut buffer = *b"_A_____B_____C";
    assert_eq!(ROTATING_HEADERS.evaluate(&buffer), 0b001);

    // Candidate 1 ignores offset 7, so 'B' there does not matter to it.
    buffer[1] = b'B';
    buffer[13] = b'A';
    assert_eq!(ROTATING_HEADERS.evaluate(&buffer), 0b010);
}

// ============================================================================
// KEY/VALUE HEADERS
// ============================================================================

#[test]
fn test_key_value_golden_masks() {
    for (message, expected) in KEY_VALUE_MESSAGES {
        let bytes = message.as_bytes();
        assert_eq!(KEY_VALUE_HEADERS.evaluate(bytes), expected, "evaluate {message:?}");
        assert_eq!(
            KEY_VALUE_HEADERS.evaluate_len(bytes, bytes.len()),
            expected,
            "evaluate_len {message:?}"
        );
    }
}

#[test]
fn test_key_value_messages_never_engage_the_gate() {
    for (message, _) in KEY_VALUE_MESSAGES {
        assert!(message.len() > KEY_VALUE_HEADERS.max_offset());
    }
}

#[test]
fn test_key_value_results_name_one_candidate_or_none() {
    let winners: Vec<Option<usize>> = KEY_VALUE_MESSAGES
        .iter()
        .map(|(m, _)| single_candidate(KEY_VALUE_HEADERS.evaluate(m.as_bytes())))
        .collect();
    assert_eq!(winners, vec![Some(0), Some(1), Some(2), Some(3), None]);
}

#[test]
fn test_key_value_every_prefix_matches_oracle() {
    for (message, expected) in KEY_VALUE_MESSAGES {
        let bytes = message.as_bytes();
        for length in 0..=bytes.len() {
            let got = KEY_VALUE_HEADERS.evaluate_len(&bytes[..length], length);
            assert_eq!(got, oracle(&KEY_VALUE_HEADERS, bytes, length), "{message:?}[..{length}]");
            assert_eq!(got & !expected, 0, "prefix widened the answer");
        }
    }
}

// ============================================================================
// TRUNCATION
// ============================================================================

#[test]
fn test_truncation_excludes_rather_than_trusting_placeholder() {
    let set = ConstraintSet::<2, 2>::validated([
        make_constraint(1, *b"AB"),
        make_constraint_with_care(5, *b"@Z", [true, false]),
    ]);
    assert_eq!(set.evaluate_len(b"@A", 2), 0);
    assert_eq!(set.evaluate_len(b"@B", 2), 0b10);

    // With the byte present, candidate 0 is decided by it.
    assert_eq!(set.evaluate_len(b"@A___@", 6), 0b01);
    assert_eq!(set.evaluate_len(b"@A___Z", 6), 0);
}

#[test]
fn test_truncated_before_first_row_is_zero() {
    assert_eq!(KEY_VALUE_HEADERS.evaluate_len(b"@=", 2), 0);
    assert_eq!(ROTATING_HEADERS.evaluate_len(b"_", 1), 0);
}

// ============================================================================
// BENCH LAYOUT
// ============================================================================

#[test]
fn test_bench_message_classifies_as_first_header() {
    let message = bench_message();
    assert_eq!(BENCH_SET.evaluate(&message), 0b001);
    assert_eq!(BENCH_SET.evaluate_len(&message, message.len()), 0b001);
    // Cut before the third header: candidate 0 cares about it.
    let cut = BENCH_SET.max_offset();
    assert_eq!(BENCH_SET.evaluate_len(&message[..cut], cut), 0);
}
