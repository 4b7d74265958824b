//! Builder validation through both construction paths.

use crate::common::{key_value_specs, KEY_VALUE_HEADERS};
use lanegate::{
    make_constraint, make_constraint_with_care, ConstraintError, ConstraintSet, ConstraintTable,
    DynConstraintSet, RowSpec,
};

/// Compile-time built sets: if any of these were invalid the test binary
/// would not build.
const SINGLE: ConstraintSet<1, 2> = ConstraintSet::validated([make_constraint(0, *b"01")]);
static WIDE: ConstraintSet<1, 16> = ConstraintSet::validated([make_constraint(3, *b"0123456789abcdef")]);

#[test]
fn test_const_sets_are_usable() {
    assert_eq!(SINGLE.evaluate(b"1"), 0b10);
    assert_eq!(WIDE.evaluate(b"___f"), 1 << 15);
    assert_eq!(ConstraintSet::<1, 16>::CANDIDATES, 16);
    assert_eq!(ConstraintSet::<1, 16>::ROWS, 1);
}

#[test]
fn test_dyn_from_key_value_specs_matches_const() {
    let set = DynConstraintSet::from_specs(&key_value_specs()).unwrap();
    assert_eq!(set, KEY_VALUE_HEADERS.to_dyn());
    assert_eq!(set.max_offset(), 19);
    assert_eq!(set.lane_mask(), 0b1111);
}

#[test]
fn test_length_masks_of_key_value_headers() {
    let masks: Vec<u16> = KEY_VALUE_HEADERS.rows().iter().map(|r| r.length_mask()).collect();
    // Row 1 ignores candidate 3; rows 0 and 1 both see it.
    assert_eq!(masks, vec![0b1000, 0b1000, 0, 0]);
}

#[test]
fn test_distinguishing_rows_of_key_value_headers() {
    assert_eq!(KEY_VALUE_HEADERS.distinguishing_row(0, 3), Some(0));
    assert_eq!(KEY_VALUE_HEADERS.distinguishing_row(0, 1), Some(2));
    assert_eq!(KEY_VALUE_HEADERS.distinguishing_row(0, 2), Some(1));
    assert_eq!(KEY_VALUE_HEADERS.distinguishing_row(1, 2), Some(1));
}

#[test]
fn test_rejections_report_first_violation() {
    // Duplicates are found before ordering.
    let err = DynConstraintSet::from_specs(&[
        RowSpec::new(5, *b"ab"),
        RowSpec::new(2, *b"cd"),
        RowSpec::new(5, *b"ef"),
    ])
    .unwrap_err();
    assert_eq!(
        err,
        ConstraintError::DuplicateOffset {
            first: 0,
            second: 2,
            offset: 5
        }
    );

    // Row shape is checked before any cross-row rule.
    let err = ConstraintSet::<2, 2>::new([
        make_constraint(9, *b"ab"),
        make_constraint_with_care(1, *b"ab", [false, false]),
    ])
    .unwrap_err();
    assert_eq!(err, ConstraintError::AllIgnore { row: 1 });
}

#[test]
fn test_labels_attach_to_dyn_sets() {
    let set = KEY_VALUE_HEADERS
        .to_dyn()
        .with_labels(vec!["a".into(), "b".into(), "c".into(), "d".into()])
        .unwrap();
    assert_eq!(set.label(2), "c");
    assert_eq!(set.labels().map(<[String]>::len), Some(4));

    let unlabeled = KEY_VALUE_HEADERS.to_dyn();
    assert_eq!(unlabeled.label(2), "#2");

    let err = KEY_VALUE_HEADERS.to_dyn().with_labels(vec!["a".into()]).unwrap_err();
    assert_eq!(err, ConstraintError::LabelCountMismatch { expected: 4, found: 1 });
}

#[test]
fn test_reason_matches_display_topic() {
    let err = ConstraintError::AmbiguousPair { first: 1, second: 3 };
    assert_eq!(err.reason(), "two candidates are never told apart");
    assert!(err.to_string().contains("1 and 3"));
}
