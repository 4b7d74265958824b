//! Spec files on disk: loading, validation errors, and writing back.

use crate::common::{key_value_specs, KEY_VALUE_HEADERS, KEY_VALUE_JSON, KEY_VALUE_MESSAGES};
use lanegate::schema::{self, ByteList};
use lanegate::{ConstraintError, ConstraintTable, DynConstraintSet, SpecFile, SpecFileError};
use std::fs;
use tempfile::TempDir;

fn write_spec(dir: &TempDir, name: &str, json: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, json).unwrap();
    path
}

#[test]
fn test_load_reproduces_compile_time_set() {
    let dir = TempDir::new().unwrap();
    let path = write_spec(&dir, "key_value.json", KEY_VALUE_JSON);

    let set = schema::load(&path).unwrap();
    assert_eq!(set.rows(), KEY_VALUE_HEADERS.to_dyn().rows());
    assert_eq!(set.candidate_count(), 4);
    assert_eq!(set.label(0), "alpha");

    for (message, expected) in KEY_VALUE_MESSAGES {
        assert_eq!(set.evaluate(message.as_bytes()), expected);
    }
}

#[test]
fn test_specs_and_json_build_the_same_set() {
    let from_specs = DynConstraintSet::from_specs(&key_value_specs()).unwrap();
    let from_json = schema::from_json(KEY_VALUE_JSON).unwrap();
    assert_eq!(from_specs.rows(), from_json.rows());
}

#[test]
fn test_written_spec_file_loads_back() {
    let dir = TempDir::new().unwrap();
    let original = schema::from_json(KEY_VALUE_JSON).unwrap();

    let json = original.to_spec_file().to_json().unwrap();
    let path = write_spec(&dir, "written.json", &json);
    let reloaded = schema::load(&path).unwrap();

    assert_eq!(reloaded, original);
}

#[test]
fn test_written_spec_file_uses_text_for_printable_bytes() {
    let file = KEY_VALUE_HEADERS.to_dyn().to_spec_file();
    assert_eq!(file.candidates, None);
    assert_eq!(file.rows[0].bytes, ByteList::Text("aaaq".into()));
    assert_eq!(file.rows[1].care, Some(vec![true, true, true, false]));
    assert_eq!(file.rows[2].care, None);
}

#[test]
fn test_raw_bytes_survive_round_trip() {
    let json = r#"{"rows": [{"offset": 0, "bytes": [0, 255, 10]}]}"#;
    let set = schema::from_json(json).unwrap();
    assert_eq!(set.evaluate(&[255]), 0b010);

    let file = set.to_spec_file();
    assert_eq!(file.rows[0].bytes, ByteList::Raw(vec![0, 255, 10]));
    assert_eq!(SpecFile::from_json(&file.to_json().unwrap()).unwrap(), file);
}

#[test]
fn test_invalid_set_in_file_reports_constraint_error() {
    let dir = TempDir::new().unwrap();
    let path = write_spec(
        &dir,
        "unsorted.json",
        r#"{"rows": [{"offset": 9, "bytes": "ab"}, {"offset": 3, "bytes": "cd"}]}"#,
    );

    match schema::load(&path) {
        Err(SpecFileError::Constraint(ConstraintError::UnsortedOffsets {
            position,
            offset,
            next,
        })) => {
            assert_eq!((position, offset, next), (0, 9, 3));
        }
        other => panic!("expected UnsortedOffsets, got {other:?}"),
    }
}

#[test]
fn test_ambiguous_set_in_file_is_rejected() {
    let json = r#"{"rows": [{"offset": 0, "bytes": "aab"}]}"#;
    assert!(matches!(
        schema::from_json(json),
        Err(SpecFileError::Constraint(ConstraintError::AmbiguousPair { first: 0, second: 1 }))
    ));
}

#[test]
fn test_malformed_json_reports_json_error() {
    let dir = TempDir::new().unwrap();
    let path = write_spec(&dir, "broken.json", "{ \"rows\": [ ");
    assert!(matches!(schema::load(&path), Err(SpecFileError::Json(_))));
}

#[test]
fn test_error_messages_name_the_problem() {
    let err = schema::from_json(r#"{"rows": [{"offset": 0, "bytes": "ab", "care": [true, true]}]}"#)
        .unwrap_err();
    let source = std::error::Error::source(&err).map(|e| e.to_string());
    assert_eq!(err.to_string(), "invalid constraint set");
    assert!(source.is_some_and(|s| s.contains("row 0")));
}
