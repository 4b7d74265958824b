//! The `lanegate` binary end to end.

use crate::common::{KEY_VALUE_JSON, KEY_VALUE_MESSAGES};
use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn lanegate(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lanegate"))
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run lanegate")
}

fn spec_file(dir: &TempDir) -> String {
    let path = dir.path().join("key_value.json");
    fs::write(&path, KEY_VALUE_JSON).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn test_demo_passes() {
    let out = lanegate(&["demo"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(!stdout.contains("MISMATCH"));
    assert_eq!(stdout.matches(" ok").count(), KEY_VALUE_MESSAGES.len());
}

#[test]
fn test_check_json_reports_masks_and_labels() {
    let dir = TempDir::new().unwrap();
    let spec = spec_file(&dir);
    let mut args = vec!["check", "--spec", spec.as_str(), "--format", "json"];
    args.extend(KEY_VALUE_MESSAGES.iter().map(|(m, _)| *m));

    let out = lanegate(&args);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let reports: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let reports = reports.as_array().unwrap();
    assert_eq!(reports.len(), KEY_VALUE_MESSAGES.len());
    for (report, (message, expected)) in reports.iter().zip(KEY_VALUE_MESSAGES) {
        assert_eq!(report["message"], message);
        assert_eq!(report["mask"], u64::from(expected));
    }
    assert_eq!(reports[1]["match"], "beta");
    assert!(reports[4]["match"].is_null());
}

#[test]
fn test_check_with_length_gates_short_messages() {
    let dir = TempDir::new().unwrap();
    let spec = spec_file(&dir);
    let out = lanegate(&["check", "--spec", &spec, "--length", "10", "--format", "json", "@=a:abcd@="]);
    assert!(out.status.success());
    let reports: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(reports[0]["mask"], 0);
}

#[test]
fn test_check_without_length_rejects_short_messages() {
    let dir = TempDir::new().unwrap();
    let spec = spec_file(&dir);
    let out = lanegate(&["check", "--spec", &spec, "@=a"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("--length"));
}

#[test]
fn test_inspect_json_lists_masks_and_separators() {
    let dir = TempDir::new().unwrap();
    let spec = spec_file(&dir);
    let out = lanegate(&["inspect", "--spec", &spec, "--format", "json"]);
    assert!(out.status.success());

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["masks"].as_array().unwrap().len(), 4);
    // Row 1 ignores candidate 3, and so does the union with row 0.
    assert_eq!(report["masks"][0]["length_mask"], 0b1000);
    assert_eq!(report["masks"][1]["exclusion_mask"], 0b0111);
    assert_eq!(report["separators"].as_array().unwrap().len(), 6);
    assert_eq!(report["spec"]["candidates"][3], "quote");
}

#[test]
fn test_missing_spec_file_fails() {
    let out = lanegate(&["inspect", "--spec", "/nonexistent/spec.json"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("loading"));
}
