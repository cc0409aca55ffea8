//! CLI integration tests
//!
//! These tests verify the CLI commands work correctly by running the binary.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

fn meascollec_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_meascollec"))
}

fn fixtures_dir() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path
}

fn only_file_in(dir: PathBuf) -> PathBuf {
    let entries: Vec<_> = fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("cannot list {}: {}", dir.display(), e))
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1, "expected one file in {}", dir.display());
    entries.into_iter().next().unwrap()
}

// ============================================================================
// Header Command Tests
// ============================================================================

#[test]
fn test_cli_header() {
    let output = Command::new(meascollec_bin())
        .arg("header")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "header should succeed");
    let fields: Vec<_> = stdout.trim_end().split('|').collect();
    assert_eq!(fields.len(), 23);
    assert_eq!(fields[0], "fh_file_format_version");
    assert_eq!(fields[22], "transformed_file");
}

// ============================================================================
// Inspect Command Tests
// ============================================================================

#[test]
fn test_cli_inspect_basic() {
    let output = Command::new(meascollec_bin())
        .args(["inspect", fixtures_dir().join("compact.xml").to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "inspect should succeed");
    assert!(stdout.contains("meascollec v"), "should show version");
    assert!(stdout.contains("vendorName: Acme"), "should show vendor");
    assert!(stdout.contains("measInfo UtranCell: 3 type(s), 7 value(s)"));
    assert!(stdout.contains("totals: 1 measData, 2 measInfo, 10 value(s)"));
}

#[test]
fn test_cli_inspect_missing_file() {
    let output = Command::new(meascollec_bin())
        .args(["inspect", "nonexistent.xml"])
        .output()
        .expect("Failed to execute command");

    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success(), "inspect of a missing file should fail");
    assert!(stderr.contains("Error:"), "should report an error");
}

// ============================================================================
// Transform Command Tests
// ============================================================================

#[test]
fn test_cli_transform_json() {
    let out = TempDir::new().unwrap();

    let output = Command::new(meascollec_bin())
        .args([
            "transform",
            fixtures_dir().join("compact.xml").to_str().unwrap(),
            "--output-dir",
            out.path().to_str().unwrap(),
            "--source-uri",
            "s3://pm-in/compact.xml",
        ])
        .env_remove("OUTPUT_FORMAT")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "transform should succeed: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("successfully created from : s3://pm-in/compact.xml"));

    let written = only_file_in(out.path().join("raw_transform_json"));
    let name = written.file_name().unwrap().to_str().unwrap().to_string();
    assert!(name.ends_with("_compact.json"), "unexpected name {}", name);

    let text = fs::read_to_string(&written).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 10);

    let first: serde_json::Value = serde_json::from_str(lines[0]).expect("Output should be valid JSON");
    assert_eq!(first["md_mi_meas_name"], "pmRrcConnEstabAtt");
    assert_eq!(first["md_mi_meas_value"], 1);
    assert_eq!(first["input_file"], "s3://pm-in/compact.xml");
}

#[test]
fn test_cli_transform_format_from_env() {
    let out = TempDir::new().unwrap();

    let output = Command::new(meascollec_bin())
        .args([
            "transform",
            fixtures_dir().join("explicit.xml").to_str().unwrap(),
            "--output-dir",
            out.path().to_str().unwrap(),
        ])
        .env("OUTPUT_FORMAT", "CSV")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "transform should succeed: {}", String::from_utf8_lossy(&output.stderr));

    let written = only_file_in(out.path().join("raw_transform_csv"));
    let text = fs::read_to_string(written).unwrap();
    let mut lines = text.lines();
    assert!(lines.next().unwrap().starts_with("fh_file_format_version|fh_vendor_name|"));
    assert_eq!(lines.count(), 10);
}

#[test]
fn test_cli_transform_invalid_format() {
    let out = TempDir::new().unwrap();

    let output = Command::new(meascollec_bin())
        .args([
            "transform",
            fixtures_dir().join("compact.xml").to_str().unwrap(),
            "--format",
            "parquet",
            "--output-dir",
            out.path().to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success(), "unknown format should fail");
    assert!(stderr.contains("unknown output format"), "should explain the format error");
    assert_eq!(stderr.matches("unknown output format").count(), 1, "error reported once: {}", stderr);
    assert!(!stderr.contains("ERROR"), "no log line repeats the error: {}", stderr);
}

#[test]
fn test_cli_transform_strict_limits() {
    let out = TempDir::new().unwrap();

    let output = Command::new(meascollec_bin())
        .args([
            "transform",
            fixtures_dir().join("compact.xml").to_str().unwrap(),
            "--output-dir",
            out.path().to_str().unwrap(),
            "--limits",
            "strict",
        ])
        .env_remove("OUTPUT_FORMAT")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "strict limits fit a normal file: {}", String::from_utf8_lossy(&output.stderr));
    let written = only_file_in(out.path().join("raw_transform_json"));
    assert_eq!(fs::read_to_string(written).unwrap().lines().count(), 10);
}

#[test]
fn test_cli_unknown_limits_preset() {
    let output = Command::new(meascollec_bin())
        .args([
            "inspect",
            fixtures_dir().join("compact.xml").to_str().unwrap(),
            "--limits",
            "huge",
        ])
        .output()
        .expect("Failed to execute command");

    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success(), "unknown preset should fail");
    assert!(stderr.contains("unknown limits preset 'huge'"), "should name the preset: {}", stderr);
}

// ============================================================================
// Mapping Command Tests
// ============================================================================

#[test]
fn test_cli_mapping() {
    let output = Command::new(meascollec_bin())
        .args(["mapping", fixtures_dir().join("compact.xml").to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "mapping should succeed: {}", String::from_utf8_lossy(&output.stderr));

    let mapping: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Output should be valid JSON");
    let root = &mapping["measCollecFile"];
    assert_eq!(root["fileHeader"]["@vendorName"], "Acme");
    assert!(root["measData"].is_object(), "single measData stays a mapping");
}

#[test]
fn test_cli_mapping_force_list() {
    let output = Command::new(meascollec_bin())
        .args([
            "mapping",
            fixtures_dir().join("compact.xml").to_str().unwrap(),
            "--force-list",
            "measData",
            "--pretty",
            "--limits",
            "permissive",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "mapping should succeed: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\n  \""), "pretty output is indented");

    let mapping: serde_json::Value = serde_json::from_str(&stdout).expect("Output should be valid JSON");
    let data = mapping["measCollecFile"]["measData"].as_array().expect("measData forced to a list");
    assert_eq!(data.len(), 1);
}

#[test]
fn test_cli_transform_pairing_error() {
    let out = TempDir::new().unwrap();

    let output = Command::new(meascollec_bin())
        .args([
            "transform",
            fixtures_dir().join("no_types.xml").to_str().unwrap(),
            "--output-dir",
            out.path().to_str().unwrap(),
        ])
        .env_remove("OUTPUT_FORMAT")
        .output()
        .expect("Failed to execute command");

    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success(), "values without types should fail");
    assert!(stderr.contains("pairing"), "should report a pairing error");
    assert!(!out.path().join("raw_transform_json").exists());
}
