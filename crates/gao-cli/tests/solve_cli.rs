//! Integration tests for `gao-cli solve`/`validate`

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn sample_input() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "variants": {{"flan": {{"flan-a100": {{"variant_id": "flan-a100", "accelerator_type": "A100", "accelerator_count": 6.0, "max_service_rate": 15.0}}}}}},
            "demand": {{"flan": 10.0}},
            "supply": {{"A100": 15}},
            "cost": {{"A100": 1.0}}
        }}"#
    )
    .unwrap();
    file
}

#[test]
fn solve_writes_allocation_result() {
    let input = sample_input();
    let output = tempfile::NamedTempFile::new().unwrap();

    Command::cargo_bin("gao-cli")
        .unwrap()
        .args(["solve", input.path().to_str().unwrap(), output.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Results written to"));

    let written: serde_json::Value =
        serde_json::from_reader(std::fs::File::open(output.path()).unwrap()).unwrap();
    assert!(written["models_data"]["flan"].is_object());
}

#[test]
fn solve_on_malformed_input_exits_nonzero() {
    let mut input = tempfile::NamedTempFile::new().unwrap();
    write!(input, "not json").unwrap();
    let output = tempfile::NamedTempFile::new().unwrap();

    Command::cargo_bin("gao-cli")
        .unwrap()
        .args(["solve", input.path().to_str().unwrap(), output.path().to_str().unwrap()])
        .assert()
        .failure();

    let written: serde_json::Value =
        serde_json::from_reader(std::fs::File::open(output.path()).unwrap()).unwrap();
    assert_eq!(written["is_success"], false);
}

#[test]
fn validate_reports_success_for_well_formed_input() {
    let input = sample_input();

    Command::cargo_bin("gao-cli")
        .unwrap()
        .args(["validate", input.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));
}
