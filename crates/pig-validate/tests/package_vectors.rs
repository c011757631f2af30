//! Integration tests: run the package fixtures through the orchestrator.
//!
//! Each fixture in tests/fixtures/ has:
//! - package.json: the package graph
//! - expect.json: the expected validation result
//! - options.json (optional): the check selection; all checks when absent
//!
//! The result is compared as JSON, status text included.

use pig_model::Package;
use pig_validate::{ValidationOptions, check_constraints};
use serde_json::Value;
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn run_fixture(name: &str) {
    let dir = fixtures_dir().join(name);

    let package_path = dir.join("package.json");
    let expect_path = dir.join("expect.json");
    let options_path = dir.join("options.json");

    let package_str = std::fs::read_to_string(&package_path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", package_path.display()));
    let expect_str = std::fs::read_to_string(&expect_path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", expect_path.display()));

    let package = Package::from_json_str(&package_str)
        .unwrap_or_else(|e| panic!("failed to parse {}: {e}", package_path.display()));
    let expected: Value = serde_json::from_str(&expect_str)
        .unwrap_or_else(|e| panic!("failed to parse {}: {e}", expect_path.display()));

    let options: ValidationOptions = if options_path.exists() {
        let options_str = std::fs::read_to_string(&options_path)
            .unwrap_or_else(|e| panic!("failed to read {}: {e}", options_path.display()));
        serde_json::from_str(&options_str)
            .unwrap_or_else(|e| panic!("failed to parse {}: {e}", options_path.display()))
    } else {
        ValidationOptions::all()
    };

    let result = check_constraints(&package, &options);
    let result_json = serde_json::to_value(&result).expect("failed to serialize result");

    assert_eq!(
        result_json,
        expected,
        "\n\nFixture: {name}\n\nGot:\n{}\n\nExpected:\n{}\n",
        serde_json::to_string_pretty(&result_json).unwrap(),
        serde_json::to_string_pretty(&expected).unwrap(),
    );
}

#[test]
fn golden_requirements_package() {
    run_fixture("golden_requirements_package");
}

#[test]
fn golden_value_within_range() {
    run_fixture("golden_value_within_range");
}

#[test]
fn adversarial_missing_id() {
    run_fixture("adversarial_missing_id");
}

#[test]
fn adversarial_duplicate_id() {
    run_fixture("adversarial_duplicate_id");
}

#[test]
fn adversarial_dangling_entity_class() {
    run_fixture("adversarial_dangling_entity_class");
}

#[test]
fn adversarial_ineligible_property() {
    run_fixture("adversarial_ineligible_property");
}

#[test]
fn adversarial_ineligible_endpoint() {
    run_fixture("adversarial_ineligible_endpoint");
}

#[test]
fn adversarial_title_twice_in_english() {
    run_fixture("adversarial_title_twice_in_english");
}

#[test]
fn adversarial_priority_not_enumerated() {
    run_fixture("adversarial_priority_not_enumerated");
}

#[test]
fn adversarial_value_exceeds_max_inclusive() {
    run_fixture("adversarial_value_exceeds_max_inclusive");
}
