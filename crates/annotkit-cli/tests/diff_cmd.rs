//! Integration tests for the `diff` subcommand.

mod common;

use assert_cmd::Command;
use common::{build_pdf, write_pdf};
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("annotkit").unwrap()
}

const BODY: &str = "BT /F1 12 Tf 72 700 Td (Shared body text on both versions.) Tj ET";

#[test]
fn diff_detects_added_content() {
    let original = write_pdf(&build_pdf(&[(BODY, Vec::new())]));
    // The "flattened annotation": a filled red box the original lacks.
    let annotated_content = format!("{BODY} 1 0 0 rg 100 100 120 40 re f");
    let annotated = write_pdf(&build_pdf(&[(annotated_content.as_str(), Vec::new())]));
    let dir = tempfile::tempdir().unwrap();

    cmd()
        .args([
            "diff",
            original.path().to_str().unwrap(),
            annotated.path().to_str().unwrap(),
            "--output-dir",
            dir.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 potential annotations"))
        .stdout(predicate::str::contains("position ("))
        .stdout(predicate::str::contains(
            "SUMMARY: Found 1 potential annotations across 1 pages",
        ));

    assert!(dir.path().join("page_1_differences.png").exists());
    assert!(dir.path().join("page_1_threshold.png").exists());
}

#[test]
fn diff_identical_documents_finds_nothing() {
    let a = write_pdf(&build_pdf(&[(BODY, Vec::new())]));
    let b = write_pdf(&build_pdf(&[(BODY, Vec::new())]));
    let dir = tempfile::tempdir().unwrap();

    cmd()
        .args([
            "diff",
            a.path().to_str().unwrap(),
            b.path().to_str().unwrap(),
            "--output-dir",
            dir.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No significant differences found"))
        .stdout(predicate::str::contains(
            "SUMMARY: Found 0 potential annotations",
        ));

    assert!(!dir.path().join("page_1_differences.png").exists());
}

#[test]
fn diff_elongated_region_classified_as_line() {
    let original = write_pdf(&build_pdf(&[("", Vec::new())]));
    // A long thin stroked line.
    let annotated = write_pdf(&build_pdf(&[(
        "0 0 1 RG 4 w 100 400 m 500 400 l S",
        Vec::new(),
    )]));
    let dir = tempfile::tempdir().unwrap();

    cmd()
        .args([
            "diff",
            original.path().to_str().unwrap(),
            annotated.path().to_str().unwrap(),
            "--output-dir",
            dir.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("line/arrow"));
}

#[test]
fn diff_min_area_filters_small_changes() {
    let original = write_pdf(&build_pdf(&[("", Vec::new())]));
    let annotated = write_pdf(&build_pdf(&[("0 g 100 100 4 4 re f", Vec::new())]));
    let dir = tempfile::tempdir().unwrap();

    // A 4x4 point box at 72 dpi is ~16 changed pixels, under a 100-pixel floor.
    cmd()
        .args([
            "diff",
            original.path().to_str().unwrap(),
            annotated.path().to_str().unwrap(),
            "--output-dir",
            dir.path().to_str().unwrap(),
            "--dpi",
            "72",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "SUMMARY: Found 0 potential annotations",
        ));
}

#[test]
fn diff_compares_common_page_prefix() {
    let a = write_pdf(&build_pdf(&[(BODY, Vec::new()), (BODY, Vec::new())]));
    let b = write_pdf(&build_pdf(&[(BODY, Vec::new())]));
    let dir = tempfile::tempdir().unwrap();

    cmd()
        .args([
            "diff",
            a.path().to_str().unwrap(),
            b.path().to_str().unwrap(),
            "--output-dir",
            dir.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Analyzing 1 pages"))
        .stderr(predicate::str::contains("page counts differ"));
}

#[test]
fn diff_json_format() {
    let original = write_pdf(&build_pdf(&[("", Vec::new())]));
    let annotated = write_pdf(&build_pdf(&[("0 g 100 100 150 150 re f", Vec::new())]));
    let dir = tempfile::tempdir().unwrap();

    let output = cmd()
        .args([
            "diff",
            original.path().to_str().unwrap(),
            annotated.path().to_str().unwrap(),
            "--output-dir",
            dir.path().to_str().unwrap(),
            "--format",
            "json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let regions = parsed.as_array().unwrap();
    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0]["page"], 1);
    assert_eq!(regions[0]["kind"], "square/circle");
    assert!(regions[0]["area"].as_u64().unwrap() > 0);
}
