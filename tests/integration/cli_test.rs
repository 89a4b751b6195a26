//! Tests for the cellprep binary: argument handling, JSON output shape,
//! and the end-of-run summary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn time(ms: i64) -> String {
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        ms / 3_600_000,
        ms / 60_000 % 60,
        ms / 1000 % 60,
        ms % 1000
    )
}

/// A small but complete SA dump: four measurement records and four
/// delivery records with a rising byte counter.
fn sample_dump() -> String {
    let mut blob = String::new();
    for i in 0..4i64 {
        blob.push_str(&format!(
            "{}  NR5G ML1 Searcher Measurement\n  SS-RSRP : {} dBm\n\n",
            time(1000 + 1000 * i),
            -90.0 - i as f64
        ));
        blob.push_str(&format!(
            "{}  MAC DLSCH Delivery Status\n  | 0 | 1432 | {} |\n\n",
            time(1500 + 1000 * i),
            100_000 + 50_000 * i
        ));
    }
    blob
}

fn cellprep() -> Command {
    Command::cargo_bin("cellprep").unwrap()
}

#[test]
fn process_writes_aligned_json_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("trial.txt");
    fs::write(&log, sample_dump()).unwrap();

    let output = cellprep()
        .args(["process", "--tech", "SA", "--interval", "500", "--min-points", "2"])
        .arg(&log)
        .assert()
        .success()
        .stderr(predicate::str::contains("kept 1 of 1 sessions"))
        .get_output()
        .stdout
        .clone();

    let data: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let pairs = data["SA"].as_array().unwrap();
    assert_eq!(pairs.len(), 1);

    let bandwidth = pairs[0]["bandwidth"].as_array().unwrap();
    let rsrp = pairs[0]["rsrp"].as_array().unwrap();
    assert_eq!(bandwidth.len(), rsrp.len());
    assert!(!bandwidth.is_empty());
}

#[test]
fn technology_is_inferred_from_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let lte_dir = dir.path().join("LTE");
    fs::create_dir(&lte_dir).unwrap();
    let log = lte_dir.join("run1.txt");

    // LTE dump: 4G-style measurement records.
    let mut blob = String::new();
    for i in 0..4i64 {
        blob.push_str(&format!(
            "{}  LTE ML1 Connected Mode Meas\n  Inst RSRP : {}\n\n",
            time(1000 + 1000 * i),
            -95.0 + i as f64
        ));
        blob.push_str(&format!(
            "{}  MAC DLSCH Delivery Status\n  | 0 | 1432 | {} |\n\n",
            time(1500 + 1000 * i),
            100_000 + 50_000 * i
        ));
    }
    fs::write(&log, blob).unwrap();

    let output = cellprep()
        .args(["process", "--interval", "500", "--min-points", "2"])
        .arg(&log)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let data: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert!(data.get("LTE").is_some());
}

#[test]
fn unknown_technology_path_requires_the_flag() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("run1.txt");
    fs::write(&log, sample_dump()).unwrap();

    cellprep()
        .arg("process")
        .arg(&log)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot infer technology"));
}

#[test]
fn short_sessions_are_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("trial.txt");
    fs::write(&log, sample_dump()).unwrap();

    // Default min_points is 100; the sample dump is far below it.
    cellprep()
        .args(["process", "--tech", "SA"])
        .arg(&log)
        .assert()
        .success()
        .stderr(predicate::str::contains("kept 0 of 1 sessions"))
        .stderr(predicate::str::contains("1 too short"));
}

#[test]
fn config_file_supplies_defaults_and_flags_override() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("trial.txt");
    fs::write(&log, sample_dump()).unwrap();
    let config = dir.path().join("cellprep.toml");
    fs::write(&config, "interval_ms = 500\nmin_points = 2\n").unwrap();

    cellprep()
        .args(["process", "--tech", "SA", "--config"])
        .arg(&config)
        .arg(&log)
        .assert()
        .success()
        .stderr(predicate::str::contains("kept 1 of 1 sessions"));

    // The flag wins over the file: an impossible minimum drops the session.
    cellprep()
        .args(["process", "--tech", "SA", "--min-points", "1000", "--config"])
        .arg(&config)
        .arg(&log)
        .assert()
        .success()
        .stderr(predicate::str::contains("kept 0 of 1 sessions"));
}

#[test]
fn rejects_a_non_positive_interval() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("trial.txt");
    fs::write(&log, sample_dump()).unwrap();

    cellprep()
        .args(["process", "--tech", "SA", "--interval", "0"])
        .arg(&log)
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be positive"));
}

#[test]
fn output_flag_writes_the_file_instead_of_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("trial.txt");
    fs::write(&log, sample_dump()).unwrap();
    let out = dir.path().join("processed.json");

    cellprep()
        .args(["process", "--tech", "SA", "--interval", "500", "--min-points", "2"])
        .arg(&log)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let data: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert!(data.get("SA").is_some());
}

#[test]
fn completions_cover_the_subcommands() {
    cellprep()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cellprep"));
}
