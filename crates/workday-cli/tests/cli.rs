use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn workday() -> Command {
    Command::cargo_bin("workday").unwrap()
}

#[test]
fn test_offset_boundary_wrap() {
    workday()
        .args(["offset", "--start", "2004-06-01T15:07", "--days", "0.25"])
        .assert()
        .success()
        .stdout("2004-06-02 09:07:00\n");
}

#[test]
fn test_offset_negative_with_holidays() {
    workday()
        .args([
            "offset",
            "--start",
            "2004-05-24 18:05",
            "--days",
            "-5.5",
            "--recurring",
            "05-17",
            "--holiday",
            "2004-05-27",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("2004-05-14 12:00"));
}

#[test]
fn test_offset_json_output() {
    let output = workday()
        .args(["offset", "--start", "2004-06-01T04:00", "--days=0.5", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["start"], "2004-06-01 04:00:00");
    assert_eq!(value["offset_days"], 0.5);
    assert_eq!(value["resolved"], "2004-06-01 12:00:00");
}

#[test]
fn test_offset_with_config_file() {
    let mut path = std::env::temp_dir();
    path.push(format!("workday-cli-test-{}.json", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    write!(
        file,
        r#"{{ "holidays": [ {{ "month": 5, "day": 17 }}, {{ "date": "2004-05-27" }} ] }}"#
    )
    .unwrap();
    drop(file);

    let assert = workday()
        .args(["offset", "--start", "2004-05-24T19:03", "--days", "44.723656", "--config"])
        .arg(&path)
        .assert();
    std::fs::remove_file(&path).unwrap();

    assert
        .success()
        .stdout(predicate::str::starts_with("2004-07-27 13:47"));
}

#[test]
fn test_check_workday() {
    workday()
        .args(["check", "--date", "2004-05-18"])
        .assert()
        .success()
        .stdout("workday\n");

    workday()
        .args(["check", "--date", "2004-05-17", "--recurring", "05-17"])
        .assert()
        .success()
        .stdout("non-workday\n");
}

#[test]
fn test_check_json_output() {
    let output = workday()
        .args(["check", "--date", "2004-05-22", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["weekday"], "Saturday");
    assert_eq!(value["workday"], false);
}

#[test]
fn test_inverted_window_is_rejected() {
    workday()
        .args([
            "offset",
            "--start",
            "2004-06-01T10:00",
            "--days",
            "1",
            "--workday-start",
            "16:00",
            "--workday-end",
            "08:00",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid workday window"));
}

#[test]
fn test_invalid_holiday_is_rejected() {
    workday()
        .args(["check", "--date", "2004-05-18", "--recurring", "04-31"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid holiday"));
}

#[test]
fn test_missing_config_file() {
    workday()
        .args(["check", "--date", "2004-05-18", "--config", "/nonexistent/calendar.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn test_invalid_timestamp() {
    workday()
        .args(["offset", "--start", "yesterday", "--days", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid timestamp"));
}
