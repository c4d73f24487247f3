//! End-to-end tests for the neo-watch binary

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::path::Path;

fn write_json(path: &Path, value: &serde_json::Value) {
    std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn eros() -> serde_json::Value {
    json!({
        "id": "2000433",
        "neo_reference_id": "2000433",
        "name": "433 Eros (A898 PA)",
        "orbital_data": { "orbit_determination_date": "2001-01-06 12:00:00" },
        "close_approach_data": [
            {
                "close_approach_date": "2000-01-01",
                "close_approach_date_full": "2000-Jan-01 12:00",
                "relative_velocity": { "kilometers_per_second": "5.5" }
            },
            {
                "close_approach_date": "2002-01-01",
                "close_approach_date_full": "2002-Jan-01 12:00",
                "relative_velocity": { "kilometers_per_second": "6.5" }
            }
        ]
    })
}

fn neo_watch() -> Command {
    let mut cmd = Command::cargo_bin("neo-watch").unwrap();
    cmd.env("RUST_LOG", "off");
    cmd
}

#[test]
fn filter_prints_upcoming_records() {
    let dir = tempfile::tempdir().unwrap();
    let asteroid = dir.path().join("eros.json");
    write_json(&asteroid, &eros());

    neo_watch()
        .args(["filter", "--asteroid"])
        .arg(&asteroid)
        .args(["--historic", "2001-01-05 12:00:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2002-Jan-01 12:00"))
        .stdout(predicate::str::contains("2000-Jan-01 12:00").not());
}

#[test]
fn filter_reports_stale_data() {
    let dir = tempfile::tempdir().unwrap();
    let asteroid = dir.path().join("eros.json");
    write_json(&asteroid, &eros());

    neo_watch()
        .args(["filter", "--explain", "--asteroid"])
        .arg(&asteroid)
        .args(["--historic", "2001-01-06 12:00:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("433 Eros (A898 PA): stale"))
        .stdout(predicate::str::contains("Nothing new for 433 Eros (A898 PA)"));
}

#[test]
fn filter_fails_on_malformed_historic_date() {
    let dir = tempfile::tempdir().unwrap();
    let asteroid = dir.path().join("eros.json");
    write_json(&asteroid, &eros());

    neo_watch()
        .args(["filter", "--asteroid"])
        .arg(&asteroid)
        .args(["--historic", "last tuesday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("historic_orbit_determination_date"));
}

#[test]
fn scan_updates_history_unless_dry_run() {
    let dir = tempfile::tempdir().unwrap();
    let page = dir.path().join("page.json");
    let history = dir.path().join("history.json");
    write_json(&page, &json!({ "near_earth_objects": [eros()] }));

    neo_watch()
        .args(["scan", "--dry-run", "--page"])
        .arg(&page)
        .arg("--history")
        .arg(&history)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 upcoming close approaches"));
    assert!(!history.exists());

    neo_watch()
        .args(["scan", "--page"])
        .arg(&page)
        .arg("--history")
        .arg(&history)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"upcoming\":1"));

    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&history).unwrap()).unwrap();
    assert_eq!(stored["2000433"], "2001-01-06 12:00:00");

    neo_watch()
        .args(["scan", "--page"])
        .arg(&page)
        .arg("--history")
        .arg(&history)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"stale\":1"));
}

#[test]
fn velocity_prints_yearly_table() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("eros.json");
    write_json(&input, &eros());

    neo_watch()
        .args(["velocity", "--input"])
        .arg(&input)
        .args(["--name", "433 Eros (A898 PA)"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2000"))
        .stdout(predicate::str::contains("6.500"));
}

#[test]
fn config_file_is_honoured() {
    let dir = tempfile::tempdir().unwrap();
    let page = dir.path().join("page.json");
    let history = dir.path().join("from-config.json");
    let config = dir.path().join("neo-watch.toml");
    write_json(&page, &json!([eros()]));
    std::fs::write(
        &config,
        format!(
            "[history]\npath = {:?}\nbaseline_orbit_determination_date = \"2001-01-06 12:00:00\"\n",
            history.display().to_string()
        ),
    )
    .unwrap();

    neo_watch()
        .arg("--config")
        .arg(&config)
        .args(["scan", "--page"])
        .arg(&page)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"stale\":1"));
    assert!(!history.exists());
}
