use std::fs;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("tinyframe"))
}

fn repo_root() -> std::path::PathBuf {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(|p| p.parent())
        .expect("repo root")
        .to_path_buf()
}

fn golden_event(case: &str) -> std::path::PathBuf {
    repo_root()
        .join("tests")
        .join("golden")
        .join(case)
        .join("event.json")
}

fn stdout_lines(output: &std::process::Output) -> Vec<Value> {
    String::from_utf8(output.stdout.clone())
        .expect("utf8 stdout")
        .lines()
        .map(|line| serde_json::from_str(line).expect("json line"))
        .collect()
}

#[test]
fn help_lists_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("decode").and(contains("handle")));
    cmd().arg("handle").arg("--help").assert().success();
}

#[test]
fn decode_prints_sensor_data() {
    let assert = cmd()
        .arg("decode")
        .arg("ost")
        .arg("C00A0000000000000000140A")
        .assert()
        .success();
    let value: Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid json");
    assert_eq!(value["Status_Sensor"], 1);
    assert_eq!(value["Alarma_Geocerca"], 1);
    assert_eq!(value["Vpanel"], 2.0);
    assert_eq!(value["Pbat"], 10);
    assert!(value["gps"].is_null());
}

#[test]
fn decode_swx_pretty() {
    cmd()
        .arg("decode")
        .arg("swx")
        .arg("A1B2C355010000CC41026666C5420385EB0141048FC2FD40")
        .arg("--pretty")
        .assert()
        .success()
        .stdout(contains("\"Temperature (C°)\": \"25.50\""));
}

#[test]
fn decode_wrong_length_shows_error_and_hint() {
    cmd()
        .arg("decode")
        .arg("ost")
        .arg("C00A")
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")).and(contains("24 hex digits")));
}

#[test]
fn decode_non_hex_is_rejected() {
    cmd()
        .arg("decode")
        .arg("ost")
        .arg("C00A000000000000000014ZZ")
        .assert()
        .failure()
        .stderr(contains("invalid hex character"));
}

#[test]
fn pretty_and_compact_conflict() {
    cmd()
        .arg("decode")
        .arg("ost")
        .arg("C00A0000000000000000140A")
        .arg("--pretty")
        .arg("--compact")
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn handle_publishes_to_default_topic() {
    let assert = cmd()
        .arg("handle")
        .arg("ost")
        .arg(golden_event("ost"))
        .assert()
        .success();
    let lines = stdout_lines(assert.get_output());
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["topic"], "ost/decoded/data");
    assert_eq!(lines[0]["qos"], 0);
    assert_eq!(lines[0]["payload"]["Fcnt"], 1234);
    assert_eq!(lines[0]["payload"]["sensor_data"]["Pasos"], 300);
}

#[test]
fn handle_uses_configured_route() {
    let temp = TempDir::new().expect("tempdir");
    let config = temp.path().join("tinyframe.toml");
    fs::write(&config, "[routes.swx]\ntopic = \"farm/water\"\nqos = 1\n").expect("write config");

    let assert = cmd()
        .arg("--config")
        .arg(&config)
        .arg("handle")
        .arg("swx")
        .arg(golden_event("swx"))
        .assert()
        .success();
    let lines = stdout_lines(assert.get_output());
    assert_eq!(lines[0]["topic"], "farm/water");
    assert_eq!(lines[0]["qos"], 1);
}

#[test]
fn invalid_config_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    let config = temp.path().join("bad.toml");
    fs::write(&config, "[routes.ost]\nqos = 2\n").expect("write config");

    cmd()
        .arg("--config")
        .arg(&config)
        .arg("decode")
        .arg("ost")
        .arg("C00A0000000000000000140A")
        .assert()
        .failure()
        .stderr(contains("qos must be 0 or 1"));
}

#[test]
fn handle_reads_flat_uplink_from_stdin() {
    let assert = cmd()
        .arg("handle")
        .arg("ost")
        .arg("-")
        .arg("--flat")
        .write_stdin(r#"{"EUI": "A", "fcnt": 5, "data": "C00A0000000000000000140A"}"#)
        .assert()
        .success();
    let lines = stdout_lines(assert.get_output());
    assert_eq!(lines[0]["payload"]["Dev_EUI"], "A");
    assert!(lines[0]["payload"].get("Rssi").is_none());
}

#[test]
fn handle_missing_metadata_fails_without_publishing() {
    cmd()
        .arg("handle")
        .arg("ost")
        .arg("-")
        .arg("--flat")
        .write_stdin(r#"{"fcnt": 5, "data": "C00A0000000000000000140A"}"#)
        .assert()
        .failure()
        .stdout(predicates::str::is_empty())
        .stderr(contains("missing required field: EUI"));
}

#[test]
fn handle_glob_stops_at_first_failure_unless_keep_going() {
    let temp = TempDir::new().expect("tempdir");
    let good = fs::read_to_string(golden_event("ost")).expect("read event");
    let bad = fs::read_to_string(golden_event("ost_bad_frame")).expect("read event");
    fs::write(temp.path().join("a.json"), &bad).expect("write");
    fs::write(temp.path().join("b.json"), &good).expect("write");
    let pattern = temp.path().join("*.json");

    cmd()
        .arg("handle")
        .arg("ost")
        .arg(&pattern)
        .assert()
        .failure()
        .stdout(predicates::str::is_empty())
        .stderr(contains("wrong frame length"));

    let assert = cmd()
        .arg("handle")
        .arg("ost")
        .arg(&pattern)
        .arg("--keep-going")
        .assert()
        .failure()
        .stderr(contains("1 of 2 events failed"));
    assert_eq!(stdout_lines(assert.get_output()).len(), 1);
}

#[test]
fn handle_missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.json");

    cmd()
        .arg("handle")
        .arg("swx")
        .arg(missing)
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn quiet_suppresses_info_logs() {
    cmd()
        .arg("handle")
        .arg("ost")
        .arg(golden_event("ost"))
        .arg("--quiet")
        .assert()
        .success()
        .stderr(contains("envelope published").not());
}
