//! Integration tests for CLI output
//!
//! These run the `geodrill` binary against a fixture file and check the JSON it prints.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const FIXTURE: &str = r#"{
    "kpi": {"total_enrolments": 1000, "total_updates": 400, "operational_ratio": 0.4, "data_quality_index": 98.5},
    "geo": [
        {"name": "Maharashtra", "value": 700},
        {"name": "Odisha", "value": 4200}
    ],
    "states": {
        "Maharashtra": {
            "kpi": {"total_enrolments": 700, "total_updates": 200, "operational_ratio": 0.29, "data_quality_index": 98.5},
            "geo": [{"name": "Pune", "value": 500}, {"name": "Nagpur", "value": 200}],
            "districts": {
                "Pune": {"kpi": {"total_enrolments": 500, "total_updates": 150, "operational_ratio": 0.3, "data_quality_index": 98.5}}
            }
        }
    }
}"#;

const GEOMETRY: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {"type": "Feature", "properties": {"st_nm": "Orissa"}, "geometry": null},
        {"type": "Feature", "properties": {"st_nm": "Maharashtra"}, "geometry": null},
        {"type": "Feature", "properties": {"st_nm": "Goa"}, "geometry": null}
    ]
}"#;

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn geodrill(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_geodrill"))
        .current_dir(dir)
        .env_remove("GEODRILL_API_BASE")
        .env_remove("GEODRILL_TIMEOUT_MS")
        .env_remove("GEODRILL_NAME_MAP")
        .env("RUST_LOG", "error")
        .args(args)
        .output()
        .expect("Failed to execute geodrill")
}

fn json_stdout(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Output should be valid JSON")
}

#[test]
fn test_snapshot_drills_into_district() {
    let dir = TempDir::new().unwrap();
    let fixture = write(dir.path(), "fixture.json", FIXTURE);

    let output = geodrill(
        dir.path(),
        &[
            "snapshot",
            "--state",
            "Maharashtra",
            "--district",
            "Pune",
            "--json",
            "--fixture",
            fixture.to_str().unwrap(),
        ],
    );
    assert!(output.status.success());

    let parsed = json_stdout(&output);
    assert_eq!(parsed["status"], "success");
    let data = &parsed["data"];
    assert_eq!(data["view"]["level"], "district");
    assert_eq!(data["view"]["state"], "Maharashtra");
    assert_eq!(data["view"]["district"], "Pune");
    assert_eq!(data["kpi"]["total_enrolments"], 500);
    assert_eq!(data["table_title"], "DISTRICTS OF Maharashtra");
    assert_eq!(data["table_data"].as_array().unwrap().len(), 2);
}

#[test]
fn test_snapshot_accepts_map_alias_for_state() {
    let dir = TempDir::new().unwrap();
    let fixture = write(dir.path(), "fixture.json", FIXTURE);

    let output = geodrill(
        dir.path(),
        &["snapshot", "--state", "Orissa", "--json", "--fixture", fixture.to_str().unwrap()],
    );
    assert!(output.status.success());
    assert_eq!(json_stdout(&output)["data"]["view"]["state"], "Odisha");
}

#[test]
fn test_map_resolves_labels_and_marks_selection() {
    let dir = TempDir::new().unwrap();
    let fixture = write(dir.path(), "fixture.json", FIXTURE);
    let geometry = write(dir.path(), "states.geojson", GEOMETRY);

    let output = geodrill(
        dir.path(),
        &[
            "map",
            "--geometry",
            geometry.to_str().unwrap(),
            "--state",
            "Maharashtra",
            "--json",
            "--fixture",
            fixture.to_str().unwrap(),
        ],
    );
    assert!(output.status.success());

    let parsed = json_stdout(&output);
    let regions = parsed["data"]["regions"].as_array().unwrap();
    assert_eq!(regions.len(), 3);
    assert_eq!(regions[0]["name"], "Odisha");
    assert_eq!(regions[0]["value"], 4200);
    assert_eq!(regions[1]["selected"], true);
    assert_eq!(regions[2]["value"], 0);
    assert_eq!(regions[2]["fill"], "#fffbeb");
}

#[test]
fn test_names_resolve_alias() {
    let dir = TempDir::new().unwrap();
    let output = geodrill(dir.path(), &["names", "resolve", "Orissa", "--json"]);

    assert!(output.status.success());
    let parsed = json_stdout(&output);
    assert_eq!(parsed["data"]["canonical"], "Odisha");
    assert_eq!(parsed["data"]["is_canonical"], true);
}

#[test]
fn test_names_check_fails_on_open_table() {
    let dir = TempDir::new().unwrap();
    let names = write(dir.path(), "names.json", r#"{"Orissa": "Odisha"}"#);

    let output = geodrill(
        dir.path(),
        &["names", "check", "--json", "--name-map", names.to_str().unwrap()],
    );

    assert!(!output.status.success());
    let parsed = json_stdout(&output);
    assert_eq!(parsed["data"]["defects"][0]["raw"], "Orissa");
}

#[test]
fn test_config_reports_sources() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "geodrill.toml", "api_base = \"http://stats.local/api/v1/\"\n");

    let output = geodrill(dir.path(), &["config", "--timeout-ms", "2500", "--json"]);
    assert!(output.status.success());

    let parsed = json_stdout(&output);
    let rows = parsed["data"].as_array().unwrap();
    let row = |key: &str| rows.iter().find(|r| r["key"] == key).unwrap().clone();

    assert_eq!(row("api_base")["value"], "http://stats.local/api/v1");
    assert_eq!(row("api_base")["source"], "File");
    assert_eq!(row("timeout_ms")["value"], "2500");
    assert_eq!(row("timeout_ms")["source"], "Cli");
    assert_eq!(row("name_map")["source"], "Default");
}

#[test]
fn test_missing_explicit_config_fails() {
    let dir = TempDir::new().unwrap();
    let output = geodrill(dir.path(), &["config", "--config", "nope.toml"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("configuration"));
}
