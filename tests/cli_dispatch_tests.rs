use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_praktika")
}

fn unique_temp_path(name: &str, extension: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("praktika-{name}-{stamp}.{extension}"))
}

#[test]
fn no_command_prints_usage_and_exits_2() {
    let output = Command::new(bin()).output().expect("binary should run");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: praktika <plan|validate>"));
}

#[test]
fn unknown_command_prints_usage_and_exits_2() {
    let output = Command::new(bin())
        .arg("optimize")
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: praktika"));
}

#[test]
fn plan_without_paths_prints_usage_and_exits_2() {
    let output = Command::new(bin())
        .arg("plan")
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: praktika plan"));
}

#[test]
fn plan_with_missing_config_is_a_fatal_configuration_error() {
    let output = Command::new(bin())
        .args([
            "plan",
            "students.xlsx",
            "staff.xlsx",
            "--config",
            "/nonexistent/config.json",
        ])
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("configuration error"));
}

#[test]
fn plan_rejects_config_with_missing_scoring_key() {
    let path = unique_temp_path("partial-config", "json");
    // travel_thresholds is absent entirely.
    fs::write(
        &path,
        r#"{
            "api_key": "k",
            "school_address": "Paradeplatz 3, 24768 Rendsburg",
            "regional_prefix": "247",
            "scoring": {
                "class_match": 50.0,
                "travel_excellent": 30.0,
                "travel_good": 20.0,
                "travel_acceptable": 10.0,
                "travel_long_penalty": 10.0,
                "travel_very_long_penalty": 25.0,
                "regional": 15.0,
                "continuity": 25.0,
                "over_target_penalty": 20.0
            }
        }"#,
    )
    .expect("fixture should be written");

    let output = Command::new(bin())
        .args(["plan", "students.xlsx", "staff.xlsx", "--config"])
        .arg(&path)
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("configuration error"));

    let _ = fs::remove_file(path);
}

#[test]
fn validate_without_paths_prints_usage_and_exits_2() {
    let output = Command::new(bin())
        .arg("validate")
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: praktika validate"));
}

#[test]
fn validate_reports_unreadable_workbooks_and_exits_1() {
    let output = Command::new(bin())
        .args([
            "validate",
            "/nonexistent/students.xlsx",
            "/nonexistent/staff.xlsx",
        ])
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("students:"));
    assert!(stderr.contains("staff:"));
}
