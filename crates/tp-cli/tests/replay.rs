//! End-to-end tests for the replay binary.

use std::io::Write;
use std::process::Command;

use tempfile::TempDir;

fn tp_binary() -> String {
    env!("CARGO_BIN_EXE_tp").to_string()
}

/// Runs `tp` with an isolated home so no user config leaks in.
fn tp_command(temp: &TempDir) -> Command {
    let mut command = Command::new(tp_binary());
    command
        .env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path());
    command
}

fn write_feed(temp: &TempDir, lines: &[&str]) -> std::path::PathBuf {
    let path = temp.path().join("feed.jsonl");
    let mut file = std::fs::File::create(&path).unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    path
}

#[test]
fn replay_restores_titles_after_countdown() {
    let temp = TempDir::new().unwrap();
    let feed = write_feed(
        &temp,
        &[
            r#"{"type":"activated","tab":1}"#,
            r#"{"type":"activated","tab":2}"#,
            r#"{"type":"wait","ms":500}"#,
        ],
    );

    let output = tp_command(&temp)
        .env("TP_TICK_INTERVAL_MS", "10")
        .env("TP_COUNTDOWN", "3")
        .arg("replay")
        .arg("--input")
        .arg(&feed)
        .output()
        .expect("failed to run tp replay");

    assert!(
        output.status.success(),
        "tp replay should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let snapshot: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    // The decorated tab was restored; the active tab was never touched.
    assert_eq!(snapshot["1"]["title"], "Tab 1");
    assert_eq!(snapshot["2"]["title"], "Tab 2");
}

#[test]
fn replay_survives_tab_removal_mid_countdown() {
    let temp = TempDir::new().unwrap();
    let feed = write_feed(
        &temp,
        &[
            r#"{"type":"activated","tab":1}"#,
            r#"{"type":"activated","tab":2}"#,
            r#"{"type":"removed","tab":1}"#,
            r#"{"type":"wait","ms":100}"#,
        ],
    );

    let output = tp_command(&temp)
        .env("TP_TICK_INTERVAL_MS", "10")
        .env("TP_COUNTDOWN", "3")
        .arg("replay")
        .arg("--input")
        .arg(&feed)
        .output()
        .expect("failed to run tp replay");

    assert!(
        output.status.success(),
        "removal mid-countdown must not crash the replay: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let snapshot: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert!(snapshot.get("1").is_some());
}

#[test]
fn replay_rejects_a_malformed_feed() {
    let temp = TempDir::new().unwrap();
    let feed = write_feed(&temp, &[r#"{"type":"activated","tab":1}"#, "not json"]);

    let output = tp_command(&temp)
        .arg("replay")
        .arg("--input")
        .arg(&feed)
        .output()
        .expect("failed to run tp replay");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 2"), "stderr: {stderr}");
}

#[test]
fn profile_prints_the_resolved_configuration() {
    let temp = TempDir::new().unwrap();

    let output = tp_command(&temp)
        .arg("profile")
        .arg("--mode")
        .arg("favicon")
        .output()
        .expect("failed to run tp profile");

    assert!(output.status.success());
    let rendered: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(rendered["mode"], "favicon");
    assert_eq!(rendered["countdown"], 5);
    assert_eq!(rendered["tick_interval_ms"], 2000);
}

#[test]
fn profile_rejects_an_unknown_mode() {
    let temp = TempDir::new().unwrap();

    let output = tp_command(&temp)
        .arg("profile")
        .arg("--mode")
        .arg("badge")
        .output()
        .expect("failed to run tp profile");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid decoration mode"), "stderr: {stderr}");
}

#[test]
fn config_file_sets_the_mode() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("tabpulse.toml");
    std::fs::write(&config_path, "mode = \"favicon\"\n").unwrap();

    let output = tp_command(&temp)
        .arg("--config")
        .arg(&config_path)
        .arg("profile")
        .output()
        .expect("failed to run tp profile");

    assert!(output.status.success());
    let rendered: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(rendered["mode"], "favicon");
}
