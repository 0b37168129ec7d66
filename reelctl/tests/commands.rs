use std::fs;

use assert_cmd::{Command, cargo::cargo_bin_cmd};
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

const ENV_VARS: &[&str] = &[
    "REEL_CONFIG_PATH",
    "REEL_CONFIG_JSON",
    "REEL_WRAP_MODE",
    "REEL_VISIBLE_ITEMS",
    "REEL_TRANSITION_DURATION",
    "REEL_MAX_SPEED",
    "REEL_GUARD_DURING_TRANSITION",
];

/// `reelctl` running in an empty directory with no reel env vars.
fn reelctl(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("reelctl");
    cmd.current_dir(dir.path());
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn json_lines(stdout: &[u8]) -> Vec<Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("json line"))
        .collect()
}

#[test]
fn plan_reports_infinite_pool() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = reelctl(&dir)
        .args(["--infinite", "--items", "5", "plan"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let plan: Value = serde_json::from_slice(&output).expect("plan json");
    assert_eq!(plan["copies_per_side"], 1);
    assert_eq!(plan["slot_count"], 15);
    assert_eq!(plan["initial_index"], 5);
    assert_eq!(plan["bounds"], serde_json::json!([0, 14]));
    assert!(plan.get("slots").is_none());
}

#[test]
fn config_file_drives_plan() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("reel.toml"),
        "[carousel]\nvisible_items = 2\n\n[track]\nitems = 6\n",
    )
    .expect("write config");

    let output = reelctl(&dir)
        .args(["plan", "--slots"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let plan: Value = serde_json::from_slice(&output).expect("plan json");
    assert_eq!(plan["wrap_mode"], "finite");
    assert_eq!(plan["bounds"], serde_json::json!([0, 4]));
    assert_eq!(plan["slots"].as_array().map(Vec::len), Some(6));
    assert_eq!(plan["slots"][0]["width_percent"], 50.0);
}

#[test]
fn config_command_prints_effective_toml() {
    let dir = tempfile::tempdir().expect("tempdir");
    reelctl(&dir)
        .env("REEL_TRANSITION_DURATION", "450ms")
        .args(["--infinite", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wrap_mode = \"infinite\""))
        .stdout(predicate::str::contains("transition_duration = \"450ms\""));
}

#[test]
fn invalid_override_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    reelctl(&dir)
        .args(["--visible-items", "0", "plan"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("visible_items must be at least 1"));
}

#[test]
fn simulate_replays_script_as_json_lines() {
    let dir = tempfile::tempdir().expect("tempdir");
    let script = dir.path().join("script.json");
    fs::write(
        &script,
        r#"{
            "items": 5,
            "viewport_width": 600,
            "steps": [
                {"op": "drag", "movement_x": -300},
                {"op": "release", "movement_x": -1440},
                {"op": "wait", "duration": "120ms"},
                {"op": "prev"}
            ]
        }"#,
    )
    .expect("write script");

    let output = reelctl(&dir)
        .env("REEL_TRANSITION_DURATION", "40ms")
        .args(["--infinite", "simulate", "--renderer", "silent", "--script"])
        .arg(&script)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let events = json_lines(&output);

    let first = &events[0];
    assert_eq!(first["event"], "frame");
    assert_eq!(first["index"], 5);

    let live: Vec<&Value> = events
        .iter()
        .filter(|e| e["event"] == "live")
        .map(|e| &e["offset"])
        .collect();
    assert_eq!(live, vec![&Value::from(-3300.0), &Value::Null]);

    let done = events.last().expect("done event");
    assert_eq!(done["event"], "done");
    assert_eq!(done["index"], 6);
    assert_eq!(done["logical_index"], 1);
    assert_eq!(done["transitioning"], true);
}
