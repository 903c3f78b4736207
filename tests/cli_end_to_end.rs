// tests/cli_end_to_end.rs

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::json;

fn robobatch() -> Command {
    Command::new(env!("CARGO_BIN_EXE_robobatch"))
}

/// Stand-in for robocopy that records its arguments and exits with 1.
fn write_fake_tool(dir: &Path) -> PathBuf {
    let script = dir.join("fake-robocopy");
    std::fs::write(
        &script,
        "#!/bin/sh\necho \"$@\" >> \"$(dirname \"$0\")/calls.txt\"\nexit 1\n",
    )
    .unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    script
}

fn write_config(dir: &Path, tool: &Path, tasks: serde_json::Value) -> PathBuf {
    let config = json!({
        "backup_tasks": tasks,
        "logging": {
            "level": "INFO",
            "file": dir.join("logs").join("backup.log"),
            "rotation": "never",
            "console": false
        },
        "robocopy_options": {
            "retry_count": 2,
            "wait_time": 1,
            "executable": tool
        }
    });
    let path = dir.join("config.json");
    std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
    path
}

#[test]
fn run_backup_exits_zero_when_every_task_succeeds() {
    let tmp = tempfile::tempdir().unwrap();
    let tool = write_fake_tool(tmp.path());
    let source = tmp.path().join("docs");
    std::fs::create_dir(&source).unwrap();
    let destination = tmp.path().join("backup").join("docs");

    let config = write_config(
        tmp.path(),
        &tool,
        json!([{ "name": "Docs", "source": source, "destination": destination, "exclude": ["tmp", "*.bak"] }]),
    );

    let status = robobatch()
        .args(["--run-backup", "--config"])
        .arg(&config)
        .status()
        .unwrap();

    assert_eq!(status.code(), Some(0));
    assert!(destination.is_dir());

    let calls = std::fs::read_to_string(tmp.path().join("calls.txt")).unwrap();
    assert!(calls.contains("/MIR /Z /TS /NP /NDL /NFL /R:2 /W:1 /XD tmp /XF *.bak"));

    let log = std::fs::read_to_string(tmp.path().join("logs").join("backup.log")).unwrap();
    assert!(log.contains("all backup tasks completed successfully"));
}

#[test]
fn run_backup_exits_one_when_a_source_is_missing() {
    let tmp = tempfile::tempdir().unwrap();
    let tool = write_fake_tool(tmp.path());
    let present = tmp.path().join("present");
    std::fs::create_dir(&present).unwrap();

    let config = write_config(
        tmp.path(),
        &tool,
        json!([
            { "name": "Present", "source": present, "destination": tmp.path().join("out1") },
            { "name": "Missing", "source": tmp.path().join("missing"), "destination": tmp.path().join("out2") }
        ]),
    );

    let status = robobatch()
        .args(["--run-backup", "--config"])
        .arg(&config)
        .status()
        .unwrap();

    assert_eq!(status.code(), Some(1));
    let log = std::fs::read_to_string(tmp.path().join("logs").join("backup.log")).unwrap();
    assert!(log.contains("source directory does not exist"));
    assert!(log.contains("1 task(s) failed"));
}

#[test]
fn invalid_config_is_a_critical_error() {
    let tmp = tempfile::tempdir().unwrap();
    let config = tmp.path().join("config.json");
    std::fs::write(&config, r#"{ "backup_tasks": [] }"#).unwrap();

    let output = robobatch()
        .args(["--run-backup", "--config"])
        .arg(&config)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Critical Error"));
    assert!(stderr.contains("missing required configuration keys"));
}

#[test]
fn dry_run_prints_commands_without_running() {
    let tmp = tempfile::tempdir().unwrap();
    let tool = write_fake_tool(tmp.path());
    let source = tmp.path().join("docs");
    std::fs::create_dir(&source).unwrap();

    let config = write_config(
        tmp.path(),
        &tool,
        json!([{ "source": source, "destination": tmp.path().join("dst"), "backup_type": "incremental" }]),
    );

    let output = robobatch()
        .args(["--dry-run", "--config"])
        .arg(&config)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Unnamed Task"));
    assert!(stdout.contains("/E /Z /TS /NP /NDL /NFL /R:2 /W:1"));
    assert!(!tmp.path().join("calls.txt").exists());
}

#[test]
fn without_run_flag_prints_notice_and_exits_zero() {
    let output = robobatch().output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("--run-backup"));
}
