// tests/config_loading.rs

use std::io::Write;
use std::path::PathBuf;

use robobatch::config::{load_and_validate, ConfigFile, LoggingSection};
use robobatch::errors::BackupError;
use robobatch::logging::resolve_level;
use robobatch::types::{BackupType, LogRotation};
use robobatch_test_utils::builders::{ConfigFileBuilder, TaskConfigBuilder};
use tempfile::{Builder, NamedTempFile};

fn json_file(contents: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn loads_json_config_with_defaults() {
    let file = json_file(
        r#"{
  "backup_tasks": [
    {
      "name": "Documents",
      "source": "C:\\Users\\me\\Documents",
      "destination": "E:\\Backup\\Documents",
      "exclude": ["node_modules", "*.tmp"]
    },
    {
      "source": "C:\\Projects",
      "destination": "E:\\Backup\\Projects",
      "backup_type": "incremental"
    }
  ],
  "logging": { "level": "DEBUG" },
  "robocopy_options": {}
}"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.tasks().len(), 2);
    let docs = &cfg.tasks()[0];
    assert_eq!(docs.display_name(), "Documents");
    assert_eq!(docs.backup_type, BackupType::Full);
    assert_eq!(docs.exclude, vec!["node_modules", "*.tmp"]);

    let projects = &cfg.tasks()[1];
    assert_eq!(projects.display_name(), "Unnamed Task");
    assert_eq!(projects.backup_type, BackupType::Incremental);
    assert!(projects.exclude.is_empty());

    assert_eq!(cfg.robocopy_options().retry_count, 3);
    assert_eq!(cfg.robocopy_options().wait_time, 5);
    assert_eq!(cfg.robocopy_options().executable, "robocopy");
    assert_eq!(cfg.logging().level, "DEBUG");
    assert_eq!(cfg.logging().file, PathBuf::from("logs").join("backup.log"));
    assert_eq!(cfg.logging().max_files, 5);
    assert_eq!(cfg.runner().max_parallel, 1);
}

#[test]
fn loads_toml_config() {
    let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
    write!(
        file,
        r#"
[logging]
level = "warning"
file = "var/robobatch.log"
rotation = "Never"

[robocopy_options]
retry_count = 1
wait_time = 0

[runner]
max_parallel = 2

[[backup_tasks]]
name = "Music"
source = "/home/me/music"
destination = "/mnt/backup/music"
backup_type = "full"
exclude = ["cache"]
"#
    )
    .unwrap();

    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.tasks()[0].display_name(), "Music");
    assert_eq!(cfg.robocopy_options().retry_count, 1);
    assert_eq!(cfg.robocopy_options().wait_time, 0);
    assert_eq!(cfg.logging().rotation, LogRotation::Never);
    assert_eq!(cfg.runner().max_parallel, 2);
}

#[test]
fn missing_required_keys_are_listed() {
    let file = json_file(r#"{ "backup_tasks": [] }"#);

    match load_and_validate(file.path()) {
        Err(BackupError::ConfigError(msg)) => {
            assert!(msg.contains("logging"));
            assert!(msg.contains("robocopy_options"));
            assert!(!msg.contains("backup_tasks"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn malformed_json_is_a_json_error() {
    let file = json_file(r#"{ "backup_tasks": [ "#);

    match load_and_validate(file.path()) {
        Err(BackupError::JsonError(_)) => {}
        Err(e) => panic!("Expected JsonError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn task_without_source_is_rejected() {
    let file = json_file(
        r#"{
  "backup_tasks": [ { "destination": "/dst" } ],
  "logging": {},
  "robocopy_options": {}
}"#,
    );

    let err = load_and_validate(file.path()).unwrap_err();
    assert!(err.to_string().contains("source"));
}

#[test]
fn negative_retry_count_is_rejected() {
    let file = json_file(
        r#"{
  "backup_tasks": [],
  "logging": {},
  "robocopy_options": { "retry_count": -1 }
}"#,
    );

    assert!(matches!(
        load_and_validate(file.path()),
        Err(BackupError::JsonError(_))
    ));
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    match load_and_validate(&path) {
        Err(BackupError::ConfigError(msg)) => {
            assert!(msg.contains("configuration file not found"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn unknown_backup_type_is_kept_for_the_executor() {
    let file = json_file(
        r#"{
  "backup_tasks": [ { "source": "/a", "destination": "/b", "backup_type": "differential" } ],
  "logging": {},
  "robocopy_options": {}
}"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();
    assert_eq!(
        cfg.tasks()[0].backup_type,
        BackupType::Unrecognized("differential".to_string())
    );
}

#[test]
fn bad_task_paths_do_not_block_loading() {
    let file = json_file(
        r#"{
  "backup_tasks": [
    { "name": "bad", "source": "", "destination": "/out" },
    { "name": "same", "source": "/data", "destination": "/data" },
    { "name": "good", "source": "/a", "destination": "/b" }
  ],
  "logging": {},
  "robocopy_options": {}
}"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();
    let names: Vec<_> = cfg.tasks().iter().map(|t| t.display_name()).collect();
    assert_eq!(names, vec!["bad", "same", "good"]);
}

#[test]
fn unknown_log_level_loads_and_resolves_to_info() {
    for level in ["NOTSET", "FATAL", "VERBOSE"] {
        let raw = ConfigFileBuilder::new()
            .with_task(TaskConfigBuilder::new("/a", "/b").build())
            .with_logging(LoggingSection {
                level: level.to_string(),
                ..LoggingSection::default()
            })
            .build_raw();

        let cfg = ConfigFile::try_from(raw).unwrap();
        assert_eq!(cfg.logging().level, level);
    }

    assert_eq!(resolve_level(None, None, "VERBOSE"), tracing::Level::INFO);
    assert_eq!(resolve_level(None, None, "FATAL"), tracing::Level::ERROR);
    assert_eq!(resolve_level(None, None, "NOTSET"), tracing::Level::TRACE);
}

#[test]
fn zero_max_files_is_rejected() {
    let raw = ConfigFileBuilder::new()
        .with_logging(LoggingSection {
            max_files: 0,
            ..LoggingSection::default()
        })
        .build_raw();

    match ConfigFile::try_from(raw) {
        Err(BackupError::ConfigError(msg)) => assert!(msg.contains("logging.max_files")),
        other => panic!("Expected ConfigError, got: {:?}", other.map(|_| ())),
    }
}
