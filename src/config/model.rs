// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::types::{BackupType, LogRotation};

/// Configuration exactly as deserialized from disk.
///
/// Mirrors a file like:
///
/// ```json
/// {
///   "backup_tasks": [
///     {
///       "name": "Documents",
///       "source": "C:\\Users\\me\\Documents",
///       "destination": "E:\\Backup\\Documents",
///       "backup_type": "full",
///       "exclude": ["node_modules", "*.tmp"]
///     }
///   ],
///   "logging": { "level": "INFO", "file": "logs/backup.log" },
///   "robocopy_options": { "retry_count": 3, "wait_time": 5 }
/// }
/// ```
///
/// The three top-level keys above are required, but they are `Option`s here
/// so validation can report every missing key at once. Convert into
/// [`ConfigFile`] with `TryFrom` (see `validate.rs`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub backup_tasks: Option<Vec<TaskConfig>>,

    #[serde(default)]
    pub logging: Option<LoggingSection>,

    #[serde(default)]
    pub robocopy_options: Option<RobocopyOptions>,

    /// Optional `runner` section; defaults to sequential execution.
    #[serde(default)]
    pub runner: RunnerSection,
}

/// Validated configuration.
///
/// Only constructed through `TryFrom<RawConfigFile>`, so holders can rely on
/// every invariant checked in `validate.rs`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    backup_tasks: Vec<TaskConfig>,
    logging: LoggingSection,
    robocopy_options: RobocopyOptions,
    runner: RunnerSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        backup_tasks: Vec<TaskConfig>,
        logging: LoggingSection,
        robocopy_options: RobocopyOptions,
        runner: RunnerSection,
    ) -> Self {
        Self {
            backup_tasks,
            logging,
            robocopy_options,
            runner,
        }
    }

    pub fn tasks(&self) -> &[TaskConfig] {
        &self.backup_tasks
    }

    pub fn logging(&self) -> &LoggingSection {
        &self.logging
    }

    pub fn robocopy_options(&self) -> &RobocopyOptions {
        &self.robocopy_options
    }

    pub fn runner(&self) -> &RunnerSection {
        &self.runner
    }
}

/// One entry of `backup_tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskConfig {
    /// Display label; see [`TaskConfig::display_name`].
    #[serde(default)]
    pub name: Option<String>,

    /// Directory to back up. Must exist when the task runs.
    pub source: PathBuf,

    /// Backup target. Created (with parents) when missing.
    pub destination: PathBuf,

    #[serde(default)]
    pub backup_type: BackupType,

    /// Directory names and file name patterns to skip.
    #[serde(default)]
    pub exclude: Vec<String>,
}

pub const UNNAMED_TASK: &str = "Unnamed Task";

impl TaskConfig {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNNAMED_TASK)
    }
}

/// `robocopy_options` section, shared by every task.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RobocopyOptions {
    /// Retries per failed file operation (`/R:n`).
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Seconds between retries (`/W:n`).
    #[serde(default = "default_wait_time")]
    pub wait_time: u32,

    /// Program name or path of the mirroring tool.
    #[serde(default = "default_executable")]
    pub executable: String,
}

fn default_retry_count() -> u32 {
    3
}

fn default_wait_time() -> u32 {
    5
}

fn default_executable() -> String {
    "robocopy".to_string()
}

impl Default for RobocopyOptions {
    fn default() -> Self {
        Self {
            retry_count: default_retry_count(),
            wait_time: default_wait_time(),
            executable: default_executable(),
        }
    }
}

/// `logging` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingSection {
    /// Level name (`DEBUG`, `INFO`, `WARNING`, `ERROR`, ...). Case-insensitive.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path; its directory is created on startup.
    #[serde(default = "default_log_file")]
    pub file: PathBuf,

    #[serde(default)]
    pub rotation: LogRotation,

    /// Number of rotated log files to keep.
    #[serde(default = "default_max_files")]
    pub max_files: usize,

    /// Also log to stderr.
    #[serde(default = "default_console")]
    pub console: bool,
}

fn default_log_level() -> String {
    "INFO".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("logs").join("backup.log")
}

fn default_max_files() -> usize {
    5
}

fn default_console() -> bool {
    true
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
            rotation: LogRotation::default(),
            max_files: default_max_files(),
            console: default_console(),
        }
    }
}

/// `runner` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunnerSection {
    /// Maximum number of tasks running at the same time. `1` runs tasks
    /// strictly one after another in list order.
    #[serde(default = "default_max_parallel")]
    pub max_parallel: usize,
}

fn default_max_parallel() -> usize {
    1
}

impl Default for RunnerSection {
    fn default() -> Self {
        Self {
            max_parallel: default_max_parallel(),
        }
    }
}
