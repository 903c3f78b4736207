use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// How a task copies `source` into `destination`.
///
/// - `Full`: destination becomes an exact mirror of source, extra files in
///   the destination are removed.
/// - `Incremental`: recursive copy including empty subdirectories; extra
///   destination content is left alone.
/// - `Unrecognized`: any other string from the config. No mode flag is
///   emitted for it, so the tool falls back to a plain top-level copy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum BackupType {
    Full,
    Incremental,
    Unrecognized(String),
}

impl Default for BackupType {
    fn default() -> Self {
        BackupType::Full
    }
}

impl From<String> for BackupType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "full" => BackupType::Full,
            "incremental" => BackupType::Incremental,
            _ => BackupType::Unrecognized(s),
        }
    }
}

impl From<&str> for BackupType {
    fn from(s: &str) -> Self {
        BackupType::from(s.to_string())
    }
}

impl fmt::Display for BackupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackupType::Full => f.write_str("full"),
            BackupType::Incremental => f.write_str("incremental"),
            BackupType::Unrecognized(s) => f.write_str(s),
        }
    }
}

/// Rotation period of the log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum LogRotation {
    Never,
    Minutely,
    Hourly,
    Daily,
}

impl Default for LogRotation {
    fn default() -> Self {
        LogRotation::Daily
    }
}

impl FromStr for LogRotation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "never" => Ok(LogRotation::Never),
            "minutely" => Ok(LogRotation::Minutely),
            "hourly" => Ok(LogRotation::Hourly),
            "daily" => Ok(LogRotation::Daily),
            other => Err(format!(
                "invalid log rotation: {other} (expected \"never\", \"minutely\", \"hourly\" or \"daily\")"
            )),
        }
    }
}

impl TryFrom<String> for LogRotation {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Why a task was marked as failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskFailure {
    /// The source path did not exist; the tool was never launched.
    MissingSource,
    /// The destination did not exist and could not be created.
    DestinationUnavailable(String),
    /// The tool ran and reported a failure status (`None` when the process
    /// ended without an exit code, e.g. killed by a signal).
    ToolFailed(Option<i32>),
    /// The tool could not be launched or waited on.
    LaunchFailed(String),
}

impl fmt::Display for TaskFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskFailure::MissingSource => f.write_str("source does not exist"),
            TaskFailure::DestinationUnavailable(e) => {
                write!(f, "destination could not be created: {e}")
            }
            TaskFailure::ToolFailed(Some(code)) => write!(f, "tool failed with return code {code}"),
            TaskFailure::ToolFailed(None) => f.write_str("tool terminated without a return code"),
            TaskFailure::LaunchFailed(e) => write!(f, "tool could not be executed: {e}"),
        }
    }
}

/// Result of running one backup task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The tool exited with a code in the success band.
    Success(i32),
    Failed(TaskFailure),
}

impl TaskOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TaskOutcome::Success(_))
    }
}
