// src/exec/command.rs

//! Translation of a backup task into a robocopy argument list.
//!
//! Pure: the same task and options always produce the same arguments. Path
//! existence is checked by the caller (`task_runner`), not here.

use crate::config::{RobocopyOptions, TaskConfig};
use crate::types::BackupType;

/// Mirror a directory tree, deleting destination files that no longer exist
/// in the source.
pub const MIRROR_FLAG: &str = "/MIR";
/// Copy subdirectories, including empty ones.
pub const RECURSIVE_FLAG: &str = "/E";
/// Exclude directories by name.
pub const EXCLUDE_DIRS_FLAG: &str = "/XD";
/// Exclude files by name or wildcard.
pub const EXCLUDE_FILES_FLAG: &str = "/XF";

/// Restartable mode, timestamps, then no progress / directory list / file list.
pub const COMMON_FLAGS: [&str; 5] = ["/Z", "/TS", "/NP", "/NDL", "/NFL"];

/// Build the full argument vector, tool name first.
///
/// Layout: `tool source destination [mode] common... /R:n /W:n [/XD dirs...] [/XF files...]`.
pub fn build_command(task: &TaskConfig, options: &RobocopyOptions) -> Vec<String> {
    let mut cmd = vec![
        options.executable.clone(),
        task.source.to_string_lossy().into_owned(),
        task.destination.to_string_lossy().into_owned(),
    ];

    if let Some(flag) = mode_flag(&task.backup_type) {
        cmd.push(flag.to_string());
    }

    cmd.extend(COMMON_FLAGS.iter().map(|f| f.to_string()));

    cmd.push(format!("/R:{}", options.retry_count));
    cmd.push(format!("/W:{}", options.wait_time));

    let (dirs, files) = partition_excludes(&task.exclude);
    if !dirs.is_empty() {
        cmd.push(EXCLUDE_DIRS_FLAG.to_string());
        cmd.extend(dirs);
    }
    if !files.is_empty() {
        cmd.push(EXCLUDE_FILES_FLAG.to_string());
        cmd.extend(files);
    }

    cmd
}

/// Mode flag for a backup type; unrecognized types get none.
pub fn mode_flag(backup_type: &BackupType) -> Option<&'static str> {
    match backup_type {
        BackupType::Full => Some(MIRROR_FLAG),
        BackupType::Incremental => Some(RECURSIVE_FLAG),
        BackupType::Unrecognized(_) => None,
    }
}

/// Split exclusions into `(directory names, file patterns)`.
///
/// An item is a file pattern when it starts with `*` or contains a `.`
/// anywhere; otherwise it is a directory name. A directory literally named
/// `my.backup` therefore lands in the file bucket. Relative order is kept
/// within each bucket.
pub fn partition_excludes(exclude: &[String]) -> (Vec<String>, Vec<String>) {
    exclude
        .iter()
        .cloned()
        .partition(|item| !is_file_pattern(item))
}

pub fn is_file_pattern(item: &str) -> bool {
    item.starts_with('*') || item.contains('.')
}

/// Render an argument vector as a single line for logging.
///
/// Arguments containing whitespace are double-quoted; the result is for
/// humans only and never re-parsed.
pub fn render_command_line(argv: &[String]) -> String {
    argv.iter()
        .map(|arg| {
            if arg.is_empty() || arg.chars().any(char::is_whitespace) {
                format!("\"{arg}\"")
            } else {
                arg.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
