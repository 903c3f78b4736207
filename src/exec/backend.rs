// src/exec/backend.rs

//! Pluggable process backend.
//!
//! The task executor talks to a `ToolRunner` instead of spawning processes
//! directly. Production uses [`RealToolRunner`]; tests provide a fake that
//! records the argument vectors it receives and returns scripted results.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::errors::{BackupError, Result};

/// Everything the executor needs from a finished tool process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code; `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Trait abstracting how the mirroring tool is launched.
pub trait ToolRunner: Send + Sync {
    /// Run `argv` (program first) to completion and capture its output.
    ///
    /// A non-zero exit code is **not** an error here; only a failure to
    /// launch or wait for the process is.
    fn run<'a>(
        &'a self,
        argv: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<ToolOutput>> + Send + 'a>>;
}

/// Runs the tool as a real child process via `tokio::process::Command`.
#[derive(Debug, Clone, Default)]
pub struct RealToolRunner;

impl RealToolRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ToolRunner for RealToolRunner {
    fn run<'a>(
        &'a self,
        argv: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<ToolOutput>> + Send + 'a>> {
        Box::pin(async move {
            let (program, args) = argv.split_first().ok_or_else(|| {
                BackupError::ConfigError("cannot run an empty command line".to_string())
            })?;

            let output = Command::new(program)
                .args(args)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true)
                .output()
                .await
                .map_err(|source| BackupError::Spawn {
                    program: program.clone(),
                    source,
                })?;

            debug!(
                program = %program,
                exit_code = ?output.status.code(),
                stdout_bytes = output.stdout.len(),
                stderr_bytes = output.stderr.len(),
                "tool process exited"
            );

            Ok(ToolOutput {
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        })
    }
}
