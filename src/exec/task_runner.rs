// src/exec/task_runner.rs

//! Runs one backup task: path pre-checks, command construction, tool
//! execution and exit-code classification.

use std::sync::Arc;

use tracing::instrument::WithSubscriber;
use tracing::{error, info, info_span, warn, Dispatch, Instrument};

use crate::config::{RobocopyOptions, TaskConfig};
use crate::exec::backend::{ToolOutput, ToolRunner};
use crate::exec::command::{build_command, render_command_line};
use crate::fs::FileSystem;
use crate::types::{BackupType, TaskFailure, TaskOutcome};

/// Robocopy exit codes below this value are success variants (nothing to
/// copy, files copied, extra or mismatched files seen). Codes from here up
/// mean at least one copy failed.
pub const FAILURE_THRESHOLD: i32 = 8;

/// Map a tool exit code to a task outcome.
///
/// A missing code (process killed by a signal) or a negative one is a
/// failure.
pub fn classify_exit_code(code: Option<i32>) -> TaskOutcome {
    match code {
        Some(c) if (0..FAILURE_THRESHOLD).contains(&c) => TaskOutcome::Success(c),
        other => TaskOutcome::Failed(TaskFailure::ToolFailed(other)),
    }
}

/// Executes backup tasks against a tool backend and a filesystem, logging to
/// the injected `Dispatch`.
///
/// Never returns an error: every problem becomes a [`TaskOutcome::Failed`].
#[derive(Clone)]
pub struct TaskExecutor {
    runner: Arc<dyn ToolRunner>,
    fs: Arc<dyn FileSystem>,
    dispatch: Dispatch,
}

impl TaskExecutor {
    pub fn new(runner: Arc<dyn ToolRunner>, fs: Arc<dyn FileSystem>, dispatch: Dispatch) -> Self {
        Self {
            runner,
            fs,
            dispatch,
        }
    }

    /// Log sink used for this executor's events.
    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Run a single task to completion.
    ///
    /// All events are emitted inside a `task` span so they stay attributable
    /// when several tasks run at once.
    pub async fn run_task(&self, task: &TaskConfig, options: &RobocopyOptions) -> TaskOutcome {
        let span = tracing::dispatcher::with_default(&self.dispatch, || {
            info_span!("task", name = %task.display_name())
        });

        self.run_task_inner(task, options)
            .instrument(span)
            .with_subscriber(self.dispatch.clone())
            .await
    }

    async fn run_task_inner(&self, task: &TaskConfig, options: &RobocopyOptions) -> TaskOutcome {
        info!(
            source = %task.source.display(),
            destination = %task.destination.display(),
            "starting task"
        );

        if !self.fs.exists(&task.source) {
            error!(
                source = %task.source.display(),
                "source directory does not exist"
            );
            return TaskOutcome::Failed(TaskFailure::MissingSource);
        }

        if let Err(failure) = self.prepare_destination(task) {
            return TaskOutcome::Failed(failure);
        }

        if let BackupType::Unrecognized(kind) = &task.backup_type {
            warn!(
                backup_type = %kind,
                "unrecognized backup_type; running without a mirror or recursive-copy flag"
            );
        }

        let argv = build_command(task, options);
        info!(command = %render_command_line(&argv), "robocopy command");

        match self.runner.run(&argv).await {
            Ok(output) => report_output(output),
            Err(err) => {
                error!(error = %err, "error while executing robocopy");
                TaskOutcome::Failed(TaskFailure::LaunchFailed(err.to_string()))
            }
        }
    }

    fn prepare_destination(&self, task: &TaskConfig) -> Result<(), TaskFailure> {
        // `create_dir_all("")` succeeds without creating anything.
        if task.destination.as_os_str().is_empty() {
            error!("destination path is empty");
            return Err(TaskFailure::DestinationUnavailable(
                "empty destination path".to_string(),
            ));
        }

        if self.fs.exists(&task.destination) {
            return Ok(());
        }

        match self.fs.create_dir_all(&task.destination) {
            Ok(()) => {
                info!(
                    destination = %task.destination.display(),
                    "created destination directory"
                );
                Ok(())
            }
            Err(err) => {
                let reason = format!("{err:#}");
                error!(
                    destination = %task.destination.display(),
                    error = %reason,
                    "failed to create destination directory"
                );
                Err(TaskFailure::DestinationUnavailable(reason))
            }
        }
    }
}

fn report_output(output: ToolOutput) -> TaskOutcome {
    info!(return_code = ?output.code, "robocopy return code");

    let outcome = classify_exit_code(output.code);
    match &outcome {
        TaskOutcome::Success(code) => {
            info!(return_code = code, "task completed successfully");
        }
        TaskOutcome::Failed(failure) => {
            error!(
                return_code = ?output.code,
                stdout = %output.stdout.trim_end(),
                stderr = %output.stderr.trim_end(),
                "task failed: {failure}"
            );
        }
    }
    outcome
}

impl std::fmt::Debug for TaskExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskExecutor")
            .field("fs", &self.fs)
            .finish_non_exhaustive()
    }
}
