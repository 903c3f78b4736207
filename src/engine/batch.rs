// src/engine/batch.rs

//! Runs every configured task and folds the outcomes into one exit code.

use futures::stream::{self, StreamExt};
use tracing::{error, info};

use crate::config::{ConfigFile, RobocopyOptions, TaskConfig};
use crate::exec::TaskExecutor;
use crate::types::TaskOutcome;

/// Aggregate result of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Number of tasks that were run.
    pub total: usize,
    /// Display names of failed tasks, in configuration order.
    pub failed: Vec<String>,
}

impl BatchReport {
    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }

    /// `0` when every task succeeded, otherwise `1`.
    pub fn exit_code(&self) -> i32 {
        if self.all_succeeded() { 0 } else { 1 }
    }

    /// Build a report from `(task index, task name, outcome)` triples in any
    /// order.
    fn from_outcomes(mut outcomes: Vec<(usize, String, TaskOutcome)>) -> Self {
        outcomes.sort_by_key(|(index, _, _)| *index);
        let total = outcomes.len();
        let failed = outcomes
            .into_iter()
            .filter(|(_, _, outcome)| !outcome.is_success())
            .map(|(_, name, _)| name)
            .collect();
        Self { total, failed }
    }
}

/// Drives a [`TaskExecutor`] over a task list.
///
/// With `max_parallel == 1` tasks run strictly one after another in list
/// order. Larger values run up to that many tasks at once; the report does
/// not depend on completion order.
#[derive(Debug, Clone)]
pub struct BatchRunner {
    executor: TaskExecutor,
    max_parallel: usize,
}

impl BatchRunner {
    pub fn new(executor: TaskExecutor, max_parallel: usize) -> Self {
        Self {
            executor,
            max_parallel: max_parallel.max(1),
        }
    }

    pub fn max_parallel(&self) -> usize {
        self.max_parallel
    }

    /// Run every task from the config and return the process exit code.
    pub async fn run_all(&self, cfg: &ConfigFile) -> i32 {
        self.run(cfg).await.exit_code()
    }

    /// Run every task from the config.
    pub async fn run(&self, cfg: &ConfigFile) -> BatchReport {
        self.run_tasks(cfg.tasks(), cfg.robocopy_options()).await
    }

    /// Run the given tasks with shared options. An empty list is a
    /// successful run.
    pub async fn run_tasks(&self, tasks: &[TaskConfig], options: &RobocopyOptions) -> BatchReport {
        let outcomes: Vec<(usize, String, TaskOutcome)> = stream::iter(tasks.iter().enumerate())
            .map(|(index, task)| async move {
                let outcome = self.executor.run_task(task, options).await;
                (index, task.display_name().to_string(), outcome)
            })
            .buffer_unordered(self.max_parallel)
            .collect()
            .await;

        let report = BatchReport::from_outcomes(outcomes);
        tracing::dispatcher::with_default(self.executor.dispatch(), || log_summary(&report));
        report
    }
}

fn log_summary(report: &BatchReport) {
    if report.all_succeeded() {
        info!(total = report.total, "all backup tasks completed successfully");
    } else {
        error!(
            total = report.total,
            failed_tasks = ?report.failed,
            "{} task(s) failed",
            report.failure_count()
        );
    }
}
