// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod types;

use std::sync::Arc;

use tracing::info;
use tracing::instrument::WithSubscriber;

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::ConfigFile;
use crate::engine::BatchRunner;
use crate::errors::Result;
use crate::exec::command::{build_command, render_command_line};
use crate::exec::{RealToolRunner, TaskExecutor};
use crate::fs::RealFileSystem;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - log sink construction
/// - task executor (real process runner + real filesystem)
/// - batch runner
///
/// Returns the process exit code of the batch (`0` or `1`). Configuration
/// and logging problems are returned as errors before any task runs.
pub async fn run(args: CliArgs) -> Result<i32> {
    let cfg = load_and_validate(&args.config)?;

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(0);
    }

    let log = logging::init_logging(args.log_level, cfg.logging())?;
    let dispatch = log.dispatch().clone();

    let executor = TaskExecutor::new(
        Arc::new(RealToolRunner::new()),
        Arc::new(RealFileSystem),
        dispatch.clone(),
    );

    let max_parallel = args
        .jobs
        .map(|n| n.get())
        .unwrap_or(cfg.runner().max_parallel);
    let runner = BatchRunner::new(executor, max_parallel);

    let exit_code = async {
        info!(
            config = %args.config.display(),
            tasks = cfg.tasks().len(),
            max_parallel = runner.max_parallel(),
            "starting backup run"
        );
        let code = runner.run_all(&cfg).await;
        info!(exit_code = code, "backup run finished");
        code
    }
    .with_subscriber(dispatch)
    .await;

    // `log` is dropped here, flushing the file writer.
    drop(log);
    Ok(exit_code)
}

/// Simple dry-run output: print tasks and the command each would run.
fn print_dry_run(cfg: &ConfigFile) {
    let options = cfg.robocopy_options();

    println!("robobatch dry-run");
    println!("  robocopy_options.retry_count = {}", options.retry_count);
    println!("  robocopy_options.wait_time = {}", options.wait_time);
    println!("  runner.max_parallel = {}", cfg.runner().max_parallel);
    println!();

    println!("tasks ({}):", cfg.tasks().len());
    for task in cfg.tasks() {
        println!("  - {}", task.display_name());
        println!("      source: {}", task.source.display());
        println!("      destination: {}", task.destination.display());
        println!("      backup_type: {}", task.backup_type);
        if !task.exclude.is_empty() {
            println!("      exclude: {:?}", task.exclude);
        }
        println!(
            "      cmd: {}",
            render_command_line(&build_command(task, options))
        );
    }
}
