// src/cli.rs

//! CLI argument parsing using `clap`.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::loader::default_config_path;

/// Command-line arguments for `robobatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "robobatch",
    version,
    about = "Run configured folder backups through robocopy.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (JSON, or TOML when it ends in `.toml`).
    #[arg(long, value_name = "PATH", default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// Run every configured backup task, then exit with 0 (all succeeded)
    /// or 1 (at least one failed).
    #[arg(long)]
    pub run_backup: bool,

    /// Parse + validate, print each task's command line, but don't run anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `ROBOBATCH_LOG` or `logging.level` from the config is used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Number of tasks to run at the same time (overrides `runner.max_parallel`).
    #[arg(long, value_name = "N")]
    pub jobs: Option<NonZeroUsize>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_config_json_without_running() {
        let args = CliArgs::try_parse_from(["robobatch"]).unwrap();
        assert_eq!(args.config, PathBuf::from("config.json"));
        assert!(!args.run_backup);
        assert!(args.jobs.is_none());
    }

    #[test]
    fn parses_run_flags() {
        let args = CliArgs::try_parse_from([
            "robobatch",
            "--run-backup",
            "--config",
            "backups.toml",
            "--jobs",
            "4",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert!(args.run_backup);
        assert_eq!(args.config, PathBuf::from("backups.toml"));
        assert_eq!(args.jobs.map(NonZeroUsize::get), Some(4));
        assert!(matches!(args.log_level, Some(LogLevel::Debug)));
    }

    #[test]
    fn rejects_zero_jobs() {
        assert!(CliArgs::try_parse_from(["robobatch", "--jobs", "0"]).is_err());
    }
}
