// src/logging.rs

//! Logging setup for `robobatch` using `tracing` + `tracing-subscriber`,
//! with a rolling log file from `tracing-appender`.
//!
//! Priority for determining the log level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `ROBOBATCH_LOG` environment variable (e.g. "info", "debug")
//! 3. `logging.level` from the config file
//! 4. default to `info`
//!
//! No global subscriber is installed. [`init_logging`] returns a
//! [`LogHandle`] whose `Dispatch` is handed to the components that log, and
//! the entry point runs the batch under it.

use std::fs;
use std::path::Path;

use tracing::{warn, Dispatch};
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;

use crate::cli::LogLevel;
use crate::config::LoggingSection;
use crate::errors::{BackupError, Result};
use crate::types::LogRotation;

pub const LOG_ENV_VAR: &str = "ROBOBATCH_LOG";

/// Configured log sink.
///
/// Keep it alive for the whole run: dropping it flushes and closes the log
/// file writer.
pub struct LogHandle {
    dispatch: Dispatch,
    _guard: WorkerGuard,
}

impl LogHandle {
    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }
}

impl std::fmt::Debug for LogHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogHandle").finish_non_exhaustive()
    }
}

/// Build the log sink described by the `logging` config section.
///
/// Creates the log directory if it is missing.
pub fn init_logging(cli_level: Option<LogLevel>, cfg: &LoggingSection) -> Result<LogHandle> {
    let level = resolve_level(
        cli_level,
        std::env::var(LOG_ENV_VAR).ok().as_deref(),
        &cfg.level,
    );

    let (file_writer, guard) = {
        let appender = open_file_appender(cfg)?;
        tracing_appender::non_blocking(appender)
    };

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true);

    // Console output goes to stderr, like the rest of the tool's diagnostics.
    let console_layer = cfg.console.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
    });

    let subscriber = tracing_subscriber::registry()
        .with(LevelFilter::from_level(level))
        .with(file_layer)
        .with(console_layer);

    let dispatch = Dispatch::new(subscriber);
    if parse_level_str(&cfg.level).is_none() {
        tracing::dispatcher::with_default(&dispatch, || {
            warn!(level = %cfg.level, "unknown logging.level; using info");
        });
    }

    Ok(LogHandle {
        dispatch,
        _guard: guard,
    })
}

/// Pick the effective level from the CLI flag, the env var and the config.
pub fn resolve_level(
    cli_level: Option<LogLevel>,
    env_level: Option<&str>,
    config_level: &str,
) -> tracing::Level {
    match cli_level {
        Some(lvl) => level_from_log_level(lvl),
        None => env_level
            .and_then(parse_level_str)
            .or_else(|| parse_level_str(config_level))
            .unwrap_or(tracing::Level::INFO),
    }
}

fn open_file_appender(cfg: &LoggingSection) -> Result<RollingFileAppender> {
    let dir = match cfg.file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let prefix = cfg
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            BackupError::LoggingError(format!(
                "log file path has no usable file name: {}",
                cfg.file.display()
            ))
        })?;

    RollingFileAppender::builder()
        .rotation(rotation(cfg.rotation))
        .filename_prefix(prefix)
        .max_log_files(cfg.max_files)
        .build(dir)
        .map_err(|e| BackupError::LoggingError(e.to_string()))
}

fn rotation(r: LogRotation) -> Rotation {
    match r {
        LogRotation::Never => Rotation::NEVER,
        LogRotation::Minutely => Rotation::MINUTELY,
        LogRotation::Hourly => Rotation::HOURLY,
        LogRotation::Daily => Rotation::DAILY,
    }
}

fn level_from_log_level(lvl: LogLevel) -> tracing::Level {
    match lvl {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Trace => tracing::Level::TRACE,
    }
}

/// Parse a level name. Accepts the classic `WARNING` / `CRITICAL` / `FATAL` /
/// `NOTSET` spellings used by existing config files.
pub fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "critical" | "fatal" | "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" | "notset" => Some(tracing::Level::TRACE),
        _ => None,
    }
}
