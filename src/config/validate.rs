// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{BackupError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::BackupError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;

        // `ensure_required_keys` has already rejected any `None` here.
        let (Some(tasks), Some(logging), Some(options)) =
            (raw.backup_tasks, raw.logging, raw.robocopy_options)
        else {
            return Err(BackupError::ConfigError(
                "missing required configuration keys".to_string(),
            ));
        };

        Ok(ConfigFile::new_unchecked(tasks, logging, options, raw.runner))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_required_keys(cfg)?;
    validate_logging(cfg)?;
    validate_runner(cfg)?;
    Ok(())
}

fn ensure_required_keys(cfg: &RawConfigFile) -> Result<()> {
    let mut missing = Vec::new();
    if cfg.backup_tasks.is_none() {
        missing.push("backup_tasks");
    }
    if cfg.logging.is_none() {
        missing.push("logging");
    }
    if cfg.robocopy_options.is_none() {
        missing.push("robocopy_options");
    }

    if !missing.is_empty() {
        return Err(BackupError::ConfigError(format!(
            "missing required configuration keys: {}",
            missing.join(", ")
        )));
    }
    Ok(())
}

fn validate_logging(cfg: &RawConfigFile) -> Result<()> {
    let Some(logging) = cfg.logging.as_ref() else {
        return Ok(());
    };

    if logging.max_files == 0 {
        return Err(BackupError::ConfigError(
            "logging.max_files must be >= 1 (got 0)".to_string(),
        ));
    }

    if logging.file.as_os_str().is_empty() {
        return Err(BackupError::ConfigError(
            "logging.file must not be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_runner(cfg: &RawConfigFile) -> Result<()> {
    if cfg.runner.max_parallel == 0 {
        return Err(BackupError::ConfigError(
            "runner.max_parallel must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}
