use std::path::PathBuf;

use robobatch::config::{
    ConfigFile, LoggingSection, RawConfigFile, RobocopyOptions, RunnerSection, TaskConfig,
};
use robobatch::types::BackupType;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                backup_tasks: Some(Vec::new()),
                logging: Some(LoggingSection::default()),
                robocopy_options: Some(RobocopyOptions::default()),
                runner: RunnerSection::default(),
            },
        }
    }

    pub fn with_task(mut self, task: TaskConfig) -> Self {
        self.config
            .backup_tasks
            .get_or_insert_with(Vec::new)
            .push(task);
        self
    }

    pub fn with_retry_count(mut self, n: u32) -> Self {
        self.options().retry_count = n;
        self
    }

    pub fn with_wait_time(mut self, secs: u32) -> Self {
        self.options().wait_time = secs;
        self
    }

    pub fn with_max_parallel(mut self, n: usize) -> Self {
        self.config.runner.max_parallel = n;
        self
    }

    pub fn with_logging(mut self, logging: LoggingSection) -> Self {
        self.config.logging = Some(logging);
        self
    }

    fn options(&mut self) -> &mut RobocopyOptions {
        self.config
            .robocopy_options
            .get_or_insert_with(RobocopyOptions::default)
    }

    pub fn build_raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `TaskConfig`.
pub struct TaskConfigBuilder {
    task: TaskConfig,
}

impl TaskConfigBuilder {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            task: TaskConfig {
                name: None,
                source: source.into(),
                destination: destination.into(),
                backup_type: BackupType::Full,
                exclude: vec![],
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.task.name = Some(name.to_string());
        self
    }

    pub fn backup_type(mut self, kind: &str) -> Self {
        self.task.backup_type = BackupType::from(kind);
        self
    }

    pub fn exclude(mut self, pattern: &str) -> Self {
        self.task.exclude.push(pattern.to_string());
        self
    }

    pub fn build(self) -> TaskConfig {
        self.task
    }
}
