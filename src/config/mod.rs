// src/config/mod.rs

//! Configuration loading and validation for robobatch.
//!
//! Responsibilities:
//! - Define the serde-backed data model (`model.rs`).
//! - Load a JSON or TOML config file from disk (`loader.rs`).
//! - Validate required keys and task sanity (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, ConfigFormat};
pub use model::{
    ConfigFile, LoggingSection, RawConfigFile, RobocopyOptions, RunnerSection, TaskConfig,
};
