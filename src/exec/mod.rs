// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`command`] turns a task plus shared options into a robocopy argument
//!   vector (pure, no I/O).
//! - [`backend`] provides the `ToolRunner` trait and the `RealToolRunner`
//!   built on `tokio::process::Command`; tests swap in a fake.
//! - [`task_runner`] owns the per-task flow: path checks, command, launch,
//!   exit-code classification and logging.

pub mod backend;
pub mod command;
pub mod task_runner;

pub use backend::{RealToolRunner, ToolOutput, ToolRunner};
pub use command::build_command;
pub use task_runner::{classify_exit_code, TaskExecutor, FAILURE_THRESHOLD};
