// src/engine/mod.rs

//! Batch orchestration.
//!
//! [`batch::BatchRunner`] walks the configured task list, hands each task to
//! the [`crate::exec::TaskExecutor`], and reduces the outcomes to a
//! [`batch::BatchReport`] whose `exit_code()` becomes the process exit code.

pub mod batch;

pub use batch::{BatchReport, BatchRunner};
