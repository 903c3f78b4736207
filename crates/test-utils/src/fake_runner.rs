use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use robobatch::errors::{BackupError, Result};
use robobatch::exec::{ToolOutput, ToolRunner};

/// A fake tool runner that:
/// - records every argument vector it is asked to run
/// - answers with a scripted exit code per source path (default `1`,
///   "files copied")
/// - can simulate a launch failure for a source path.
///
/// Clones share their recordings and script.
#[derive(Debug, Clone)]
pub struct FakeToolRunner {
    calls: Arc<Mutex<Vec<Vec<String>>>>,
    codes: Arc<Mutex<HashMap<String, Option<i32>>>>,
    launch_failures: Arc<Mutex<HashSet<String>>>,
    default_code: i32,
}

impl Default for FakeToolRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeToolRunner {
    pub fn new() -> Self {
        Self::with_default_code(1)
    }

    pub fn with_default_code(code: i32) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            codes: Arc::new(Mutex::new(HashMap::new())),
            launch_failures: Arc::new(Mutex::new(HashSet::new())),
            default_code: code,
        }
    }

    /// Exit with `code` when asked to copy from `source`.
    pub fn exit_code_for(&self, source: &str, code: i32) -> &Self {
        self.codes
            .lock()
            .unwrap()
            .insert(source.to_string(), Some(code));
        self
    }

    /// End without an exit code (as if killed) when copying from `source`.
    pub fn killed_for(&self, source: &str) -> &Self {
        self.codes.lock().unwrap().insert(source.to_string(), None);
        self
    }

    /// Fail to launch when asked to copy from `source`.
    pub fn launch_failure_for(&self, source: &str) -> &Self {
        self.launch_failures
            .lock()
            .unwrap()
            .insert(source.to_string());
        self
    }

    /// Every argument vector received so far, in call order.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Sources (second argument) of every call, in call order.
    pub fn sources(&self) -> Vec<String> {
        self.calls()
            .iter()
            .filter_map(|argv| argv.get(1).cloned())
            .collect()
    }
}

impl ToolRunner for FakeToolRunner {
    fn run<'a>(
        &'a self,
        argv: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<ToolOutput>> + Send + 'a>> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(argv.to_vec());

            let source = argv.get(1).cloned().unwrap_or_default();
            if self.launch_failures.lock().unwrap().contains(&source) {
                return Err(BackupError::Spawn {
                    program: argv.first().cloned().unwrap_or_default(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "program not found"),
                });
            }

            let code = self
                .codes
                .lock()
                .unwrap()
                .get(&source)
                .copied()
                .unwrap_or(Some(self.default_code));

            // Let other tasks make progress, as a real process wait would.
            tokio::task::yield_now().await;

            Ok(ToolOutput {
                code,
                stdout: format!("fake robocopy output for {source}"),
                stderr: String::new(),
            })
        })
    }
}
