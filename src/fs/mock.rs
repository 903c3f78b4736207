// src/fs/mock.rs

use super::FileSystem;
use anyhow::{anyhow, Result};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockEntry {
    File,
    Dir,
}

/// In-memory filesystem for executor tests.
///
/// Clones share state, so a test can keep one handle for assertions while
/// the executor owns another.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    entries: Arc<Mutex<HashMap<PathBuf, MockEntry>>>,
    read_only: Arc<Mutex<HashSet<PathBuf>>>,
    created: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an existing directory (and its parents).
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut entries = self.entries.lock().unwrap();
        for ancestor in path.as_ref().ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            entries
                .entry(ancestor.to_path_buf())
                .or_insert(MockEntry::Dir);
        }
    }

    /// Register an existing plain file; its parents become directories.
    pub fn add_file(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.entries
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), MockEntry::File);
    }

    /// Make directory creation fail anywhere below `path`.
    pub fn deny_writes_under(&self, path: impl AsRef<Path>) {
        self.read_only
            .lock()
            .unwrap()
            .insert(path.as_ref().to_path_buf());
    }

    /// Directories created through [`FileSystem::create_dir_all`], in order.
    pub fn created_dirs(&self) -> Vec<PathBuf> {
        self.created.lock().unwrap().clone()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.entries.lock().unwrap().contains_key(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        if self
            .read_only
            .lock()
            .unwrap()
            .iter()
            .any(|denied| path.starts_with(denied))
        {
            return Err(anyhow!("Permission denied: {:?}", path));
        }

        {
            let entries = self.entries.lock().unwrap();
            for ancestor in path.ancestors() {
                if let Some(MockEntry::File) = entries.get(ancestor) {
                    return Err(anyhow!("Not a directory: {:?}", ancestor));
                }
            }
        }

        self.add_dir(path);
        self.created.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}
