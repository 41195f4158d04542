//! Cache storage abstraction.
//!
//! The resolver reads and writes cached assets through the [`IconStore`]
//! trait, keyed by store-relative paths like `mdi/home.svg`. The default
//! backing is a directory on disk ([`DiskStore`]), but callers may
//! substitute any conforming store; [`MemoryStore`] is provided for
//! embedding and tests.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::Result;

/// Byte store keyed by relative path.
///
/// Implementations must tolerate concurrent use from multiple resolution
/// flows; `create_dir` must be idempotent under races. No caching of the
/// store's own state is assumed: each call reflects current contents.
pub trait IconStore: Send + Sync {
    /// Whether an entry exists at `path`.
    fn exists(&self, path: &str) -> bool;

    /// Read the entry at `path` as UTF-8 text.
    fn read_text(&self, path: &str) -> Result<String>;

    /// Write `contents` at `path`, creating parent directories as needed.
    fn write_text(&self, path: &str, contents: &str) -> Result<()>;

    /// Create a directory at `path`. Succeeds if it already exists.
    fn create_dir(&self, path: &str) -> Result<()>;
}

/// Default cache root: an `iconify` directory under the platform's
/// persistent data area.
pub fn default_cache_root() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("iconify")
}

/// Disk-backed store rooted at a base directory.
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    /// Create a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn full_path(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl IconStore for DiskStore {
    fn exists(&self, path: &str) -> bool {
        self.full_path(path).exists()
    }

    fn read_text(&self, path: &str) -> Result<String> {
        Ok(fs::read_to_string(self.full_path(path))?)
    }

    fn write_text(&self, path: &str, contents: &str) -> Result<()> {
        let full = self.full_path(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full, contents)?;
        Ok(())
    }

    fn create_dir(&self, path: &str) -> Result<()> {
        fs::create_dir_all(self.full_path(path))?;
        Ok(())
    }
}

/// In-memory store.
///
/// Directories are implicit; `create_dir` is a no-op that always succeeds.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl IconStore for MemoryStore {
    fn exists(&self, path: &str) -> bool {
        self.entries.lock().unwrap().contains_key(path)
    }

    fn read_text(&self, path: &str) -> Result<String> {
        self.entries
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("no entry at {path}")).into()
            })
    }

    fn write_text(&self, path: &str, contents: &str) -> Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(path.to_string(), contents.to_string());
        Ok(())
    }

    fn create_dir(&self, _path: &str) -> Result<()> {
        Ok(())
    }
}
