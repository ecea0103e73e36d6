//! Local filesystem access used by downloads and uploads.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

/// The local side of a transfer.
///
/// Only whole-file reads and writes are needed; there is no streaming.
#[async_trait]
pub trait LocalStore: Send + Sync {
    async fn read_all_bytes(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Create or truncate `path` and write `bytes` to it.
    async fn write_all_bytes(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;

    /// Create `path` and any missing parents.
    async fn ensure_directory_exists(&self, path: &Path) -> io::Result<()>;
}

/// [`LocalStore`] on the real filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiskStore;

#[async_trait]
impl LocalStore for DiskStore {
    async fn read_all_bytes(&self, path: &Path) -> io::Result<Vec<u8>> {
        tracing::debug!("Reading {}...", path.display());
        tokio::fs::read(path).await
    }

    async fn write_all_bytes(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        tracing::debug!("Writing {} bytes to {}...", bytes.len(), path.display());
        tokio::fs::write(path, bytes).await
    }

    async fn ensure_directory_exists(&self, path: &Path) -> io::Result<()> {
        tokio::fs::create_dir_all(path).await
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    files: BTreeMap<PathBuf, Vec<u8>>,
    directories: BTreeSet<PathBuf>,
}

/// In-memory [`LocalStore`]. Clones share the same contents.
///
/// Writes fail with `NotFound` unless the parent directory was created
/// first, matching what the disk does.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, creating its parent directories.
    pub fn with_file(self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) -> Self {
        let path = path.into();
        {
            let mut state = self.lock();
            if let Some(parent) = path.parent() {
                add_directory(&mut state, parent);
            }
            state.files.insert(path, bytes.into());
        }
        self
    }

    pub fn file(&self, path: &Path) -> Option<Vec<u8>> {
        self.lock().files.get(path).cloned()
    }

    pub fn has_directory(&self, path: &Path) -> bool {
        self.lock().directories.contains(path)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn add_directory(state: &mut MemoryState, path: &Path) {
    for ancestor in path.ancestors() {
        if ancestor.as_os_str().is_empty() {
            break;
        }
        state.directories.insert(ancestor.to_path_buf());
    }
}

#[async_trait]
impl LocalStore for MemoryStore {
    async fn read_all_bytes(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.file(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )
        })
    }

    async fn write_all_bytes(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        let mut state = self.lock();
        let parent_exists = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => state.directories.contains(parent),
            _ => true,
        };
        if !parent_exists {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("parent of {} does not exist", path.display()),
            ));
        }
        state.files.insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }

    async fn ensure_directory_exists(&self, path: &Path) -> io::Result<()> {
        add_directory(&mut self.lock(), path);
        Ok(())
    }
}
