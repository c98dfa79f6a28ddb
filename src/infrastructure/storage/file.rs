//! File-backed key-value store
//!
//! One document per key under a data directory. Keys are restricted to a
//! filename-safe alphabet when mapped to paths; the store creates its
//! directory lazily on first write.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::kv::KeyValueStore;
use crate::domain::{DomainError, DomainResult};

pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

fn io_err(context: &str, path: &Path, e: std::io::Error) -> DomainError {
    DomainError::Persistence(format!("{context} {}: {e}", path.display()))
}

#[async_trait]
impl KeyValueStore for FileKvStore {
    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_err("failed reading", &path, e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| io_err("failed creating", &self.dir, e))?;
        let path = self.path_for(key);
        tokio::fs::write(&path, value)
            .await
            .map_err(|e| io_err("failed writing", &path, e))?;
        debug!(key, path = %path.display(), "kv entry written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> DomainResult<()> {
        let path = self.path_for(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_err("failed removing", &path, e)),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
