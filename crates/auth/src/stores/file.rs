//! Key-value storage backed by a JSON file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use pizzadash_core::auth::{AuthError, KeyValueStore, Result};

/// Stores all keys in one JSON object file.
///
/// A missing file is an empty store. Every write rewrites the whole file via
/// a temporary sibling and a rename, so readers never see a half-written file.
///
/// Values are strings. A key holding any other JSON value reads as a storage
/// error but can still be overwritten or removed. A file that is not a JSON
/// object reads as a storage error and is replaced by the next write.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_bytes(&self) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AuthError::Storage(format!(
                "failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn parse(&self, bytes: &[u8]) -> Result<Map<String, Value>> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Map::new());
        }
        serde_json::from_slice(bytes).map_err(|e| {
            AuthError::Storage(format!("{} is not a JSON object: {}", self.path.display(), e))
        })
    }

    async fn read_all(&self) -> Result<Map<String, Value>> {
        match self.read_bytes().await? {
            Some(bytes) => self.parse(&bytes),
            None => Ok(Map::new()),
        }
    }

    /// Current contents for a read-modify-write. Unparsable contents are
    /// dropped so the write can repair the file.
    async fn read_for_write(&self) -> Result<Map<String, Value>> {
        match self.read_bytes().await? {
            Some(bytes) => Ok(self.parse(&bytes).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Replacing corrupt store file");
                Map::new()
            })),
            None => Ok(Map::new()),
        }
    }

    async fn write_all(&self, items: &Map<String, Value>) -> Result<()> {
        let storage_err =
            |e: std::io::Error| AuthError::Storage(format!("failed to write {}: {}", self.path.display(), e));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(storage_err)?;
        }

        let bytes = serde_json::to_vec_pretty(items)
            .map_err(|e| AuthError::Storage(format!("failed to serialize store: {}", e)))?;

        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, bytes).await.map_err(storage_err)?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(storage_err)?;

        tracing::debug!(path = %self.path.display(), keys = items.len(), "Store written");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        match self.read_all().await?.remove(key) {
            None => Ok(None),
            Some(Value::String(value)) => Ok(Some(value)),
            Some(other) => Err(AuthError::Storage(format!(
                "value under {:?} is not a string: {}",
                key, other
            ))),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_for_write().await?;
        items.insert(key.to_string(), Value::String(value.to_string()));
        self.write_all(&items).await
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let Some(bytes) = self.read_bytes().await? else {
            return Ok(());
        };
        match self.parse(&bytes) {
            Ok(mut items) => {
                if items.remove(key).is_some() {
                    self.write_all(&items).await?;
                }
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Replacing corrupt store file");
                self.write_all(&Map::new()).await
            }
        }
    }
}
