//! Persistent key-value storage for the session record.
//!
//! # Design
//! `KeyValueStore` is the seam the session manager persists through. Only the
//! session manager writes to it. `MemoryStore` backs tests and ephemeral
//! sessions; `FileStore` keeps one file per key under a directory and writes
//! through a temporary file so a crash never leaves a half-written record.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::config::ClientConfig;
use crate::error::StorageError;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[async_trait]
impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key).await
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// One file per key under `dir`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The configured directory, or `<platform data dir>/smartclass`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, StorageError> {
        match &config.storage_dir {
            Some(dir) => Ok(Self::new(dir)),
            None => {
                let mut dir = dirs::data_dir().ok_or(StorageError::NoDataDir)?;
                dir.push("smartclass");
                Ok(Self::new(dir))
            }
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_name(key)))
    }
}

/// Keys like `@smartclass:user` contain characters some filesystems reject.
fn file_name(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_replaces_reserved_characters() {
        assert_eq!(file_name("@smartclass:user"), "_smartclass_user");
    }

    #[tokio::test]
    async fn memory_store_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").await.unwrap(), None);
        store.set("k", "v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
        store.remove("k").await.unwrap();
        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));
        store.set("@smartclass:user", r#"{"id":"1"}"#).await.unwrap();

        let reopened = FileStore::new(dir.path().join("nested"));
        assert_eq!(
            reopened.get("@smartclass:user").await.unwrap().as_deref(),
            Some(r#"{"id":"1"}"#)
        );
        assert!(dir.path().join("nested/_smartclass_user.json").exists());
    }

    #[tokio::test]
    async fn file_store_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.remove("missing").await.unwrap();
        store.set("k", "v").await.unwrap();
        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[test]
    fn from_config_prefers_configured_dir() {
        let config = ClientConfig {
            storage_dir: Some(PathBuf::from("/tmp/sc")),
            ..ClientConfig::default()
        };
        let store = FileStore::from_config(&config).unwrap();
        assert_eq!(store.dir(), Path::new("/tmp/sc"));
    }
}
