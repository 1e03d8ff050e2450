//! Directory-backed store writing one file per key.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

use crate::{MemoryError, MemoryResult};
use crate::store::{KeyValueStore, validate_key};

const VALUE_EXTENSION: &str = "json";

/// [`KeyValueStore`] persisting each key as `<dir>/<key>.json`.
///
/// Writes go to a temporary sibling and are renamed into place, so readers
/// never observe a half-written value.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Opens (or creates) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors encountered while creating the directory.
    pub async fn open(dir: impl Into<PathBuf>) -> MemoryResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    /// Returns the root directory of the store.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn value_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{VALUE_EXTENSION}"))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> MemoryResult<Option<String>> {
        validate_key(key)?;
        match fs::read(self.value_path(key)).await {
            Ok(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|_| MemoryError::Encoding {
                    key: key.to_owned(),
                }),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> MemoryResult<()> {
        validate_key(key)?;
        let path = self.value_path(key);
        let staging = self.dir.join(format!(".{key}.tmp"));

        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&staging)
            .await?;
        file.write_all(value.as_bytes()).await?;
        file.flush().await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(&staging, &path).await?;

        debug!(key, bytes = value.len(), "store value written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> MemoryResult<()> {
        validate_key(key)?;
        let _guard = self.write_lock.lock().await;
        match fs::remove_file(self.value_path(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("studio-store-{}", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn values_survive_reopening() {
        let dir = temp_dir();
        let store = FileStore::open(&dir).await.unwrap();
        assert_eq!(store.get("geminiApiKey").await.unwrap(), None);

        store.set("geminiApiKey", "AIza-1").await.unwrap();
        store.set("geminiApiKey", "AIza-2").await.unwrap();

        let reopened = FileStore::open(&dir).await.unwrap();
        assert_eq!(
            reopened.get("geminiApiKey").await.unwrap().as_deref(),
            Some("AIza-2")
        );
        assert!(!dir.join(".geminiApiKey.tmp").exists());

        reopened.remove("geminiApiKey").await.unwrap();
        reopened.remove("geminiApiKey").await.unwrap();
        assert_eq!(reopened.get("geminiApiKey").await.unwrap(), None);

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn non_utf8_value_is_an_encoding_error() {
        let dir = temp_dir();
        let store = FileStore::open(&dir).await.unwrap();
        std::fs::write(dir.join("geminiApiKey.json"), [0xff, 0xfe]).unwrap();

        let err = store.get("geminiApiKey").await.unwrap_err();
        assert!(matches!(err, MemoryError::Encoding { ref key } if key == "geminiApiKey"));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn rejects_keys_outside_the_directory() {
        let dir = temp_dir();
        let store = FileStore::open(&dir).await.unwrap();
        let err = store.set("../escape", "x").await.unwrap_err();
        assert!(matches!(err, MemoryError::InvalidKey { .. }));
        let _ = std::fs::remove_dir_all(dir);
    }
}
