//! In-process store that forgets everything on drop.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::MemoryResult;
use crate::store::{KeyValueStore, validate_key};

/// [`KeyValueStore`] held in memory.
#[derive(Debug, Default)]
pub struct VolatileStore {
    entries: RwLock<HashMap<String, String>>,
}

impl VolatileStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored keys.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for VolatileStore {
    async fn get(&self, key: &str) -> MemoryResult<Option<String>> {
        validate_key(key)?;
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> MemoryResult<()> {
        validate_key(key)?;
        self.entries
            .write()
            .await
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove(&self, key: &str) -> MemoryResult<()> {
        validate_key(key)?;
        self.entries.write().await.remove(key);
        Ok(())
    }
}
