//! Persisted generation history, newest first.

use std::fmt;
use std::sync::Arc;

use studio_primitives::{HistoryId, HistoryItem};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::{MemoryError, MemoryResult};
use crate::store::KeyValueStore;

/// Storage key holding the serialized history list.
pub const HISTORY_KEY: &str = "geminiStoryGeneratorHistory";

/// Ordered list of [`HistoryItem`]s mirrored to a [`KeyValueStore`] as one
/// JSON array.
///
/// Every mutation rewrites the whole array before updating the in-memory
/// copy, so a failed write leaves both unchanged.
pub struct HistoryStore {
    store: Arc<dyn KeyValueStore>,
    items: RwLock<Vec<HistoryItem>>,
}

impl fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryStore").finish_non_exhaustive()
    }
}

impl HistoryStore {
    /// Loads the history. Unparseable stored data is logged and treated as
    /// an empty history.
    ///
    /// # Errors
    ///
    /// Propagates store read failures other than undecodable data.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> MemoryResult<Self> {
        let items = match store.get(HISTORY_KEY).await {
            Ok(Some(raw)) => serde_json::from_str::<Vec<HistoryItem>>(&raw).unwrap_or_else(|err| {
                warn!(error = %err, "stored history is unreadable, starting empty");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(err @ MemoryError::Encoding { .. }) => {
                warn!(error = %err, "stored history is unreadable, starting empty");
                Vec::new()
            }
            Err(err) => return Err(err),
        };
        debug!(items = items.len(), "history loaded");
        Ok(Self {
            store,
            items: RwLock::new(items),
        })
    }

    /// Returns a snapshot of every item, newest first.
    pub async fn items(&self) -> Vec<HistoryItem> {
        self.items.read().await.clone()
    }

    /// Returns the item with `id`.
    pub async fn get(&self, id: &HistoryId) -> Option<HistoryItem> {
        self.items
            .read()
            .await
            .iter()
            .find(|item| &item.id == id)
            .cloned()
    }

    /// Records `item` as the newest entry.
    ///
    /// # Errors
    ///
    /// Propagates serialization and store write failures.
    pub async fn prepend(&self, item: HistoryItem) -> MemoryResult<()> {
        let mut items = self.items.write().await;
        let mut next = Vec::with_capacity(items.len() + 1);
        next.push(item);
        next.extend(items.iter().cloned());
        self.persist(&next).await?;
        *items = next;
        Ok(())
    }

    /// Removes the item with `id`, returning whether one was removed.
    ///
    /// # Errors
    ///
    /// Propagates serialization and store write failures.
    pub async fn delete(&self, id: &HistoryId) -> MemoryResult<bool> {
        let mut items = self.items.write().await;
        let next: Vec<HistoryItem> = items.iter().filter(|item| &item.id != id).cloned().collect();
        if next.len() == items.len() {
            return Ok(false);
        }
        self.persist(&next).await?;
        *items = next;
        Ok(true)
    }

    /// Removes every item.
    ///
    /// # Errors
    ///
    /// Propagates store write failures.
    pub async fn clear(&self) -> MemoryResult<()> {
        let mut items = self.items.write().await;
        self.store.remove(HISTORY_KEY).await?;
        items.clear();
        debug!("history cleared");
        Ok(())
    }

    async fn persist(&self, items: &[HistoryItem]) -> MemoryResult<()> {
        let raw = serde_json::to_string(items)?;
        self.store.set(HISTORY_KEY, &raw).await?;
        debug!(items = items.len(), "history persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FileStore, VolatileStore};
    use studio_primitives::{CreationType, GenerationParams, GenerationResult};

    fn item(idea: &str, timestamp: i64) -> HistoryItem {
        HistoryItem::new(
            GenerationParams::new(CreationType::Story, idea),
            GenerationResult {
                content: format!("{idea} texto"),
                ..GenerationResult::default()
            },
            timestamp,
        )
    }

    #[tokio::test]
    async fn prepends_and_persists() {
        let backing: Arc<dyn KeyValueStore> = Arc::new(VolatileStore::new());
        let history = HistoryStore::load(backing.clone()).await.unwrap();

        let first = item("Rute", 1);
        let second = item("Ester", 2);
        history.prepend(first.clone()).await.unwrap();
        history.prepend(second.clone()).await.unwrap();

        let reloaded = HistoryStore::load(backing).await.unwrap();
        assert_eq!(reloaded.items().await, vec![second.clone(), first.clone()]);
        assert_eq!(reloaded.get(&first.id).await, Some(first));
        assert_eq!(reloaded.get(&HistoryId::from("history-missing")).await, None);
    }

    #[tokio::test]
    async fn delete_and_clear() {
        let backing: Arc<dyn KeyValueStore> = Arc::new(VolatileStore::new());
        let history = HistoryStore::load(backing.clone()).await.unwrap();
        let keep = item("Jonas", 1);
        let gone = item("Noé", 2);
        history.prepend(keep.clone()).await.unwrap();
        history.prepend(gone.clone()).await.unwrap();

        assert!(history.delete(&gone.id).await.unwrap());
        assert!(!history.delete(&gone.id).await.unwrap());
        assert_eq!(history.items().await, vec![keep]);

        history.clear().await.unwrap();
        assert!(history.items().await.is_empty());
        assert_eq!(backing.get(HISTORY_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn unreadable_history_starts_empty() {
        let backing: Arc<dyn KeyValueStore> = Arc::new(VolatileStore::new());
        backing.set(HISTORY_KEY, "{not json").await.unwrap();

        let history = HistoryStore::load(backing).await.unwrap();
        assert!(history.items().await.is_empty());
    }

    #[tokio::test]
    async fn undecodable_history_file_starts_empty() {
        let dir = std::env::temp_dir().join(format!("studio-history-{}", uuid::Uuid::new_v4()));
        let backing: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&dir).await.unwrap());
        std::fs::write(
            dir.join(format!("{HISTORY_KEY}.json")),
            [0xff, 0xfe, b'[', b']'],
        )
        .unwrap();

        let history = HistoryStore::load(backing.clone()).await.unwrap();
        assert!(history.items().await.is_empty());

        let entry = item("Daniel", 3);
        history.prepend(entry.clone()).await.unwrap();
        let reloaded = HistoryStore::load(backing).await.unwrap();
        assert_eq!(reloaded.items().await, vec![entry]);

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn reads_camel_case_records() {
        let raw = r#"[{"id":"history-abc","timestamp":1700000000000,"projectName":"Salmos","creationType":"prayer","mainPrompt":"Salmo 23","titlePrompt":"","descriptionPrompt":"","thumbnailPrompt":"","characterCount":1500,"language":"pt-BR","generatedTitles":["O Pastor"],"generatedDescription":"d","generatedTags":["fé"],"generatedThumbnailPrompt":"t","generatedContent":"c","generatedCta":"x"}]"#;
        let backing: Arc<dyn KeyValueStore> = Arc::new(VolatileStore::new());
        backing.set(HISTORY_KEY, raw).await.unwrap();

        let history = HistoryStore::load(backing).await.unwrap();
        let items = history.items().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].label(), "Salmos");
        assert_eq!(items[0].params.creation_type, CreationType::Prayer);
        assert_eq!(items[0].result.titles, vec!["O Pastor"]);
    }
}
