//! Persisted API credential.

use std::fmt;
use std::sync::Arc;

use studio_primitives::ApiCredential;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::MemoryResult;
use crate::store::KeyValueStore;

/// Storage key holding the credential.
pub const CREDENTIAL_KEY: &str = "geminiApiKey";

/// Holds the current credential and mirrors it to a [`KeyValueStore`].
pub struct CredentialStore {
    store: Arc<dyn KeyValueStore>,
    current: RwLock<Option<ApiCredential>>,
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore").finish_non_exhaustive()
    }
}

impl CredentialStore {
    /// Loads the stored credential, if any. A blank stored value counts as
    /// none.
    ///
    /// # Errors
    ///
    /// Propagates store read failures.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> MemoryResult<Self> {
        let current = store
            .get(CREDENTIAL_KEY)
            .await?
            .and_then(|value| ApiCredential::new(value).ok());
        debug!(present = current.is_some(), "credential loaded");
        Ok(Self {
            store,
            current: RwLock::new(current),
        })
    }

    /// Returns the current credential.
    pub async fn current(&self) -> Option<ApiCredential> {
        self.current.read().await.clone()
    }

    /// Saves a credential. Blank input is ignored and reported as `false`.
    ///
    /// # Errors
    ///
    /// Propagates store write failures.
    pub async fn save(&self, value: &str) -> MemoryResult<bool> {
        let Ok(credential) = ApiCredential::new(value) else {
            return Ok(false);
        };
        let mut current = self.current.write().await;
        self.store.set(CREDENTIAL_KEY, credential.expose()).await?;
        *current = Some(credential);
        info!("credential saved");
        Ok(true)
    }

    /// Forgets the credential.
    ///
    /// # Errors
    ///
    /// Propagates store write failures.
    pub async fn remove(&self) -> MemoryResult<()> {
        let mut current = self.current.write().await;
        self.store.remove(CREDENTIAL_KEY).await?;
        *current = None;
        info!("credential removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VolatileStore;

    #[tokio::test]
    async fn save_and_remove_round_trip_through_the_store() {
        let backing: Arc<dyn KeyValueStore> = Arc::new(VolatileStore::new());
        let credentials = CredentialStore::load(backing.clone()).await.unwrap();
        assert!(credentials.current().await.is_none());

        assert!(credentials.save("  AIza-key ").await.unwrap());
        assert_eq!(
            backing.get(CREDENTIAL_KEY).await.unwrap().as_deref(),
            Some("AIza-key")
        );

        let reloaded = CredentialStore::load(backing.clone()).await.unwrap();
        assert_eq!(reloaded.current().await.unwrap().expose(), "AIza-key");

        reloaded.remove().await.unwrap();
        assert!(reloaded.current().await.is_none());
        assert_eq!(backing.get(CREDENTIAL_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let backing: Arc<dyn KeyValueStore> = Arc::new(VolatileStore::new());
        backing.set(CREDENTIAL_KEY, "  ").await.unwrap();

        let credentials = CredentialStore::load(backing.clone()).await.unwrap();
        assert!(credentials.current().await.is_none());

        credentials.save("AIza-1").await.unwrap();
        assert!(!credentials.save("   ").await.unwrap());
        assert_eq!(credentials.current().await.unwrap().expose(), "AIza-1");
    }
}
