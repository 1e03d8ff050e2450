//! String key-value persistence.

use async_trait::async_trait;

use crate::{MemoryError, MemoryResult};

/// Durable string storage addressed by key.
///
/// Values are opaque strings; typed stores layered on top decide the
/// encoding.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    async fn get(&self, key: &str) -> MemoryResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> MemoryResult<()>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> MemoryResult<()>;
}

/// Rejects keys that could escape a store directory or collide with
/// temporary files.
pub(crate) fn validate_key(key: &str) -> MemoryResult<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(MemoryError::invalid_key(key))
    }
}
