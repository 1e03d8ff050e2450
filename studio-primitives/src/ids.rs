//! History identifier types.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

const PREFIX: &str = "history-";

/// Synthetic identifier attached to each [`HistoryItem`](crate::HistoryItem).
///
/// Identifiers are opaque strings so that items written by older builds
/// (`history-<millis>`) still load.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryId(String);

impl HistoryId {
    /// Generates a fresh, random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("{PREFIX}{}", Uuid::new_v4().simple()))
    }

    /// Wraps an existing identifier string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for HistoryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HistoryId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for HistoryId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_prefixed_and_unique() {
        let a = HistoryId::generate();
        let b = HistoryId::generate();
        assert!(a.as_str().starts_with(PREFIX));
        assert_ne!(a, b);
    }

    #[test]
    fn legacy_ids_round_trip_through_json() {
        let id = HistoryId::from("history-1718000000000");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"history-1718000000000\"");
        let parsed: HistoryId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
