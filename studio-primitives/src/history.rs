//! Persisted generation records.

use serde::{Deserialize, Serialize};

use crate::{GenerationParams, GenerationResult, HistoryId};

/// A completed "generate all" run: the inputs, the outputs, an id and the
/// completion time in Unix milliseconds.
///
/// Items are immutable once recorded; the history store only prepends and
/// removes them.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct HistoryItem {
    /// Synthetic identifier.
    pub id: HistoryId,
    /// Completion time, milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Input snapshot.
    #[serde(flatten)]
    pub params: GenerationParams,
    /// Outputs.
    #[serde(flatten)]
    pub result: GenerationResult,
}

impl HistoryItem {
    /// Creates a history item with a freshly generated id.
    #[must_use]
    pub fn new(params: GenerationParams, result: GenerationResult, timestamp: i64) -> Self {
        Self {
            id: HistoryId::generate(),
            timestamp,
            params,
            result,
        }
    }

    /// Returns a short label: the project name when set, else the main idea.
    #[must_use]
    pub fn label(&self) -> &str {
        self.params
            .project_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.params.main_prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CreationType;

    #[test]
    fn serializes_as_one_flat_object() {
        let item = HistoryItem {
            id: HistoryId::from("history-1"),
            timestamp: 1_718_000_000_000,
            params: GenerationParams::new(CreationType::Story, "Davi e Golias"),
            result: GenerationResult {
                titles: vec!["O gigante caiu".to_owned()],
                cta: "Inscreva-se".to_owned(),
                ..GenerationResult::default()
            },
        };

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["id"], "history-1");
        assert_eq!(value["mainPrompt"], "Davi e Golias");
        assert_eq!(value["generatedTitles"][0], "O gigante caiu");
        assert_eq!(value["generatedCta"], "Inscreva-se");

        let back: HistoryItem = serde_json::from_value(value).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn label_prefers_project_name() {
        let params = GenerationParams::new(CreationType::Prayer, "paz").with_project_name("Série Salmos");
        let item = HistoryItem::new(params, GenerationResult::default(), 0);
        assert_eq!(item.label(), "Série Salmos");

        let item = HistoryItem::new(
            GenerationParams::new(CreationType::Prayer, "paz").with_project_name("  "),
            GenerationResult::default(),
            0,
        );
        assert_eq!(item.label(), "paz");
    }
}
