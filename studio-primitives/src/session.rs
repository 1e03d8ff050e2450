//! Working copy edited by the presentation layer.

use crate::{GenerationParams, GenerationResult, HistoryItem};

/// Current inputs and outputs. History items are loaded into a session by
/// copy; editing a session never touches stored history.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    /// Current form inputs.
    pub params: GenerationParams,
    /// Current output values.
    pub result: GenerationResult,
}

impl Session {
    /// Restores inputs and outputs from a history item.
    #[must_use]
    pub fn from_history(item: &HistoryItem) -> Self {
        Self {
            params: item.params.clone(),
            result: item.result.clone(),
        }
    }

    /// Clears every input and output, keeping language, type and target
    /// length so a new project starts from the same settings.
    pub fn reset(&mut self) {
        let creation_type = self.params.creation_type;
        let language = std::mem::take(&mut self.params.language);
        let character_count = self.params.character_count;
        *self = Self::default();
        self.params.creation_type = creation_type;
        self.params.language = language;
        self.params.character_count = character_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CreationType;

    #[test]
    fn loads_history_and_resets() {
        let params = GenerationParams::new(CreationType::Prayer, "força")
            .with_language("fr-FR")
            .with_character_count(900)
            .with_project_name("Manhãs");
        let result = GenerationResult {
            content: "Senhor...".to_owned(),
            ..GenerationResult::default()
        };
        let item = HistoryItem::new(params.clone(), result.clone(), 42);

        let mut session = Session::from_history(&item);
        assert_eq!(session.params, params);
        assert_eq!(session.result, result);

        session.reset();
        assert!(session.result.is_empty());
        assert!(session.params.main_prompt.is_empty());
        assert!(session.params.project_name.is_none());
        assert_eq!(session.params.language, "fr-FR");
        assert_eq!(session.params.character_count, 900);
        assert_eq!(session.params.creation_type, CreationType::Prayer);
    }
}
