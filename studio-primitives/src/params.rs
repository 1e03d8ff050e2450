//! Generation inputs captured from the user.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Smallest target length the input form accepts.
pub const MIN_CHARACTER_COUNT: usize = 100;

/// Target length used for fresh sessions.
pub const DEFAULT_CHARACTER_COUNT: usize = 1500;

/// Language code used for fresh sessions.
pub const DEFAULT_LANGUAGE: &str = "pt-BR";

/// Kind of long-form text being produced.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CreationType {
    /// A narrative retelling of a source passage.
    #[default]
    Story,
    /// A devotional prayer.
    Prayer,
}

impl CreationType {
    /// Returns the canonical lowercase tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Story => "story",
            Self::Prayer => "prayer",
        }
    }
}

impl fmt::Display for CreationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CreationType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "story" => Ok(Self::Story),
            "prayer" => Ok(Self::Prayer),
            other => Err(Error::UnknownCreationType {
                value: other.to_owned(),
            }),
        }
    }
}

/// Snapshot of the inputs for one generation request.
///
/// `character_count` is expected to be at least [`MIN_CHARACTER_COUNT`]; the
/// input layer enforces that; nothing downstream rejects smaller values.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParams {
    /// Optional label used to find the run again in history.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    /// Story or prayer.
    pub creation_type: CreationType,
    /// The core idea every output is derived from.
    pub main_prompt: String,
    /// Optional guidance for title suggestions.
    #[serde(default)]
    pub title_prompt: String,
    /// Optional guidance for the description.
    #[serde(default)]
    pub description_prompt: String,
    /// Optional style preference for the thumbnail prompt.
    #[serde(default)]
    pub thumbnail_prompt: String,
    /// Target length of the long-form text, in characters.
    pub character_count: usize,
    /// Output language code, e.g. `pt-BR`.
    pub language: String,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            project_name: None,
            creation_type: CreationType::default(),
            main_prompt: String::new(),
            title_prompt: String::new(),
            description_prompt: String::new(),
            thumbnail_prompt: String::new(),
            character_count: DEFAULT_CHARACTER_COUNT,
            language: DEFAULT_LANGUAGE.to_owned(),
        }
    }
}

impl GenerationParams {
    /// Creates parameters for the supplied type and main idea, leaving every
    /// other input at its default.
    #[must_use]
    pub fn new(creation_type: CreationType, main_prompt: impl Into<String>) -> Self {
        Self {
            creation_type,
            main_prompt: main_prompt.into(),
            ..Self::default()
        }
    }

    /// Sets the project label.
    #[must_use]
    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    /// Sets the output language code.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the target content length.
    #[must_use]
    pub fn with_character_count(mut self, count: usize) -> Self {
        self.character_count = count;
        self
    }

    /// Sets the title guidance text.
    #[must_use]
    pub fn with_title_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.title_prompt = prompt.into();
        self
    }

    /// Sets the description guidance text.
    #[must_use]
    pub fn with_description_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.description_prompt = prompt.into();
        self
    }

    /// Sets the thumbnail style preference.
    #[must_use]
    pub fn with_thumbnail_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.thumbnail_prompt = prompt.into();
        self
    }

    /// Returns `true` when the main idea is blank.
    #[must_use]
    pub fn is_missing_main_prompt(&self) -> bool {
        self.main_prompt.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creation_type_parses_case_insensitively() {
        assert_eq!("Prayer".parse::<CreationType>(), Ok(CreationType::Prayer));
        assert_eq!(" story ".parse::<CreationType>(), Ok(CreationType::Story));
        assert!(matches!(
            "poem".parse::<CreationType>(),
            Err(Error::UnknownCreationType { .. })
        ));
    }

    #[test]
    fn params_use_camel_case_and_tolerate_missing_optionals() {
        let json = r#"{
            "creationType": "prayer",
            "mainPrompt": "gratidão pela família",
            "characterCount": 2000,
            "language": "es-ES"
        }"#;
        let params: GenerationParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.creation_type, CreationType::Prayer);
        assert_eq!(params.character_count, 2000);
        assert!(params.project_name.is_none());
        assert!(params.title_prompt.is_empty());

        let encoded = serde_json::to_value(&params).unwrap();
        assert!(encoded.get("projectName").is_none());
        assert_eq!(encoded["mainPrompt"], "gratidão pela família");
    }

    #[test]
    fn whitespace_main_prompt_counts_as_missing() {
        assert!(GenerationParams::new(CreationType::Story, "  \n").is_missing_main_prompt());
        assert!(!GenerationParams::new(CreationType::Story, "Jonas").is_missing_main_prompt());
    }
}
