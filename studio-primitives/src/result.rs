//! Generated outputs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Upper bound on the number of title suggestions kept.
pub const MAX_TITLES: usize = 5;

/// Outputs of a generation run; each field can be regenerated on its own.
///
/// Field names on the wire carry a `generated` prefix so that a history
/// item can flatten parameters and outputs into one object.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct GenerationResult {
    /// Up to [`MAX_TITLES`] title suggestions.
    #[serde(rename = "generatedTitles", default)]
    pub titles: Vec<String>,
    /// Video description.
    #[serde(rename = "generatedDescription", default)]
    pub description: String,
    /// Keyword tags, already trimmed to the platform budget.
    #[serde(rename = "generatedTags", default)]
    pub tags: Vec<String>,
    /// Prompt for an image generator, always in the pivot language.
    #[serde(rename = "generatedThumbnailPrompt", default)]
    pub thumbnail_prompt: String,
    /// The long-form story or prayer.
    #[serde(rename = "generatedContent", default)]
    pub content: String,
    /// Call-to-action text.
    #[serde(rename = "generatedCta", default)]
    pub cta: String,
}

impl GenerationResult {
    /// Number of characters in the long-form content.
    #[must_use]
    pub fn content_char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Returns `true` when no output has been produced yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Selects the single output to re-issue in a regeneration request.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RegenerationField {
    /// Title suggestions.
    Titles,
    /// Description.
    Description,
    /// Keyword tags.
    Tags,
    /// Thumbnail image prompt.
    Thumbnail,
    /// Long-form content.
    Content,
    /// Call-to-action.
    Cta,
}

impl RegenerationField {
    /// Every field, in display order.
    pub const ALL: [Self; 6] = [
        Self::Titles,
        Self::Description,
        Self::Tags,
        Self::Thumbnail,
        Self::Content,
        Self::Cta,
    ];

    /// Returns the canonical lowercase tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Titles => "titles",
            Self::Description => "description",
            Self::Tags => "tags",
            Self::Thumbnail => "thumbnail",
            Self::Content => "content",
            Self::Cta => "cta",
        }
    }
}

impl fmt::Display for RegenerationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegenerationField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == needle)
            .ok_or(Error::UnknownField { value: needle })
    }
}
