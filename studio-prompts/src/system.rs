//! Per-language system instructions.

use crate::language::{is_pivot, language_name};
use crate::resources;
use crate::template::TemplateVars;

/// System instruction sent alongside every completion request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemInstruction {
    content: String,
}

impl SystemInstruction {
    /// Builds the instruction for a language code: a fixed literal for the
    /// pivot language, a parameterised one for every other code.
    #[must_use]
    pub fn for_language(code: &str) -> Self {
        let content = if is_pivot(code) {
            resources::system_pivot().template().to_owned()
        } else {
            resources::system_localized()
                .render(&TemplateVars::new().with("language_name", language_name(code)))
        };
        Self { content }
    }

    /// Returns the textual content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consumes the instruction, returning its text.
    #[must_use]
    pub fn into_content(self) -> String {
        self.content
    }
}

/// Returns the system instruction for a language code.
#[must_use]
pub fn system_instruction(code: &str) -> SystemInstruction {
    SystemInstruction::for_language(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pivot_language_uses_the_english_literal() {
        let instruction = SystemInstruction::for_language("en-US");
        assert!(instruction.content().contains("American English"));
        assert!(!instruction.content().contains("{{"));
    }

    #[test]
    fn other_languages_embed_the_language_name() {
        let instruction = SystemInstruction::for_language("de-DE");
        assert!(instruction.content().contains("sempre em Alemão"));

        let unknown = SystemInstruction::for_language("xx");
        assert!(unknown.content().contains("sempre em Português do Brasil"));
        assert_eq!(system_instruction("xx"), unknown);
    }
}
