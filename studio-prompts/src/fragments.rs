//! Small pieces shared by the task builders.

use studio_primitives::CreationType;

use crate::template::{PromptTemplate, TemplateVars};

/// Noun phrase used in metadata prompts ("a {label}").
pub(crate) const fn creation_label(kind: CreationType) -> &'static str {
    match kind {
        CreationType::Story => "história bíblica",
        CreationType::Prayer => "oração",
    }
}

/// Bare noun used where the source material is already implied.
pub(crate) const fn creation_noun(kind: CreationType) -> &'static str {
    match kind {
        CreationType::Story => "história",
        CreationType::Prayer => "oração",
    }
}

/// Treats blank optional text as absent.
pub(crate) fn non_blank(text: Option<&str>) -> Option<&str> {
    text.filter(|value| !value.trim().is_empty())
}

/// Renders `template` around `text`, or returns an empty string when the
/// text is absent or blank.
pub(crate) fn optional(template: &PromptTemplate, text: Option<&str>) -> String {
    non_blank(text).map_or_else(String::new, |value| {
        template.render(&TemplateVars::new().with("text", value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fragments_skip_blank_text() {
        let template = PromptTemplate::new("t", " Considere: \"{{text}}\".");
        assert_eq!(optional(&template, None), "");
        assert_eq!(optional(&template, Some("  ")), "");
        assert_eq!(optional(&template, Some("curto")), " Considere: \"curto\".");
    }
}
