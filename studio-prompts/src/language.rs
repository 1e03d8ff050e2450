//! Output language table.

/// Language every image prompt is written in, whatever the output language.
pub const PIVOT_LANGUAGE: &str = "en-US";

/// Name used when a language code is not in the table.
pub const FALLBACK_LANGUAGE_NAME: &str = "Português do Brasil";

const LANGUAGES: [(&str, &str); 5] = [
    ("pt-BR", "Português do Brasil"),
    ("en-US", "Inglês Americano"),
    ("es-ES", "Espanhol (Espanha)"),
    ("fr-FR", "Francês"),
    ("de-DE", "Alemão"),
];

/// Resolves a language code to the name embedded in prompts.
#[must_use]
pub fn language_name(code: &str) -> &'static str {
    LANGUAGES
        .iter()
        .find(|(known, _)| *known == code)
        .map_or(FALLBACK_LANGUAGE_NAME, |(_, name)| name)
}

/// Returns `(code, name)` pairs for every supported language.
#[must_use]
pub fn supported_languages() -> &'static [(&'static str, &'static str)] {
    &LANGUAGES
}

/// Returns `true` for the pivot language code.
#[must_use]
pub fn is_pivot(code: &str) -> bool {
    code == PIVOT_LANGUAGE
}
