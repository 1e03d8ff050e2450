//! Titles, description, tags and call-to-action prompts.

use studio_primitives::GenerationParams;

use crate::fragments::{creation_label, creation_noun, optional};
use crate::language::language_name;
use crate::resources;
use crate::template::TemplateVars;

/// Hard limit on the summed length of all tags.
pub const TAG_PLATFORM_LIMIT: usize = 500;

/// Total tag length requested from the model, leaving a margin below
/// [`TAG_PLATFORM_LIMIT`].
pub const TAG_PROMPT_BUDGET: usize = 480;

/// Maximum call-to-action length.
pub const CTA_MAX_CHARS: usize = 500;

fn base_vars(params: &GenerationParams, modification: Option<&str>) -> TemplateVars {
    TemplateVars::new()
        .with("main_prompt", &params.main_prompt)
        .with("creation_label", creation_label(params.creation_type))
        .with("language_name", language_name(&params.language))
        .with("modification", optional(&resources::modification(), modification))
}

/// Builds the request for five click-through-optimised titles, answered as
/// a JSON array of strings.
#[must_use]
pub fn titles_prompt(params: &GenerationParams, modification: Option<&str>) -> String {
    let vars = base_vars(params, modification).with(
        "guidance",
        optional(&resources::guidance(), Some(params.title_prompt.as_str())),
    );
    resources::titles().render(&vars)
}

/// Builds the request for a single engagement-optimised description.
#[must_use]
pub fn description_prompt(params: &GenerationParams, modification: Option<&str>) -> String {
    let vars = base_vars(params, modification).with(
        "guidance",
        optional(&resources::guidance(), Some(params.description_prompt.as_str())),
    );
    resources::description().render(&vars)
}

/// Builds the request for a mix of specific and broad keyword tags whose
/// total length stays under [`TAG_PROMPT_BUDGET`].
#[must_use]
pub fn tags_prompt(params: &GenerationParams, modification: Option<&str>) -> String {
    let vars = base_vars(params, modification)
        .with("tag_budget", TAG_PROMPT_BUDGET)
        .with("platform_limit", TAG_PLATFORM_LIMIT);
    resources::tags().render(&vars)
}

/// Builds the request for a persuasive call-to-action of at most
/// [`CTA_MAX_CHARS`] characters.
#[must_use]
pub fn cta_prompt(params: &GenerationParams, modification: Option<&str>) -> String {
    let vars = base_vars(params, modification)
        .with("creation_noun", creation_noun(params.creation_type))
        .with("max_chars", CTA_MAX_CHARS);
    resources::cta().render(&vars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_primitives::CreationType;

    fn params() -> GenerationParams {
        GenerationParams::new(CreationType::Prayer, "oração da manhã").with_language("fr-FR")
    }

    #[test]
    fn titles_request_five_json_strings() {
        let prompt = titles_prompt(&params(), None);
        assert!(prompt.contains("gere 5 sugestões de títulos"));
        assert!(prompt.contains("taxa de cliques (CTR) para uma oração."));
        assert!(prompt.ends_with("Gere os títulos no idioma Francês. Responda com um array JSON de strings."));
        assert!(!prompt.contains("Leve em consideração"));
    }

    #[test]
    fn titles_include_guidance_then_modification() {
        let params = params().with_title_prompt("use números");
        let prompt = titles_prompt(&params, Some("mais curtos"));
        assert!(prompt.contains(
            "(CTR) para uma oração. Leve em consideração: \"use números\". Modifique com a seguinte instrução: \"mais curtos\". Gere os títulos"
        ));
    }

    #[test]
    fn description_uses_its_own_guidance() {
        let params = params()
            .with_title_prompt("TÍTULO")
            .with_description_prompt("cite Salmos 5:3");
        let prompt = description_prompt(&params, None);
        assert!(prompt.contains("Leve em consideração: \"cite Salmos 5:3\"."));
        assert!(!prompt.contains("TÍTULO"));
        assert!(prompt.contains("pronta para ser copiada e colada no YouTube."));
    }

    #[test]
    fn tags_state_the_character_budget() {
        let prompt = tags_prompt(&params(), None);
        assert!(prompt.contains("Tags Específicas (Long-tail)"));
        assert!(prompt.contains("Tags Abrangentes (Short-tail)"));
        assert!(prompt.contains("inferior a 480 caracteres"));
        assert!(prompt.contains("limite de 500 caracteres do YouTube"));
        assert!(prompt.contains("no idioma Francês. Responda com um array JSON de strings."));
    }

    #[test]
    fn cta_names_actions_and_limit() {
        let story = GenerationParams::new(CreationType::Story, "Rute e Noemi");
        let prompt = cta_prompt(&story, Some("tom acolhedor"));
        assert!(prompt.contains("para uma história, crie"));
        assert!(prompt.contains("se inscrever no canal, ativar as notificações, curtir o vídeo e deixar um comentário"));
        assert!(prompt.contains("no máximo 500 caracteres. Modifique com a seguinte instrução: \"tom acolhedor\"."));
        assert!(prompt.ends_with("Retorne apenas o texto da CTA."));
    }
}
