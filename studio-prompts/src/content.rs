//! Long-form content and idea-enhancement prompts.

use studio_primitives::{CreationType, GenerationParams};

use crate::fragments::{creation_label, creation_noun, non_blank};
use crate::language::language_name;
use crate::resources;
use crate::template::TemplateVars;

/// Builds the instruction for the long-form story or prayer.
///
/// `tolerance` is the accepted distance from `params.character_count`,
/// stated in the prompt as a `+/-` window.
#[must_use]
pub fn content_prompt(
    params: &GenerationParams,
    tolerance: usize,
    modification: Option<&str>,
) -> String {
    let rules = match params.creation_type {
        CreationType::Story => resources::content_story_rules(),
        CreationType::Prayer => resources::content_prayer_rules(),
    };

    let modification = non_blank(modification).map_or_else(String::new, |text| {
        resources::content_modification().render(&TemplateVars::new().with("modification", text))
    });

    let vars = TemplateVars::new()
        .with("language_name", language_name(&params.language))
        .with("rules", rules.template())
        .with("character_count", params.character_count)
        .with("tolerance", tolerance)
        .with("creation_noun", creation_noun(params.creation_type))
        .with("creation_label", creation_label(params.creation_type))
        .with("main_prompt", &params.main_prompt)
        .with("modification", modification);

    resources::content().render(&vars)
}

/// Builds the paragraph appended to a retry after an attempt of
/// `previous_length` characters missed the target window.
///
/// Lengths below `target - tolerance` are reported as too short; anything
/// else as too long.
#[must_use]
pub fn content_length_feedback(
    params: &GenerationParams,
    previous_length: usize,
    tolerance: usize,
) -> String {
    let target = params.character_count;
    let too_short = previous_length < target.saturating_sub(tolerance);
    let (verdict, direction) = if too_short {
        ("muito curta", "abaixo")
    } else {
        ("muito longa", "acima")
    };
    let content_word = match params.creation_type {
        CreationType::Story => "a narrativa",
        CreationType::Prayer => "a oração",
    };

    let vars = TemplateVars::new()
        .with("verdict", verdict)
        .with("previous_length", previous_length)
        .with("distance", previous_length.abs_diff(target))
        .with("direction", direction)
        .with("content_word", content_word)
        .with("character_count", target);

    resources::content_feedback().render(&vars)
}

/// Builds the instruction that expands a short idea into a richer one.
///
/// Only the main idea and language are used; no other field is touched.
#[must_use]
pub fn enhance_prompt(params: &GenerationParams) -> String {
    let vars = TemplateVars::new()
        .with("main_prompt", &params.main_prompt)
        .with("language_name", language_name(&params.language));
    resources::enhance().render(&vars)
}
