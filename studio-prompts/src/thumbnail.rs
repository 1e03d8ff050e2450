//! Image-generation prompt for the video thumbnail.

use studio_primitives::GenerationParams;

use crate::fragments::{creation_label, optional};
use crate::language::language_name;
use crate::resources;
use crate::template::TemplateVars;

/// Number of leading content characters quoted as a teaser.
pub const THUMBNAIL_TEASER_CHARS: usize = 300;

/// Builds the request for a thumbnail image prompt.
///
/// The instruction is written in the pivot language and asks for a scene
/// description plus a 3 to 5 word caption in the user's target language,
/// rendered verbatim on the image. `content` is the current long-form text;
/// only its first [`THUMBNAIL_TEASER_CHARS`] characters are quoted.
#[must_use]
pub fn thumbnail_prompt(
    params: &GenerationParams,
    content: &str,
    modification: Option<&str>,
) -> String {
    let teaser: String = content.chars().take(THUMBNAIL_TEASER_CHARS).collect();

    let vars = TemplateVars::new()
        .with("creation_label", creation_label(params.creation_type))
        .with("main_prompt", &params.main_prompt)
        .with("teaser", teaser)
        .with("language_name", language_name(&params.language))
        .with(
            "style",
            optional(&resources::thumbnail_style(), Some(params.thumbnail_prompt.as_str())),
        )
        .with(
            "modification",
            optional(&resources::thumbnail_modification(), modification),
        );

    resources::thumbnail().render(&vars)
}
