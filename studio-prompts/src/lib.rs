//! Prompt construction for every generation task.
//!
//! Builders are pure: they take a parameter snapshot (plus the current
//! content for the thumbnail task and an optional one-off modification) and
//! return the instruction string. Wording lives in resource templates under
//! `templates/`; the builders only decide which template and which values.

#![warn(missing_docs, clippy::pedantic)]

pub mod language;
pub mod template;

mod content;
mod fragments;
mod metadata;
mod resources;
mod system;
mod thumbnail;

pub use content::{content_length_feedback, content_prompt, enhance_prompt};
pub use language::{PIVOT_LANGUAGE, language_name};
pub use metadata::{
    CTA_MAX_CHARS, TAG_PLATFORM_LIMIT, TAG_PROMPT_BUDGET, cta_prompt, description_prompt,
    tags_prompt, titles_prompt,
};
pub use system::{SystemInstruction, system_instruction};
pub use template::{PromptTemplate, TemplateVars};
pub use thumbnail::{THUMBNAIL_TEASER_CHARS, thumbnail_prompt};
