//! Strongly typed configuration schema.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_model() -> String {
    "gemini-2.5-flash".to_owned()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/".to_owned()
}

const fn default_request_timeout_secs() -> u64 {
    60
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".parable-studio")
}

fn default_log_filter() -> String {
    "info".to_owned()
}

const fn default_temperature() -> f32 {
    0.75
}

const fn default_content_temperature() -> f32 {
    0.5
}

const fn default_character_tolerance() -> usize {
    500
}

const fn default_max_content_attempts() -> usize {
    3
}

/// Top-level configuration. Every field has a default, so an empty file is
/// valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StudioConfig {
    /// Gemini model identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// API root, ending in `/`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request HTTP timeout.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Directory holding the credential and history files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Generation tuning.
    #[serde(default)]
    pub generation: GenerationSettings,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            data_dir: default_data_dir(),
            log_filter: default_log_filter(),
            generation: GenerationSettings::default(),
        }
    }
}

/// Sampling and length-convergence settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationSettings {
    /// Temperature for every completion except content attempts.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Temperature for content attempts.
    #[serde(default = "default_content_temperature")]
    pub content_temperature: f32,
    /// Accepted distance, in characters, from the requested content length.
    #[serde(default = "default_character_tolerance")]
    pub character_tolerance: usize,
    /// Content attempts before the last one is accepted as is.
    #[serde(default = "default_max_content_attempts")]
    pub max_content_attempts: usize,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            content_temperature: default_content_temperature(),
            character_tolerance: default_character_tolerance(),
            max_content_attempts: default_max_content_attempts(),
        }
    }
}

impl GenerationSettings {
    /// Attempt budget with zero raised to one.
    #[must_use]
    pub const fn effective_attempts(&self) -> usize {
        if self.max_content_attempts == 0 {
            1
        } else {
            self.max_content_attempts
        }
    }
}
