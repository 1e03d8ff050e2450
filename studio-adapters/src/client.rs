//! Generation client: the single entry point through which prompts reach a
//! model.
//!
//! The client attaches the language-specific system instruction and the
//! sampling temperature, collects the adapter stream into one string, and
//! folds every adapter failure into one of three user-facing
//! [`GenerationError`] kinds. It never retries.

use std::fmt;
use std::sync::Arc;

use futures::StreamExt;
use studio_prompts::system_instruction;
use thiserror::Error;
use tracing::{debug, warn};

use crate::traits::{AdapterError, CompletionRequest, ModelAdapter, OutputSchema};

/// Sampling temperature applied when a call does not override it.
pub const DEFAULT_TEMPERATURE: f32 = 0.75;

const QUOTA_MARKERS: [&str; 2] = ["429", "RESOURCE_EXHAUSTED"];
const CREDENTIAL_MARKER: &str = "API key not valid";

/// Result alias for generation client calls.
pub type ClientResult<T> = Result<T, GenerationError>;

/// Which kind of completion was in flight when a failure happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionMode {
    /// Free-text completion.
    Text,
    /// Schema-constrained JSON completion.
    Structured,
}

impl CompletionMode {
    /// User-facing message for a generic failure in this mode.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Text => "Falha ao se comunicar com a API do Gemini para gerar texto.",
            Self::Structured => "Falha ao gerar dados estruturados com a API do Gemini.",
        }
    }
}

impl fmt::Display for CompletionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Structured => "structured",
        })
    }
}

/// User-facing failure of a completion call.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GenerationError {
    /// The provider reported rate limiting or an exhausted quota.
    #[error(
        "Você excedeu sua cota de API. Por favor, aguarde um pouco antes de tentar novamente ou verifique seu plano."
    )]
    QuotaExceeded,

    /// The provider rejected the API key.
    #[error("Sua chave de API não é válida. Por favor, verifique-a.")]
    InvalidCredential,

    /// Any other failure.
    #[error("{}", .mode.failure_message())]
    Communication {
        /// Completion mode that failed.
        mode: CompletionMode,
    },
}

/// Per-call overrides for free-text completions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CompletionOptions {
    /// Overrides the client's default temperature.
    pub temperature: Option<f32>,
}

impl CompletionOptions {
    /// Options overriding only the temperature.
    #[must_use]
    pub const fn with_temperature(temperature: f32) -> Self {
        Self {
            temperature: Some(temperature),
        }
    }
}

/// Issues completions against a [`ModelAdapter`].
#[derive(Clone)]
pub struct GenerationClient {
    adapter: Arc<dyn ModelAdapter>,
    default_temperature: f32,
}

impl fmt::Debug for GenerationClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationClient")
            .field("provider", &self.adapter.metadata().provider())
            .field("model", &self.adapter.metadata().model())
            .field("default_temperature", &self.default_temperature)
            .finish()
    }
}

impl GenerationClient {
    /// Creates a client over the supplied adapter.
    #[must_use]
    pub fn new(adapter: Arc<dyn ModelAdapter>) -> Self {
        Self {
            adapter,
            default_temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Replaces the default sampling temperature.
    #[must_use]
    pub fn with_default_temperature(mut self, temperature: f32) -> Self {
        self.default_temperature = temperature;
        self
    }

    /// Returns the default sampling temperature.
    #[must_use]
    pub const fn default_temperature(&self) -> f32 {
        self.default_temperature
    }

    /// Requests free text and returns it trimmed.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] when the adapter call fails.
    pub async fn complete_text(
        &self,
        prompt: &str,
        language: &str,
        options: CompletionOptions,
    ) -> ClientResult<String> {
        let temperature = options.temperature.unwrap_or(self.default_temperature);
        let request = CompletionRequest::new(prompt)
            .map_err(|err| normalize_error(&err, CompletionMode::Text))?
            .with_system_instruction(system_instruction(language).into_content())
            .with_temperature(temperature);

        self.run(request, CompletionMode::Text).await
    }

    /// Requests JSON matching `schema` and returns the raw response text.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] when the adapter call fails.
    pub async fn complete_structured(
        &self,
        prompt: &str,
        language: &str,
        schema: OutputSchema,
    ) -> ClientResult<String> {
        let request = CompletionRequest::new(prompt)
            .map_err(|err| normalize_error(&err, CompletionMode::Structured))?
            .with_system_instruction(system_instruction(language).into_content())
            .with_temperature(self.default_temperature)
            .with_json_schema(schema);

        self.run(request, CompletionMode::Structured).await
    }

    async fn run(&self, request: CompletionRequest, mode: CompletionMode) -> ClientResult<String> {
        let metadata = self.adapter.metadata();
        debug!(
            provider = metadata.provider(),
            model = metadata.model(),
            mode = %mode,
            prompt_len = request.prompt().len(),
            "issuing completion"
        );

        let mut stream = self
            .adapter
            .complete(request)
            .await
            .map_err(|err| normalize_error(&err, mode))?;

        let mut response = String::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|err| normalize_error(&err, mode))?;
            response.push_str(&chunk.delta);
            if chunk.done {
                break;
            }
        }

        Ok(response.trim().to_owned())
    }
}

/// Folds an adapter failure into one of the three user-facing kinds.
///
/// Quota signals win over credential signals; everything else is a
/// communication failure for `mode`.
#[must_use]
pub fn normalize_error(err: &AdapterError, mode: CompletionMode) -> GenerationError {
    let text = err.to_string();
    let normalized = if matches!(err, AdapterError::RateLimited { .. })
        || QUOTA_MARKERS.iter().any(|marker| text.contains(marker))
    {
        GenerationError::QuotaExceeded
    } else if matches!(err, AdapterError::Unauthorized { .. }) || text.contains(CREDENTIAL_MARKER)
    {
        GenerationError::InvalidCredential
    } else {
        GenerationError::Communication { mode }
    };

    warn!(error = %err, mode = %mode, kind = ?normalized, "completion failed");
    normalized
}
