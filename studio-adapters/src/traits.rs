//! Shared model adapter traits and data structures.

use std::fmt;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use studio_primitives::ApiCredential;
use thiserror::Error;

/// Result alias used by model adapters.
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Streaming response emitted by [`ModelAdapter::complete`].
pub type AdapterStream = Pin<Box<dyn Stream<Item = AdapterResult<CompletionChunk>> + Send>>;

/// Error type shared by adapter implementations.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Adapter is misconfigured or missing credentials.
    #[error("adapter not configured: {reason}")]
    Configuration {
        /// Additional context for the failure.
        reason: String,
    },

    /// The supplied request was invalid for the target model.
    #[error("invalid completion request: {reason}")]
    InvalidRequest {
        /// Reason describing why the request could not be processed.
        reason: String,
    },

    /// Transport-level failures (network, protocol, timeouts).
    #[error("adapter transport error: {reason}")]
    Transport {
        /// Additional context about the error.
        reason: String,
    },

    /// The provider rejected the request due to rate limiting or exhausted quota.
    #[error("adapter rate limited (retry after {retry_after:?})")]
    RateLimited {
        /// Suggested delay before retrying.
        retry_after: Option<Duration>,
    },

    /// The provider rejected the credential.
    #[error("adapter unauthorized: {reason}")]
    Unauthorized {
        /// Provider message.
        reason: String,
    },

    /// The provider returned an error status or a malformed response.
    #[error("adapter response error: {reason}")]
    Response {
        /// Additional context about the response failure.
        reason: String,
    },
}

impl AdapterError {
    /// Convenience constructor for invalid requests.
    #[must_use]
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for configuration issues.
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for transport failures.
    #[must_use]
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for response failures.
    #[must_use]
    pub fn response(reason: impl Into<String>) -> Self {
        Self::Response {
            reason: reason.into(),
        }
    }
}

/// Minimal metadata describing a model adapter instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdapterMetadata {
    provider: &'static str,
    model: String,
}

impl AdapterMetadata {
    /// Creates metadata for the supplied provider and model identifier.
    #[must_use]
    pub fn new(provider: &'static str, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Returns the provider identifier (e.g., "gemini").
    #[must_use]
    pub const fn provider(&self) -> &'static str {
        self.provider
    }

    /// Returns the configured model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Declared shape of a structured response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputSchema(Value);

impl OutputSchema {
    /// Schema for a JSON array of strings.
    #[must_use]
    pub fn string_array() -> Self {
        Self(json!({
            "type": "ARRAY",
            "items": { "type": "STRING" }
        }))
    }

    /// Returns the schema document.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }
}

/// How the provider should format its answer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Free text.
    #[default]
    Text,
    /// JSON conforming to the supplied schema.
    Json {
        /// Declared output shape.
        schema: OutputSchema,
    },
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Json { .. } => "json",
        })
    }
}

/// Single-prompt completion request submitted to a model adapter.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct CompletionRequest {
    prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    system_instruction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(default)]
    response_format: ResponseFormat,
}

impl CompletionRequest {
    /// Creates a free-text request for the supplied prompt.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::InvalidRequest`] if the prompt is blank.
    pub fn new(prompt: impl Into<String>) -> AdapterResult<Self> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(AdapterError::invalid_request(
                "completion request requires a non-empty prompt",
            ));
        }

        Ok(Self {
            prompt,
            system_instruction: None,
            temperature: None,
            response_format: ResponseFormat::Text,
        })
    }

    /// Sets the system instruction that steers the model.
    #[must_use]
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Constrains the answer to JSON matching `schema`.
    #[must_use]
    pub fn with_json_schema(mut self, schema: OutputSchema) -> Self {
        self.response_format = ResponseFormat::Json { schema };
        self
    }

    /// Returns the prompt text.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Returns the system instruction if configured.
    #[must_use]
    pub fn system_instruction(&self) -> Option<&str> {
        self.system_instruction.as_deref()
    }

    /// Returns the configured sampling temperature.
    #[must_use]
    pub const fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    /// Returns the requested response format.
    #[must_use]
    pub const fn response_format(&self) -> &ResponseFormat {
        &self.response_format
    }
}

/// Streaming chunk returned by the adapter.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct CompletionChunk {
    /// Partial text delta emitted by the provider.
    pub delta: String,
    /// Whether the generation is complete.
    pub done: bool,
}

impl CompletionChunk {
    /// Creates a new chunk.
    #[must_use]
    pub fn new(delta: impl Into<String>, done: bool) -> Self {
        Self {
            delta: delta.into(),
            done,
        }
    }
}

/// Trait implemented by all model adapters.
#[async_trait]
pub trait ModelAdapter: Send + Sync {
    /// Returns basic metadata describing the adapter instance.
    fn metadata(&self) -> &AdapterMetadata;

    /// Executes the completion request, returning a streaming response.
    async fn complete(&self, request: CompletionRequest) -> AdapterResult<AdapterStream>;
}

/// Builds an adapter bound to a user credential.
///
/// Credentials can change between requests, so adapters are created per
/// operation rather than held for the life of the process.
pub trait AdapterFactory: Send + Sync {
    /// Creates an adapter that authenticates with `credential`.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Configuration`] when the adapter cannot be built.
    fn connect(&self, credential: &ApiCredential) -> AdapterResult<Arc<dyn ModelAdapter>>;
}
