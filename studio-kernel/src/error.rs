//! Errors returned by orchestrator operations.

use std::fmt;

use studio_adapters::GenerationError;
use studio_memory::MemoryError;
use thiserror::Error;

use crate::run::RunError;

/// Required input that was absent when an operation started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingInput {
    /// No API credential is stored.
    Credential,
    /// The main idea is blank.
    MainPrompt,
}

impl fmt::Display for MissingInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Credential => {
                "Por favor, insira e salve sua chave de API do Google AI Studio para continuar."
            }
            Self::MainPrompt => "Por favor, insira a ideia principal para a geração.",
        })
    }
}

/// Failure of a user-facing operation.
#[derive(Debug, Error)]
pub enum StudioError {
    /// Validation failed before any network call.
    #[error("missing input: {0}")]
    MissingInput(MissingInput),
    /// The generation client failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// Credentials or history could not be persisted.
    #[error("storage failure: {0}")]
    Storage(#[from] MemoryError),
    /// The run state machine rejected a transition.
    #[error("run failure: {0}")]
    Run(#[from] RunError),
}

impl StudioError {
    /// Returns the single sentence shown to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingInput(missing) => missing.to_string(),
            Self::Generation(err) => err.to_string(),
            Self::Storage(err) => format!("Não foi possível salvar seus dados localmente: {err}"),
            Self::Run(_) => "Ocorreu um erro desconhecido durante a geração.".to_owned(),
        }
    }
}

impl From<MissingInput> for StudioError {
    fn from(missing: MissingInput) -> Self {
        Self::MissingInput(missing)
    }
}

/// Result alias for orchestrator operations.
pub type StudioResult<T> = Result<T, StudioError>;

#[cfg(test)]
mod tests {
    use studio_adapters::CompletionMode;

    use super::*;

    #[test]
    fn user_messages_are_plain_sentences() {
        let missing = StudioError::from(MissingInput::MainPrompt);
        assert_eq!(
            missing.user_message(),
            "Por favor, insira a ideia principal para a geração."
        );

        let quota = StudioError::from(GenerationError::QuotaExceeded);
        assert_eq!(quota.user_message(), GenerationError::QuotaExceeded.to_string());

        let comms = StudioError::from(GenerationError::Communication {
            mode: CompletionMode::Structured,
        });
        assert_eq!(comms.user_message(), CompletionMode::Structured.failure_message());
    }
}
