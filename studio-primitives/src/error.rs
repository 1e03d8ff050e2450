//! Shared error definitions for studio primitives.

use thiserror::Error;

/// Result alias used throughout the studio crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while parsing or validating primitive values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The supplied creation type is not one of `story` or `prayer`.
    #[error("unknown creation type `{value}`")]
    UnknownCreationType {
        /// The offending input.
        value: String,
    },

    /// The supplied field name does not select a regenerable output.
    #[error("unknown output field `{value}`")]
    UnknownField {
        /// The offending input.
        value: String,
    },

    /// Credentials must contain at least one non-whitespace character.
    #[error("API credential cannot be empty")]
    EmptyCredential,
}
