//! Model adapters and the generation client.
//!
//! [`traits`] defines the provider-neutral request and adapter interface,
//! [`gemini`] implements it over HTTPS, and [`client`] is what the
//! orchestrator calls.

#![warn(missing_docs, clippy::pedantic)]

pub mod client;
pub mod gemini;
pub mod traits;

mod http_client;

pub use client::{
    ClientResult, CompletionMode, CompletionOptions, DEFAULT_TEMPERATURE, GenerationClient,
    GenerationError, normalize_error,
};
