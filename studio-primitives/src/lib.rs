//! Core shared types for Parable Studio.
//!
//! Everything here is a plain value: parameters are snapshotted when a
//! request is issued and results are copied out of the orchestrator, so no
//! type in this crate carries interior mutability.

#![warn(missing_docs, clippy::pedantic)]

mod credential;
mod error;
mod history;
mod ids;
mod params;
mod result;
mod session;

/// Opaque API credential for the completion endpoint.
pub use credential::ApiCredential;
/// Error type and result alias shared across the workspace.
pub use error::{Error, Result};
/// Persisted record of a completed generation run.
pub use history::HistoryItem;
/// Synthetic identifier assigned to history items.
pub use ids::HistoryId;
/// User-supplied generation inputs.
pub use params::{
    CreationType, DEFAULT_CHARACTER_COUNT, DEFAULT_LANGUAGE, GenerationParams,
    MIN_CHARACTER_COUNT,
};
/// Generated outputs and the selector used to regenerate one of them.
pub use result::{GenerationResult, MAX_TITLES, RegenerationField};
/// Editable working copy of inputs and outputs.
pub use session::Session;
