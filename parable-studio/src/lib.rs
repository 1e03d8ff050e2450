//! Parable Studio facade.
//!
//! Bundles the workspace crates behind feature flags so applications depend
//! on one crate and enable only the layers they use.

#![warn(missing_docs, clippy::pedantic)]

/// Shared data model.
pub use studio_primitives as primitives;

/// Orchestrator and run state machine (enabled by `kernel` feature).
#[cfg(feature = "kernel")]
pub use studio_kernel as kernel;

/// Model adapters and generation client (enabled by `adapters` feature).
#[cfg(feature = "adapters")]
pub use studio_adapters as adapters;

/// Credential and history stores (enabled by `memory` feature).
#[cfg(feature = "memory")]
pub use studio_memory as memory;

/// Logging setup (enabled by `telemetry` feature).
#[cfg(feature = "telemetry")]
pub use studio_telemetry as telemetry;

/// Prompt builders (enabled by `prompts` feature).
#[cfg(feature = "prompts")]
pub use studio_prompts as prompts;

/// Configuration loading (enabled by `config` feature).
#[cfg(feature = "config")]
pub use studio_config as config;
