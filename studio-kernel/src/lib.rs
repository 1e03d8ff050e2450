//! Generation orchestration.
//!
//! [`Orchestrator`] drives the user-facing operations: a full run
//! (content, then the four metadata fields together, then the thumbnail),
//! single-field regeneration and prompt enhancement. Each full run walks
//! the [`RunState`] machine and reports progress through a
//! [`RunObserver`].

#![warn(missing_docs, clippy::pedantic)]

mod convergence;
mod error;
mod observer;
mod orchestrator;
pub mod postprocess;
mod run;

pub use convergence::{LengthPolicy, converge_content};
pub use error::{MissingInput, StudioError, StudioResult};
pub use observer::{CompositeRunObserver, RunObserver, TracingRunObserver};
pub use orchestrator::Orchestrator;
pub use postprocess::{enforce_tag_budget, parse_string_list, parse_tags, parse_titles, truncate_cta};
pub use run::{Run, RunError, RunEvent, RunResult, RunState};
