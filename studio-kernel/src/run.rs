//! State machine for a single "generate all" run.

use std::fmt;

use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// Stage a run occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Nothing issued yet.
    Idle,
    /// Length-converging content attempts in flight.
    GeneratingContent,
    /// Titles, description, tags and CTA in flight together.
    GeneratingMetadata,
    /// Thumbnail prompt in flight.
    GeneratingThumbnail,
    /// Every field set and the run recorded in history.
    Complete,
    /// A stage failed; fields set before the failure are kept.
    Failed,
}

impl RunState {
    /// Returns `true` while requests are in flight.
    #[must_use]
    pub const fn is_busy(self) -> bool {
        matches!(
            self,
            Self::GeneratingContent | Self::GeneratingMetadata | Self::GeneratingThumbnail
        )
    }

    /// Returns `true` once the run can no longer change.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Failed)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::GeneratingContent => "generating content",
            Self::GeneratingMetadata => "generating metadata",
            Self::GeneratingThumbnail => "generating thumbnail",
            Self::Complete => "complete",
            Self::Failed => "failed",
        })
    }
}

/// Events that move a run forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEvent {
    /// Inputs validated; start the content stage.
    Start,
    /// Content accepted.
    ContentReady,
    /// All four metadata fields set.
    MetadataReady,
    /// Thumbnail prompt set and history written.
    ThumbnailReady,
    /// A stage failed.
    Fail,
}

/// Tracks the stage of one run.
#[derive(Debug, Clone, Copy)]
pub struct Run {
    id: Uuid,
    state: RunState,
}

impl Default for Run {
    fn default() -> Self {
        Self::new()
    }
}

impl Run {
    /// Creates an idle run with a fresh identifier.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: RunState::Idle,
        }
    }

    /// Returns the run identifier used in logs and observer callbacks.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Applies an event, returning the resulting state.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::InvalidTransition`] when the event is not allowed
    /// from the current state.
    pub fn transition(&mut self, event: RunEvent) -> RunResult<RunState> {
        let next = match (self.state, event) {
            (RunState::Idle, RunEvent::Start) => Some(RunState::GeneratingContent),
            (RunState::GeneratingContent, RunEvent::ContentReady) => {
                Some(RunState::GeneratingMetadata)
            }
            (RunState::GeneratingMetadata, RunEvent::MetadataReady) => {
                Some(RunState::GeneratingThumbnail)
            }
            (RunState::GeneratingThumbnail, RunEvent::ThumbnailReady) => Some(RunState::Complete),
            (state, RunEvent::Fail) if state.is_busy() => Some(RunState::Failed),
            _ => None,
        };

        let Some(next_state) = next else {
            return Err(RunError::InvalidTransition {
                run_id: self.id,
                from: self.state,
                event,
            });
        };

        debug!(
            run_id = %self.id,
            from = %self.state,
            to = %next_state,
            ?event,
            "run transition"
        );
        self.state = next_state;
        Ok(self.state)
    }
}

/// Errors emitted by the run state machine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RunError {
    /// Transition was not permitted from the current state.
    #[error("invalid run transition from {from} via {event:?} for run {run_id}")]
    InvalidTransition {
        /// Run whose transition failed.
        run_id: Uuid,
        /// State prior to the attempted transition.
        from: RunState,
        /// Event that triggered the failure.
        event: RunEvent,
    },
}

/// Result alias used for run transitions.
pub type RunResult<T> = Result<T, RunError>;
