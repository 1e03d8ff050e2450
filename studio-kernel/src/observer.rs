//! Progress callbacks for generation runs.

use std::sync::Arc;

use studio_primitives::GenerationResult;
use tracing::{debug, info};
use uuid::Uuid;

use crate::run::RunState;

/// Receives run progress so a presentation layer can show status text and
/// the fields set so far.
pub trait RunObserver: Send + Sync {
    /// Called after every state transition.
    fn on_state(&self, run_id: Uuid, state: RunState);

    /// Called whenever a stage fills in more of the result.
    fn on_partial(&self, run_id: Uuid, result: &GenerationResult);
}

/// Observer that emits progress to the tracing system.
#[derive(Debug, Default)]
pub struct TracingRunObserver;

impl RunObserver for TracingRunObserver {
    fn on_state(&self, run_id: Uuid, state: RunState) {
        match state {
            RunState::Complete | RunState::Failed => info!(%run_id, %state, "run finished"),
            _ => debug!(%run_id, %state, "run progress"),
        }
    }

    fn on_partial(&self, run_id: Uuid, result: &GenerationResult) {
        debug!(
            %run_id,
            content_chars = result.content_char_count(),
            titles = result.titles.len(),
            tags = result.tags.len(),
            "partial result"
        );
    }
}

/// Forwards progress to a collection of observers.
pub struct CompositeRunObserver {
    observers: Vec<Arc<dyn RunObserver>>,
}

impl CompositeRunObserver {
    /// Creates a composite from the supplied observers.
    #[must_use]
    pub fn new<I>(observers: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn RunObserver>>,
    {
        Self {
            observers: observers.into_iter().collect(),
        }
    }

    /// Adds an observer.
    pub fn push(&mut self, observer: Arc<dyn RunObserver>) {
        self.observers.push(observer);
    }
}

impl RunObserver for CompositeRunObserver {
    fn on_state(&self, run_id: Uuid, state: RunState) {
        for observer in &self.observers {
            observer.on_state(run_id, state);
        }
    }

    fn on_partial(&self, run_id: Uuid, result: &GenerationResult) {
        for observer in &self.observers {
            observer.on_partial(run_id, result);
        }
    }
}
