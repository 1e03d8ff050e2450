//! Length convergence for the main content.
//!
//! The model is asked for a target length but routinely misses it. Each
//! attempt that lands outside the accepted window is retried with a note
//! stating how far off the previous attempt was. When the attempt budget
//! runs out the last attempt is kept whole rather than cut mid-sentence.

use studio_adapters::{ClientResult, CompletionOptions, GenerationClient};
use studio_config::GenerationSettings;
use studio_primitives::GenerationParams;
use studio_prompts::{content_length_feedback, content_prompt};
use tracing::{debug, warn};

/// Accepted length window and attempt budget for one content request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthPolicy {
    target: usize,
    tolerance: usize,
    max_attempts: usize,
    temperature: f32,
}

impl LengthPolicy {
    /// Creates a policy for `target` characters.
    ///
    /// A `max_attempts` of zero is raised to one.
    #[must_use]
    pub fn new(target: usize, tolerance: usize, max_attempts: usize, temperature: f32) -> Self {
        Self {
            target,
            tolerance,
            max_attempts: max_attempts.max(1),
            temperature,
        }
    }

    /// Builds the policy for `params` from generation settings.
    #[must_use]
    pub fn for_params(params: &GenerationParams, settings: &GenerationSettings) -> Self {
        Self::new(
            params.character_count,
            settings.character_tolerance,
            settings.effective_attempts(),
            settings.content_temperature,
        )
    }

    /// Returns the inclusive accepted length range.
    #[must_use]
    pub const fn window(&self) -> (usize, usize) {
        (
            self.target.saturating_sub(self.tolerance),
            self.target.saturating_add(self.tolerance),
        )
    }

    /// Returns whether a text of `length` characters is accepted.
    #[must_use]
    pub const fn accepts(&self, length: usize) -> bool {
        let (low, high) = self.window();
        length >= low && length <= high
    }

    /// Returns the attempt budget.
    #[must_use]
    pub const fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Returns the tolerance in characters.
    #[must_use]
    pub const fn tolerance(&self) -> usize {
        self.tolerance
    }
}

/// Generates content, retrying until its length falls inside the policy
/// window or the attempt budget is spent.
///
/// # Errors
///
/// Propagates the first client failure; no further attempts are made.
pub async fn converge_content(
    client: &GenerationClient,
    params: &GenerationParams,
    policy: &LengthPolicy,
    modification: Option<&str>,
) -> ClientResult<String> {
    let base_prompt = content_prompt(params, policy.tolerance(), modification);
    let options = CompletionOptions::with_temperature(policy.temperature);
    let (low, high) = policy.window();
    let mut text = String::new();

    for attempt in 1..=policy.max_attempts() {
        let prompt = if text.is_empty() {
            base_prompt.clone()
        } else {
            let feedback =
                content_length_feedback(params, text.chars().count(), policy.tolerance());
            format!("{base_prompt}{feedback}")
        };

        text = client
            .complete_text(&prompt, &params.language, options)
            .await?;
        let length = text.chars().count();
        debug!(attempt, length, low, high, "content attempt");

        if policy.accepts(length) {
            return Ok(text);
        }
    }

    warn!(
        attempts = policy.max_attempts(),
        length = text.chars().count(),
        low,
        high,
        "content length did not converge, keeping last attempt"
    );
    Ok(text)
}
