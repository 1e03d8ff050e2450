//! Sequencing of generation tasks.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use studio_adapters::traits::{AdapterFactory, OutputSchema};
use studio_adapters::{
    ClientResult, CompletionMode, CompletionOptions, GenerationClient, normalize_error,
};
use studio_config::GenerationSettings;
use studio_memory::{CredentialStore, HistoryStore};
use studio_primitives::{GenerationParams, GenerationResult, HistoryItem, RegenerationField};
use studio_prompts::{
    CTA_MAX_CHARS, PIVOT_LANGUAGE, TAG_PLATFORM_LIMIT, cta_prompt, description_prompt,
    enhance_prompt, tags_prompt, thumbnail_prompt, titles_prompt,
};
use tracing::{debug, info, warn};

use crate::convergence::{LengthPolicy, converge_content};
use crate::error::{MissingInput, StudioError, StudioResult};
use crate::observer::{RunObserver, TracingRunObserver};
use crate::postprocess::{enforce_tag_budget, parse_tags, parse_titles, truncate_cta};
use crate::run::{Run, RunEvent};

/// Runs the generation operations against the stored credential and
/// history.
///
/// Each operation reads a parameter snapshot and returns new values; nothing
/// is written back to the caller's state except through the history store.
pub struct Orchestrator {
    factory: Arc<dyn AdapterFactory>,
    credentials: Arc<CredentialStore>,
    history: Arc<HistoryStore>,
    settings: GenerationSettings,
    observer: Arc<dyn RunObserver>,
}

impl fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orchestrator")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    /// Creates an orchestrator with default settings and a tracing observer.
    #[must_use]
    pub fn new(
        factory: Arc<dyn AdapterFactory>,
        credentials: Arc<CredentialStore>,
        history: Arc<HistoryStore>,
    ) -> Self {
        Self {
            factory,
            credentials,
            history,
            settings: GenerationSettings::default(),
            observer: Arc::new(TracingRunObserver),
        }
    }

    /// Replaces the generation settings.
    #[must_use]
    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Replaces the run observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn RunObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Returns the credential store.
    #[must_use]
    pub fn credentials(&self) -> &Arc<CredentialStore> {
        &self.credentials
    }

    /// Returns the history store.
    #[must_use]
    pub fn history(&self) -> &Arc<HistoryStore> {
        &self.history
    }

    /// Returns the active generation settings.
    #[must_use]
    pub const fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Generates every field, then records the run in history.
    ///
    /// Content comes first; titles, description, tags and CTA are then
    /// requested together and all must succeed; the thumbnail prompt is
    /// built last from the final content.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::MissingInput`] before any network call when the
    /// credential or main idea is missing, otherwise the first failure of
    /// any stage. Fields completed before a failure are reported through the
    /// observer only.
    pub async fn generate_all(&self, params: &GenerationParams) -> StudioResult<HistoryItem> {
        let client = self.client(true, params).await?;

        let mut run = Run::new();
        self.advance(&mut run, RunEvent::Start)?;
        info!(run_id = %run.id(), creation_type = %params.creation_type, language = %params.language, "generation started");

        let mut result = GenerationResult::default();
        match self.execute(&client, params, &mut run, &mut result).await {
            Ok(item) => Ok(item),
            Err(err) => {
                warn!(run_id = %run.id(), error = %err, "generation failed");
                self.advance(&mut run, RunEvent::Fail)?;
                Err(err)
            }
        }
    }

    async fn execute(
        &self,
        client: &GenerationClient,
        params: &GenerationParams,
        run: &mut Run,
        result: &mut GenerationResult,
    ) -> StudioResult<HistoryItem> {
        result.content = self.content(client, params, None).await?;
        self.observer.on_partial(run.id(), result);
        self.advance(run, RunEvent::ContentReady)?;

        let (titles, description, tags, cta) = tokio::try_join!(
            self.titles(client, params, None),
            self.description(client, params, None),
            self.tags(client, params, None),
            self.cta(client, params, None),
        )?;
        result.titles = titles;
        result.description = description;
        result.tags = tags;
        result.cta = cta;
        self.observer.on_partial(run.id(), result);
        self.advance(run, RunEvent::MetadataReady)?;

        result.thumbnail_prompt = self
            .thumbnail(client, params, &result.content, None)
            .await?;
        self.observer.on_partial(run.id(), result);

        let item = HistoryItem::new(params.clone(), result.clone(), Utc::now().timestamp_millis());
        self.history.prepend(item.clone()).await?;
        self.advance(run, RunEvent::ThumbnailReady)?;
        info!(run_id = %run.id(), history_id = %item.id, "generation recorded");
        Ok(item)
    }

    /// Regenerates one field, returning `current` with only that field
    /// replaced.
    ///
    /// The thumbnail is rebuilt from `current.content`. History is not
    /// touched.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::MissingInput`] when no credential is stored,
    /// otherwise the client failure.
    pub async fn regenerate_field(
        &self,
        field: RegenerationField,
        params: &GenerationParams,
        modification: Option<&str>,
        current: &GenerationResult,
    ) -> StudioResult<GenerationResult> {
        let client = self.client(false, params).await?;
        debug!(%field, has_modification = modification.is_some(), "regenerating field");

        let mut next = current.clone();
        match field {
            RegenerationField::Titles => {
                next.titles = self.titles(&client, params, modification).await?;
            }
            RegenerationField::Description => {
                next.description = self.description(&client, params, modification).await?;
            }
            RegenerationField::Tags => {
                next.tags = self.tags(&client, params, modification).await?;
            }
            RegenerationField::Thumbnail => {
                next.thumbnail_prompt = self
                    .thumbnail(&client, params, &current.content, modification)
                    .await?;
            }
            RegenerationField::Content => {
                next.content = self.content(&client, params, modification).await?;
            }
            RegenerationField::Cta => {
                next.cta = self.cta(&client, params, modification).await?;
            }
        }
        Ok(next)
    }

    /// Expands the main idea into a richer single paragraph.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::MissingInput`] when the credential or main idea
    /// is missing, otherwise the client failure.
    pub async fn enhance_prompt(&self, params: &GenerationParams) -> StudioResult<String> {
        let client = self.client(true, params).await?;
        let text = client
            .complete_text(
                &enhance_prompt(params),
                &params.language,
                CompletionOptions::default(),
            )
            .await?;
        Ok(text)
    }

    async fn client(
        &self,
        require_main_prompt: bool,
        params: &GenerationParams,
    ) -> StudioResult<GenerationClient> {
        let credential = self
            .credentials
            .current()
            .await
            .ok_or(StudioError::MissingInput(MissingInput::Credential))?;
        if require_main_prompt && params.is_missing_main_prompt() {
            return Err(MissingInput::MainPrompt.into());
        }

        let adapter = self
            .factory
            .connect(&credential)
            .map_err(|err| normalize_error(&err, CompletionMode::Text))?;
        Ok(GenerationClient::new(adapter).with_default_temperature(self.settings.temperature))
    }

    fn advance(&self, run: &mut Run, event: RunEvent) -> StudioResult<()> {
        let state = run.transition(event)?;
        self.observer.on_state(run.id(), state);
        Ok(())
    }

    async fn content(
        &self,
        client: &GenerationClient,
        params: &GenerationParams,
        modification: Option<&str>,
    ) -> ClientResult<String> {
        let policy = LengthPolicy::for_params(params, &self.settings);
        converge_content(client, params, &policy, modification).await
    }

    async fn titles(
        &self,
        client: &GenerationClient,
        params: &GenerationParams,
        modification: Option<&str>,
    ) -> ClientResult<Vec<String>> {
        let raw = client
            .complete_structured(
                &titles_prompt(params, modification),
                &params.language,
                OutputSchema::string_array(),
            )
            .await?;
        Ok(parse_titles(&raw))
    }

    async fn description(
        &self,
        client: &GenerationClient,
        params: &GenerationParams,
        modification: Option<&str>,
    ) -> ClientResult<String> {
        client
            .complete_text(
                &description_prompt(params, modification),
                &params.language,
                CompletionOptions::default(),
            )
            .await
    }

    async fn tags(
        &self,
        client: &GenerationClient,
        params: &GenerationParams,
        modification: Option<&str>,
    ) -> ClientResult<Vec<String>> {
        let raw = client
            .complete_structured(
                &tags_prompt(params, modification),
                &params.language,
                OutputSchema::string_array(),
            )
            .await?;
        Ok(enforce_tag_budget(parse_tags(&raw), TAG_PLATFORM_LIMIT))
    }

    async fn cta(
        &self,
        client: &GenerationClient,
        params: &GenerationParams,
        modification: Option<&str>,
    ) -> ClientResult<String> {
        let text = client
            .complete_text(
                &cta_prompt(params, modification),
                &params.language,
                CompletionOptions::default(),
            )
            .await?;
        Ok(truncate_cta(&text, CTA_MAX_CHARS))
    }

    async fn thumbnail(
        &self,
        client: &GenerationClient,
        params: &GenerationParams,
        content: &str,
        modification: Option<&str>,
    ) -> ClientResult<String> {
        client
            .complete_text(
                &thumbnail_prompt(params, content, modification),
                PIVOT_LANGUAGE,
                CompletionOptions::default(),
            )
            .await
    }
}
