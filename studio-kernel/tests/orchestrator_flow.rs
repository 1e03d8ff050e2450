use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::stream;
use studio_adapters::traits::{
    AdapterError, AdapterFactory, AdapterMetadata, AdapterResult, AdapterStream, CompletionChunk,
    CompletionRequest, ModelAdapter, ResponseFormat,
};
use studio_adapters::GenerationError;
use studio_config::GenerationSettings;
use studio_kernel::{MissingInput, Orchestrator, RunObserver, RunState, StudioError};
use studio_memory::{CredentialStore, FileStore, HistoryStore, KeyValueStore, VolatileStore};
use studio_primitives::{
    ApiCredential, CreationType, GenerationParams, GenerationResult, RegenerationField, Session,
};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Task {
    Content,
    Titles,
    Description,
    Tags,
    Cta,
    Thumbnail,
    Enhance,
}

impl Task {
    fn of(prompt: &str) -> Self {
        if prompt.starts_with("Sua tarefa tem cinco regras") {
            Self::Content
        } else if prompt.contains("sugestões de títulos") {
            Self::Titles
        } else if prompt.contains("escreva uma descrição") {
            Self::Description
        } else if prompt.contains("tags de SEO") {
            Self::Tags
        } else if prompt.contains("call to action") {
            Self::Cta
        } else if prompt.starts_with("Your task is to create a detailed prompt") {
            Self::Thumbnail
        } else if prompt.starts_with("Aja como um roteirista") {
            Self::Enhance
        } else {
            panic!("unrecognised prompt: {prompt}")
        }
    }
}

#[derive(Clone)]
enum Reply {
    Text(String),
    RateLimited,
    Unauthorized,
}

fn text(value: impl Into<String>) -> Reply {
    Reply::Text(value.into())
}

/// Adapter answering from per-task queues. The last queued reply repeats.
struct ScriptedAdapter {
    metadata: AdapterMetadata,
    replies: Mutex<HashMap<Task, VecDeque<Reply>>>,
    seen: Mutex<Vec<(Task, CompletionRequest)>>,
}

impl ScriptedAdapter {
    fn new() -> Arc<Self> {
        let defaults = [
            (Task::Content, text("a".repeat(1500))),
            (Task::Titles, text(r#"["Davi", "Golias", "A Funda"]"#)),
            (Task::Description, text("Uma descrição.")),
            (Task::Tags, text(r#"["davi", "golias", "fé"]"#)),
            (Task::Cta, text("Inscreva-se no canal!")),
            (Task::Thumbnail, text("A shepherd boy facing a giant.")),
            (Task::Enhance, text("Davi, jovem pastor, enfrenta Golias com fé.")),
        ];
        Arc::new(Self {
            metadata: AdapterMetadata::new("scripted", "test"),
            replies: Mutex::new(
                defaults
                    .into_iter()
                    .map(|(task, reply)| (task, VecDeque::from([reply])))
                    .collect(),
            ),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn script(&self, task: Task, replies: Vec<Reply>) {
        self.replies.lock().unwrap().insert(task, replies.into());
    }

    fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    fn requests(&self, task: Task) -> Vec<CompletionRequest> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .filter(|(seen, _)| *seen == task)
            .map(|(_, request)| request.clone())
            .collect()
    }
}

#[async_trait]
impl ModelAdapter for ScriptedAdapter {
    fn metadata(&self) -> &AdapterMetadata {
        &self.metadata
    }

    async fn complete(&self, request: CompletionRequest) -> AdapterResult<AdapterStream> {
        let task = Task::of(request.prompt());
        self.seen.lock().unwrap().push((task, request));

        let reply = {
            let mut replies = self.replies.lock().unwrap();
            let queue = replies.get_mut(&task).expect("scripted task");
            if queue.len() > 1 {
                queue.pop_front().unwrap()
            } else {
                queue.front().cloned().unwrap()
            }
        };

        match reply {
            Reply::Text(body) => {
                let chunk = CompletionChunk::new(body, true);
                Ok(Box::pin(stream::once(async move { Ok(chunk) })))
            }
            Reply::RateLimited => Err(AdapterError::RateLimited { retry_after: None }),
            Reply::Unauthorized => Err(AdapterError::Unauthorized {
                reason: "API key not valid".into(),
            }),
        }
    }
}

struct ScriptedFactory {
    adapter: Arc<ScriptedAdapter>,
    connects: AtomicUsize,
}

impl AdapterFactory for ScriptedFactory {
    fn connect(&self, _credential: &ApiCredential) -> AdapterResult<Arc<dyn ModelAdapter>> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(self.adapter.clone())
    }
}

#[derive(Default)]
struct RecordingObserver {
    states: Mutex<Vec<RunState>>,
    partials: Mutex<Vec<GenerationResult>>,
}

impl RunObserver for RecordingObserver {
    fn on_state(&self, _run_id: Uuid, state: RunState) {
        self.states.lock().unwrap().push(state);
    }

    fn on_partial(&self, _run_id: Uuid, result: &GenerationResult) {
        self.partials.lock().unwrap().push(result.clone());
    }
}

struct Harness {
    adapter: Arc<ScriptedAdapter>,
    factory: Arc<ScriptedFactory>,
    observer: Arc<RecordingObserver>,
    orchestrator: Orchestrator,
}

async fn harness_with(store: Arc<dyn KeyValueStore>, credential: Option<&str>) -> Harness {
    let adapter = ScriptedAdapter::new();
    let factory = Arc::new(ScriptedFactory {
        adapter: adapter.clone(),
        connects: AtomicUsize::new(0),
    });
    let credentials = Arc::new(CredentialStore::load(store.clone()).await.unwrap());
    if let Some(key) = credential {
        credentials.save(key).await.unwrap();
    }
    let history = Arc::new(HistoryStore::load(store).await.unwrap());
    let observer = Arc::new(RecordingObserver::default());
    let orchestrator = Orchestrator::new(factory.clone(), credentials, history)
        .with_settings(GenerationSettings::default())
        .with_observer(observer.clone());

    Harness {
        adapter,
        factory,
        observer,
        orchestrator,
    }
}

async fn harness() -> Harness {
    harness_with(Arc::new(VolatileStore::new()), Some("AIza-test")).await
}

fn story(idea: &str) -> GenerationParams {
    GenerationParams::new(CreationType::Story, idea)
}

#[tokio::test]
async fn missing_inputs_fail_before_any_call() {
    let no_key = harness_with(Arc::new(VolatileStore::new()), None).await;
    let err = no_key
        .orchestrator
        .generate_all(&story("Davi e Golias"))
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::MissingInput(MissingInput::Credential)));

    let h = harness().await;
    for idea in ["", "   \n"] {
        let err = h.orchestrator.generate_all(&story(idea)).await.unwrap_err();
        assert!(matches!(err, StudioError::MissingInput(MissingInput::MainPrompt)));
        let err = h.orchestrator.enhance_prompt(&story(idea)).await.unwrap_err();
        assert!(matches!(err, StudioError::MissingInput(MissingInput::MainPrompt)));
    }

    assert_eq!(no_key.adapter.calls(), 0);
    assert_eq!(h.adapter.calls(), 0);
    assert_eq!(h.factory.connects.load(Ordering::SeqCst), 0);
    assert!(h.observer.states.lock().unwrap().is_empty());
    assert!(h.orchestrator.history().items().await.is_empty());
}

#[tokio::test]
async fn full_run_fills_every_field_and_records_history() {
    let h = harness().await;
    h.adapter.script(
        Task::Titles,
        vec![text(r#"["1", "2", "3", "4", "5", "6", "7"]"#)],
    );
    let long_cta = format!("{}. {}", "b".repeat(480), "c ".repeat(100));
    h.adapter.script(Task::Cta, vec![text(long_cta)]);
    let tags: Vec<String> = (0..40).map(|n| format!("tag-numero-{n:02}")).collect();
    h.adapter.script(
        Task::Tags,
        vec![text(serde_json::to_string(&tags).unwrap())],
    );

    let params = story("Davi e Golias").with_project_name("Reis");
    let item = h.orchestrator.generate_all(&params).await.unwrap();

    assert_eq!(item.params, params);
    assert!(item.id.as_str().starts_with("history-"));
    assert!(item.timestamp > 0);
    assert_eq!(item.result.content_char_count(), 1500);
    assert_eq!(item.result.titles, vec!["1", "2", "3", "4", "5"]);
    assert_eq!(item.result.description, "Uma descrição.");
    assert_eq!(item.result.thumbnail_prompt, "A shepherd boy facing a giant.");

    let tag_chars: usize = item.result.tags.iter().map(|t| t.chars().count()).sum();
    assert!(tag_chars <= 500);
    assert_eq!(item.result.tags[..], tags[..item.result.tags.len()]);
    assert!(item.result.tags.len() < tags.len());

    assert_eq!(item.result.cta.chars().count(), 481);
    assert!(item.result.cta.ends_with('.'));

    assert_eq!(h.orchestrator.history().items().await, vec![item.clone()]);
    assert_eq!(
        *h.observer.states.lock().unwrap(),
        vec![
            RunState::GeneratingContent,
            RunState::GeneratingMetadata,
            RunState::GeneratingThumbnail,
            RunState::Complete,
        ]
    );
    let partials = h.observer.partials.lock().unwrap();
    assert_eq!(partials.len(), 3);
    assert!(partials[0].titles.is_empty());
    assert!(!partials[0].content.is_empty());
}

#[tokio::test]
async fn requests_carry_language_temperature_and_format() {
    let h = harness().await;
    let params = story("Rute e Noemi").with_language("fr-FR");
    h.orchestrator.generate_all(&params).await.unwrap();

    let content = h.adapter.requests(Task::Content);
    assert_eq!(content.len(), 1);
    assert_eq!(content[0].temperature(), Some(0.5));
    assert!(content[0].system_instruction().unwrap().contains("Francês"));
    assert_eq!(content[0].response_format(), &ResponseFormat::Text);

    for task in [Task::Titles, Task::Tags] {
        let requests = h.adapter.requests(task);
        assert_eq!(requests[0].response_format().to_string(), "json");
        assert_eq!(requests[0].temperature(), Some(0.75));
    }
    for task in [Task::Description, Task::Cta] {
        assert_eq!(h.adapter.requests(task)[0].response_format(), &ResponseFormat::Text);
    }

    let thumbnail = h.adapter.requests(Task::Thumbnail);
    assert!(
        thumbnail[0]
            .system_instruction()
            .unwrap()
            .contains("American English")
    );
    assert!(thumbnail[0].prompt().contains(&format!("{}...", "a".repeat(300))));
}

#[tokio::test]
async fn content_converges_with_length_feedback() {
    let h = harness().await;
    h.adapter.script(
        Task::Content,
        vec![
            text("l".repeat(2500)),
            text("s".repeat(500)),
            text("k".repeat(1500)),
        ],
    );

    let item = h.orchestrator.generate_all(&story("Jonas")).await.unwrap();
    assert_eq!(item.result.content, "k".repeat(1500));

    let requests = h.adapter.requests(Task::Content);
    assert_eq!(requests.len(), 3);
    assert!(!requests[0].prompt().contains("AVISO IMPORTANTE"));
    assert!(requests[1].prompt().contains("muito longa (2500 caracteres"));
    assert!(requests[2].prompt().contains("muito curta (500 caracteres"));
}

#[tokio::test]
async fn content_accepted_on_first_attempt_makes_one_call() {
    let h = harness().await;
    h.adapter.script(Task::Content, vec![text("x".repeat(1100))]);
    h.orchestrator.generate_all(&story("Noé")).await.unwrap();
    assert_eq!(h.adapter.requests(Task::Content).len(), 1);
}

#[tokio::test]
async fn unconverged_content_keeps_the_last_attempt_whole() {
    let h = harness().await;
    h.adapter.script(
        Task::Content,
        vec![text("1".repeat(100)), text("2".repeat(200)), text("3".repeat(4000))],
    );

    let item = h.orchestrator.generate_all(&story("Ester")).await.unwrap();
    assert_eq!(item.result.content, "3".repeat(4000));
    assert_eq!(h.adapter.requests(Task::Content).len(), 3);
}

#[tokio::test]
async fn metadata_failure_aborts_the_run() {
    let h = harness().await;
    h.adapter.script(Task::Tags, vec![Reply::RateLimited]);

    let err = h
        .orchestrator
        .generate_all(&story("Daniel"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StudioError::Generation(GenerationError::QuotaExceeded)
    ));
    assert!(err.user_message().contains("quota"));

    assert!(h.adapter.requests(Task::Thumbnail).is_empty());
    assert!(h.orchestrator.history().items().await.is_empty());
    assert_eq!(
        h.observer.states.lock().unwrap().last(),
        Some(&RunState::Failed)
    );
    let partials = h.observer.partials.lock().unwrap();
    assert_eq!(partials.len(), 1);
    assert_eq!(partials[0].content.len(), 1500);
}

#[tokio::test]
async fn rejected_key_is_reported_as_invalid_credential() {
    let h = harness().await;
    h.adapter.script(Task::Content, vec![Reply::Unauthorized]);

    let err = h.orchestrator.generate_all(&story("Moisés")).await.unwrap_err();
    assert!(matches!(
        err,
        StudioError::Generation(GenerationError::InvalidCredential)
    ));
    assert_eq!(h.adapter.requests(Task::Content).len(), 1);
}

#[tokio::test]
async fn malformed_structured_output_falls_back_to_delimiters() {
    let h = harness().await;
    h.adapter.script(
        Task::Titles,
        vec![text("- Primeiro\n- Segundo\n\nTerceiro")],
    );
    h.adapter.script(Task::Tags, vec![text("fé, esperança , , amor")]);

    let item = h.orchestrator.generate_all(&story("Paulo")).await.unwrap();
    assert_eq!(item.result.titles, vec!["Primeiro", "Segundo", "Terceiro"]);
    assert_eq!(item.result.tags, vec!["fé", "esperança", "amor"]);
}

#[tokio::test]
async fn regenerating_a_field_leaves_the_others_unchanged() {
    let h = harness().await;
    let params = story("José do Egito");
    let item = h.orchestrator.generate_all(&params).await.unwrap();
    let history_before = h.orchestrator.history().items().await;

    h.adapter.script(Task::Titles, vec![text(r#"["Novo Título"]"#)]);
    let next = h
        .orchestrator
        .regenerate_field(
            RegenerationField::Titles,
            &params,
            Some("mais dramático"),
            &item.result,
        )
        .await
        .unwrap();

    assert_eq!(next.titles, vec!["Novo Título"]);
    assert_eq!(
        GenerationResult {
            titles: item.result.titles.clone(),
            ..next.clone()
        },
        item.result
    );
    let last = h.adapter.requests(Task::Titles).pop().unwrap();
    assert!(last.prompt().contains("mais dramático"));
    assert_eq!(h.orchestrator.history().items().await, history_before);
}

#[tokio::test]
async fn regenerated_thumbnail_uses_current_content() {
    let h = harness().await;
    let current = GenerationResult {
        content: "No princípio criou Deus os céus e a terra.".into(),
        ..GenerationResult::default()
    };
    h.adapter.script(Task::Thumbnail, vec![text("Light over dark waters.")]);

    let next = h
        .orchestrator
        .regenerate_field(RegenerationField::Thumbnail, &story("Gênesis"), None, &current)
        .await
        .unwrap();
    assert_eq!(next.thumbnail_prompt, "Light over dark waters.");
    assert_eq!(next.content, current.content);
    assert!(
        h.adapter.requests(Task::Thumbnail)[0]
            .prompt()
            .contains("No princípio criou Deus")
    );
}

#[tokio::test]
async fn regenerating_content_runs_the_convergence_loop() {
    let h = harness().await;
    h.adapter.script(
        Task::Content,
        vec![text("c".repeat(3000)), text("d".repeat(1400))],
    );
    let next = h
        .orchestrator
        .regenerate_field(
            RegenerationField::Content,
            &story("Elias"),
            Some("tom mais poético"),
            &GenerationResult::default(),
        )
        .await
        .unwrap();
    assert_eq!(next.content, "d".repeat(1400));
    let requests = h.adapter.requests(Task::Content);
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|r| r.prompt().contains("tom mais poético")));
}

#[tokio::test]
async fn enhance_returns_the_trimmed_idea() {
    let h = harness().await;
    h.adapter.script(Task::Enhance, vec![text("  Uma ideia mais rica.  \n")]);
    let enhanced = h.orchestrator.enhance_prompt(&story("Davi")).await.unwrap();
    assert_eq!(enhanced, "Uma ideia mais rica.");
    assert_eq!(h.adapter.calls(), 1);
}

#[tokio::test]
async fn history_survives_reopening_the_file_store() {
    let dir = std::env::temp_dir().join(format!("studio-flow-{}", Uuid::new_v4()));
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&dir).await.unwrap());
    let h = harness_with(store, Some("AIza-file")).await;

    let first = h.orchestrator.generate_all(&story("Rute")).await.unwrap();
    let second = h
        .orchestrator
        .generate_all(&GenerationParams::new(CreationType::Prayer, "Salmo 23"))
        .await
        .unwrap();

    let reopened: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&dir).await.unwrap());
    let credentials = CredentialStore::load(reopened.clone()).await.unwrap();
    assert_eq!(credentials.current().await.unwrap().expose(), "AIza-file");

    let history = HistoryStore::load(reopened).await.unwrap();
    assert_eq!(history.items().await, vec![second.clone(), first.clone()]);

    let restored = Session::from_history(&history.get(&first.id).await.unwrap());
    assert_eq!(restored.params, first.params);
    assert_eq!(restored.result, first.result);

    assert!(history.delete(&second.id).await.unwrap());
    assert_eq!(history.items().await, vec![first]);
    history.clear().await.unwrap();
    assert!(history.items().await.is_empty());

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn removing_the_credential_blocks_generation() {
    let h = harness().await;
    h.orchestrator.credentials().remove().await.unwrap();
    let err = h.orchestrator.generate_all(&story("Abraão")).await.unwrap_err();
    assert_eq!(err.user_message(), MissingInput::Credential.to_string());
    assert_eq!(h.adapter.calls(), 0);
}
