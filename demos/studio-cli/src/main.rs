//! Command-line front end: every user-facing operation against the local
//! data directory and the Gemini endpoint.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, Local};
use clap::{Args, Parser, Subcommand};
use parable_studio::adapters::gemini::{GEMINI_API_KEY_ENV, GeminiConfig};
use parable_studio::config::StudioConfig;
use parable_studio::kernel::{Orchestrator, StudioError};
use parable_studio::memory::{CredentialStore, FileStore, HistoryStore, KeyValueStore};
use parable_studio::primitives::{
    CreationType, DEFAULT_CHARACTER_COUNT, DEFAULT_LANGUAGE, GenerationParams, GenerationResult,
    HistoryId, HistoryItem, MIN_CHARACTER_COUNT, RegenerationField,
};
use parable_studio::prompts::language::supported_languages;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "parable-studio")]
#[command(about = "Generate biblical stories and prayers with YouTube metadata", long_about = None)]
struct Cli {
    /// TOML configuration file; missing means defaults.
    #[arg(long, default_value = "parable-studio.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate content, titles, description, tags, CTA and thumbnail prompt
    Generate(GenerateArgs),
    /// Regenerate one field of a history item
    Regenerate {
        /// History item to start from
        id: String,
        /// titles, description, tags, thumbnail, content or cta
        field: String,
        /// One-off instruction applied to this regeneration only
        #[arg(long)]
        modification: Option<String>,
    },
    /// Expand a short idea into a richer one
    Enhance {
        /// Idea to expand
        idea: String,
        /// story or prayer
        #[arg(long = "type", default_value = "story")]
        creation_type: String,
        /// Output language code
        #[arg(long, default_value = DEFAULT_LANGUAGE)]
        language: String,
    },
    /// Inspect or edit the generation history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// Manage the stored Gemini API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
    /// List supported output languages
    Languages,
}

#[derive(Args)]
struct GenerateArgs {
    /// Main idea
    idea: String,
    /// story or prayer
    #[arg(long = "type", default_value = "story")]
    creation_type: String,
    /// Output language code
    #[arg(long, default_value = DEFAULT_LANGUAGE)]
    language: String,
    /// Target content length in characters
    #[arg(long, default_value_t = DEFAULT_CHARACTER_COUNT)]
    chars: usize,
    /// Project name shown in history
    #[arg(long)]
    project: Option<String>,
    /// Extra guidance for titles
    #[arg(long, default_value = "")]
    title_guidance: String,
    /// Extra guidance for the description
    #[arg(long, default_value = "")]
    description_guidance: String,
    /// Style preference for the thumbnail
    #[arg(long, default_value = "")]
    thumbnail_style: String,
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List recorded runs, newest first
    List,
    /// Print every field of one run
    Show {
        /// History item id
        id: String,
    },
    /// Delete one run
    Delete {
        /// History item id
        id: String,
    },
    /// Delete every run
    Clear,
}

#[derive(Subcommand)]
enum KeyAction {
    /// Store an API key
    Save {
        /// Gemini API key
        value: String,
    },
    /// Forget the stored API key
    Remove,
    /// Report whether a key is stored
    Status,
}

struct App {
    orchestrator: Orchestrator,
}

impl App {
    async fn open(config: &StudioConfig) -> Result<Self> {
        let store: Arc<dyn KeyValueStore> = Arc::new(
            FileStore::open(&config.data_dir)
                .await
                .with_context(|| format!("opening {}", config.data_dir.display()))?,
        );
        let credentials = Arc::new(CredentialStore::load(store.clone()).await?);
        if credentials.current().await.is_none() {
            if let Ok(key) = std::env::var(GEMINI_API_KEY_ENV) {
                if credentials.save(&key).await? {
                    info!("credential seeded from {GEMINI_API_KEY_ENV}");
                }
            }
        }
        let history = Arc::new(HistoryStore::load(store).await?);

        let gemini = GeminiConfig::new(config.model.clone())
            .with_base_url(&config.base_url)?
            .with_timeout(Duration::from_secs(config.request_timeout_secs));

        let orchestrator = Orchestrator::new(Arc::new(gemini), credentials, history)
            .with_settings(config.generation);
        Ok(Self { orchestrator })
    }

    async fn history_item(&self, id: &str) -> Result<HistoryItem> {
        self.orchestrator
            .history()
            .get(&HistoryId::from(id))
            .await
            .ok_or_else(|| anyhow!("no history item with id {id}"))
    }
}

fn user_facing(err: StudioError) -> anyhow::Error {
    debug!(error = ?err, "operation failed");
    anyhow!(err.user_message())
}

fn params_from(args: GenerateArgs) -> Result<GenerationParams> {
    if args.chars < MIN_CHARACTER_COUNT {
        bail!("--chars must be at least {MIN_CHARACTER_COUNT}");
    }
    let creation_type: CreationType = args.creation_type.parse()?;
    let mut params = GenerationParams::new(creation_type, args.idea)
        .with_language(args.language)
        .with_character_count(args.chars)
        .with_title_prompt(args.title_guidance)
        .with_description_prompt(args.description_guidance)
        .with_thumbnail_prompt(args.thumbnail_style);
    if let Some(project) = args.project {
        params = params.with_project_name(project);
    }
    Ok(params)
}

fn print_result(result: &GenerationResult) {
    println!("== Content ({} characters)\n{}\n", result.content_char_count(), result.content);
    println!("== Titles");
    for (idx, title) in result.titles.iter().enumerate() {
        println!("{}. {title}", idx + 1);
    }
    println!("\n== Description\n{}\n", result.description);
    println!("== Tags\n{}\n", result.tags.join(", "));
    println!("== CTA\n{}\n", result.cta);
    println!("== Thumbnail prompt\n{}", result.thumbnail_prompt);
}

fn print_field(field: RegenerationField, result: &GenerationResult) {
    match field {
        RegenerationField::Titles => {
            for title in &result.titles {
                println!("{title}");
            }
        }
        RegenerationField::Description => println!("{}", result.description),
        RegenerationField::Tags => println!("{}", result.tags.join(", ")),
        RegenerationField::Thumbnail => println!("{}", result.thumbnail_prompt),
        RegenerationField::Content => println!("{}", result.content),
        RegenerationField::Cta => println!("{}", result.cta),
    }
}

fn format_timestamp(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis).map_or_else(
        || millis.to_string(),
        |at| at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = StudioConfig::load(&cli.config)?;
    config.apply_env();
    parable_studio::telemetry::init(&config.log_filter)?;

    let app = App::open(&config).await?;
    let orchestrator = &app.orchestrator;

    match cli.command {
        Commands::Generate(args) => {
            let params = params_from(args)?;
            let item = orchestrator
                .generate_all(&params)
                .await
                .map_err(user_facing)?;
            print_result(&item.result);
            println!("\nSaved as {}", item.id);
        }
        Commands::Regenerate {
            id,
            field,
            modification,
        } => {
            let field: RegenerationField = field.parse()?;
            let item = app.history_item(&id).await?;
            let next = orchestrator
                .regenerate_field(field, &item.params, modification.as_deref(), &item.result)
                .await
                .map_err(user_facing)?;
            print_field(field, &next);
        }
        Commands::Enhance {
            idea,
            creation_type,
            language,
        } => {
            let params =
                GenerationParams::new(creation_type.parse()?, idea).with_language(language);
            let enhanced = orchestrator
                .enhance_prompt(&params)
                .await
                .map_err(user_facing)?;
            println!("{enhanced}");
        }
        Commands::History { action } => match action {
            HistoryAction::List => {
                for item in orchestrator.history().items().await {
                    println!(
                        "{}  {}  [{}]  {}",
                        item.id,
                        format_timestamp(item.timestamp),
                        item.params.creation_type,
                        item.label()
                    );
                }
            }
            HistoryAction::Show { id } => {
                let item = app.history_item(&id).await?;
                println!("{} ({})\n", item.label(), format_timestamp(item.timestamp));
                print_result(&item.result);
            }
            HistoryAction::Delete { id } => {
                if !orchestrator.history().delete(&HistoryId::from(id.as_str())).await? {
                    bail!("no history item with id {id}");
                }
                println!("Deleted {id}");
            }
            HistoryAction::Clear => {
                orchestrator.history().clear().await?;
                println!("History cleared");
            }
        },
        Commands::Key { action } => match action {
            KeyAction::Save { value } => {
                if orchestrator.credentials().save(&value).await? {
                    println!("API key saved");
                } else {
                    bail!("the API key is empty");
                }
            }
            KeyAction::Remove => {
                orchestrator.credentials().remove().await?;
                println!("API key removed");
            }
            KeyAction::Status => {
                let stored = orchestrator.credentials().current().await.is_some();
                println!("{}", if stored { "API key stored" } else { "no API key stored" });
            }
        },
        Commands::Languages => {
            for (code, name) in supported_languages() {
                println!("{code}\t{name}");
            }
        }
    }

    Ok(())
}
