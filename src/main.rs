//! Command line entry point working against the JSON file store.

use std::io::{
    self,
    Write,
};
use std::path::PathBuf;

use anyhow::Context;
use clap::{
    Parser,
    Subcommand,
};
use tracing_subscriber::EnvFilter;
use view_localizer::config::{
    self,
    SettingsOverrides,
};
use view_localizer::context::ANONYMOUS_PRINCIPAL;
use view_localizer::prompt::TextKey;
use view_localizer::store::{
    JsonFilePromptStore,
    PromptCatalog,
    PromptStore,
};
use view_localizer::{
    Culture,
    RequestContext,
    Translator,
    TranslatorOptions,
};

/// Resolve view text prompts into translations and manage prompt files.
#[derive(Debug, Parser)]
#[command(name = "view-localizer", version, about)]
struct Cli {
    /// Project root containing `.view-localizer.json`
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Configuration file to use instead of `.view-localizer.json`
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides `defaultCulture`
    #[arg(long)]
    default_culture: Option<String>,

    /// Overrides `fallbackFormat`
    #[arg(long)]
    fallback_format: Option<String>,

    /// Overrides `store.directory`
    #[arg(long)]
    store_dir: Option<PathBuf>,

    /// Active culture (defaults to the configured default culture)
    #[arg(long, short)]
    culture: Option<String>,

    /// Acting user recorded on seeded and edited prompts
    #[arg(long, default_value = ANONYMOUS_PRINCIPAL)]
    user: String,

    /// Subcommand to run
    #[command(subcommand)]
    command: Command,
}

/// Subcommands
#[derive(Debug, Subcommand)]
enum Command {
    /// Translate a text prompt, registering it when missing
    Translate {
        /// Controller the text appears in
        #[arg(long)]
        controller: String,
        /// Action the text appears in (defaults to the configured default action)
        #[arg(long)]
        action: Option<String>,
        /// Source text as written in the view
        text: String,
    },
    /// Create a language by cloning the prompts of another one
    Seed {
        /// Source culture (defaults to the configured default culture)
        #[arg(long)]
        from: Option<String>,
    },
    /// Set the translation of a registered prompt
    Set {
        /// Prompt key
        #[arg(long)]
        key: String,
        /// Translated text
        text: String,
    },
    /// List prompts without a translation
    Missing,
    /// List cultures in the store with their LCID when known
    Cultures,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config_manager = match &cli.config {
        Some(file) => config::load_from_file(&cli.root, file),
        None => config::load_from(&cli.root),
    }
    .with_context(|| format!("Failed to load configuration from {}", cli.root.display()))?;
    let overrides = SettingsOverrides {
        default_culture: cli.default_culture.as_deref().map(Culture::new).transpose()?,
        fallback_format: cli.fallback_format.clone(),
        store_directory: cli.store_dir.clone(),
    };
    config_manager.apply_overrides(overrides).context("Invalid command line settings")?;
    let settings = config_manager.get_settings();

    let culture = match &cli.culture {
        Some(name) => Culture::new(name)?,
        None => settings.default_culture.clone(),
    };
    let context = RequestContext::new(culture, cli.user.clone());
    let store = JsonFilePromptStore::new(config_manager.store_directory());
    tracing::debug!(directory = ?store.directory(), culture = %context.culture(), "Opened prompt store");

    let mut stdout = io::stdout().lock();
    match cli.command {
        Command::Translate { controller, action, text } => {
            let translator = Translator::new(store, TranslatorOptions::from(settings));
            let translated =
                translator.translate(&context, &controller, action.as_deref(), &text).await?;
            writeln!(stdout, "{translated}")?;
        }
        Command::Seed { from } => {
            let source = match from {
                Some(name) => Culture::new(&name)?,
                None => settings.default_culture.clone(),
            };
            store.create_for_language(context.culture(), &source, context.principal()).await?;
            writeln!(stdout, "{}", store.document_path(context.culture()).display())?;
        }
        Command::Set { key, text } => {
            let prompt = store
                .update_translation(context.culture(), &TextKey::new(key), &text, context.principal())
                .await?;
            writeln!(stdout, "{}\t{}", prompt.key, prompt.translated_text)?;
        }
        Command::Missing => {
            let cultures = match &cli.culture {
                Some(_) => vec![context.culture().clone()],
                None => store.cultures().await?,
            };
            let documents =
                futures::future::try_join_all(cultures.iter().map(|culture| store.document(culture)))
                    .await?;
            for document in documents.into_iter().flatten() {
                for prompt in document.untranslated() {
                    writeln!(
                        stdout,
                        "{}\t{}\t{}/{}\t{}",
                        document.culture,
                        prompt.key,
                        prompt.controller_name,
                        prompt.action_name,
                        prompt.source_text
                    )?;
                }
            }
        }
        Command::Cultures => {
            for culture in store.cultures().await? {
                match culture.lcid() {
                    Some(lcid) => writeln!(stdout, "{culture}\t{lcid}")?,
                    None => writeln!(stdout, "{culture}")?,
                }
            }
        }
    }

    Ok(())
}
