//! CLI entrypoint for deepchat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use deepchat_application::{ChatController, NoChatProgress};
use deepchat_infrastructure::{
    BackendSettings, ConfigLoader, DeepseekBackend, JsonlTranscriptLogger, PromptStore,
};
use deepchat_presentation::{ChatRepl, Cli, ConsoleFormatter, StreamPrinter};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting deepchat");

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?
    };
    for issue in config.validate() {
        warn!("{}", issue);
    }

    // Resolve the API key
    let api_key = std::env::var(&config.backend.api_key_env)
        .with_context(|| format!("{} environment variable not set", config.backend.api_key_env))?;

    // === Dependency Injection ===
    let prompt_store = match PromptStore::default_path() {
        Some(path) => PromptStore::new(path),
        None => bail!("Could not determine a config directory for the system prompt"),
    };

    let settings = BackendSettings {
        base_url: config.backend.base_url.clone(),
        api_key,
        model: config.backend.model.clone(),
        request_timeout_secs: config.backend.request_timeout_secs,
    };
    let backend = Arc::new(DeepseekBackend::new(settings, prompt_store)?);

    let cancellation = CancellationToken::new();
    let mut controller = ChatController::new(backend).with_cancellation(cancellation.clone());

    if config.chat.transcript_log
        && let Some(path) = JsonlTranscriptLogger::default_path()
        && let Some(logger) = JsonlTranscriptLogger::new(&path)
    {
        info!("Transcript log: {}", path.display());
        controller = controller.with_transcript_logger(Arc::new(logger));
    }

    // Fetch the persisted system prompt (failure is non-fatal)
    controller.initialize().await;

    if let Some(text) = &cli.system_prompt {
        controller.set_system_prompt(text);
    }

    if let Some(value) = &cli.use_case {
        controller
            .select_use_case(value)
            .map_err(anyhow::Error::new)?;
    } else {
        // Unknown config values were already warned about by validate()
        let _ = controller.select_use_case(&config.chat.default_use_case);
    }

    let show_reasoning = config.repl.show_reasoning && !cli.no_reasoning;

    // One-shot mode
    if let Some(message) = &cli.message
        && !cli.chat
    {
        let printer = StreamPrinter::new(show_reasoning);
        let entry = if cli.quiet {
            controller.submit(message, &NoChatProgress).await?
        } else {
            controller.submit(message, &printer).await?
        };
        if cli.quiet || !printer.printed_any() {
            println!("{}", ConsoleFormatter::format_entry(&entry));
        }
        return Ok(());
    }

    // Chat mode
    let history_file = config.repl.history_file.as_ref().map(PathBuf::from);
    let mut repl = ChatRepl::new(controller)
        .with_history_file(history_file)
        .with_reasoning(show_reasoning)
        .with_quiet(cli.quiet);
    repl.run().await?;

    Ok(())
}
