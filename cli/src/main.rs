//! CLI entrypoint for yara
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context as _, Result, anyhow, bail};
use clap::Parser;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use yara_application::{
    ChatSession, ConversationLogger, IdentityProvider, ImportOutcome, SubmitOutcome,
    TranscriptImport,
};
use yara_domain::Context;
use yara_infrastructure::{
    ConfigLoader, FileConfig, FileIdentityProvider, HttpChatTransport, InMemoryContextStore,
    InMemoryInsightCache, JsonlConversationLogger,
};
use yara_presentation::{
    ChatRepl, Cli, ConsoleFormatter, ConsoleNotifier, OutputConfig, ReplConfig, ThinkingIndicator,
};

#[tokio::main]
async fn main() -> Result<ExitCode> {
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
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(ExitCode::SUCCESS);
    }

    let config = load_config(&cli)?;

    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    info!("Starting yara against {}", config.server.base_url);

    // === Dependency Injection ===
    let identity = match &config.identity.path {
        Some(path) => FileIdentityProvider::new(path),
        None => FileIdentityProvider::at_default_location()
            .ok_or_else(|| anyhow!("No data directory available to store the client id"))?,
    }
    .with_override(config.identity.client_id.clone());
    let client_id = identity
        .client_id()
        .context("Failed to load client identity")?;

    let transport = Arc::new(
        HttpChatTransport::new(&config.server.base_url, config.server.timeout())
            .context("Failed to build HTTP client")?,
    );
    let context_store = Arc::new(InMemoryContextStore::new(config.context.to_context()));
    let indicator = Arc::new(ThinkingIndicator::new());
    let notifier = Arc::new(ConsoleNotifier::new().with_indicator(indicator.clone()));

    let mut session = ChatSession::new(
        client_id.clone(),
        transport,
        context_store,
        Arc::new(InMemoryInsightCache::new()),
    )
    .with_notifier(notifier);

    if let Some(path) = config.log.conversation_log_path()
        && let Some(logger) = JsonlConversationLogger::open(&path, &client_id)
    {
        info!("Conversation log: {}", logger.path().display());
        let logger: Arc<dyn ConversationLogger> = Arc::new(logger);
        session = session.with_conversation_logger(logger);
    }

    let output = OutputConfig {
        color: config.output.color && !cli.no_color,
        show_reasoning: config.output.show_reasoning,
    };

    let code = if let Some(path) = &cli.import {
        run_import(&session, path).await?
    } else if cli.insights {
        run_insights(&session).await
    } else if let Some(message) = &cli.message {
        let follower = (!cli.quiet).then(|| indicator.follow(session.subscribe()));
        let code = run_once(&session, message, &output).await;
        if let Some(follower) = follower {
            follower.abort();
        }
        indicator.stop();
        code
    } else {
        let repl_config = ReplConfig {
            show_progress: !cli.quiet,
            ..ReplConfig::default()
        };
        ChatRepl::new(session.clone())
            .with_output(output)
            .with_repl_config(repl_config)
            .with_indicator(indicator)
            .run()
            .await?;
        ExitCode::SUCCESS
    };

    session.wait_for_background().await;
    Ok(code)
}

/// Load configuration, apply command-line overrides, and report issues.
fn load_config(cli: &Cli) -> Result<FileConfig> {
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    if let Some(server) = &cli.server {
        config.server.base_url = server.clone();
    }
    let overrides = Context {
        city: cli.city.clone(),
        place: cli.place.clone(),
        time: cli.time.clone(),
    };
    let context = config.context.to_context().merged_with(&overrides);
    config.context.city = context.city;
    config.context.place = context.place;
    config.context.time = context.time;

    let issues = config.validate();
    for issue in &issues {
        if issue.is_error() {
            eprintln!("{} {}", "config error:".red().bold(), issue.message);
        } else {
            warn!("{}", issue.message);
        }
    }
    if issues.iter().any(|i| i.is_error()) {
        bail!("Invalid configuration");
    }

    Ok(config)
}

/// Send one message and print Buddy's answer.
async fn run_once(session: &ChatSession, message: &str, output: &OutputConfig) -> ExitCode {
    match session.submit(message).await {
        SubmitOutcome::Replied { .. } => {
            if let Some(reply) = session.state().timeline.last() {
                println!(
                    "{}",
                    ConsoleFormatter::format_message(reply, output.show_reasoning)
                );
            }
            ExitCode::SUCCESS
        }
        SubmitOutcome::Ignored => {
            eprintln!("Nothing to send.");
            ExitCode::FAILURE
        }
        // Already reported through the notifier
        _ => ExitCode::FAILURE,
    }
}

/// Analyze a transcript file without touching the conversation.
async fn run_import(session: &ChatSession, path: &Path) -> Result<ExitCode> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let import = TranscriptImport::new(session.clone());
    import.open();
    import.set_input(text.clone());

    let code = match import.import(&text).await {
        ImportOutcome::Imported => ExitCode::SUCCESS,
        ImportOutcome::Ignored => {
            eprintln!("{} is empty.", path.display());
            ExitCode::FAILURE
        }
        ImportOutcome::Busy | ImportOutcome::Rejected(_) | ImportOutcome::Failed(_) => {
            if let Some(error) = import.state().error {
                eprintln!("{}", error.red());
            }
            ExitCode::FAILURE
        }
    };
    Ok(code)
}

/// Print what the service has learned so far.
async fn run_insights(session: &ChatSession) -> ExitCode {
    session.refresh_insights().await;
    let insights = session.insights().unwrap_or_default();
    print!("{}", ConsoleFormatter::format_insights(&insights));
    ExitCode::SUCCESS
}
