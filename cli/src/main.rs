//! CLI entrypoint for AI Council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, bail};
use clap::Parser;
use council_application::{RunCouncilInput, RunCouncilUseCase, ScoringParams};
use council_infrastructure::{
    ConfigLoader, FileContextProvider, JsonlEventLogger, OllamaGateway,
};
use council_presentation::{Cli, ConsoleFormatter, OutputFormat, ProgressReporter};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
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

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    info!("Starting AI Council");

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?
    };

    let query = match cli.query {
        Some(q) => q,
        None => bail!("A query is required."),
    };

    let panel = config.to_panel();
    let weights = config.to_weights();

    // Scoring parameters: config values with CLI overrides on top
    let mut params: ScoringParams = config.scoring.to_params();
    if let Some(secs) = cli.timeout {
        params = params.with_timeout(Duration::from_secs(secs));
    }
    if let Some(n) = cli.concurrency {
        params = params.with_concurrency(n);
    }
    if let Some(scorer) = &cli.llm {
        params = params.with_only_scorer(scorer.clone());
    }

    // Print header
    if !cli.quiet {
        println!();
        println!("+============================================================+");
        println!("|                 AI Council - Expert Panel                  |");
        println!("+============================================================+");
        println!();
        println!("Query: {}", query);
        println!(
            "Panel: {}",
            panel
                .members()
                .iter()
                .map(|m| format!("{} [{}]", m.name, m.role))
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!();
    }

    // === Dependency Injection ===
    let gateway = Arc::new(OllamaGateway::new(config.ollama.base_url.clone()));

    let mut use_case = RunCouncilUseCase::new(gateway)
        .with_weights(weights)
        .with_params(params);

    // Context provider: CLI flag beats config; no directory means no context
    let docs_dir = cli
        .docs
        .clone()
        .or_else(|| config.context.docs_dir.as_ref().map(Into::into));
    if let Some(dir) = docs_dir {
        use_case = use_case.with_context(Arc::new(FileContextProvider::new(
            dir,
            config.context.max_passages,
        )));
    }

    if let Some(path) = &cli.run_log {
        if let Some(logger) = JsonlEventLogger::new(path) {
            info!("Writing run events to {}", logger.path().display());
            use_case = use_case.with_event_logger(Arc::new(logger));
        }
    }

    let input = RunCouncilInput::new(query, panel);

    // Execute with or without progress reporting
    let outcome = if cli.quiet {
        use_case.execute(input).await?
    } else {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(input, &progress).await?
    };

    // Output results
    let output = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(&outcome),
        OutputFormat::Winner => ConsoleFormatter::format_winner_only(&outcome),
        OutputFormat::Json => ConsoleFormatter::format_json(&outcome),
    };

    println!("{}", output);

    Ok(())
}
