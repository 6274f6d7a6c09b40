//! Grounded Q&A CLI
//!
//! Main entry point for the grounded command-line tool. With a question
//! argument it answers once and exits; without one it starts the
//! interactive question loop.

mod repl;

use clap::Parser;
use grounded_core::{config::AppConfig, logging, AppResult};
use grounded_llm::create_service;

/// Grounded Q&A CLI - answers questions with web-search grounding
#[derive(Parser, Debug)]
#[command(name = "grounded")]
#[command(about = "Ask questions answered by an LLM with web-search grounding", long_about = None)]
#[command(version)]
struct Cli {
    /// Question to answer once; omit to start the interactive loop
    question: Option<String>,

    /// Model identifier
    #[arg(short, long, env = "GROUNDED_MODEL")]
    model: Option<String>,

    /// API credential
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    no_color: bool,

    /// Output the one-shot answer as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from environment, then apply CLI overrides
    let config = AppConfig::load().with_overrides(
        cli.model,
        cli.api_key,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("Grounded Q&A CLI starting");
    tracing::debug!("Model: {}", config.model);
    tracing::debug!("Endpoint: {}", config.api_base);

    let service = create_service(&config)?;

    let result = match cli.question {
        Some(question) => repl::ask_once(&service, &question, cli.json).await,
        None => repl::run(&service, &config.model).await,
    };

    match &result {
        Ok(_) => tracing::info!("Session completed"),
        Err(e) => tracing::error!("Session failed: {}", e),
    }

    result
}
