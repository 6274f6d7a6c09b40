//! Grounded Q&A web service
//!
//! Main entry point for the single-endpoint web service. Serves the
//! question page on `/` and answers questions on `POST /ask`.

mod routes;

use clap::Parser;
use grounded_core::{config::AppConfig, logging, AppError, AppResult};
use grounded_llm::create_service;
use std::net::SocketAddr;
use std::sync::Arc;

/// Grounded Q&A web service
#[derive(Parser, Debug)]
#[command(name = "grounded-server")]
#[command(about = "Single-endpoint web service for grounded question answering", long_about = None)]
#[command(version)]
struct Cli {
    /// Bind address
    #[arg(long, default_value = "127.0.0.1", env = "GROUNDED_HOST")]
    host: String,

    /// Bind port
    #[arg(short, long, default_value_t = 5000, env = "GROUNDED_PORT")]
    port: u16,

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
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let config = AppConfig::load().with_overrides(
        cli.model,
        cli.api_key,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("Grounded Q&A service starting");
    tracing::debug!("Model: {}", config.model);

    let service = Arc::new(create_service(&config)?);
    let app = routes::router(service);

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port)
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid bind address: {}", e)))?;

    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
