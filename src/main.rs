//! Code Converter
//!
//! HTTP service that translates source code between programming languages
//! with Bedrock-hosted models.

use anyhow::Result;
use clap::Parser;
use code_converter::{
    config::{Environment, LogFormat, Settings},
    logging::init_tracing,
    server::App,
};

/// Code Converter
///
/// Translates source code between programming languages using Bedrock models.
#[derive(Parser, Debug)]
#[command(name = "code-converter")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on (overrides PORT env var)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to (overrides HOST env var)
    #[arg(long)]
    host: Option<String>,

    /// Log level: trace, debug, info, warn, error (overrides LOG_LEVEL env var)
    #[arg(long)]
    log_level: Option<String>,

    /// Log output format (overrides LOG_FORMAT env var)
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,

    /// Environment: development, staging, production (overrides ENVIRONMENT env var)
    #[arg(short, long, value_enum)]
    env: Option<Environment>,

    /// Model used by POST /convert (overrides CONVERT_MODEL_ID env var)
    #[arg(long)]
    convert_model: Option<String>,

    /// Model used by the event handler (overrides EVENT_MODEL_ID env var)
    #[arg(long)]
    event_model: Option<String>,

    /// Log every prompt and model reply at info level (for debugging)
    #[arg(long)]
    print_prompts: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration first (before logging, so we can use log_level)
    let mut settings = Settings::load()?;

    // Override settings with CLI arguments
    if let Some(port) = args.port {
        settings.port = port;
    }
    if let Some(host) = args.host {
        settings.host = host;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }
    if let Some(log_format) = args.log_format {
        settings.log_format = log_format;
    }
    if let Some(env) = args.env {
        settings.environment = env;
    }
    if let Some(model_id) = args.convert_model {
        settings.convert_model_id = model_id;
    }
    if let Some(model_id) = args.event_model {
        settings.event_model_id = model_id;
    }
    if args.print_prompts {
        settings.print_prompts = true;
    }

    init_tracing(&settings.log_level, settings.log_format)?;

    settings.validate()?;

    tracing::info!(
        app_name = %settings.app_name,
        version = %settings.app_version,
        environment = %settings.environment,
        host = %settings.host,
        port = %settings.port,
        "Starting application"
    );

    // Build the application
    let app = App::new(settings).await?;

    // Run the server with graceful shutdown
    app.run().await?;

    tracing::info!("Application shutdown complete");

    Ok(())
}
