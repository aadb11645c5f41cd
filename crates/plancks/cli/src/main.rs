//! Plancks CLI - Replica status for swarm services
//!
//! This CLI lets operators:
//! - List replicated services with running vs. required replicas
//! - Create replicated services
//! - Remove services by name, ID, or all at once

use clap::{Parser, Subcommand};
use plancks_gateway::{DockerGateway, ServiceController};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod output;

use commands::services;
use config::CliConfig;
use error::CliResult;

/// Plancks CLI application
#[derive(Parser)]
#[command(name = "plancks")]
#[command(about = "Plancks - Swarm service replica controller", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "PLANCKS_CONFIG")]
    config: Option<String>,

    /// Engine endpoint of a swarm manager (overrides configuration)
    #[arg(short, long, env = "PLANCKS_ENDPOINT")]
    endpoint: Option<String>,

    /// Output format (table, json, yaml)
    #[arg(short, long, default_value = "table")]
    output: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Manage services
    #[command(alias = "service")]
    Services {
        #[command(subcommand)]
        command: services::ServiceCommands,
    },

    /// Show effective configuration
    Config,
}

#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();

    // Load config
    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(endpoint) = cli.endpoint {
        config.gateway.endpoint = endpoint;
    }

    // Initialize tracing
    let filter = if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| filter.into());

    if config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    match cli.command {
        Commands::Services { command } => {
            tracing::debug!(endpoint = %config.gateway.endpoint, "Connecting to engine");
            let gateway = DockerGateway::new(&config.gateway)?;
            let controller = ServiceController::new(Arc::new(gateway));
            services::execute(command, &controller, cli.output).await
        }
        Commands::Config => output::print_single(&config, cli.output),
    }
}
