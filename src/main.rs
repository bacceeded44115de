// VoteGate - Main Entry Point
//
// Vote ledger and quota service:
// - Per-user ledgers of active and archived topic votes
// - Per-trust-tier vote quotas with per-category overrides
// - HTTP surface for vote mutations and registry upserts

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;
use votegate::config::Config;
use votegate::server;
use votegate::voting::{Catalog, LogNotifier, VoteService};

/// VoteGate: vote ledger and quota service
#[derive(Parser, Debug)]
#[command(name = "votegate")]
#[command(author = "VoteGate Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Vote ledger and quota service with per-category limits", long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to the configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP vote server
    Serve {
        /// Port to listen on (overrides the config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Validate the configuration and print the effective settings
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(filter.into())
                .from_env_lossy(),
        )
        .init();

    info!("VoteGate v0.1.0 starting...");

    let config = match &args.config {
        Some(path) => Config::load_from_path(path).context("Failed to load configuration")?,
        None => Config::load().context("Failed to load configuration")?,
    };

    match args.command {
        Some(Commands::CheckConfig) => {
            check_config(&config);
            Ok(())
        }
        Some(Commands::Serve { port }) => serve(config, port).await,
        None => serve(config, None).await,
    }
}

async fn serve(mut config: Config, port: Option<u16>) -> Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }

    let service = VoteService::new(config.voting.clone(), Catalog::new(), Arc::new(LogNotifier));
    server::start_server(&config.server, service).await
}

fn check_config(config: &Config) {
    println!("Configuration OK");
    println!("  server: {}:{}", config.server.bind_address, config.server.port);
    println!("  log level: {}", config.logging.level);
    println!("  voting enabled: {}", config.voting.enabled);
    let limits = &config.voting.tier_limits;
    println!(
        "  tier limits: tl0={} tl1={} tl2={} tl3={} tl4={}",
        limits.tl0, limits.tl1, limits.tl2, limits.tl3, limits.tl4
    );
    println!("  alert votes left: {}", config.voting.alert_votes_left);
}
