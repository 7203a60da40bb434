use anyhow::{Context, Result};
use clap::Parser;
use grid_server::cli::{Cli, Commands};
use grid_server::commands;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Respects RUST_LOG, defaults to info
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")?;

    let cli = Cli::parse();
    match cli.command {
        Commands::Train(args) => commands::run_train(&args),
        Commands::Serve(args) => commands::run_serve(&args).await,
    }
}
