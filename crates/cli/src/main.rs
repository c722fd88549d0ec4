mod cli;
mod commands;
mod metrics;

use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Command};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so command output on stdout stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let registry = metrics::registry()?;
    let config = commands::resolve_config(cli.config.clone())?;

    let result = match cli.command() {
        Command::Sync => commands::sync(&config).await,
        Command::Discover => commands::discover(&config).await,
        Command::Stats => commands::stats(&config),
        Command::Search { text } => commands::search(&config, &text),
    };

    if cli.metrics {
        print!("{}", metrics::encode(&registry)?);
    }

    result
}
