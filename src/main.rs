mod config;
mod engine;
mod llm;
mod server;
mod storage;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "memoria", version, about = "Companion chat server with a local response engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to a config file (defaults to ~/.memoria/config.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { config: config_path } => {
            let config = match config_path {
                Some(path) => config::MemoriaConfig::load_from(path)?,
                None => config::MemoriaConfig::load()?,
            };

            // Initialize tracing with the configured log level.
            let filter = EnvFilter::try_new(&config.server.log_level)
                .unwrap_or_else(|_| EnvFilter::new("info"));
            tracing_subscriber::fmt().with_env_filter(filter).init();

            server::serve(config).await?;
        }
    }

    Ok(())
}
