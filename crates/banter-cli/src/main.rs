//! Banter CLI
//!
//! Command-line interface for Banter - realtime room chat.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use banter_core::Config;

mod chat;
mod commands;

#[derive(Parser)]
#[command(name = "banter")]
#[command(about = "Banter - realtime room chat")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Room to join (a fresh room is created when omitted)
    room: Option<String>,

    /// WebSocket server URL (overrides config)
    #[arg(long)]
    server: Option<String>,

    /// Display name for this session (overrides config)
    #[arg(long)]
    name: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (server_url, display_name)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    if let Some(Commands::Config { command }) = cli.command {
        return match command {
            Some(ConfigCommands::Show) | None => commands::config::show(),
            Some(ConfigCommands::Set { key, value }) => commands::config::set(key, value),
        };
    }

    let mut config = Config::load()?;
    if let Some(server) = cli.server {
        config.server_url = server;
    }
    if let Some(name) = cli.name {
        config.display_name = Some(name);
    }

    // Joining without a room creates a fresh one, like following a bare
    // chat URL
    let room = cli
        .room
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()[..8].to_string());

    chat::run(config, room).await
}

fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
