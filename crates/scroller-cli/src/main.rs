use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scroller_core::ScrollerConfig;

mod commands;
mod script;

#[derive(Parser)]
#[command(name = "scroller")]
#[command(author, version, about = "Play smooth-scroll scripts against a simulated page")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ~/.config/scroller/config.toml)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a page script and print every scroll write
    Play {
        /// Page script (TOML)
        script: PathBuf,
        /// Pace frames in real time at the configured frame rate
        #[arg(long)]
        realtime: bool,
        /// Print events as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Print the resolved coordinate of every region in a page script
    Regions {
        /// Page script (TOML)
        script: PathBuf,
    },
    /// Write the default configuration file
    InitConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => ScrollerConfig::load_from(path)?,
        None => ScrollerConfig::load()?,
    };

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Play {
            script,
            realtime,
            json,
        } => commands::play::run(&config, &script, realtime, json).await,
        Commands::Regions { script } => commands::regions::run(&config, &script),
        Commands::InitConfig => {
            let path = cli.config.unwrap_or_else(ScrollerConfig::config_path);
            commands::init_config::run(&config, &path)
        }
    }
}
