mod replay;
mod run;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dcmaui_bridge::{Bridge, BridgeConfig};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "dcmaui")]
#[command(version, about = "Drive a DCMAUI bridge without a device", long_about = None)]
struct Cli {
    /// Show debug logs from the bridge
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Bridge config as a JSON file (rootViewId, duplicateIds, eventDelivery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSON-lines command stream against a fresh bridge
    Replay {
        /// Command stream file, `-` for stdin
        file: PathBuf,
        /// Print the view tree once the stream is done
        #[arg(short, long)]
        tree: bool,
        /// Stop at the first failing command
        #[arg(long)]
        strict: bool,
    },
    /// Run a Lua script with the `dcmaui` module loaded
    Run {
        /// Path to the Lua file to run
        file: PathBuf,
    },
    /// List the registered component kinds
    Kinds,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Replay { file, tree, strict } => {
            let failures = replay::replay(config, &file, tree, strict)?;
            if failures > 0 {
                std::process::exit(1);
            }
        }
        Commands::Run { file } => run::run_script(config, &file)?,
        Commands::Kinds => {
            let bridge = Bridge::new(config)?;
            for kind in bridge.registered_kinds() {
                println!("{kind}");
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<BridgeConfig> {
    let Some(path) = path else {
        return Ok(BridgeConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    BridgeConfig::from_json(&json).with_context(|| format!("invalid config {}", path.display()))
}
