use anyhow::{Context, Result};
use clap::Parser;
use tp_core::{DecorationMode, DecorationProfile};
use tracing_subscriber::EnvFilter;

use tp_cli::commands::{profile, replay};
use tp_cli::{Cli, Commands, Config};

/// Loads config and resolves the decoration profile, applying a CLI mode
/// override on top.
fn resolve_profile(cli: &Cli, mode_flag: Option<&str>) -> Result<DecorationProfile> {
    let mut config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(mode) = mode_flag {
        config.mode = mode.parse::<DecorationMode>()?;
    }
    tracing::debug!(?config, "loaded configuration");
    config
        .decoration_profile()
        .context("invalid decoration profile")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    match &cli.command {
        Some(Commands::Replay { input, mode }) => {
            let resolved = resolve_profile(&cli, mode.as_deref())?;
            replay::run(resolved, input.as_deref()).await?;
        }
        Some(Commands::Profile { mode }) => {
            let resolved = resolve_profile(&cli, mode.as_deref())?;
            profile::run(&resolved)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
