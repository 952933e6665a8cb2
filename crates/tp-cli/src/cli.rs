//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Decorates the previously-active tab with a fading countdown.
///
/// Replays host tab events through the decoration engine against simulated
/// pages; useful for trying out profiles and debugging event orderings.
#[derive(Debug, Parser)]
#[command(name = "tp", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay a JSONL tab-event feed through the engine.
    Replay {
        /// Feed file; reads stdin when omitted.
        #[arg(long)]
        input: Option<PathBuf>,

        /// Decoration mode override (title or favicon).
        #[arg(long)]
        mode: Option<String>,
    },

    /// Print the resolved decoration profile.
    Profile {
        /// Decoration mode override (title or favicon).
        #[arg(long)]
        mode: Option<String>,
    },
}
