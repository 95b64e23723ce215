pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::clock::ModeKind;
use crate::tui::WidgetSet;

#[derive(Debug, Parser)]
#[command(name = "focusdeck", version, about = "Terminal music player and pomodoro timer widgets")]
pub struct Cli {
    /// Directory holding config.toml and the log file
    #[arg(long, global = true, default_value = ".focusdeck")]
    pub dir: PathBuf,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write a default config.toml
    Init {
        #[arg(long)]
        force: bool,
    },

    /// Show the effective configuration
    Config,

    /// Interactive player and timer
    Deck {
        #[arg(short, long, value_enum, default_value_t = WidgetSet::Both)]
        widget: WidgetSet,
    },

    /// Run the countdown without the interactive UI
    Timer {
        #[arg(short, long, value_enum, default_value_t = ModeKind::Focus)]
        mode: ModeKind,

        /// Stop after this many ticks
        #[arg(long)]
        limit: Option<u64>,

        /// Emit one JSON object per tick
        #[arg(long)]
        json: bool,
    },

    /// Run the simulated track without the interactive UI
    Player {
        /// Start position in seconds
        #[arg(long, default_value_t = 0)]
        from: u64,

        #[arg(long)]
        limit: Option<u64>,

        #[arg(long)]
        json: bool,
    },
}
