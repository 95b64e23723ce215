mod cli;
mod clock;
mod logging;
mod state;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::{commands, Cli, Commands};
use state::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Deck { .. } => logging::init_file(&Config::log_path(&cli.dir), cli.verbose)?,
        _ => logging::init_stderr(cli.verbose),
    }
    tracing::debug!(?cli, "parsed arguments");

    match cli.command {
        Commands::Init { force } => commands::init::run(&cli.dir, force),
        Commands::Config => commands::misc::show_config(&cli.dir),
        Commands::Deck { widget } => commands::deck::run(&cli.dir, widget).await,
        Commands::Timer { mode, limit, json } => {
            commands::headless::timer(&cli.dir, mode, limit, json).await
        }
        Commands::Player { from, limit, json } => {
            commands::headless::player(&cli.dir, from, limit, json).await
        }
    }
}
