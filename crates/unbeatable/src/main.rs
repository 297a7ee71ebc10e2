//! Unbeatable - tic-tac-toe against a perfect-play engine.
//!
//! `play` runs an interactive game on the terminal; `analyze` scores a
//! single position and exits.

#![warn(missing_docs)]

mod analyze;
mod cli;
mod config;
mod orchestrator;
mod players;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use config::{FirstMover, PlayConfig};
use orchestrator::Orchestrator;
use players::{EnginePlayer, HumanPlayer, forward_lines};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;
use unbeatable_tictactoe::Session;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = PlayConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Play {
            human_mark,
            engine_first,
            delay_ms,
            strategy,
        } => {
            let mut config = config;
            if let Some(mark) = human_mark {
                config = config.with_human_mark(mark);
            }
            if engine_first {
                config = config.with_first(FirstMover::Engine);
            }
            if let Some(delay_ms) = delay_ms {
                config = config.with_thinking_delay_ms(delay_ms);
            }
            if let Some(strategy) = strategy {
                config = config.with_strategy(strategy);
            }
            init_tracing(&config)?;
            run_play(config).await
        }
        Command::Analyze {
            board,
            ai,
            strategy,
            json,
        } => {
            init_tracing(&config)?;
            let strategy = strategy.unwrap_or(*config.strategy());
            println!("{}", analyze::analyze(&board, ai, strategy, json)?);
            Ok(())
        }
    }
}

/// Logs to the configured file, or to stderr so stdout stays clean for the game.
fn init_tracing(config: &PlayConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_level()));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    // Don't panic if already initialized
    let _ = match config.log_file() {
        Some(path) => {
            let log_file = open_log_file(path)?;
            builder
                .with_writer(Arc::new(log_file))
                .with_ansi(false)
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    debug!("Tracing initialized");
    Ok(())
}

fn open_log_file(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("Failed to create log file {}", path.display()))
}

/// Run an interactive game until the player quits
#[instrument(skip(config))]
async fn run_play(config: PlayConfig) -> Result<()> {
    let human = *config.human_mark();
    let first = config.first().mark(human);
    info!(%human, %first, strategy = %config.strategy(), "Starting interactive game");

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (input_tx, input_rx) = mpsc::unbounded_channel();

    // Blocking stdin reader; exits once the orchestrator stops listening.
    std::thread::spawn(move || forward_lines(std::io::stdin().lock(), input_tx));

    let renderer = tokio::spawn(render::render_events(event_rx, std::io::stdout()));

    let session = Session::new(human, first, *config.strategy());
    let human_player = Box::new(HumanPlayer::new("You", input_rx));
    let engine_player = Box::new(EnginePlayer::new(
        "Engine",
        Duration::from_millis(*config.thinking_delay_ms()),
    ));

    let mut orchestrator = Orchestrator::new(session, human_player, engine_player, event_tx);
    let outcome = orchestrator.run().await;

    // Closes the event channel so the renderer drains and stops.
    drop(orchestrator);
    renderer.await??;

    let scoreboard = outcome?;
    println!("Final score: {}", scoreboard);
    Ok(())
}
