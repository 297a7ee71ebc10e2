//! Command-line interface for unbeatable.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use unbeatable_tictactoe::{Board, Player as Mark, Strategy};

/// Unbeatable - tic-tac-toe against a perfect-play engine
#[derive(Parser, Debug)]
#[command(name = "unbeatable")]
#[command(about = "Play tic-tac-toe against an engine that never loses", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML play configuration
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game on the terminal
    Play {
        /// Mark the human plays (X or O)
        #[arg(long)]
        human_mark: Option<Mark>,

        /// Let the engine open each game
        #[arg(long)]
        engine_first: bool,

        /// Engine thinking delay in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Search strategy (exhaustive or alpha-beta)
        #[arg(long)]
        strategy: Option<Strategy>,
    },

    /// Score every legal move on a board
    Analyze {
        /// Board as nine cells, e.g. "XX. .O. ..." (X, O, or . _ - for empty)
        board: Board,

        /// Mark the engine plays
        #[arg(long, default_value = "O")]
        ai: Mark,

        /// Search strategy (exhaustive or alpha-beta)
        #[arg(long)]
        strategy: Option<Strategy>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}
