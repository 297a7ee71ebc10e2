//! Player trait and implementations.

mod engine;
mod human;

pub use engine::EnginePlayer;
pub use human::{HumanPlayer, forward_lines};

use anyhow::Result;
use unbeatable_tictactoe::Session;

/// What a player wants to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Place a mark at this cell index (0-8).
    Move(usize),
    /// Start a fresh game.
    Reset,
    /// Leave.
    Quit,
    /// Input that could not be understood.
    Unrecognized(String),
}

/// Trait for players that can make moves.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Gets the next action from this player.
    async fn get_move(&mut self, session: &Session) -> Result<Action>;

    /// Returns the player's display name.
    fn name(&self) -> &str;
}
