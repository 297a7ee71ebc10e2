//! Game rules for tic-tac-toe.
//!
//! Pure functions over any board value, live or hypothetical. The search
//! engine evaluates scratch boards through the same rules the session uses.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::check_win;

use crate::types::{Board, GameResult, Player};

/// Derives the outcome of a board.
///
/// Wins are checked before fullness, X before O.
pub fn evaluate(board: &Board) -> GameResult {
    for player in [Player::X, Player::O] {
        if let Some(line) = check_win(board, player) {
            return GameResult::Win { player, line };
        }
    }
    if is_full(board) {
        GameResult::Draw
    } else {
        GameResult::InProgress
    }
}

impl Board {
    /// Returns the first winning line held by `player`, in table order.
    pub fn check_win(&self, player: Player) -> Option<crate::types::WinLine> {
        check_win(self, player)
    }

    /// Checks if no cell is empty.
    pub fn is_full(&self) -> bool {
        is_full(self)
    }

    /// Returns the outcome of this board.
    pub fn result(&self) -> GameResult {
        evaluate(self)
    }
}
