//! Unbeatable tic-tac-toe: board model and perfect minimax search.
//!
//! # Architecture
//!
//! - **Board**: nine cells, move application, win and draw detection
//! - **Search**: depth-biased minimax that never loses
//! - **Session**: turn-taking state machine for a human-versus-engine game
//!
//! # Example
//!
//! ```
//! use unbeatable_tictactoe::{GameResult, Player, best_move, new_board, place, result};
//!
//! let board = new_board();
//! let board = place(board, 4, Player::X).unwrap();
//! let reply = best_move(&board, Player::O, Player::X).unwrap();
//! let board = place(board, reply, Player::O).unwrap();
//! assert_eq!(result(&board), GameResult::InProgress);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod position;
mod rules;
mod search;
mod session;
mod types;

pub use error::{BoardError, ParseBoardError, SessionError};
pub use position::Position;
pub use rules::{check_win, evaluate, is_draw, is_full};
pub use search::{
    Analysis, DRAW_SCORE, Minimax, MoveScore, Search, SearchStats, Strategy, WIN_SCORE, best_move,
};
pub use session::{Phase, Session};
pub use types::{Board, CELL_COUNT, Cell, GameResult, Player, WIN_LINES, WinLine};

/// Creates an empty board.
pub fn new_board() -> Board {
    Board::new()
}

/// Places `player` at `index` and returns the updated board.
///
/// # Errors
///
/// Returns `BoardError::CellOccupied` or `BoardError::OutOfBounds`.
pub fn place(mut board: Board, index: usize, player: Player) -> Result<Board, BoardError> {
    board.place(index, player)?;
    Ok(board)
}

/// Derives the outcome of `board`.
pub fn result(board: &Board) -> GameResult {
    board.result()
}
