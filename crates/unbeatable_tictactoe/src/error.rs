//! Error types for board and session operations.
//!
//! Every variant is an expected game condition, not a system fault.

/// Error returned when placing a mark on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum BoardError {
    /// The cell already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(usize),

    /// The index is not in 0-8.
    #[display("Cell index {} is out of bounds (must be 0-8)", _0)]
    OutOfBounds(usize),
}

impl std::error::Error for BoardError {}

/// Error returned by session transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum SessionError {
    /// The board rejected the move.
    #[display("{}", _0)]
    #[from]
    Board(BoardError),

    /// The other side is due to move.
    #[display("It's not your turn")]
    NotYourTurn,

    /// The game has already ended.
    #[display("Game is already over")]
    GameOver,

    /// The board is full; resolve the game as a draw instead.
    #[display("No legal move available")]
    NoLegalMove,
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Board(e) => Some(e),
            _ => None,
        }
    }
}

/// Error returned when parsing a board from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ParseBoardError {
    /// The text does not hold exactly nine cells.
    #[display("Expected 9 cells, found {}", _0)]
    WrongLength(usize),

    /// A character is not a recognised cell symbol.
    #[display("Invalid cell symbol '{}'", _0)]
    InvalidCell(char),
}

impl std::error::Error for ParseBoardError {}
