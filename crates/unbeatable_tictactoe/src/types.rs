//! Core domain types for tic-tac-toe.

use crate::error::{BoardError, ParseBoardError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::instrument;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// Player in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Player {
    /// Player X (conventionally the human, moves first).
    X,
    /// Player O (conventionally the engine).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A cell on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell occupied by a player.
    Occupied(Player),
}

impl Cell {
    /// Returns the occupying player, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }
}

/// One of the eight index triples that win the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinLine([usize; 3]);

impl WinLine {
    /// Returns the three cell indices of this line.
    pub const fn indices(self) -> [usize; 3] {
        self.0
    }
}

impl fmt::Display for WinLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "[{}, {}, {}]", a, b, c)
    }
}

/// Winning lines in lookup order: rows, columns, diagonals.
pub const WIN_LINES: [WinLine; 8] = [
    // Rows
    WinLine([0, 1, 2]),
    WinLine([3, 4, 5]),
    WinLine([6, 7, 8]),
    // Columns
    WinLine([0, 3, 6]),
    WinLine([1, 4, 7]),
    WinLine([2, 5, 8]),
    // Diagonals
    WinLine([0, 4, 8]),
    WinLine([2, 4, 6]),
];

/// Outcome of a board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Game is ongoing.
    InProgress,
    /// A player completed a line.
    Win {
        /// The winning player.
        player: Player,
        /// The completed line.
        line: WinLine,
    },
    /// Board is full with no line.
    Draw,
}

impl GameResult {
    /// Returns true if the game has ended.
    pub fn is_over(&self) -> bool {
        !matches!(self, GameResult::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameResult::Win { player, .. } => Some(*player),
            _ => None,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::InProgress => write!(f, "In progress"),
            GameResult::Win { player, line } => write!(f, "Player {} wins on {}", player, line),
            GameResult::Draw => write!(f, "Draw"),
        }
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// Gets the cell at the given index (0-8).
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Checks if a cell is empty. Out-of-range indices are never empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Empty cell indices in ascending order.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .map(|(index, _)| index)
    }

    /// Counts the cells held by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|cell| **cell == Cell::Occupied(player))
            .count()
    }

    /// Places `player` at `index`.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::CellOccupied` if the cell is taken and
    /// `BoardError::OutOfBounds` if `index > 8`. The board is unchanged on error.
    #[instrument(level = "trace", skip(self))]
    pub fn place(&mut self, index: usize, player: Player) -> Result<(), BoardError> {
        match self.get(index) {
            None => Err(BoardError::OutOfBounds(index)),
            Some(Cell::Occupied(_)) => Err(BoardError::CellOccupied(index)),
            Some(Cell::Empty) => {
                self.cells[index] = Cell::Occupied(player);
                Ok(())
            }
        }
    }

    /// Writes a mark without validation. Search probes only.
    pub(crate) fn put(&mut self, index: usize, player: Player) {
        debug_assert_eq!(self.cells[index], Cell::Empty);
        self.cells[index] = Cell::Occupied(player);
    }

    /// Undoes a probe.
    pub(crate) fn clear(&mut self, index: usize) {
        self.cells[index] = Cell::Empty;
    }
}

impl fmt::Display for Board {
    /// Renders the board with empty cells numbered 1-9.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                match self.cells[index] {
                    Cell::Empty => write!(f, "{}", index + 1)?,
                    Cell::Occupied(player) => write!(f, "{}", player)?,
                }
                if col < 2 {
                    f.write_str("|")?;
                }
            }
            if row < 2 {
                f.write_str("\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parses nine cells: `X`, `O`, or one of `. _ -` and digits for empty.
    /// Whitespace and `|` separators are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|')
            .collect();
        if symbols.len() != CELL_COUNT {
            return Err(ParseBoardError::WrongLength(symbols.len()));
        }

        let mut board = Board::new();
        for (index, symbol) in symbols.into_iter().enumerate() {
            board.cells[index] = match symbol {
                'x' | 'X' => Cell::Occupied(Player::X),
                'o' | 'O' => Cell::Occupied(Player::O),
                '.' | '_' | '-' => Cell::Empty,
                c if c.is_ascii_digit() => Cell::Empty,
                other => return Err(ParseBoardError::InvalidCell(other)),
            };
        }
        Ok(board)
    }
}
