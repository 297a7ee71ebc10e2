//! Win detection logic for tic-tac-toe.

use crate::types::{Board, Cell, Player, WIN_LINES, WinLine};

/// Returns the first line, in table order, where all three cells hold `player`.
///
/// Returns `None` if `player` has no complete line.
pub fn check_win(board: &Board, player: Player) -> Option<WinLine> {
    let cells = board.cells();
    let mark = Cell::Occupied(player);
    WIN_LINES
        .iter()
        .copied()
        .find(|line| line.indices().iter().all(|&index| cells[index] == mark))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert_eq!(check_win(&board, Player::X), None);
        assert_eq!(check_win(&board, Player::O), None);
    }

    #[test]
    fn test_winner_top_row() {
        let mut board = Board::new();
        for index in [0, 1, 2] {
            board.place(index, Player::X).unwrap();
        }
        assert_eq!(check_win(&board, Player::X), Some(WIN_LINES[0]));
        assert_eq!(check_win(&board, Player::O), None);
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let mut board = Board::new();
        for index in [2, 4, 6] {
            board.place(index, Player::O).unwrap();
        }
        assert_eq!(
            check_win(&board, Player::O).map(WinLine::indices),
            Some([2, 4, 6])
        );
    }

    #[test]
    fn test_first_line_in_table_order() {
        // X holds both the left column and the main diagonal.
        let board: Board = "XOO XX. XOX".parse().unwrap();
        assert_eq!(
            check_win(&board, Player::X).map(WinLine::indices),
            Some([0, 3, 6])
        );
    }

    #[test]
    fn test_no_winner_incomplete() {
        let mut board = Board::new();
        board.place(0, Player::X).unwrap();
        board.place(1, Player::X).unwrap();
        assert_eq!(check_win(&board, Player::X), None);
    }

    #[test]
    fn test_copies_agree() {
        let board: Board = "OXO XOX ..O".parse().unwrap();
        let copy = board;
        assert_eq!(check_win(&board, Player::O), check_win(&copy, Player::O));
        assert_eq!(check_win(&board, Player::O), check_win(&board, Player::O));
    }
}
