//! Exhaustive check that the engine never loses.
//!
//! The human side tries every legal move at every turn; the engine answers
//! each with its search. Every finished game must be a draw or an engine win.

use unbeatable_tictactoe::{Board, GameResult, Phase, Player, Session, Strategy, best_move};

#[derive(Debug, Default)]
struct Tally {
    engine_wins: usize,
    draws: usize,
    human_wins: usize,
}

fn explore(session: &Session, tally: &mut Tally) {
    match *session.phase() {
        Phase::Terminal(GameResult::Draw) => tally.draws += 1,
        Phase::Terminal(result) => {
            if result.winner() == Some(*session.human()) {
                tally.human_wins += 1;
            } else {
                tally.engine_wins += 1;
            }
        }
        Phase::AwaitingAutomatedMove => {
            let mut next = session.clone();
            next.play_automated_move().expect("engine has a legal move");
            explore(&next, tally);
        }
        Phase::AwaitingHumanMove => {
            for index in session.board().empty_cells() {
                let mut next = session.clone();
                next.human_move(index).expect("empty cell accepts a move");
                explore(&next, tally);
            }
        }
    }
}

fn tally_for(human: Player, first: Player, strategy: Strategy) -> Tally {
    let mut tally = Tally::default();
    explore(&Session::new(human, first, strategy), &mut tally);
    tally
}

#[test]
fn test_engine_never_loses_moving_second() {
    let tally = tally_for(Player::X, Player::X, Strategy::Exhaustive);
    assert_eq!(tally.human_wins, 0, "{:?}", tally);
    assert!(tally.engine_wins > 0);
    assert!(tally.draws > 0);
}

#[test]
fn test_engine_never_loses_moving_first() {
    let tally = tally_for(Player::X, Player::O, Strategy::AlphaBeta);
    assert_eq!(tally.human_wins, 0, "{:?}", tally);
    assert!(tally.engine_wins > 0);
}

#[test]
fn test_engine_never_loses_playing_x() {
    let tally = tally_for(Player::O, Player::O, Strategy::AlphaBeta);
    assert_eq!(tally.human_wins, 0, "{:?}", tally);
}

/// Follows every human reply from `board`, with `engine` answering.
fn engine_survives(board: Board, engine: Player, engine_to_move: bool) -> bool {
    let human = engine.opponent();
    match board.result() {
        GameResult::Win { player, .. } => return player == engine,
        GameResult::Draw => return true,
        GameResult::InProgress => {}
    }

    if engine_to_move {
        let index = best_move(&board, engine, human).expect("board is not full");
        let mut next = board;
        next.place(index, engine).unwrap();
        engine_survives(next, engine, false)
    } else {
        board.empty_cells().all(|index| {
            let mut next = board;
            next.place(index, human).unwrap();
            engine_survives(next, engine, true)
        })
    }
}

#[test]
fn test_engine_holds_corner_center_opening() {
    // X took a corner, O the center; engine O to move.
    let board: Board = "X.. .O. ...".parse().unwrap();
    assert!(engine_survives(board, Player::O, true));
}

#[test]
fn test_engine_holds_every_single_opening() {
    for opening in 0..9 {
        let mut board = Board::new();
        board.place(opening, Player::X).unwrap();
        assert!(engine_survives(board, Player::O, true), "opening {}", opening);
    }
}
