//! Perfect-play move search.
//!
//! Scores are from the maximizer's point of view: `10 - depth` for a
//! maximizer win, `depth - 10` for a minimizer win, `0` for a draw. The depth
//! bias makes the engine take the quickest win and postpone a forced loss.
//!
//! The search mutates a scratch board in place and undoes every probe, so the
//! board handed back after each call is identical to the one passed in.

use crate::types::{Board, CELL_COUNT, GameResult, Player};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Base score of a won position.
pub const WIN_SCORE: i32 = 10;

/// Score of a drawn position.
pub const DRAW_SCORE: i32 = 0;

/// How the game tree is walked.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Strategy {
    /// Plain minimax over every line of play.
    #[default]
    Exhaustive,
    /// Minimax with alpha-beta cutoffs. Root scores are unchanged.
    AlphaBeta,
}

/// Node counter for a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Positions visited, including the terminal ones.
    pub nodes: u64,
}

/// Minimax evaluator for a fixed pair of opponents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct Minimax {
    maximizer: Player,
    minimizer: Player,
}

impl Minimax {
    /// Scores `board` with `depth` moves already probed.
    ///
    /// `is_maximizing` selects whose mark goes down next. The board is
    /// restored before returning.
    pub fn minimax(&self, board: &mut Board, depth: i32, is_maximizing: bool) -> i32 {
        self.exhaustive(board, depth, is_maximizing, &mut SearchStats::default())
    }

    /// Same score as [`Minimax::minimax`], with alpha-beta cutoffs.
    pub fn alpha_beta(&self, board: &mut Board, depth: i32, is_maximizing: bool) -> i32 {
        self.pruned(
            board,
            depth,
            is_maximizing,
            i32::MIN,
            i32::MAX,
            &mut SearchStats::default(),
        )
    }

    fn terminal_score(&self, board: &Board, depth: i32) -> Option<i32> {
        if board.check_win(self.maximizer).is_some() {
            Some(WIN_SCORE - depth)
        } else if board.check_win(self.minimizer).is_some() {
            Some(depth - WIN_SCORE)
        } else if board.is_full() {
            Some(DRAW_SCORE)
        } else {
            None
        }
    }

    fn mark(&self, is_maximizing: bool) -> Player {
        if is_maximizing {
            self.maximizer
        } else {
            self.minimizer
        }
    }

    fn exhaustive(
        &self,
        board: &mut Board,
        depth: i32,
        is_maximizing: bool,
        stats: &mut SearchStats,
    ) -> i32 {
        stats.nodes += 1;
        if let Some(score) = self.terminal_score(board, depth) {
            return score;
        }

        let mark = self.mark(is_maximizing);
        let mut best = if is_maximizing { i32::MIN } else { i32::MAX };
        for index in 0..CELL_COUNT {
            if !board.is_empty(index) {
                continue;
            }
            board.put(index, mark);
            let score = self.exhaustive(board, depth + 1, !is_maximizing, stats);
            board.clear(index);

            best = if is_maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }
        best
    }

    fn pruned(
        &self,
        board: &mut Board,
        depth: i32,
        is_maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
        stats: &mut SearchStats,
    ) -> i32 {
        stats.nodes += 1;
        if let Some(score) = self.terminal_score(board, depth) {
            return score;
        }

        let mark = self.mark(is_maximizing);
        let mut best = if is_maximizing { i32::MIN } else { i32::MAX };
        for index in 0..CELL_COUNT {
            if !board.is_empty(index) {
                continue;
            }
            board.put(index, mark);
            let score = self.pruned(board, depth + 1, !is_maximizing, alpha, beta, stats);
            board.clear(index);

            if is_maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if alpha >= beta {
                break;
            }
        }
        best
    }
}

/// Root score of one legal move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, new)]
pub struct MoveScore {
    /// Cell index (0-8).
    pub index: usize,
    /// Minimax score after the engine plays here.
    pub score: i32,
}

/// Full report on a position, for diagnostics and the `analyze` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct Analysis {
    /// The analysed board.
    board: Board,
    /// Outcome of the board as given.
    result: GameResult,
    /// The engine's mark.
    ai: Player,
    /// Scores of every legal move, in index order.
    scores: Vec<MoveScore>,
    /// Highest-scoring move, lowest index on ties.
    best_move: Option<usize>,
    /// Nodes visited across all root moves.
    stats: SearchStats,
}

/// Move picker for the automated player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct Search {
    /// The engine's mark (maximizer).
    ai: Player,
    /// The opponent's mark (minimizer).
    human: Player,
    /// Tree walk used for scoring.
    strategy: Strategy,
}

impl Search {
    /// Creates a search for `ai` playing against `human`.
    pub fn new(ai: Player, human: Player, strategy: Strategy) -> Self {
        Self {
            ai,
            human,
            strategy,
        }
    }

    /// Scores every empty cell as the engine's next move.
    ///
    /// Each probe runs `minimax(board, 0, false)` with the engine as
    /// maximizer. The caller's board is never touched.
    #[instrument(skip(self, board), fields(ai = %self.ai, strategy = %self.strategy))]
    pub fn score_moves(&self, board: &Board) -> (Vec<MoveScore>, SearchStats) {
        let minimax = Minimax::new(self.ai, self.human);
        let mut scratch = *board;
        let mut stats = SearchStats::default();
        let mut scores = Vec::new();

        for index in 0..CELL_COUNT {
            if !scratch.is_empty(index) {
                continue;
            }
            scratch.put(index, self.ai);
            let score = match self.strategy {
                Strategy::Exhaustive => minimax.exhaustive(&mut scratch, 0, false, &mut stats),
                Strategy::AlphaBeta => minimax.pruned(
                    &mut scratch,
                    0,
                    false,
                    i32::MIN,
                    i32::MAX,
                    &mut stats,
                ),
            };
            scratch.clear(index);

            debug!(index, score, "Scored candidate move");
            scores.push(MoveScore::new(index, score));
        }

        debug_assert_eq!(scratch, *board);
        (scores, stats)
    }

    /// Returns the highest-scoring empty cell, or `None` on a full board.
    ///
    /// Ties go to the lowest index.
    #[instrument(skip(self, board), fields(ai = %self.ai))]
    pub fn best_move(&self, board: &Board) -> Option<usize> {
        let (scores, stats) = self.score_moves(board);
        let best = pick_best(&scores);
        if let Some(best) = best {
            info!(index = best.index, score = best.score, nodes = stats.nodes, "Engine chose move");
        }
        best.map(|best| best.index)
    }

    /// Scores the board and reports its result, move scores and node count.
    #[instrument(skip(self, board))]
    pub fn analyze(&self, board: &Board) -> Analysis {
        let (scores, stats) = self.score_moves(board);
        let best_move = pick_best(&scores).map(|best| best.index);
        Analysis {
            board: *board,
            result: board.result(),
            ai: self.ai,
            scores,
            best_move,
            stats,
        }
    }
}

/// First strictly greater score wins, so ties keep the lowest index.
fn pick_best(scores: &[MoveScore]) -> Option<MoveScore> {
    let mut best: Option<MoveScore> = None;
    for candidate in scores {
        match best {
            Some(current) if candidate.score <= current.score => {}
            _ => best = Some(*candidate),
        }
    }
    best
}

/// Returns the optimal move for `ai_player` against `human_player`.
///
/// Uses the exhaustive strategy. Returns `None` only when the board is full.
pub fn best_move(board: &Board, ai_player: Player, human_player: Player) -> Option<usize> {
    Search::new(ai_player, human_player, Strategy::Exhaustive).best_move(board)
}
