//! Turn-taking state machine for a human-versus-engine game.
//!
//! The session owns the board between moves. Planning an engine move and
//! applying it are separate calls, so a front end can schedule a thinking
//! delay in between without the search knowing about it.

use crate::error::SessionError;
use crate::search::{Search, Strategy};
use crate::types::{Board, GameResult, Player};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Whose turn it is, or how the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the human's move.
    AwaitingHumanMove,
    /// Waiting for the engine's move.
    AwaitingAutomatedMove,
    /// The game is over.
    Terminal(GameResult),
}

impl Phase {
    /// Returns true once the game has ended.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Terminal(_))
    }
}

/// A single game between a human and the engine.
#[derive(Debug, Clone, Getters)]
pub struct Session {
    /// The live board.
    board: Board,
    /// The human's mark.
    human: Player,
    /// The engine's mark.
    ai: Player,
    /// Mark that opens each game.
    first: Player,
    /// Current phase.
    phase: Phase,
    /// Indices played this game, in order.
    history: Vec<usize>,
    #[getter(skip)]
    search: Search,
}

impl Session {
    /// Starts a game. The engine plays `human.opponent()`.
    #[instrument]
    pub fn new(human: Player, first: Player, strategy: Strategy) -> Self {
        let ai = human.opponent();
        let mut session = Self {
            board: Board::new(),
            human,
            ai,
            first,
            phase: Phase::AwaitingHumanMove,
            history: Vec::new(),
            search: Search::new(ai, human, strategy),
        };
        session.phase = session.phase_for(first);
        session
    }

    /// Clears the board and hands the move back to the opening mark.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!("Resetting game");
        self.board = Board::new();
        self.history.clear();
        self.phase = self.phase_for(self.first);
    }

    /// Outcome of the live board.
    pub fn result(&self) -> GameResult {
        self.board.result()
    }

    /// Places the human's mark at `index`.
    ///
    /// # Errors
    ///
    /// `GameOver` or `NotYourTurn` if the human may not move now, or the board
    /// error if the cell is occupied or out of range. The session is unchanged
    /// on error.
    #[instrument(skip(self), fields(human = %self.human))]
    pub fn human_move(&mut self, index: usize) -> Result<Phase, SessionError> {
        match self.phase {
            Phase::Terminal(_) => Err(SessionError::GameOver),
            Phase::AwaitingAutomatedMove => Err(SessionError::NotYourTurn),
            Phase::AwaitingHumanMove => self.apply(index, self.human),
        }
    }

    /// Computes the engine's move without applying it.
    ///
    /// # Errors
    ///
    /// `NoLegalMove` if the board is full, checked before the turn, then
    /// `GameOver` or `NotYourTurn` outside the engine's turn.
    #[instrument(skip(self), fields(ai = %self.ai))]
    pub fn plan_automated_move(&self) -> Result<usize, SessionError> {
        if self.board.is_full() {
            return Err(SessionError::NoLegalMove);
        }
        match self.phase {
            Phase::Terminal(_) => Err(SessionError::GameOver),
            Phase::AwaitingHumanMove => Err(SessionError::NotYourTurn),
            Phase::AwaitingAutomatedMove => self
                .search
                .best_move(&self.board)
                .ok_or(SessionError::NoLegalMove),
        }
    }

    /// Places the engine's mark at `index`, normally a planned move.
    #[instrument(skip(self), fields(ai = %self.ai))]
    pub fn apply_automated_move(&mut self, index: usize) -> Result<Phase, SessionError> {
        match self.phase {
            Phase::Terminal(_) => Err(SessionError::GameOver),
            Phase::AwaitingHumanMove => Err(SessionError::NotYourTurn),
            Phase::AwaitingAutomatedMove => self.apply(index, self.ai),
        }
    }

    /// Plans and applies the engine's move in one step.
    pub fn play_automated_move(&mut self) -> Result<(usize, Phase), SessionError> {
        let index = self.plan_automated_move()?;
        let phase = self.apply_automated_move(index)?;
        Ok((index, phase))
    }

    fn phase_for(&self, player: Player) -> Phase {
        if player == self.human {
            Phase::AwaitingHumanMove
        } else {
            Phase::AwaitingAutomatedMove
        }
    }

    fn apply(&mut self, index: usize, player: Player) -> Result<Phase, SessionError> {
        if let Err(e) = self.board.place(index, player) {
            warn!(index, %player, error = %e, "Move rejected");
            return Err(e.into());
        }
        self.history.push(index);

        let result = self.board.result();
        self.phase = if result.is_over() {
            info!(%result, "Game over");
            Phase::Terminal(result)
        } else {
            self.phase_for(player.opponent())
        };
        Ok(self.phase)
    }
}
