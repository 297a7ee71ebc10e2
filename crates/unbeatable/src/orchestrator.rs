//! Game orchestration between the human and the engine.

use crate::players::{Action, Player};
use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use unbeatable_tictactoe::{
    BoardError, GameResult, Phase, Player as Mark, Position, Session, SessionError,
};

/// Messages sent from orchestrator to UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A new game began.
    GameStarted {
        /// Human's mark.
        human: Mark,
        /// Mark that opens.
        first: Mark,
    },
    /// Board rendering after a change.
    BoardChanged(String),
    /// Human to move.
    AwaitingHuman(Mark),
    /// Engine is thinking.
    EngineThinking,
    /// Move was made.
    MoveMade {
        /// Display name of the mover.
        player: String,
        /// Mark placed.
        mark: Mark,
        /// Where it went.
        position: Position,
    },
    /// The board refused a move.
    MoveRejected(String),
    /// Input was not a move or command.
    InvalidInput(String),
    /// Game ended.
    GameOver {
        /// Final result.
        result: GameResult,
        /// Display name of the winner, if any.
        winner: Option<String>,
    },
    /// Waiting for the human to restart or quit.
    PlayAgainPrompt,
}

/// Games won, lost and drawn over a sitting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, derive_more::Display)]
#[display("You {} - {} Engine, {} drawn", human_wins, engine_wins, draws)]
pub struct Scoreboard {
    /// Games the human won.
    pub human_wins: u32,
    /// Games the engine won.
    pub engine_wins: u32,
    /// Drawn games.
    pub draws: u32,
}

/// Orchestrates gameplay between the human and the engine.
pub struct Orchestrator {
    session: Session,
    human: Box<dyn Player>,
    engine: Box<dyn Player>,
    event_tx: mpsc::UnboundedSender<GameEvent>,
    scoreboard: Scoreboard,
}

impl Orchestrator {
    /// Creates a new orchestrator.
    pub fn new(
        session: Session,
        human: Box<dyn Player>,
        engine: Box<dyn Player>,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        Self {
            session,
            human,
            engine,
            event_tx,
            scoreboard: Scoreboard::default(),
        }
    }

    /// Runs games until the human quits.
    pub async fn run(&mut self) -> Result<Scoreboard> {
        info!("Starting game orchestration");
        self.announce_game()?;

        loop {
            match *self.session.phase() {
                Phase::Terminal(_) => {
                    self.send(GameEvent::PlayAgainPrompt)?;
                    match self.human.get_move(&self.session).await? {
                        Action::Quit => break,
                        Action::Reset => self.restart()?,
                        Action::Move(_) | Action::Unrecognized(_) => {
                            self.send(GameEvent::InvalidInput(
                                "The game is over: r to play again, q to quit".to_string(),
                            ))?;
                        }
                    }
                }
                Phase::AwaitingAutomatedMove => {
                    self.send(GameEvent::EngineThinking)?;
                    match self.engine.get_move(&self.session).await? {
                        Action::Move(index) => {
                            self.session.apply_automated_move(index)?;
                            self.after_move(self.engine.name().to_string(), *self.session.ai(), index)?;
                        }
                        other => anyhow::bail!("Engine returned {:?} instead of a move", other),
                    }
                }
                Phase::AwaitingHumanMove => {
                    let mark = *self.session.human();
                    self.send(GameEvent::AwaitingHuman(mark))?;
                    debug!(player = %self.human.name(), "Waiting for move");
                    match self.human.get_move(&self.session).await? {
                        Action::Quit => break,
                        Action::Reset => self.restart()?,
                        Action::Unrecognized(text) => {
                            self.send(GameEvent::InvalidInput(format!(
                                "'{}' is not a cell: use 1-9 or a name like \"center\"",
                                text
                            )))?;
                        }
                        Action::Move(index) => match self.session.human_move(index) {
                            Ok(_) => self.after_move(self.human.name().to_string(), mark, index)?,
                            Err(SessionError::Board(e)) => {
                                warn!(error = %e, "Human move rejected");
                                self.send(GameEvent::MoveRejected(rejection_message(e)))?;
                            }
                            Err(e) => return Err(e.into()),
                        },
                    }
                }
            }
        }

        info!(scoreboard = %self.scoreboard, "Orchestration finished");
        Ok(self.scoreboard)
    }

    /// Starts a fresh game on the same session settings.
    pub fn restart(&mut self) -> Result<()> {
        self.session.reset();
        self.announce_game()
    }

    /// Returns the session being played.
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn announce_game(&self) -> Result<()> {
        self.send(GameEvent::GameStarted {
            human: *self.session.human(),
            first: *self.session.first(),
        })?;
        self.send(GameEvent::BoardChanged(self.session.board().to_string()))
    }

    fn after_move(&mut self, player: String, mark: Mark, index: usize) -> Result<()> {
        if let Some(position) = Position::from_index(index) {
            self.send(GameEvent::MoveMade {
                player,
                mark,
                position,
            })?;
        }
        self.send(GameEvent::BoardChanged(self.session.board().to_string()))?;

        if let Phase::Terminal(result) = *self.session.phase() {
            let winner = match result.winner() {
                Some(mark) if mark == *self.session.human() => {
                    self.scoreboard.human_wins += 1;
                    Some(self.human.name().to_string())
                }
                Some(_) => {
                    self.scoreboard.engine_wins += 1;
                    Some(self.engine.name().to_string())
                }
                None => {
                    self.scoreboard.draws += 1;
                    None
                }
            };
            self.send(GameEvent::GameOver { result, winner })?;
        }
        Ok(())
    }

    fn send(&self, event: GameEvent) -> Result<()> {
        self.event_tx.send(event)?;
        Ok(())
    }
}

/// Rejection text in the 1-9 numbering the human sees.
fn rejection_message(error: BoardError) -> String {
    match error {
        BoardError::CellOccupied(index) => match Position::from_index(index) {
            Some(position) => format!("Cell {} ({}) is already taken", index + 1, position),
            None => error.to_string(),
        },
        BoardError::OutOfBounds(_) => error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::players::{EnginePlayer, HumanPlayer};
    use std::time::Duration;
    use unbeatable_tictactoe::Strategy;

    /// Takes the lowest empty cell every turn and quits once the game ends.
    struct LowestCell;

    #[async_trait::async_trait]
    impl Player for LowestCell {
        async fn get_move(&mut self, session: &Session) -> Result<Action> {
            if session.phase().is_terminal() {
                return Ok(Action::Quit);
            }
            let index = session
                .board()
                .empty_cells()
                .next()
                .ok_or_else(|| anyhow::anyhow!("No empty cell"))?;
            Ok(Action::Move(index))
        }

        fn name(&self) -> &str {
            "Lowest"
        }
    }

    fn engine() -> Box<dyn Player> {
        Box::new(EnginePlayer::new("Engine", Duration::ZERO))
    }

    fn drain(mut rx: mpsc::UnboundedReceiver<GameEvent>) -> Vec<GameEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    async fn run_scripted(lines: &[&str], first: Mark) -> (Scoreboard, Vec<GameEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        for line in lines {
            input_tx.send(line.to_string()).unwrap();
        }
        drop(input_tx);

        let session = Session::new(Mark::X, first, Strategy::AlphaBeta);
        let human = Box::new(HumanPlayer::new("You", input_rx));
        let mut orchestrator = Orchestrator::new(session, human, engine(), event_tx);
        let scoreboard = orchestrator.run().await.unwrap();
        drop(orchestrator);
        (scoreboard, drain(event_rx))
    }

    #[tokio::test]
    async fn test_full_game_engine_never_loses() {
        for first in [Mark::X, Mark::O] {
            let (event_tx, event_rx) = mpsc::unbounded_channel();
            let session = Session::new(Mark::X, first, Strategy::Exhaustive);
            let mut orchestrator =
                Orchestrator::new(session, Box::new(LowestCell), engine(), event_tx);

            let scoreboard = orchestrator.run().await.unwrap();
            assert_eq!(scoreboard.human_wins, 0);
            assert_eq!(scoreboard.engine_wins + scoreboard.draws, 1);
            assert!(orchestrator.session().phase().is_terminal());

            drop(orchestrator);
            let events = drain(event_rx);
            assert!(events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })));
            assert!(events.contains(&GameEvent::EngineThinking));
        }
    }

    #[tokio::test]
    async fn test_occupied_cell_is_rejected() {
        let (scoreboard, events) = run_scripted(&["5", "5", "q"], Mark::X).await;
        assert_eq!(scoreboard, Scoreboard::default());
        assert!(events.contains(&GameEvent::MoveRejected(
            "Cell 5 (Center) is already taken".to_string()
        )));
        assert!(events.contains(&GameEvent::MoveMade {
            player: "You".to_string(),
            mark: Mark::X,
            position: Position::Center,
        }));
    }

    #[tokio::test]
    async fn test_unrecognized_input_is_reported() {
        let (_, events) = run_scripted(&["banana", "q"], Mark::X).await;
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::InvalidInput(text) if text.contains("banana"))));
    }

    #[tokio::test]
    async fn test_reset_starts_new_game() {
        let (_, events) = run_scripted(&["r", "q"], Mark::O).await;
        let starts = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameStarted { .. }))
            .count();
        assert_eq!(starts, 2);
        // Engine opened both games.
        let engine_moves = events
            .iter()
            .filter(|e| matches!(e, GameEvent::MoveMade { mark: Mark::O, .. }))
            .count();
        assert_eq!(engine_moves, 2);
    }

    #[tokio::test]
    async fn test_closed_input_quits() {
        let (scoreboard, events) = run_scripted(&[], Mark::X).await;
        assert_eq!(scoreboard, Scoreboard::default());
        assert!(events.contains(&GameEvent::AwaitingHuman(Mark::X)));
    }

    #[test]
    fn test_scoreboard_display() {
        let scoreboard = Scoreboard {
            human_wins: 0,
            engine_wins: 2,
            draws: 3,
        };
        assert_eq!(scoreboard.to_string(), "You 0 - 2 Engine, 3 drawn");
    }
}
