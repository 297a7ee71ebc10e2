//! Plain-text rendering of game events.

use crate::orchestrator::GameEvent;
use anyhow::Result;
use std::io::Write;
use tokio::sync::mpsc;
use tracing::debug;
use unbeatable_tictactoe::Player as Mark;

/// Turns events into lines for the terminal.
#[derive(Debug, Default)]
pub struct Renderer {
    human: Option<Mark>,
}

impl Renderer {
    /// Creates a renderer that learns the human's mark from `GameStarted`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text for one event.
    pub fn describe(&mut self, event: &GameEvent) -> String {
        match event {
            GameEvent::GameStarted { human, first } => {
                self.human = Some(*human);
                let opener = if first == human { "you move" } else { "engine moves" };
                format!("New game: you play {}, {} first", human, opener)
            }
            GameEvent::BoardChanged(board) => format!("\n{}\n", board),
            GameEvent::AwaitingHuman(mark) => {
                format!("Your move ({}): 1-9 or a name, r to reset, q to quit", mark)
            }
            GameEvent::EngineThinking => "Engine is thinking...".to_string(),
            GameEvent::MoveMade {
                player,
                mark,
                position,
            } => format!("{} played {} at {}", player, mark, position),
            GameEvent::MoveRejected(reason) => format!("{}. Try again.", reason),
            GameEvent::InvalidInput(reason) => reason.clone(),
            GameEvent::GameOver { result, .. } => match result.winner() {
                Some(mark) if Some(mark) == self.human => "You win!".to_string(),
                Some(mark) => format!("Engine ({}) wins!", mark),
                None => "Draw!".to_string(),
            },
            GameEvent::PlayAgainPrompt => "Play again? r to restart, q to quit".to_string(),
        }
    }
}

/// Prints events until the orchestrator drops its sender.
pub async fn render_events<W: Write>(
    mut event_rx: mpsc::UnboundedReceiver<GameEvent>,
    mut out: W,
) -> Result<()> {
    let mut renderer = Renderer::new();
    while let Some(event) = event_rx.recv().await {
        debug!(?event, "Rendering event");
        writeln!(out, "{}", renderer.describe(&event))?;
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use unbeatable_tictactoe::{GameResult, Position, WIN_LINES};

    #[test]
    fn test_game_over_from_human_side() {
        let mut renderer = Renderer::new();
        renderer.describe(&GameEvent::GameStarted {
            human: Mark::X,
            first: Mark::X,
        });

        let engine_won = GameEvent::GameOver {
            result: GameResult::Win {
                player: Mark::O,
                line: WIN_LINES[0],
            },
            winner: Some("Engine".to_string()),
        };
        assert_eq!(renderer.describe(&engine_won), "Engine (O) wins!");

        let human_won = GameEvent::GameOver {
            result: GameResult::Win {
                player: Mark::X,
                line: WIN_LINES[6],
            },
            winner: Some("You".to_string()),
        };
        assert_eq!(renderer.describe(&human_won), "You win!");

        let drawn = GameEvent::GameOver {
            result: GameResult::Draw,
            winner: None,
        };
        assert_eq!(renderer.describe(&drawn), "Draw!");
    }

    #[test]
    fn test_status_lines() {
        let mut renderer = Renderer::new();
        assert_eq!(
            renderer.describe(&GameEvent::EngineThinking),
            "Engine is thinking..."
        );
        assert_eq!(
            renderer.describe(&GameEvent::MoveMade {
                player: "Engine".to_string(),
                mark: Mark::O,
                position: Position::Center,
            }),
            "Engine played O at Center"
        );
        assert_eq!(
            renderer.describe(&GameEvent::GameStarted {
                human: Mark::O,
                first: Mark::X,
            }),
            "New game: you play O, engine moves first"
        );
    }

    #[tokio::test]
    async fn test_render_events_until_closed() {
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(GameEvent::EngineThinking).unwrap();
        tx.send(GameEvent::PlayAgainPrompt).unwrap();
        drop(tx);

        let mut out = Vec::new();
        render_events(rx, &mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Engine is thinking...\nPlay again? r to restart, q to quit\n"
        );
    }
}
