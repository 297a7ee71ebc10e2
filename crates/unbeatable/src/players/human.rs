//! Human player fed by lines of text input.

use super::{Action, Player};
use anyhow::Result;
use std::io::{self, BufRead};
use tokio::sync::mpsc;
use tracing::{debug, warn};
use unbeatable_tictactoe::{Position, Session};

/// Human player reading from a channel of input lines.
pub struct HumanPlayer {
    name: String,
    input_rx: mpsc::UnboundedReceiver<String>,
}

impl HumanPlayer {
    /// Creates a new human player.
    pub fn new(name: impl Into<String>, input_rx: mpsc::UnboundedReceiver<String>) -> Self {
        Self {
            name: name.into(),
            input_rx,
        }
    }
}

/// Sends each line of `reader` to `input_tx` until input ends or the
/// receiver is gone. Lines that are not valid UTF-8 are skipped.
pub fn forward_lines<R: BufRead>(reader: R, input_tx: mpsc::UnboundedSender<String>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                warn!(error = %e, "Skipping unreadable input line");
                continue;
            }
            Err(e) => {
                warn!(error = %e, "Input stream failed");
                break;
            }
        };
        if input_tx.send(line).is_err() {
            break;
        }
    }
    debug!("Input reader finished");
}

/// Maps one line of input to an action.
pub fn parse_action(line: &str) -> Option<Action> {
    let trimmed = line.trim();
    match trimmed.to_lowercase().as_str() {
        "" => None,
        "q" | "quit" | "exit" => Some(Action::Quit),
        "r" | "reset" | "restart" => Some(Action::Reset),
        _ => Some(
            Position::from_label_or_number(trimmed)
                .map(|pos| Action::Move(pos.to_index()))
                .unwrap_or_else(|| Action::Unrecognized(trimmed.to_string())),
        ),
    }
}

#[async_trait::async_trait]
impl Player for HumanPlayer {
    async fn get_move(&mut self, _session: &Session) -> Result<Action> {
        while let Some(line) = self.input_rx.recv().await {
            if let Some(action) = parse_action(&line) {
                debug!(player = %self.name, ?action, "Human input");
                return Ok(action);
            }
        }

        debug!(player = %self.name, "Input closed");
        Ok(Action::Quit)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unbeatable_tictactoe::{Player as Mark, Strategy};

    #[test]
    fn test_parse_action() {
        assert_eq!(parse_action("5"), Some(Action::Move(4)));
        assert_eq!(parse_action(" top-left "), Some(Action::Move(0)));
        assert_eq!(parse_action("Q"), Some(Action::Quit));
        assert_eq!(parse_action("reset"), Some(Action::Reset));
        assert_eq!(parse_action("   "), None);
        assert_eq!(parse_action("0"), Some(Action::Unrecognized("0".to_string())));
        assert_eq!(
            parse_action("banana"),
            Some(Action::Unrecognized("banana".to_string()))
        );
    }

    #[tokio::test]
    async fn test_skips_blank_lines_and_quits_on_close() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut human = HumanPlayer::new("You", rx);
        let session = Session::new(Mark::X, Mark::X, Strategy::Exhaustive);

        tx.send("".to_string()).unwrap();
        tx.send("center".to_string()).unwrap();
        assert_eq!(human.get_move(&session).await.unwrap(), Action::Move(4));

        drop(tx);
        assert_eq!(human.get_move(&session).await.unwrap(), Action::Quit);
    }

    #[test]
    fn test_forward_lines_skips_invalid_utf8() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let input: &[u8] = b"5\n\xff\xfe\nq\n";
        forward_lines(input, tx);

        assert_eq!(rx.try_recv().unwrap(), "5");
        assert_eq!(rx.try_recv().unwrap(), "q");
        assert!(rx.try_recv().is_err());
    }
}
