//! Engine player: perfect search plus an optional thinking delay.

use super::{Action, Player};
use anyhow::Result;
use std::time::Duration;
use tracing::{debug, instrument};
use unbeatable_tictactoe::Session;

/// Automated player backed by the session's search.
///
/// The delay runs after the move is found and before it is handed back, so
/// it never affects which move is played.
pub struct EnginePlayer {
    name: String,
    delay: Duration,
}

impl EnginePlayer {
    /// Creates a new engine player.
    pub fn new(name: impl Into<String>, delay: Duration) -> Self {
        Self {
            name: name.into(),
            delay,
        }
    }
}

#[async_trait::async_trait]
impl Player for EnginePlayer {
    #[instrument(skip_all, fields(engine = %self.name))]
    async fn get_move(&mut self, session: &Session) -> Result<Action> {
        let index = session.plan_automated_move()?;
        debug!(index, delay_ms = self.delay.as_millis() as u64, "Move found");

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(Action::Move(index))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
