//! One-shot position analysis for the `analyze` command.

use anyhow::Result;
use std::fmt::Write;
use tracing::instrument;
use unbeatable_tictactoe::{Analysis, Board, Player as Mark, Position, Search, Strategy};

/// Scores `board` for `ai` and renders the report as text or JSON.
#[instrument(skip(board))]
pub fn analyze(board: &Board, ai: Mark, strategy: Strategy, json: bool) -> Result<String> {
    let analysis = Search::new(ai, ai.opponent(), strategy).analyze(board);
    if json {
        Ok(serde_json::to_string_pretty(&analysis)?)
    } else {
        Ok(render_text(&analysis)?)
    }
}

/// Human-readable report.
pub fn render_text(analysis: &Analysis) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{}", analysis.board())?;
    writeln!(out)?;
    writeln!(out, "Result: {}", analysis.result())?;
    writeln!(out, "Engine plays: {}", analysis.ai())?;

    if analysis.scores().is_empty() {
        writeln!(out, "No legal moves")?;
    } else {
        writeln!(out, "Move scores:")?;
        for score in analysis.scores() {
            let label = Position::from_index(score.index)
                .map(|p| p.label())
                .unwrap_or("?");
            writeln!(out, "  {} ({}): {:+}", score.index + 1, label, score.score)?;
        }
    }

    match analysis.best_move() {
        Some(index) => writeln!(out, "Best move: {}", index + 1)?,
        None => writeln!(out, "Best move: none")?,
    }
    write!(out, "Nodes searched: {}", analysis.stats().nodes)?;
    Ok(out)
}
