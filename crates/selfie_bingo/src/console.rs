//! Terminal implementations of the host collaborators.

use crate::animator::{CelebrationSurface, OverlayArtifact, SlideIn, VisualState};
use crate::dialog::Dialogs;
use selfie_bingo_board::Position;
use std::io::{BufRead, Write};
use tracing::{debug, instrument, warn};

/// Dialogs on stdin/stderr.
///
/// With `assume_yes`, confirmations are accepted without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleDialogs {
    assume_yes: bool,
}

impl ConsoleDialogs {
    /// Creates console dialogs.
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }

    /// Reads one line from stdin on the blocking pool. `None` on EOF.
    async fn read_line(question: String) -> Option<String> {
        let result = tokio::task::spawn_blocking(move || {
            let mut stderr = std::io::stderr();
            // Prompt display failures are not fatal; the read still happens.
            let _ = write!(stderr, "{}", question);
            let _ = stderr.flush();

            let mut line = String::new();
            match std::io::stdin().lock().read_line(&mut line) {
                Ok(0) => None,
                Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
                Err(e) => {
                    warn!(error = %e, "Failed to read stdin");
                    None
                }
            }
        })
        .await;

        result.unwrap_or_else(|e| {
            warn!(error = %e, "Stdin reader panicked");
            None
        })
    }
}

#[async_trait::async_trait]
impl Dialogs for ConsoleDialogs {
    #[instrument(skip(self))]
    async fn alert(&self, message: &str, title: &str) {
        eprintln!("[{}] {}", title, message);
    }

    #[instrument(skip(self))]
    async fn prompt(&self, message: &str, title: &str, default_text: &str) -> Option<String> {
        let question = if default_text.is_empty() {
            format!("[{}] {}", title, message)
        } else {
            format!("[{}] {}({}) ", title, message, default_text)
        };
        let answer = Self::read_line(question).await?;
        if answer.is_empty() && !default_text.is_empty() {
            return Some(default_text.to_string());
        }
        Some(answer)
    }

    #[instrument(skip(self))]
    async fn confirm(
        &self,
        message: &str,
        title: &str,
        ok_label: &str,
        cancel_label: &str,
    ) -> bool {
        if self.assume_yes {
            debug!("Confirmation assumed");
            return true;
        }
        let question = format!(
            "[{}] {}\n  y) {}\n  n) {}\n> ",
            title, message, ok_label, cancel_label
        );
        Self::read_line(question)
            .await
            .is_some_and(|a| matches!(a.trim().to_lowercase().as_str(), "y" | "yes"))
    }
}

/// Celebration surface that narrates to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSurface;

#[async_trait::async_trait]
impl CelebrationSurface for ConsoleSurface {
    async fn apply_visual_state(
        &self,
        position: Position,
        state: VisualState,
    ) -> anyhow::Result<()> {
        eprintln!("  {} tile {}", state, position.number());
        Ok(())
    }

    async fn show_overlay(&self, overlay: OverlayArtifact, slide: SlideIn) -> anyhow::Result<()> {
        let banner = match overlay {
            OverlayArtifact::FullHouse => "*** FULL HOUSE! ***",
            OverlayArtifact::Corner => "*** FOUR CORNERS! ***",
            OverlayArtifact::Line => "*** BINGO LINE! ***",
        };
        debug!(ms = slide.duration.as_millis() as u64, easing = ?slide.easing, "Overlay sliding in");
        eprintln!("{}", banner);
        Ok(())
    }

    async fn hide_overlay(&self) -> anyhow::Result<()> {
        debug!("Overlay hidden");
        Ok(())
    }
}
