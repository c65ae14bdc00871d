//! Staggered celebration sequencing.

use super::celebration::{AnimationTiming, Celebration, CelebrationReport};
use super::error::AnimationError;
use super::surface::{CelebrationSurface, OverlayArtifact, SlideIn, VisualState};
use selfie_bingo_board::Position;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, instrument, warn};

/// Direction of a stagger pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Flipping targets in ascending order.
    Forward,
    /// Unflipping targets in descending order.
    Reverse,
}

/// Observable animator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorState {
    /// Nothing pending and no overlay on screen.
    Idle,
    /// A stagger pass is running.
    Animating(Direction),
    /// The overlay is sliding into view.
    Revealing,
    /// The overlay is on screen awaiting dismissal.
    Showing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum OverlayPhase {
    #[default]
    Hidden,
    Sliding,
    Shown,
}

#[derive(Debug, Default)]
struct Tracker {
    forward: bool,
    reverse: bool,
    overlay: OverlayPhase,
    flipped: BTreeSet<Position>,
}

/// Runs celebrations against a [`CelebrationSurface`].
///
/// Only one celebration runs at a time; overlapping requests queue on a
/// FIFO lock and run in arrival order.
pub struct CelebrationAnimator {
    surface: Arc<dyn CelebrationSurface>,
    timing: AnimationTiming,
    tracker: Mutex<Tracker>,
    run_lock: tokio::sync::Mutex<()>,
}

impl std::fmt::Debug for CelebrationAnimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CelebrationAnimator")
            .field("timing", &self.timing)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl CelebrationAnimator {
    /// Creates an idle animator.
    #[instrument(skip(surface))]
    pub fn new(surface: Arc<dyn CelebrationSurface>, timing: AnimationTiming) -> Self {
        Self {
            surface,
            timing,
            tracker: Mutex::new(Tracker::default()),
            run_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Timing used by this animator.
    pub fn timing(&self) -> &AnimationTiming {
        &self.timing
    }

    /// Current state.
    pub fn state(&self) -> AnimatorState {
        let tracker = self.tracker.lock().unwrap_or_else(PoisonError::into_inner);
        if tracker.forward {
            AnimatorState::Animating(Direction::Forward)
        } else if tracker.overlay == OverlayPhase::Sliding {
            AnimatorState::Revealing
        } else if tracker.reverse {
            AnimatorState::Animating(Direction::Reverse)
        } else if tracker.overlay == OverlayPhase::Shown {
            AnimatorState::Showing
        } else {
            AnimatorState::Idle
        }
    }

    /// Tiles currently in the flipped state, ascending.
    pub fn flipped(&self) -> Vec<Position> {
        let tracker = self.tracker.lock().unwrap_or_else(PoisonError::into_inner);
        tracker.flipped.iter().copied().collect()
    }

    fn update(&self, f: impl FnOnce(&mut Tracker)) {
        let mut tracker = self.tracker.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut tracker);
    }

    /// Runs one celebration.
    ///
    /// Flips the targets one at a time in ascending order, then slides the
    /// overlay in while the reverse pass unflips them in descending order.
    /// `on_revealed` runs once the slide has finished. Resolves when both
    /// the slide and the reverse pass are done; the overlay stays up until
    /// [`dismiss`](Self::dismiss).
    ///
    /// # Errors
    ///
    /// Returns [`AnimationError`] if the surface rejects a step.
    #[instrument(skip(self, celebration, on_revealed), fields(overlay = %celebration.overlay(), targets = celebration.targets().len()))]
    pub async fn celebrate<F>(
        &self,
        celebration: &Celebration,
        on_revealed: F,
    ) -> Result<CelebrationReport, AnimationError>
    where
        F: FnOnce() + Send,
    {
        let _run = self.run_lock.lock().await;
        info!("Starting celebration");

        self.update(|t| t.forward = true);
        let forward = self
            .stagger(celebration.targets().iter().copied(), VisualState::Flip)
            .await;
        self.update(|t| t.forward = false);
        let flipped = forward?;

        let reverse = async {
            if !*celebration.reverse() {
                return Ok(Vec::new());
            }
            self.update(|t| t.reverse = true);
            let result = self
                .stagger(celebration.targets().iter().rev().copied(), VisualState::Unflip)
                .await;
            self.update(|t| t.reverse = false);
            result
        };

        let (revealed, unflipped) =
            tokio::join!(self.reveal(*celebration.overlay(), on_revealed), reverse);
        revealed?;
        let unflipped = unflipped?;

        info!(flipped = flipped.len(), unflipped = unflipped.len(), "Celebration finished");
        Ok(CelebrationReport::new(
            flipped,
            unflipped,
            *celebration.overlay(),
        ))
    }

    /// Applies `state` to each position in turn, waiting the stagger after each.
    async fn stagger(
        &self,
        positions: impl Iterator<Item = Position>,
        state: VisualState,
    ) -> Result<Vec<Position>, AnimationError> {
        let mut applied = Vec::new();
        for position in positions {
            self.surface
                .apply_visual_state(position, state)
                .await
                .map_err(|e| AnimationError::surface("apply visual state", e))?;
            self.update(|t| match state {
                VisualState::Flip => {
                    t.flipped.insert(position);
                }
                VisualState::Unflip => {
                    t.flipped.remove(&position);
                }
            });
            debug!(position = position.number(), %state, "Applied visual state");
            applied.push(position);
            tokio::time::sleep(*self.timing.stagger()).await;
        }
        Ok(applied)
    }

    async fn reveal<F>(&self, overlay: OverlayArtifact, on_revealed: F) -> Result<(), AnimationError>
    where
        F: FnOnce() + Send,
    {
        self.update(|t| t.overlay = OverlayPhase::Sliding);
        let slide = SlideIn {
            duration: *self.timing.reveal(),
            easing: *self.timing.easing(),
        };
        if let Err(e) = self.surface.show_overlay(overlay, slide).await {
            self.update(|t| t.overlay = OverlayPhase::Hidden);
            return Err(AnimationError::surface("show overlay", e));
        }
        tokio::time::sleep(*self.timing.reveal()).await;

        self.update(|t| {
            if t.overlay == OverlayPhase::Sliding {
                t.overlay = OverlayPhase::Shown;
            }
        });
        debug!(%overlay, "Overlay revealed");
        on_revealed();
        Ok(())
    }

    /// Hides the overlay.
    ///
    /// If any tile is still flipped, every tile on the board is unflipped
    /// so the next celebration starts clean. Returns whether that cleanup
    /// ran.
    ///
    /// # Errors
    ///
    /// Returns [`AnimationError`] if the surface rejects a step.
    #[instrument(skip(self))]
    pub async fn dismiss(&self) -> Result<bool, AnimationError> {
        self.surface
            .hide_overlay()
            .await
            .map_err(|e| AnimationError::surface("hide overlay", e))?;

        let any_flipped = {
            let mut tracker = self.tracker.lock().unwrap_or_else(PoisonError::into_inner);
            tracker.overlay = OverlayPhase::Hidden;
            !tracker.flipped.is_empty()
        };
        if !any_flipped {
            debug!("Overlay dismissed");
            return Ok(false);
        }

        warn!(flipped = ?self.flipped(), "Tiles still flipped at dismissal, unflipping all");
        for position in Position::ALL {
            self.surface
                .apply_visual_state(position, VisualState::Unflip)
                .await
                .map_err(|e| AnimationError::surface("apply visual state", e))?;
        }
        self.update(|t| t.flipped.clear());
        Ok(true)
    }
}
