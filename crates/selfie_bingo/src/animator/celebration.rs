//! Celebration plans and timing.

use super::surface::{Easing, OverlayArtifact};
use derive_getters::Getters;
use derive_new::new;
use selfie_bingo_board::{Completion, Position};
use std::time::Duration;

/// Fixed durations for one celebration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, new)]
pub struct AnimationTiming {
    /// Delay after each tile's visual state change.
    stagger: Duration,
    /// Overlay slide duration.
    reveal: Duration,
    /// Overlay slide easing.
    easing: Easing,
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            stagger: Duration::from_millis(350),
            reveal: Duration::from_millis(2000),
            easing: Easing::EaseOut,
        }
    }
}

/// What to animate for one completion.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Celebration {
    /// Target tiles in ascending position order, without duplicates.
    targets: Vec<Position>,
    /// Overlay revealed after the forward pass.
    overlay: OverlayArtifact,
    /// Whether the tiles are unflipped again afterwards.
    reverse: bool,
}

impl Celebration {
    /// Creates a celebration over `targets`.
    pub fn new(
        targets: impl IntoIterator<Item = Position>,
        overlay: OverlayArtifact,
        reverse: bool,
    ) -> Self {
        let mut targets: Vec<Position> = targets.into_iter().collect();
        targets.sort();
        targets.dedup();
        Self {
            targets,
            overlay,
            reverse,
        }
    }

    /// Celebration announcing a completion.
    ///
    /// A full house targets all nine tiles and leaves them flipped.
    pub fn for_completion(completion: &Completion) -> Self {
        Self::new(
            completion.positions(),
            OverlayArtifact::for_completion(completion),
            !matches!(completion, Completion::FullHouse),
        )
    }
}

/// Outcome of a finished celebration run.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct CelebrationReport {
    /// Tiles flipped, in application order.
    flipped: Vec<Position>,
    /// Tiles unflipped by the reverse pass, in application order.
    unflipped: Vec<Position>,
    /// Overlay that was revealed.
    overlay: OverlayArtifact,
}
