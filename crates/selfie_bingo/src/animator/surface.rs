//! Presentation capability used by the celebration animator.

use selfie_bingo_board::{Completion, Position};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Visual state of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum VisualState {
    /// Tile turned to its celebration face.
    Flip,
    /// Tile back to its normal face.
    Unflip,
}

/// Overlay artwork revealed after the forward flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum OverlayArtifact {
    /// Full-house banner.
    FullHouse,
    /// Four-corners banner.
    Corner,
    /// Row or column banner.
    Line,
}

impl OverlayArtifact {
    /// Artwork shown for a completion.
    pub fn for_completion(completion: &Completion) -> Self {
        match completion {
            Completion::FullHouse => OverlayArtifact::FullHouse,
            Completion::Corner => OverlayArtifact::Corner,
            Completion::Row(_) | Completion::Column(_) => OverlayArtifact::Line,
        }
    }
}

/// Easing curve for the overlay slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Decelerates into place.
    #[default]
    EaseOut,
    /// Accelerates, then decelerates.
    EaseInOut,
}

impl Easing {
    /// Maps linear progress `t` in `[0, 1]` to eased progress.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// How the overlay slides into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideIn {
    /// Slide duration.
    pub duration: Duration,
    /// Easing curve.
    pub easing: Easing,
}

/// UI layer implementing celebration side effects.
///
/// The animator only talks to this interface; it never touches
/// presentation state directly. Calls return once the effect has been
/// started. Timing is owned by the animator.
#[async_trait::async_trait]
pub trait CelebrationSurface: Send + Sync {
    /// Applies a visual state to one tile.
    async fn apply_visual_state(&self, position: Position, state: VisualState)
    -> anyhow::Result<()>;

    /// Starts sliding an overlay into view.
    async fn show_overlay(&self, overlay: OverlayArtifact, slide: SlideIn) -> anyhow::Result<()>;

    /// Removes the overlay.
    async fn hide_overlay(&self) -> anyhow::Result<()>;
}
