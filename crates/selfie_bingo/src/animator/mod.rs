//! Celebration animator.
//!
//! Sequences per-tile flips with a fixed stagger, reveals an overlay, and
//! unflips the tiles again in reverse order. Presentation is delegated to
//! a [`CelebrationSurface`].

mod celebration;
mod engine;
mod error;
mod surface;

pub use celebration::{AnimationTiming, Celebration, CelebrationReport};
pub use engine::{AnimatorState, CelebrationAnimator, Direction};
pub use error::AnimationError;
pub use surface::{CelebrationSurface, Easing, OverlayArtifact, SlideIn, VisualState};
