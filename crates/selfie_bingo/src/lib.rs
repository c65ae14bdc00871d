//! Selfie Bingo - celebration sequencing and shareable grid composition
//!
//! A 3x3 board of people to meet and photograph. This crate wires the
//! pure board rules from [`selfie_bingo_board`] to persistence, to a
//! staggered celebration animator, and to a compositor producing one
//! shareable image of the whole grid.
//!
//! # Architecture
//!
//! - **Store**: key/value persistence of tile names and images
//! - **BoardModel**: store-backed board queries, never cached
//! - **Animator**: ordered flip/unflip sequences and overlay reveal
//! - **Compositor**: variable-height row bands assembled into one PNG
//! - **Session**: explicit context tying the above to host collaborators
//!
//! # Example
//!
//! ```no_run
//! use selfie_bingo::{BoardModel, MemoryTileStore, Position};
//! use std::sync::Arc;
//!
//! # fn example() -> anyhow::Result<()> {
//! let board = BoardModel::new(Arc::new(MemoryTileStore::new()));
//! board.set_name(Position::Center, "Ada")?;
//! board.set_image(Position::Center, "data:image/jpeg;base64,...")?;
//! assert!(board.detect(Position::Center)?.is_none());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod animator;
mod board_model;
mod caption;
mod capture;
mod compositor;
mod config;
mod console;
mod dialog;
mod session;
mod share;
mod store;

// Crate-level exports - Board types
pub use selfie_bingo_board::{Board, Completion, Position, PositionError, Tile, rules};

// Crate-level exports - Persistence
pub use board_model::BoardModel;
pub use store::{MemoryTileStore, SqliteTileStore, StoreError, TileStore, image_key, name_key};

// Crate-level exports - Celebration
pub use animator::{
    AnimationError, AnimationTiming, AnimatorState, Celebration, CelebrationAnimator,
    CelebrationReport, CelebrationSurface, Direction, Easing, OverlayArtifact, SlideIn,
    VisualState,
};

// Crate-level exports - Composition
pub use compositor::{
    ComposeError, ComposedImage, CompositorSettings, DataUrlLoader, GridCanvas, GridCompositor,
    GridLayout, ImageLoader,
};

// Crate-level exports - Collaborators
pub use caption::share_caption;
pub use capture::{CaptureError, CaptureTarget, CapturedPhoto, FileCapture, PhotoCapture};
pub use console::{ConsoleDialogs, ConsoleSurface};
pub use dialog::Dialogs;
pub use share::{FileShareTarget, ShareTarget};

// Crate-level exports - Session and configuration
pub use config::{BingoConfig, ConfigError};
pub use session::{BingoEvent, BingoSession, Collaborators, PhotoOutcome, ShareOutcome, TapOutcome};
