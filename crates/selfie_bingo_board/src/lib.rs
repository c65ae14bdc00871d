//! Selfie bingo board - pure game state and win rules
//!
//! A 3x3 board of tiles, each holding a person's name and, once
//! photographed, an image. After every image write the [`rules`] module
//! decides which win condition (if any) the update completed.
//!
//! # Example
//!
//! ```
//! use selfie_bingo_board::{rules, Board, Completion, Position};
//!
//! let mut board = Board::new();
//! for pos in rules::ROWS[0] {
//!     board.set_image(pos, Some("data:image/png;base64,AA==".to_string()));
//! }
//! assert_eq!(rules::detect(&board, Position::TopRight), Some(Completion::Row(0)));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod position;
pub mod rules;
mod types;

pub use position::{Position, PositionError};
pub use rules::Completion;
pub use types::{Board, Tile};
