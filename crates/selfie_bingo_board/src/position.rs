//! Board positions, numbered 1-9 in row-major order.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// A cell on the 3x3 bingo board.
///
/// Positions are numbered 1-9 row-major, matching the persistence keys
/// (`box1name` .. `box9image`). The numbering is fixed for the lifetime
/// of a board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
)]
pub enum Position {
    /// Top-left (position 1)
    TopLeft,
    /// Top-center (position 2)
    TopCenter,
    /// Top-right (position 3)
    TopRight,
    /// Middle-left (position 4)
    MiddleLeft,
    /// Center (position 5)
    Center,
    /// Middle-right (position 6)
    MiddleRight,
    /// Bottom-left (position 7)
    BottomLeft,
    /// Bottom-center (position 8)
    BottomCenter,
    /// Bottom-right (position 9)
    BottomRight,
}

/// Error returned when text cannot be read as a [`Position`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum PositionError {
    /// Number outside 1-9.
    #[display("Position {} is out of range (expected 1-9)", _0)]
    OutOfRange(u32),

    /// Neither a number nor a known label.
    #[display("Unknown position: {}", _0)]
    Unknown(String),
}

impl std::error::Error for PositionError {}

impl Position {
    /// All 9 positions in board order.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Label used in logs and prompts.
    pub fn label(&self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Zero-based board index (0-8).
    pub fn index(self) -> usize {
        match self {
            Position::TopLeft => 0,
            Position::TopCenter => 1,
            Position::TopRight => 2,
            Position::MiddleLeft => 3,
            Position::Center => 4,
            Position::MiddleRight => 5,
            Position::BottomLeft => 6,
            Position::BottomCenter => 7,
            Position::BottomRight => 8,
        }
    }

    /// One-based tile number (1-9).
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Creates a position from a board index (0-8).
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Creates a position from a tile number (1-9).
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1..=9 => Self::from_index(usize::from(number) - 1),
            _ => None,
        }
    }

    /// Zero-based row (0 = top).
    pub fn row(self) -> usize {
        self.index() / 3
    }

    /// Zero-based column (0 = left).
    pub fn column(self) -> usize {
        self.index() % 3
    }

    /// True for the four corner tiles 1, 3, 7 and 9.
    pub fn is_corner(self) -> bool {
        matches!(
            self,
            Position::TopLeft | Position::TopRight | Position::BottomLeft | Position::BottomRight
        )
    }

    /// Parses a tile number (1-9) or a label (case-insensitive).
    #[instrument]
    pub fn from_label_or_number(s: &str) -> Result<Position, PositionError> {
        let trimmed = s.trim();
        if let Ok(num) = trimmed.parse::<u32>() {
            return u8::try_from(num)
                .ok()
                .and_then(Self::from_number)
                .ok_or(PositionError::OutOfRange(num));
        }

        let wanted = trimmed.to_lowercase();
        <Position as strum::IntoEnumIterator>::iter()
            .find(|pos| pos.label().to_lowercase() == wanted)
            .ok_or_else(|| PositionError::Unknown(s.to_string()))
    }
}

impl FromStr for Position {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label_or_number(s)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.number(), self.label())
    }
}
