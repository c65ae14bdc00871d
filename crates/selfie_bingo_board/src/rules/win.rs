//! Completion detection with fixed priority.

use super::lines::{
    is_column_complete, is_corner_complete, is_full_house, is_row_complete, COLUMNS, CORNERS,
    ROWS,
};
use crate::{Board, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A win condition satisfied by a tile update.
///
/// Variants are declared in announcement priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Completion {
    /// All nine tiles have images.
    FullHouse,
    /// All four corners have images and a corner was just updated.
    Corner,
    /// A row is complete (zero-based row index).
    Row(usize),
    /// A column is complete (zero-based column index).
    Column(usize),
}

impl Completion {
    /// Positions belonging to this condition, in ascending order.
    pub fn positions(&self) -> Vec<Position> {
        match self {
            Completion::FullHouse => Position::ALL.to_vec(),
            Completion::Corner => CORNERS.to_vec(),
            Completion::Row(row) => ROWS[*row].to_vec(),
            Completion::Column(col) => COLUMNS[*col].to_vec(),
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> String {
        match self {
            Completion::FullHouse => "Full house".to_string(),
            Completion::Corner => "Four corners".to_string(),
            Completion::Row(row) => format!("Row {}", row + 1),
            Completion::Column(col) => format!("Column {}", col + 1),
        }
    }
}

impl std::fmt::Display for Completion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Every condition satisfied by an update at `updated`, in priority order.
///
/// A full house is reported regardless of the updated position. Corner
/// only counts when `updated` is itself a corner.
#[instrument(skip(board))]
pub fn satisfied(board: &Board, updated: Position) -> Vec<Completion> {
    let mut found = Vec::new();
    if is_full_house(board) {
        found.push(Completion::FullHouse);
    }
    if is_corner_complete(board, updated) {
        found.push(Completion::Corner);
    }
    if is_row_complete(board, updated) {
        found.push(Completion::Row(updated.row()));
    }
    if is_column_complete(board, updated) {
        found.push(Completion::Column(updated.column()));
    }
    found
}

/// The single condition to announce for an update at `updated`.
///
/// Priority is FullHouse, Corner, Row, Column. When a row and a column
/// complete in the same update only the row is announced.
#[instrument(skip(board))]
pub fn detect(board: &Board, updated: Position) -> Option<Completion> {
    let completion = satisfied(board, updated).into_iter().next();
    debug!(?completion, filled = board.filled_count(), "Detected completion");
    completion
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(filled: &[u8]) -> Board {
        let mut board = Board::new();
        for &n in filled {
            let pos = Position::from_number(n).expect("valid number");
            board.set_image(pos, Some(format!("img{n}")));
        }
        board
    }

    #[test]
    fn test_empty_update_detects_nothing() {
        let board = board_with(&[5]);
        assert_eq!(detect(&board, Position::Center), None);
    }

    #[test]
    fn test_row_beats_column() {
        // Tile 1 completes both row 1 and column 1.
        let board = board_with(&[1, 2, 3, 4, 7]);
        assert_eq!(
            satisfied(&board, Position::TopLeft),
            vec![Completion::Row(0), Completion::Column(0)]
        );
        assert_eq!(detect(&board, Position::TopLeft), Some(Completion::Row(0)));
    }

    #[test]
    fn test_column_when_row_incomplete() {
        let board = board_with(&[2, 5, 8]);
        assert_eq!(
            detect(&board, Position::Center),
            Some(Completion::Column(1))
        );
    }

    #[test]
    fn test_corner_beats_row() {
        let board = board_with(&[1, 2, 3, 7, 9]);
        assert_eq!(detect(&board, Position::TopRight), Some(Completion::Corner));
        // Tile 2 is not a corner, so the row wins there.
        assert_eq!(detect(&board, Position::TopCenter), Some(Completion::Row(0)));
    }

    #[test]
    fn test_positions_of_each_condition() {
        let numbers = |c: Completion| -> Vec<u8> {
            c.positions().iter().map(|p| p.number()).collect()
        };
        assert_eq!(numbers(Completion::Corner), vec![1, 3, 7, 9]);
        assert_eq!(numbers(Completion::Row(2)), vec![7, 8, 9]);
        assert_eq!(numbers(Completion::Column(1)), vec![2, 5, 8]);
        assert_eq!(numbers(Completion::FullHouse).len(), 9);
    }
}
