//! Static win sets and completeness predicates.

use crate::{Board, Position};
use tracing::instrument;

/// Rows, top to bottom.
pub const ROWS: [[Position; 3]; 3] = [
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
];

/// Columns, left to right.
pub const COLUMNS: [[Position; 3]; 3] = [
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
];

/// The four corner tiles.
pub const CORNERS: [Position; 4] = [
    Position::TopLeft,
    Position::TopRight,
    Position::BottomLeft,
    Position::BottomRight,
];

fn all_filled(board: &Board, set: &[Position]) -> bool {
    set.iter().all(|&pos| board.is_filled(pos))
}

/// True if the row containing `pos` has an image on every tile.
#[instrument(skip(board))]
pub fn is_row_complete(board: &Board, pos: Position) -> bool {
    all_filled(board, &ROWS[pos.row()])
}

/// True if the column containing `pos` has an image on every tile.
#[instrument(skip(board))]
pub fn is_column_complete(board: &Board, pos: Position) -> bool {
    all_filled(board, &COLUMNS[pos.column()])
}

/// True if `pos` is a corner and all four corners have images.
///
/// Non-corner positions belong to no corner set and always report `false`.
#[instrument(skip(board))]
pub fn is_corner_complete(board: &Board, pos: Position) -> bool {
    pos.is_corner() && all_filled(board, &CORNERS)
}

/// True if all nine tiles have images.
#[instrument(skip(board))]
pub fn is_full_house(board: &Board) -> bool {
    board.is_full()
}
