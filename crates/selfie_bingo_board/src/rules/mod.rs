//! Win-condition rules for the bingo board.
//!
//! Pure functions over a [`Board`](crate::Board) snapshot. Only images
//! count towards completion; names are irrelevant here.

mod lines;
mod win;

pub use lines::{
    is_column_complete, is_corner_complete, is_full_house, is_row_complete, COLUMNS, CORNERS,
    ROWS,
};
pub use win::{detect, satisfied, Completion};
