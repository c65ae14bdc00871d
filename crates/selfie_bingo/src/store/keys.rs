//! Persistence key synthesis.

use selfie_bingo_board::Position;

/// Key holding the name of the tile at `pos` (`box<N>name`).
pub fn name_key(pos: Position) -> String {
    format!("box{}name", pos.number())
}

/// Key holding the image of the tile at `pos` (`box<N>image`).
pub fn image_key(pos: Position) -> String {
    format!("box{}image", pos.number())
}
