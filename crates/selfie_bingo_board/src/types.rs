//! Core domain types for the bingo board.

use crate::position::Position;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One of the nine board cells.
///
/// A tile holds the name of the person to photograph and, once taken,
/// an opaque encoded image handle (normally a `data:` URL).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Tile {
    /// Fixed board position.
    position: Position,
    /// Name of the person to meet.
    name: Option<String>,
    /// Encoded image handle.
    image: Option<String>,
}

impl Tile {
    /// Creates an empty tile.
    pub fn empty(position: Position) -> Self {
        Self {
            position,
            name: None,
            image: None,
        }
    }

    /// Creates a tile from persisted values. Empty strings count as unset.
    pub fn new(position: Position, name: Option<String>, image: Option<String>) -> Self {
        Self {
            position,
            name: name.filter(|n| !n.is_empty()),
            image: image.filter(|i| !i.is_empty()),
        }
    }

    /// True if the name is set and non-blank after trimming.
    pub fn is_named(&self) -> bool {
        self.name.as_deref().is_some_and(|n| !n.trim().is_empty())
    }

    /// True if an image has been taken.
    pub fn is_filled(&self) -> bool {
        self.image.is_some()
    }

    /// Trimmed name, if the tile is named.
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }
}

/// 3x3 bingo board snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Tiles in row-major order (positions 1-9).
    tiles: [Tile; 9],
}

impl Board {
    /// Creates a board with nine empty tiles.
    pub fn new() -> Self {
        Self {
            tiles: Position::ALL.map(Tile::empty),
        }
    }

    /// Builds a board from tiles, placing each at its own position.
    ///
    /// Positions missing from `tiles` stay empty; a later tile for the
    /// same position replaces an earlier one.
    pub fn from_tiles(tiles: impl IntoIterator<Item = Tile>) -> Self {
        let mut board = Self::new();
        for tile in tiles {
            let index = tile.position.index();
            board.tiles[index] = tile;
        }
        board
    }

    /// Returns the tile at the given position.
    pub fn tile(&self, pos: Position) -> &Tile {
        &self.tiles[pos.index()]
    }

    /// Returns all tiles in board order.
    pub fn tiles(&self) -> &[Tile; 9] {
        &self.tiles
    }

    /// Tiles that have an image, in board order.
    pub fn completed(&self) -> Vec<&Tile> {
        self.tiles.iter().filter(|t| t.is_filled()).collect()
    }

    /// Overwrites the name at a position.
    pub fn set_name(&mut self, pos: Position, name: Option<String>) {
        self.tiles[pos.index()].name = name.filter(|n| !n.is_empty());
    }

    /// Overwrites the image at a position.
    pub fn set_image(&mut self, pos: Position, image: Option<String>) {
        self.tiles[pos.index()].image = image.filter(|i| !i.is_empty());
    }

    /// True if the tile at `pos` has an image.
    pub fn is_filled(&self, pos: Position) -> bool {
        self.tile(pos).is_filled()
    }

    /// Number of tiles with an image.
    pub fn filled_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_filled()).count()
    }

    /// True when every tile has an image.
    pub fn is_full(&self) -> bool {
        self.tiles.iter().all(Tile::is_filled)
    }

    /// Names of named tiles in board order.
    pub fn names(&self) -> Vec<&str> {
        self.tiles.iter().filter_map(Tile::display_name).collect()
    }

    /// Formats the board as a human-readable grid.
    ///
    /// Filled tiles are marked with `*`; unnamed tiles show their number.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            let cells: Vec<String> = (0..3)
                .map(|col| {
                    let tile = &self.tiles[row * 3 + col];
                    let label = tile
                        .display_name()
                        .map(str::to_string)
                        .unwrap_or_else(|| tile.position.number().to_string());
                    let mark = if tile.is_filled() { '*' } else { ' ' };
                    format!("{mark}{label:<12}")
                })
                .collect();
            result.push_str(&cells.join("|"));
            if row < 2 {
                result.push_str("\n-------------+-------------+-------------\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
