//! Store-backed view of the board.

use crate::store::{StoreError, TileStore, image_key, name_key};
use selfie_bingo_board::{Board, Completion, Position, Tile, rules};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Board view that re-reads the tile store on every query.
///
/// Nothing is cached, so answers always reflect the latest persisted
/// values.
#[derive(Debug, Clone)]
pub struct BoardModel {
    store: Arc<dyn TileStore>,
}

impl BoardModel {
    /// Creates a model over `store`.
    #[instrument(skip(store))]
    pub fn new(store: Arc<dyn TileStore>) -> Self {
        Self { store }
    }

    /// Reads one tile.
    #[instrument(skip(self))]
    pub fn tile(&self, pos: Position) -> Result<Tile, StoreError> {
        let name = self.store.get(&name_key(pos))?;
        let image = self.store.get(&image_key(pos))?;
        Ok(Tile::new(pos, name, image))
    }

    /// Snapshot of all nine tiles in position order.
    #[instrument(skip(self))]
    pub fn get_all(&self) -> Result<Board, StoreError> {
        let tiles = Position::ALL
            .into_iter()
            .map(|pos| self.tile(pos))
            .collect::<Result<Vec<_>, _>>()?;
        let board = Board::from_tiles(tiles);
        debug!(filled = board.filled_count(), "Board read");
        Ok(board)
    }

    /// Tiles that have an image, in position order.
    #[instrument(skip(self))]
    pub fn get_completed(&self) -> Result<Vec<Tile>, StoreError> {
        let board = self.get_all()?;
        Ok(board.completed().into_iter().cloned().collect())
    }

    /// True if the row containing `pos` is fully photographed.
    #[instrument(skip(self))]
    pub fn is_row_complete(&self, pos: Position) -> Result<bool, StoreError> {
        Ok(rules::is_row_complete(&self.get_all()?, pos))
    }

    /// True if the column containing `pos` is fully photographed.
    #[instrument(skip(self))]
    pub fn is_column_complete(&self, pos: Position) -> Result<bool, StoreError> {
        Ok(rules::is_column_complete(&self.get_all()?, pos))
    }

    /// True if `pos` is a corner and all four corners are photographed.
    #[instrument(skip(self))]
    pub fn is_corner_complete(&self, pos: Position) -> Result<bool, StoreError> {
        Ok(rules::is_corner_complete(&self.get_all()?, pos))
    }

    /// True if every tile is photographed.
    #[instrument(skip(self))]
    pub fn is_full_house(&self) -> Result<bool, StoreError> {
        Ok(rules::is_full_house(&self.get_all()?))
    }

    /// Freshly detects the condition completed by an image update at `pos`.
    #[instrument(skip(self))]
    pub fn detect(&self, pos: Position) -> Result<Option<Completion>, StoreError> {
        Ok(rules::detect(&self.get_all()?, pos))
    }

    /// Persists a tile name.
    #[instrument(skip(self))]
    pub fn set_name(&self, pos: Position, name: &str) -> Result<(), StoreError> {
        self.store.set(&name_key(pos), name)?;
        info!(tile = pos.number(), "Tile named");
        Ok(())
    }

    /// Persists a tile image handle.
    #[instrument(skip(self, image), fields(len = image.len()))]
    pub fn set_image(&self, pos: Position, image: &str) -> Result<(), StoreError> {
        self.store.set(&image_key(pos), image)?;
        info!(tile = pos.number(), "Tile image stored");
        Ok(())
    }

    /// Clears every tile by overwriting all names and images.
    #[instrument(skip(self))]
    pub fn reset(&self) -> Result<(), StoreError> {
        for pos in Position::ALL {
            self.store.set(&name_key(pos), "")?;
            self.store.set(&image_key(pos), "")?;
        }
        info!("Board reset");
        Ok(())
    }
}
