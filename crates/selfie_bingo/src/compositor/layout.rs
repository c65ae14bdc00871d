//! Row-band layout of the composed grid.

use selfie_bingo_board::Position;
use tracing::instrument;

/// Geometry of the composed raster.
///
/// Every tile is scaled to a common width. Each row band is as tall as its
/// tallest scaled image, or the placeholder height when the row has no
/// images, so bands can differ in height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    tile_width: u32,
    row_heights: [u32; 3],
}

impl GridLayout {
    /// Computes the layout from the natural size of each tile's image.
    ///
    /// `sizes` is in board order; `None` marks a tile without an image.
    #[instrument]
    pub fn compute(sizes: &[Option<(u32, u32)>; 9], tile_width: u32, placeholder_height: u32) -> Self {
        let mut row_heights = [placeholder_height; 3];
        for (row, band) in sizes.chunks(3).enumerate() {
            if let Some(tallest) = band
                .iter()
                .flatten()
                .map(|&(w, h)| Self::scaled_height(w, h, tile_width))
                .max()
            {
                row_heights[row] = tallest;
            }
        }
        Self {
            tile_width,
            row_heights,
        }
    }

    /// Height of a `width` x `height` image scaled to `tile_width`, keeping
    /// its aspect ratio. Never less than one pixel.
    pub fn scaled_height(width: u32, height: u32, tile_width: u32) -> u32 {
        let scaled = f64::from(height) * f64::from(tile_width) / f64::from(width.max(1));
        (scaled.round() as u32).max(1)
    }

    /// Common tile width.
    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    /// Heights of the three row bands, top to bottom.
    pub fn row_heights(&self) -> &[u32; 3] {
        &self.row_heights
    }

    /// Raster width: three tiles.
    pub fn width(&self) -> u32 {
        self.tile_width * 3
    }

    /// Raster height: the sum of the row bands.
    pub fn height(&self) -> u32 {
        self.row_heights.iter().sum()
    }

    /// Top-left corner of the cell at `pos`.
    pub fn cell_origin(&self, pos: Position) -> (u32, u32) {
        let x = pos.column() as u32 * self.tile_width;
        let y = self.row_heights[..pos.row()].iter().sum();
        (x, y)
    }

    /// Size of the cell at `pos`: tile width by its row band height.
    pub fn cell_size(&self, pos: Position) -> (u32, u32) {
        (self.tile_width, self.row_heights[pos.row()])
    }
}
