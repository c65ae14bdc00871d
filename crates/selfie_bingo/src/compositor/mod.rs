//! Grid image compositor.
//!
//! Turns the nine tiles into one shareable raster: images are loaded
//! concurrently, composition waits for every load, then tiles are drawn
//! in board order into three independently sized row bands.

mod canvas;
mod error;
mod layout;
mod load;

pub use canvas::GridCanvas;
pub use error::ComposeError;
pub use layout::GridLayout;
pub use load::{DataUrlLoader, ImageLoader};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use derive_getters::Getters;
use derive_new::new;
use futures::future::try_join_all;
use image::{DynamicImage, ImageFormat, RgbaImage};
use selfie_bingo_board::{Board, Tile};
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Sizing and load policy for composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, new)]
pub struct CompositorSettings {
    /// Common width every tile image is scaled to.
    tile_width: u32,
    /// Height of a row band with no images.
    placeholder_height: u32,
    /// Largest integer scale for placeholder labels.
    label_scale: u32,
    /// Per-image load timeout; `None` waits indefinitely.
    load_timeout: Option<Duration>,
}

impl Default for CompositorSettings {
    fn default() -> Self {
        Self {
            tile_width: 200,
            placeholder_height: 200,
            label_scale: 3,
            load_timeout: Some(Duration::from_secs(30)),
        }
    }
}

/// Encoded result of a composition.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ComposedImage {
    /// Raster width in pixels.
    width: u32,
    /// Raster height in pixels.
    height: u32,
    /// PNG-encoded raster.
    png: Vec<u8>,
}

impl ComposedImage {
    /// The image as a `data:image/png;base64,` URL.
    pub fn to_data_url(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png))
    }
}

/// A tile with its image decoded.
#[derive(Debug, Clone, new)]
struct LoadedTile {
    name: Option<String>,
    image: Option<DynamicImage>,
}

/// Assembles tile images into one composed raster.
pub struct GridCompositor {
    loader: Arc<dyn ImageLoader>,
    settings: CompositorSettings,
}

impl std::fmt::Debug for GridCompositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridCompositor")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl GridCompositor {
    /// Creates a compositor with a custom image loader.
    #[instrument(skip(loader))]
    pub fn new(loader: Arc<dyn ImageLoader>, settings: CompositorSettings) -> Self {
        Self { loader, settings }
    }

    /// Creates a compositor decoding `data:` URL handles.
    pub fn with_data_urls(settings: CompositorSettings) -> Self {
        Self::new(Arc::new(DataUrlLoader), settings)
    }

    /// Settings in use.
    pub fn settings(&self) -> &CompositorSettings {
        &self.settings
    }

    /// Loads, lays out, draws and encodes the board.
    ///
    /// # Errors
    ///
    /// Any image load failure or timeout aborts the whole composition.
    #[instrument(skip(self, board), fields(filled = board.filled_count()))]
    pub async fn compose(&self, board: &Board) -> Result<ComposedImage, ComposeError> {
        let loaded = self.load_all(board.tiles()).await?;
        let raster = self.render(&loaded)?;
        let png = encode_png(&raster)?;
        info!(
            width = raster.width(),
            height = raster.height(),
            bytes = png.len(),
            "Composed grid image"
        );
        Ok(ComposedImage {
            width: raster.width(),
            height: raster.height(),
            png,
        })
    }

    /// Loads every tile concurrently; the first failure wins.
    async fn load_all(&self, tiles: &[Tile; 9]) -> Result<Vec<LoadedTile>, ComposeError> {
        let loads = tiles.iter().map(|tile| self.load_tile(tile));
        let loaded = try_join_all(loads).await?;
        debug!(count = loaded.len(), "All tile loads settled");
        Ok(loaded)
    }

    async fn load_tile(&self, tile: &Tile) -> Result<LoadedTile, ComposeError> {
        let Some(handle) = tile.image() else {
            return Ok(LoadedTile::new(tile.name().clone(), None));
        };
        let number = tile.position().number();
        let load = self.loader.load(handle);

        let result = match self.settings.load_timeout {
            Some(limit) => tokio::time::timeout(limit, load).await.map_err(|_| {
                warn!(tile = number, "Image load timed out");
                ComposeError::Timeout {
                    tile: number,
                    after_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                }
            })?,
            None => load.await,
        };

        let image = result.map_err(|e| {
            warn!(tile = number, error = %e, "Image load failed");
            ComposeError::Load {
                tile: number,
                message: format!("{:#}", e),
            }
        })?;
        Ok(LoadedTile::new(tile.name().clone(), Some(image)))
    }

    /// Draws loaded tiles in board order and returns the finished raster.
    fn render(&self, tiles: &[LoadedTile]) -> Result<RgbaImage, ComposeError> {
        let mut sizes = [None; 9];
        for (slot, tile) in sizes.iter_mut().zip(tiles) {
            *slot = tile.image.as_ref().map(|img| (img.width(), img.height()));
        }
        let layout = GridLayout::compute(
            &sizes,
            self.settings.tile_width,
            self.settings.placeholder_height,
        );
        debug!(row_heights = ?layout.row_heights(), "Computed layout");

        let mut canvas = GridCanvas::new(layout, self.settings.label_scale);
        for (pos, tile) in selfie_bingo_board::Position::ALL.into_iter().zip(tiles) {
            match &tile.image {
                Some(image) => canvas.draw_image(pos, image),
                None => {
                    let label = tile
                        .name
                        .as_deref()
                        .map(str::trim)
                        .filter(|n| !n.is_empty())
                        .unwrap_or("?");
                    canvas.draw_placeholder(pos, label);
                }
            }
        }
        canvas.finish()
    }
}

fn encode_png(raster: &RgbaImage) -> Result<Vec<u8>, ComposeError> {
    let mut png = Vec::new();
    raster
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| ComposeError::Encode(e.to_string()))?;
    Ok(png)
}
