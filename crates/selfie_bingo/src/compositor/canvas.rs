//! Sequential drawing into the composed raster.

use super::error::ComposeError;
use super::layout::GridLayout;
use font8x8::{BASIC_FONTS, LATIN_FONTS, UnicodeFonts};
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use selfie_bingo_board::Position;
use tracing::{debug, instrument};

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const GLYPH_SIZE: u32 = 8;

/// Output raster being filled tile by tile.
///
/// [`finish`](Self::finish) consumes the canvas, so the finished raster
/// is handed out at most once.
pub struct GridCanvas {
    layout: GridLayout,
    raster: RgbaImage,
    label_scale: u32,
    drawn: usize,
}

impl GridCanvas {
    /// Allocates a white raster sized by `layout`.
    #[instrument]
    pub fn new(layout: GridLayout, label_scale: u32) -> Self {
        let raster = RgbaImage::from_pixel(layout.width(), layout.height(), BACKGROUND);
        Self {
            layout,
            raster,
            label_scale: label_scale.max(1),
            drawn: 0,
        }
    }

    /// Number of tiles drawn so far.
    pub fn drawn(&self) -> usize {
        self.drawn
    }

    /// Draws an image scaled to the tile width at the top of its cell.
    #[instrument(skip(self, image), fields(width = image.width(), height = image.height()))]
    pub fn draw_image(&mut self, pos: Position, image: &DynamicImage) {
        let (x, y) = self.layout.cell_origin(pos);
        let width = self.layout.tile_width();
        let height = GridLayout::scaled_height(image.width(), image.height(), width);
        let scaled = imageops::resize(&image.to_rgba8(), width, height, FilterType::Triangle);
        imageops::overlay(&mut self.raster, &scaled, i64::from(x), i64::from(y));
        self.drawn += 1;
        debug!(tile = pos.number(), height, "Drew image");
    }

    /// Paints the cell background and centres `label` in it.
    #[instrument(skip(self))]
    pub fn draw_placeholder(&mut self, pos: Position, label: &str) {
        let (x, y) = self.layout.cell_origin(pos);
        let (w, h) = self.layout.cell_size(pos);
        self.fill(x, y, w, h, BACKGROUND);
        self.draw_label(x, y, w, h, label);
        self.drawn += 1;
        debug!(tile = pos.number(), "Drew placeholder");
    }

    /// Returns the raster once all nine tiles have been drawn.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::Incomplete`] if fewer than nine were drawn.
    pub fn finish(self) -> Result<RgbaImage, ComposeError> {
        if self.drawn != 9 {
            return Err(ComposeError::Incomplete(self.drawn));
        }
        Ok(self.raster)
    }

    fn fill(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) {
        let x_end = (x + w).min(self.raster.width());
        let y_end = (y + h).min(self.raster.height());
        for py in y..y_end {
            for px in x..x_end {
                self.raster.put_pixel(px, py, color);
            }
        }
    }

    /// Renders `text` with the 8x8 bitmap font, scaled up to fit the cell.
    fn draw_label(&mut self, x: u32, y: u32, w: u32, h: u32, text: &str) {
        let max_chars = (w / GLYPH_SIZE) as usize;
        let glyphs: Vec<[u8; 8]> = text.chars().take(max_chars).map(glyph).collect();
        if glyphs.is_empty() {
            return;
        }

        let count = glyphs.len() as u32;
        let fit_width = w / (count * GLYPH_SIZE);
        let fit_height = h / GLYPH_SIZE;
        let scale = fit_width.min(fit_height).min(self.label_scale).max(1);

        let text_w = count * GLYPH_SIZE * scale;
        let text_h = GLYPH_SIZE * scale;
        let left = x + w.saturating_sub(text_w) / 2;
        let top = y + h.saturating_sub(text_h) / 2;

        for (i, bitmap) in glyphs.iter().enumerate() {
            let glyph_left = left + i as u32 * GLYPH_SIZE * scale;
            for (row, bits) in bitmap.iter().enumerate() {
                for col in 0..GLYPH_SIZE {
                    if bits & (1 << col) != 0 {
                        self.fill(
                            glyph_left + col * scale,
                            top + row as u32 * scale,
                            scale,
                            scale,
                            INK,
                        );
                    }
                }
            }
        }
    }
}

fn glyph(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> GridLayout {
        GridLayout::compute(&[None; 9], 64, 32)
    }

    #[test]
    fn test_finish_requires_all_tiles() {
        let mut canvas = GridCanvas::new(layout(), 2);
        canvas.draw_placeholder(Position::TopLeft, "?");
        assert_eq!(canvas.finish().err(), Some(ComposeError::Incomplete(1)));
    }

    #[test]
    fn test_placeholder_label_has_ink_inside_cell() {
        let mut canvas = GridCanvas::new(layout(), 2);
        for pos in Position::ALL {
            canvas.draw_placeholder(pos, if pos == Position::Center { "Ada" } else { "" });
        }
        let raster = canvas.finish().expect("complete");

        let ink_in = |x0: u32, y0: u32| {
            (y0..y0 + 32).any(|y| (x0..x0 + 64).any(|x| raster.get_pixel(x, y) == &INK))
        };
        assert!(ink_in(64, 32), "center cell should carry the label");
        assert!(!ink_in(0, 0), "empty label draws nothing");
    }

    #[test]
    fn test_image_drawn_at_cell_origin() {
        let mut sizes = [None; 9];
        sizes[4] = Some((2, 2));
        let layout = GridLayout::compute(&sizes, 10, 5);
        let mut canvas = GridCanvas::new(layout, 1);
        let red = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255])));
        canvas.draw_image(Position::Center, &red);
        assert_eq!(canvas.drawn(), 1);
        assert_eq!(canvas.raster.get_pixel(15, 7), &Rgba([255, 0, 0, 255]));
        assert_eq!(canvas.raster.get_pixel(5, 2), &BACKGROUND);
    }
}
