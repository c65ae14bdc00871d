//! Composition error types.

/// Error that aborts a grid composition.
///
/// No partial image is produced when any of these occur.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ComposeError {
    /// A tile image could not be loaded or decoded.
    #[display("Failed to load image for tile {}: {}", tile, message)]
    Load {
        /// Tile number (1-9).
        tile: u8,
        /// Underlying failure detail.
        message: String,
    },

    /// A tile image did not load in time.
    #[display("Timed out after {}ms loading image for tile {}", after_ms, tile)]
    Timeout {
        /// Tile number (1-9).
        tile: u8,
        /// Timeout that elapsed.
        after_ms: u64,
    },

    /// The canvas was finalised before every tile was drawn.
    #[display("Composition incomplete: {} of 9 tiles drawn", _0)]
    Incomplete(usize),

    /// The finished raster could not be encoded.
    #[display("Failed to encode composed image: {}", _0)]
    Encode(String),
}

impl std::error::Error for ComposeError {}
