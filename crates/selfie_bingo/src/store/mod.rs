//! Key/value persistence for tile names and images.

mod error;
mod keys;
mod memory;
mod models;
mod schema; // Diesel schema - internal use only
mod sqlite;

pub use error::StoreError;
pub use keys::{image_key, name_key};
pub use memory::MemoryTileStore;
pub use sqlite::SqliteTileStore;

/// Persistence collaborator for tile values.
///
/// Keys are synthesised with [`name_key`] and [`image_key`]. Writes are
/// single-key; callers never rely on multi-key atomicity.
pub trait TileStore: Send + Sync + std::fmt::Debug {
    /// Reads a value. Missing keys return `None`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
