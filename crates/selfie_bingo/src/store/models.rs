//! Database models for tile entries.

use derive_new::new;
use diesel::prelude::*;

use super::schema;

/// Insertable key/value row.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::tile_entries)]
pub struct TileEntry {
    key: String,
    value: String,
}
