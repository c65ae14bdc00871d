//! SQLite-backed tile store.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use super::models::TileEntry;
use super::{StoreError, TileStore, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Tile store persisting entries in a SQLite key/value table.
#[derive(Debug, Clone)]
pub struct SqliteTileStore {
    db_path: String,
}

impl SqliteTileStore {
    /// Opens the database at the given path, applying pending migrations.
    ///
    /// Use `":memory:"` only for throwaway checks: every call opens a new
    /// connection, so an in-memory database does not survive between calls.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path.as_ref()))]
    pub fn open(db_path: impl AsRef<str>) -> Result<Self, StoreError> {
        let db_path = db_path.as_ref().to_string();
        info!(path = %db_path, "Opening SqliteTileStore");
        let store = Self { db_path };

        let mut conn = store.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StoreError::new(format!("Migrations failed: {}", e)))?;
        debug!(count = applied.len(), "Migrations applied");

        Ok(store)
    }

    /// Path of the underlying database file.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, StoreError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path).map_err(|e| {
            StoreError::new(format!("Failed to connect to '{}': {}", self.db_path, e))
        })
    }
}

impl TileStore for SqliteTileStore {
    #[instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection()?;

        let value = schema::tile_entries::table
            .find(key)
            .select(schema::tile_entries::value)
            .first::<String>(&mut conn)
            .optional()?;

        debug!(found = value.is_some(), "Entry looked up");
        Ok(value)
    }

    #[instrument(skip(self, value), fields(len = value.len()))]
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.connection()?;

        let entry = TileEntry::new(key.to_string(), value.to_string());
        diesel::replace_into(schema::tile_entries::table)
            .values(&entry)
            .execute(&mut conn)?;

        debug!("Entry written");
        Ok(())
    }
}
