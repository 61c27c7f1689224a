//! Database handle shared by every command of a session.

use std::path::{Path, PathBuf};

use insight_db::{count_cards, open_database, seed_from_yaml};
use rusqlite::Connection;

use crate::error::OpenError;
use crate::settings;

/// An open deck database and the path it came from.
pub struct AppContext {
    pub conn: Connection,
    pub db_path: PathBuf,
}

impl AppContext {
    /// Open the database chosen by [`settings::resolve_database_path`],
    /// seeding an empty catalog from the configured `catalog.seed`.
    pub fn open(cli_override: Option<PathBuf>) -> Result<Self, OpenError> {
        let db_path = settings::resolve_database_path(cli_override);
        let seed = settings::catalog_seed_path();
        Self::open_at(db_path, seed.as_deref())
    }

    /// Open `db_path`. When the catalog is empty and `seed` is given, the
    /// catalog is loaded from that YAML file or directory first.
    pub fn open_at(db_path: PathBuf, seed: Option<&Path>) -> Result<Self, OpenError> {
        let conn = open_database(&db_path)?;
        if let Some(seed) = seed {
            if count_cards(&conn)? == 0 {
                let stats = seed_from_yaml(&conn, seed).map_err(|e| OpenError::Seed {
                    path: seed.display().to_string(),
                    source: e,
                })?;
                log::info!(
                    "Seeded card catalog from {} ({} cards)",
                    seed.display(),
                    stats.inserted
                );
            }
        }
        Ok(Self { conn, db_path })
    }
}
