pub(crate) mod cards;
pub(crate) mod config;
pub(crate) mod decks;
pub(crate) mod menu;
pub(crate) mod prompt;

use std::path::PathBuf;

use insight_catalog::DeckRecord;
use insight_lib::AppContext;
use rusqlite::Connection;

use crate::CliError;

/// Open the deck database for one command or menu session.
pub(crate) fn open_context(db: Option<PathBuf>) -> Result<AppContext, CliError> {
    let ctx = AppContext::open(db)
        .map_err(|e| CliError::database(format!("Failed to open deck database: {}", e)))?;
    log::debug!("Using deck database {}", ctx.db_path.display());
    Ok(ctx)
}

/// Find a deck by id or name, failing when nothing matches.
pub(crate) fn resolve_deck(conn: &Connection, key: &str) -> Result<DeckRecord, CliError> {
    insight_db::resolve_deck(conn, key)?
        .ok_or_else(|| CliError::not_found(format!("No deck matches '{}'", key.trim())))
}
