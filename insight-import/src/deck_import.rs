//! Import and export of deck lists in the untap text format.
//!
//! Import is two-phase: the whole text is parsed before the catalog is
//! touched, so a malformed line aborts without writing anything. Entries are
//! then resolved by name and merged into a fresh [`DeckAggregate`], which is
//! saved in a single transaction.

use std::path::{Path, PathBuf};

use insight_catalog::{DeckAggregate, DeckListError, DeckRecord, format_deck_list, parse_deck_list};
use insight_db::operations::{self, OperationError};
use insight_db::queries;
use rusqlite::Connection;
use thiserror::Error;

use crate::progress::ImportProgress;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Malformed deck list: {0}")]
    Parse(#[from] DeckListError),
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Result of a successful import.
#[derive(Debug)]
pub struct ImportOutcome {
    /// The imported deck, with its persisted id set.
    pub deck: DeckAggregate,
    pub record: DeckRecord,
    /// Card names that were not found in the catalog, in file order.
    pub skipped: Vec<String>,
}

/// Import a deck list from text and save it.
///
/// A deck with the same name is replaced. Card names not in the catalog are
/// reported in [`ImportOutcome::skipped`] and otherwise ignored.
pub fn import_deck_list(
    conn: &Connection,
    text: &str,
    progress: Option<&dyn ImportProgress>,
) -> Result<ImportOutcome, ImportError> {
    let list = parse_deck_list(text)?;

    let mut deck = DeckAggregate::new(list.name.clone());
    let mut skipped = Vec::new();
    let total = list.entries.len();

    for (i, entry) in list.entries.iter().enumerate() {
        match queries::find_card_by_name(conn, &entry.name)? {
            Some(card) => {
                let applied = deck.merge_imported(&card, entry.quantity);
                if let Some(p) = progress {
                    p.on_entry(i + 1, total, &card.name, applied);
                }
            }
            None => {
                if let Some(p) = progress {
                    p.on_skipped(entry.line, &entry.name);
                }
                skipped.push(entry.name.clone());
            }
        }
    }

    let record = operations::save_deck(conn, &deck)?;
    deck.set_id(record.id);

    if let Some(p) = progress {
        p.on_complete(&format!(
            "Imported '{}': {} cards, {} skipped",
            record.name,
            deck.total(),
            skipped.len()
        ));
    }

    Ok(ImportOutcome {
        deck,
        record,
        skipped,
    })
}

/// Read a deck list file and import it.
pub fn import_deck_file(
    conn: &Connection,
    path: &Path,
    progress: Option<&dyn ImportProgress>,
) -> Result<ImportOutcome, ImportError> {
    let text = std::fs::read_to_string(path).map_err(|e| ImportError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    log::debug!("Read deck list {} ({} bytes)", path.display(), text.len());
    import_deck_list(conn, &text, progress)
}

/// Write a deck list file. `.txt` is appended when `path` has no extension.
///
/// Returns the path actually written.
pub fn export_deck_list(deck: &DeckAggregate, path: &Path) -> Result<PathBuf, ImportError> {
    let path = if path.extension().is_none() {
        path.with_extension("txt")
    } else {
        path.to_path_buf()
    };
    std::fs::write(&path, format_deck_list(deck)).map_err(|e| ImportError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    log::debug!("Exported deck '{}' to {}", deck.name(), path.display());
    Ok(path)
}
