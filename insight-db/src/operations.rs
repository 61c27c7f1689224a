//! Write operations: deck persistence, win/loss tracking, catalog seeding.
//!
//! Multi-statement writes run inside a single transaction. The transaction is
//! rolled back when dropped on an error path, so a failed save leaves the
//! previous line items intact.

use insight_catalog::{CardDefinition, DeckAggregate, DeckRecord, YamlError, fold_case, name_key};
use rusqlite::{Connection, params};
use thiserror::Error;

use crate::queries;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Catalog seed error: {0}")]
    Seed(#[from] YamlError),
}

// ── Deck Operations ─────────────────────────────────────────────────────────

/// Save a deck, replacing all of its stored line items.
///
/// The deck row is found by exact name or created. Existing `deck_cards` rows
/// are deleted and one row is inserted per line of `deck`.
pub fn save_deck(conn: &Connection, deck: &DeckAggregate) -> Result<DeckRecord, OperationError> {
    let tx = conn.unchecked_transaction()?;

    let deck_id = match queries::find_deck_id_by_name(&tx, deck.name())? {
        Some(id) => id,
        None => {
            tx.execute("INSERT INTO decks (name) VALUES (?1)", params![deck.name()])?;
            tx.last_insert_rowid()
        }
    };

    let replaced = tx.execute("DELETE FROM deck_cards WHERE deck_id = ?1", params![deck_id])?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO deck_cards (deck_id, card_id, quantity) VALUES (?1, ?2, ?3)",
        )?;
        for line in deck.lines() {
            stmt.execute(params![deck_id, line.card.id, line.quantity])?;
        }
    }

    let record = tx.query_row(
        "SELECT id, name, wins, games FROM decks WHERE id = ?1",
        params![deck_id],
        |row| {
            Ok(DeckRecord {
                id: row.get(0)?,
                name: row.get(1)?,
                wins: row.get(2)?,
                games: row.get(3)?,
            })
        },
    )?;

    tx.commit()?;

    log::debug!(
        "Saved deck '{}' (id {}): replaced {} rows with {}",
        record.name,
        record.id,
        replaced,
        deck.len(),
    );
    Ok(record)
}

/// Delete a deck and all of its line items. Returns whether the deck existed.
pub fn delete_deck(conn: &Connection, deck_id: i64) -> Result<bool, OperationError> {
    let tx = conn.unchecked_transaction()?;
    tx.execute("DELETE FROM deck_cards WHERE deck_id = ?1", params![deck_id])?;
    let deleted = tx.execute("DELETE FROM decks WHERE id = ?1", params![deck_id])?;
    tx.commit()?;
    Ok(deleted > 0)
}

/// Record a game for a deck: `games` always increments, `wins` only if `won`.
///
/// An unknown id is not an error; nothing is updated and `false` is returned.
pub fn register_outcome(conn: &Connection, deck_id: i64, won: bool) -> Result<bool, OperationError> {
    let changed = conn.execute(
        "UPDATE decks SET games = games + 1, wins = wins + ?2 WHERE id = ?1",
        params![deck_id, won as i64],
    )?;
    if changed == 0 {
        log::debug!("No deck with id {}, outcome not recorded", deck_id);
    }
    Ok(changed > 0)
}

// ── Catalog Seeding ─────────────────────────────────────────────────────────

/// Statistics from seeding the card catalog.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedStats {
    pub inserted: usize,
    pub updated: usize,
}

/// Insert or update catalog cards, matching existing cards by name (ignoring
/// case). Existing ids are kept so stored decks stay valid.
pub fn seed_cards(conn: &Connection, cards: &[CardDefinition]) -> Result<SeedStats, OperationError> {
    let tx = conn.unchecked_transaction()?;
    let mut stats = SeedStats::default();

    for card in cards {
        let name = card.name.trim();
        let key = name_key(name);
        let effect_key = fold_case(&card.effect);
        let changed = tx.execute(
            "UPDATE cards SET name = ?1, type = ?2, region = ?3, effect = ?4, power = ?5, madness = ?6,
                effect_key = ?8
             WHERE name_key = ?7",
            params![
                name,
                card.card_type.as_str(),
                card.region.as_str(),
                card.effect,
                card.power,
                card.madness.value(),
                key,
                effect_key,
            ],
        )?;
        if changed > 0 {
            stats.updated += 1;
            continue;
        }
        tx.execute(
            "INSERT INTO cards (name, type, region, effect, power, madness, name_key, effect_key)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                name,
                card.card_type.as_str(),
                card.region.as_str(),
                card.effect,
                card.power,
                card.madness.value(),
                key,
                effect_key,
            ],
        )?;
        stats.inserted += 1;
    }

    tx.commit()?;
    Ok(stats)
}

/// Load card definitions from YAML (file or directory) and seed them.
pub fn seed_from_yaml(conn: &Connection, path: &std::path::Path) -> Result<SeedStats, OperationError> {
    let cards = insight_catalog::load_cards(path)?;
    log::debug!("Loaded {} card definitions from {}", cards.len(), path.display());
    seed_cards(conn, &cards)
}
