//! Read queries for the card catalog and stored decks.
//!
//! Rows are projected into typed values inside the row closures; no rusqlite
//! row handle leaves this module.

use insight_catalog::{
    Card, CardFilter, DeckLine, DeckRecord, Madness, Region, ValueError, fold_case, name_key,
};
use rusqlite::types::{Type, Value};
use rusqlite::{Connection, Row, params, params_from_iter};

use crate::operations::OperationError;

const CARD_COLUMNS: &str = "id, name, type, region, effect, power, madness";

// ── Row Projection ──────────────────────────────────────────────────────────

/// Map a row laid out as [`CARD_COLUMNS`] (starting at `offset`) to a [`Card`].
pub(crate) fn card_at(row: &Row<'_>, offset: usize) -> rusqlite::Result<Card> {
    Ok(Card {
        id: row.get(offset)?,
        name: row.get(offset + 1)?,
        card_type: parse_column(row, offset + 2)?,
        region: parse_column(row, offset + 3)?,
        effect: row.get(offset + 4)?,
        power: row.get(offset + 5)?,
        madness: madness_column(row, offset + 6)?,
    })
}

fn row_to_card(row: &Row<'_>) -> rusqlite::Result<Card> {
    card_at(row, 0)
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<DeckRecord> {
    Ok(DeckRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        wins: row.get(2)?,
        games: row.get(3)?,
    })
}

/// Parse a text column into a catalog enum.
pub(crate) fn parse_column<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: std::str::FromStr<Err = ValueError>,
{
    let raw: String = row.get(idx)?;
    raw.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn madness_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Madness> {
    let raw: i64 = row.get(idx)?;
    Madness::new(raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(e)))
}

// ── Card Catalog ────────────────────────────────────────────────────────────

/// Find a card by name, ignoring case and surrounding whitespace.
pub fn find_card_by_name(conn: &Connection, name: &str) -> Result<Option<Card>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {CARD_COLUMNS} FROM cards WHERE name_key = ?1 LIMIT 1"
    ))?;
    let result = stmt.query_row(params![name_key(name)], row_to_card);
    match result {
        Ok(card) => Ok(Some(card)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// List catalog cards matching every predicate of `filter`, in insertion order.
pub fn list_cards(conn: &Connection, filter: &CardFilter) -> Result<Vec<Card>, OperationError> {
    let mut clauses: Vec<String> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if let Some(pattern) = filter.name_pattern() {
        clauses.push("instr(name_key, ?) > 0".to_string());
        values.push(Value::Text(fold_case(pattern)));
    }
    if !filter.types.is_empty() {
        clauses.push(format!("type IN ({})", placeholders(filter.types.len())));
        values.extend(
            filter
                .types
                .iter()
                .map(|t| Value::Text(t.as_str().to_string())),
        );
    }
    if !filter.regions.is_empty() {
        clauses.push(format!("region IN ({})", placeholders(filter.regions.len())));
        values.extend(
            filter
                .regions
                .iter()
                .map(|r| Value::Text(r.as_str().to_string())),
        );
    }
    if let Some(pattern) = filter.effect_pattern() {
        clauses.push("instr(effect_key, ?) > 0".to_string());
        values.push(Value::Text(fold_case(pattern)));
    }
    for condition in &filter.power {
        clauses.push(format!("power {} ?", condition.comparator.symbol()));
        values.push(Value::Integer(condition.value));
    }
    for condition in &filter.madness {
        clauses.push(format!("madness {} ?", condition.comparator.symbol()));
        values.push(Value::Integer(condition.value));
    }

    let mut sql = format!("SELECT {CARD_COLUMNS} FROM cards");
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY id");
    log::debug!("Card query: {}", sql);

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values.iter()), row_to_card)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Number of cards in the catalog.
pub fn count_cards(conn: &Connection) -> Result<i64, OperationError> {
    let count = conn.query_row("SELECT COUNT(*) FROM cards", [], |row| row.get(0))?;
    Ok(count)
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

// ── Decks ───────────────────────────────────────────────────────────────────

/// Find a deck id by exact name.
pub fn find_deck_id_by_name(conn: &Connection, name: &str) -> Result<Option<i64>, OperationError> {
    let mut stmt = conn.prepare("SELECT id FROM decks WHERE name = ?1 LIMIT 1")?;
    let result = stmt.query_row(params![name], |row| row.get::<_, i64>(0));
    match result {
        Ok(id) => Ok(Some(id)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Load a deck record by id.
pub fn find_deck(conn: &Connection, deck_id: i64) -> Result<Option<DeckRecord>, OperationError> {
    let mut stmt = conn.prepare("SELECT id, name, wins, games FROM decks WHERE id = ?1")?;
    let result = stmt.query_row(params![deck_id], row_to_record);
    match result {
        Ok(r) => Ok(Some(r)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Resolve user input that is either a deck id or a deck name.
///
/// A numeric key is tried as an id first and falls back to a name lookup, so a
/// deck literally named "42" is still reachable.
pub fn resolve_deck(conn: &Connection, key: &str) -> Result<Option<DeckRecord>, OperationError> {
    let key = key.trim();
    if let Ok(id) = key.parse::<i64>() {
        if let Some(record) = find_deck(conn, id)? {
            return Ok(Some(record));
        }
    }
    match find_deck_id_by_name(conn, key)? {
        Some(id) => find_deck(conn, id),
        None => Ok(None),
    }
}

/// All lines of a deck with full card detail, ordered by card id.
pub fn deck_cards(conn: &Connection, deck_id: i64) -> Result<Vec<DeckLine>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT dc.quantity, c.id, c.name, c.type, c.region, c.effect, c.power, c.madness
         FROM deck_cards dc
         INNER JOIN cards c ON c.id = dc.card_id
         WHERE dc.deck_id = ?1
         ORDER BY c.id",
    )?;
    let rows = stmt.query_map(params![deck_id], |row| {
        Ok(DeckLine {
            quantity: row.get(0)?,
            card: card_at(row, 1)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// One row of the deck listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckSummary {
    pub id: i64,
    pub name: String,
    /// Distinct regions of the deck's cards, in region order.
    pub regions: Vec<Region>,
    pub card_count: u32,
    pub wins: u32,
    pub games: u32,
}

impl DeckSummary {
    /// Whole-percent win rate; 0 before the first game.
    pub fn win_rate(&self) -> u32 {
        if self.games == 0 {
            0
        } else {
            (100 * u64::from(self.wins) / u64::from(self.games)) as u32
        }
    }
}

/// List every deck with its regions, card count, and record.
pub fn list_decks(conn: &Connection) -> Result<Vec<DeckSummary>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT d.id, d.name, group_concat(DISTINCT c.region),
                COALESCE(SUM(dc.quantity), 0), d.wins, d.games
         FROM decks d
         LEFT JOIN deck_cards dc ON dc.deck_id = d.id
         LEFT JOIN cards c ON c.id = dc.card_id
         GROUP BY d.id
         ORDER BY d.id",
    )?;
    let rows = stmt.query_map([], |row| {
        let regions: Option<String> = row.get(2)?;
        let mut regions = regions
            .as_deref()
            .unwrap_or("")
            .split(',')
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<Region>().map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        regions.sort();
        Ok(DeckSummary {
            id: row.get(0)?,
            name: row.get(1)?,
            regions,
            card_count: row.get(3)?,
            wins: row.get(4)?,
            games: row.get(5)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}
