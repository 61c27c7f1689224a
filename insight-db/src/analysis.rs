//! Deck analysis: statistics computed from stored line items.
//!
//! The analyzer aggregates in SQL and never trusts cached counts. Hydration
//! rebuilds an editable [`DeckAggregate`] and checks it against the analysis.

use insight_catalog::{CardType, DeckAggregate, DeckRecord, DeckStats, Region};
use rusqlite::{Connection, params};

use crate::operations::OperationError;
use crate::queries::{self, madness_column, parse_column};

/// Statistics of a stored deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckAnalysis {
    pub record: DeckRecord,
    pub stats: DeckStats,
    /// Distinct regions in the order their first card appears in the catalog.
    pub regions_present: Vec<Region>,
}

/// Analyze a stored deck. Returns `None` for an unknown id; a deck without
/// lines analyzes to zero statistics.
pub fn analyze_deck(conn: &Connection, deck_id: i64) -> Result<Option<DeckAnalysis>, OperationError> {
    let Some(record) = queries::find_deck(conn, deck_id)? else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(
        "SELECT c.region, c.type, c.madness, SUM(dc.quantity)
         FROM deck_cards dc
         INNER JOIN cards c ON c.id = dc.card_id
         WHERE dc.deck_id = ?1
         GROUP BY c.region, c.type, c.madness
         ORDER BY MIN(c.id)",
    )?;
    let groups = stmt
        .query_map(params![deck_id], |row| {
            Ok((
                parse_column::<Region>(row, 0)?,
                parse_column::<CardType>(row, 1)?,
                madness_column(row, 2)?,
                row.get::<_, u32>(3)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut stats = DeckStats::default();
    let mut regions_present = Vec::new();
    for (region, card_type, madness, quantity) in groups {
        stats.total += quantity;
        *stats.by_region.entry(region).or_insert(0) += quantity;
        let typed = stats.by_type.get(card_type);
        stats.by_type.set(card_type, typed + quantity);
        stats.madness_curve[madness.bucket()] += quantity;
        if !regions_present.contains(&region) {
            regions_present.push(region);
        }
    }
    stats.by_region.retain(|_, q| *q > 0);

    log::debug!(
        "Analyzed deck '{}': {} cards over {} regions",
        record.name,
        stats.total,
        regions_present.len()
    );

    Ok(Some(DeckAnalysis {
        record,
        stats,
        regions_present,
    }))
}

/// Rebuild an editable deck from storage.
///
/// The aggregate recomputes its own statistics. If they disagree with the
/// analysis (stored quantities above the cap), a warning is logged and the
/// recomputed values are kept.
pub fn hydrate_deck(conn: &Connection, analysis: &DeckAnalysis) -> Result<DeckAggregate, OperationError> {
    let lines = queries::deck_cards(conn, analysis.record.id)?;
    let deck = DeckAggregate::from_lines(Some(analysis.record.id), analysis.record.name.clone(), lines);
    if deck.stats() != &analysis.stats {
        log::warn!(
            "Deck '{}' statistics differ from stored lines ({} stored, {} after clamping)",
            analysis.record.name,
            analysis.stats.total,
            deck.total()
        );
    }
    Ok(deck)
}

/// Analyze and hydrate in one step.
pub fn load_deck(conn: &Connection, deck_id: i64) -> Result<Option<DeckAggregate>, OperationError> {
    match analyze_deck(conn, deck_id)? {
        Some(analysis) => hydrate_deck(conn, &analysis).map(Some),
        None => Ok(None),
    }
}
