//! In-memory deck aggregate with incrementally maintained statistics.
//!
//! A [`DeckAggregate`] owns its lines and a [`DeckStats`] value. Every mutation
//! computes the quantity actually applied to a line first and then moves all
//! four statistics by that same amount, so
//! `total == sum(by_type) == sum(by_region) == sum(madness_curve)` holds after
//! each call.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::types::{Card, MADNESS_LEVELS, Region, TypeCounts};

/// Maximum copies of one card allowed in a deck.
pub const MAX_COPIES: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("Card '{0}' not found in your deck.")]
    NotInDeck(String),
}

/// A card and how many copies of it the deck holds (always 1 or 2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckLine {
    pub card: Card,
    pub quantity: u32,
}

/// Derived deck statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeckStats {
    pub total: u32,
    /// Only regions with a non-zero count are present.
    pub by_region: BTreeMap<Region, u32>,
    pub by_type: TypeCounts,
    pub madness_curve: [u32; MADNESS_LEVELS],
}

impl DeckStats {
    pub fn region(&self, region: Region) -> u32 {
        self.by_region.get(&region).copied().unwrap_or(0)
    }

    /// Whether all four aggregates agree on the total.
    pub fn is_consistent(&self) -> bool {
        let regions: u32 = self.by_region.values().sum();
        let madness: u32 = self.madness_curve.iter().sum();
        self.total == self.by_type.sum() && self.total == regions && self.total == madness
    }

    /// Share of the deck, in percent, that `quantity` represents.
    pub fn percent(&self, quantity: u32) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            100.0 * quantity as f64 / self.total as f64
        }
    }

    fn credit(&mut self, card: &Card, quantity: u32) {
        if quantity == 0 {
            return;
        }
        self.total += quantity;
        *self.by_region.entry(card.region).or_insert(0) += quantity;
        self.by_type.add(card.card_type, quantity);
        self.madness_curve[card.madness.bucket()] += quantity;
    }

    fn debit(&mut self, card: &Card, quantity: u32) {
        if quantity == 0 {
            return;
        }
        self.total -= quantity;
        if let Some(count) = self.by_region.get_mut(&card.region) {
            *count = count.saturating_sub(quantity);
            if *count == 0 {
                self.by_region.remove(&card.region);
            }
        }
        self.by_type.sub(card.card_type, quantity);
        let bucket = &mut self.madness_curve[card.madness.bucket()];
        *bucket = bucket.saturating_sub(quantity);
    }
}

/// A deck being built or edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckAggregate {
    id: Option<i64>,
    name: String,
    /// Keyed by card id.
    lines: BTreeMap<i64, DeckLine>,
    stats: DeckStats,
}

impl DeckAggregate {
    /// An empty, unsaved deck.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            lines: BTreeMap::new(),
            stats: DeckStats::default(),
        }
    }

    /// Rebuild a deck from persisted lines.
    ///
    /// Quantities above [`MAX_COPIES`] are clamped and zero quantities are
    /// dropped, so the result satisfies the same invariants as a deck built
    /// through [`add_card`](Self::add_card).
    pub fn from_lines(
        id: Option<i64>,
        name: impl Into<String>,
        lines: impl IntoIterator<Item = DeckLine>,
    ) -> Self {
        let mut deck = Self::new(name);
        deck.id = id;
        for line in lines {
            if line.quantity > MAX_COPIES {
                log::warn!(
                    "Deck '{}' stores {} copies of '{}', clamping to {}",
                    deck.name,
                    line.quantity,
                    line.card.name,
                    MAX_COPIES,
                );
            }
            deck.add_card(&line.card, line.quantity);
        }
        deck
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stats(&self) -> &DeckStats {
        &self.stats
    }

    pub fn total(&self) -> u32 {
        self.stats.total
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct cards.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Lines ordered by card id.
    pub fn lines(&self) -> impl Iterator<Item = &DeckLine> {
        self.lines.values()
    }

    /// Case-insensitive lookup by card name.
    pub fn line(&self, name: &str) -> Option<&DeckLine> {
        self.lines.values().find(|l| l.card.name_matches(name))
    }

    pub fn quantity_of(&self, name: &str) -> u32 {
        self.line(name).map_or(0, |l| l.quantity)
    }

    pub fn contains(&self, card_id: i64) -> bool {
        self.lines.contains_key(&card_id)
    }

    /// Add up to `requested` copies of `card`, capped at [`MAX_COPIES`] for
    /// the line. Returns how many copies were actually added.
    pub fn add_card(&mut self, card: &Card, requested: u32) -> u32 {
        let current = self.lines.get(&card.id).map_or(0, |l| l.quantity);
        let target = current.saturating_add(requested).min(MAX_COPIES);
        self.raise_line(card, target)
    }

    /// Remove up to `requested` copies of the named card. Returns how many
    /// were removed; removing more than present removes the whole line.
    pub fn remove_card(&mut self, name: &str, requested: u32) -> Result<u32, DeckError> {
        let (card_id, line) = self
            .lines
            .iter_mut()
            .find(|(_, l)| l.card.name_matches(name))
            .map(|(&id, l)| (id, l))
            .ok_or_else(|| DeckError::NotInDeck(name.trim().to_string()))?;

        let removed = requested.min(line.quantity);
        if removed == 0 {
            return Ok(0);
        }
        line.quantity -= removed;
        let card = line.card.clone();
        if line.quantity == 0 {
            self.lines.remove(&card_id);
        }
        self.stats.debit(&card, removed);
        Ok(removed)
    }

    /// Merge a quantity read from a deck list.
    ///
    /// Unlike [`add_card`](Self::add_card), repeated entries for the same card
    /// do not accumulate: the line keeps the larger of its current quantity
    /// and the imported one (clamped to [`MAX_COPIES`]). Returns the increase
    /// actually applied.
    pub fn merge_imported(&mut self, card: &Card, imported: u32) -> u32 {
        let current = self.lines.get(&card.id).map_or(0, |l| l.quantity);
        let target = current.max(imported.min(MAX_COPIES));
        self.raise_line(card, target)
    }

    /// Raise the line for `card` to `target` copies (never lowers it) and
    /// credit the difference to the statistics.
    fn raise_line(&mut self, card: &Card, target: u32) -> u32 {
        let current = self.lines.get(&card.id).map_or(0, |l| l.quantity);
        if target <= current {
            return 0;
        }
        let delta = target - current;
        self.lines
            .entry(card.id)
            .and_modify(|l| l.quantity = target)
            .or_insert_with(|| DeckLine {
                card: card.clone(),
                quantity: target,
            });
        self.stats.credit(card, delta);
        delta
    }
}
