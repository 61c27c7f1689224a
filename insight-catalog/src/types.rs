//! Data model types for the card catalog.
//!
//! Cards are owned by the catalog and never mutated by deck building. Regions
//! and card types are closed sets, stored as lowercase text at the database
//! boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of madness buckets (values 0 through 5).
pub const MADNESS_LEVELS: usize = 6;

/// Errors produced when converting raw text or numbers into catalog values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("unknown region: '{0}'")]
    UnknownRegion(String),
    #[error("unknown card type: '{0}'")]
    UnknownCardType(String),
    #[error("madness must be between 0 and 5, got {0}")]
    MadnessOutOfRange(i64),
    #[error("invalid condition '{0}': expected =N, >N or <N")]
    InvalidCondition(String),
}

// ── Region ──────────────────────────────────────────────────────────────────

/// Thematic zone a card belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "dungeon")]
    Dungeon,
    #[serde(rename = "graveyard")]
    Graveyard,
    #[serde(rename = "academy")]
    Academy,
    #[serde(rename = "fishing hamlet")]
    FishingHamlet,
    #[serde(rename = "church")]
    Church,
    #[serde(rename = "town")]
    Town,
    #[serde(rename = "forest")]
    Forest,
}

const ALL_REGIONS: &[Region] = &[
    Region::Dungeon,
    Region::Graveyard,
    Region::Academy,
    Region::FishingHamlet,
    Region::Church,
    Region::Town,
    Region::Forest,
];

impl Region {
    /// Every region, in menu order.
    pub fn all() -> &'static [Region] {
        ALL_REGIONS
    }

    /// Name as stored in the database and shown to the user.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dungeon => "dungeon",
            Self::Graveyard => "graveyard",
            Self::Academy => "academy",
            Self::FishingHamlet => "fishing hamlet",
            Self::Church => "church",
            Self::Town => "town",
            Self::Forest => "forest",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Region {
    type Err = ValueError;

    /// Case-insensitive. `fishing_hamlet` and `fishing-hamlet` are accepted so
    /// the region can be typed on a command line without quoting.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', '-'], " ");
        ALL_REGIONS
            .iter()
            .copied()
            .find(|r| r.as_str() == normalized)
            .ok_or_else(|| ValueError::UnknownRegion(s.to_string()))
    }
}

// ── Card Type ───────────────────────────────────────────────────────────────

/// Card type. Every deck tracks a count for all three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Creature,
    Event,
    Permanent,
}

const ALL_CARD_TYPES: &[CardType] = &[CardType::Creature, CardType::Event, CardType::Permanent];

impl CardType {
    pub fn all() -> &'static [CardType] {
        ALL_CARD_TYPES
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Creature => "creature",
            Self::Event => "event",
            Self::Permanent => "permanent",
        }
    }

    /// Slot index inside [`TypeCounts`].
    fn index(self) -> usize {
        match self {
            Self::Creature => 0,
            Self::Event => 1,
            Self::Permanent => 2,
        }
    }
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CardType {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        ALL_CARD_TYPES
            .iter()
            .copied()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| ValueError::UnknownCardType(s.to_string()))
    }
}

/// Fixed-size per-type quantities. All three types are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeCounts([u32; 3]);

impl TypeCounts {
    pub fn get(&self, card_type: CardType) -> u32 {
        self.0[card_type.index()]
    }

    pub fn set(&mut self, card_type: CardType, quantity: u32) {
        self.0[card_type.index()] = quantity;
    }

    pub(crate) fn add(&mut self, card_type: CardType, quantity: u32) {
        self.0[card_type.index()] += quantity;
    }

    pub(crate) fn sub(&mut self, card_type: CardType, quantity: u32) {
        let slot = &mut self.0[card_type.index()];
        *slot = slot.saturating_sub(quantity);
    }

    /// `(type, quantity)` pairs in [`CardType::all`] order.
    pub fn iter(&self) -> impl Iterator<Item = (CardType, u32)> + '_ {
        ALL_CARD_TYPES.iter().map(|&t| (t, self.get(t)))
    }

    pub fn sum(&self) -> u32 {
        self.0.iter().sum()
    }
}

// ── Madness ─────────────────────────────────────────────────────────────────

/// Madness value of a card, always within `0..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Madness(u8);

impl Madness {
    pub const MAX: u8 = (MADNESS_LEVELS - 1) as u8;

    pub fn new(value: i64) -> Result<Self, ValueError> {
        if (0..=Self::MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ValueError::MadnessOutOfRange(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Bucket index into a madness curve.
    pub fn bucket(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<i64> for Madness {
    type Error = ValueError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Madness> for u8 {
    fn from(m: Madness) -> Self {
        m.0
    }
}

impl std::fmt::Display for Madness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Card ────────────────────────────────────────────────────────────────────

/// A catalog card as stored in the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: i64,
    /// Unique within the catalog, compared case-insensitively.
    pub name: String,
    pub region: Region,
    pub card_type: CardType,
    pub effect: String,
    pub power: i64,
    pub madness: Madness,
}

impl Card {
    /// Case-insensitive, whitespace-trimmed name comparison.
    pub fn name_matches(&self, name: &str) -> bool {
        name_key(&self.name) == name_key(name)
    }
}

/// Unicode case folding shared by in-memory matching and the stored search
/// columns, so both sides agree beyond ASCII.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// Lookup key for a card name: trimmed and case-folded.
pub fn name_key(name: &str) -> String {
    fold_case(name.trim())
}

/// A card definition without a database id, loaded from catalog YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub name: String,
    pub region: Region,
    #[serde(rename = "type")]
    pub card_type: CardType,
    #[serde(default)]
    pub effect: String,
    #[serde(default)]
    pub power: i64,
    pub madness: Madness,
}

impl CardDefinition {
    /// Attach a database id.
    pub fn into_card(self, id: i64) -> Card {
        Card {
            id,
            name: self.name,
            region: self.region,
            card_type: self.card_type,
            effect: self.effect,
            power: self.power,
            madness: self.madness,
        }
    }
}

// ── Deck Record ─────────────────────────────────────────────────────────────

/// The persisted identity and win/loss record of a deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckRecord {
    pub id: i64,
    pub name: String,
    pub wins: u32,
    pub games: u32,
}

impl DeckRecord {
    /// Win rate in percent, `None` before the first game.
    pub fn win_rate(&self) -> Option<f64> {
        if self.games == 0 {
            None
        } else {
            Some(100.0 * self.wins as f64 / self.games as f64)
        }
    }
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
