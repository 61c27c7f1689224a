//! Card catalog data model, deck aggregate, and deck-list text format.
//!
//! This crate has no database dependency. `insight-db` persists these types
//! and `insight-import` connects the deck-list format to the catalog.

pub mod deck;
pub mod deck_list;
pub mod filter;
pub mod types;
pub mod yaml;

pub use deck::{DeckAggregate, DeckError, DeckLine, DeckStats, MAX_COPIES};
pub use deck_list::{
    DeckList, DeckListEntry, DeckListError, PROVENANCE_TAG, format_deck_list, parse_deck_list,
};
pub use filter::{CardFilter, Comparator, NumericCondition};
pub use types::*;
pub use yaml::{YamlError, load_cards};
