//! SQLite persistence layer for the card catalog and stored decks.
//!
//! Provides schema creation, deck save/delete/outcome operations, catalog
//! queries, and deck analysis backed by SQLite (via rusqlite with bundled
//! feature).

pub mod analysis;
pub mod operations;
pub mod queries;
pub mod schema;

pub use analysis::{DeckAnalysis, analyze_deck, hydrate_deck, load_deck};
pub use operations::{
    OperationError, SeedStats, delete_deck, register_outcome, save_deck, seed_cards,
    seed_from_yaml,
};
pub use queries::{
    DeckSummary, count_cards, deck_cards, find_card_by_name, find_deck, find_deck_id_by_name,
    list_cards, list_decks, resolve_deck,
};
pub use schema::{CURRENT_VERSION, SchemaError, open_database, open_memory};
