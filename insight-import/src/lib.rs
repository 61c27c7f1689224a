//! Deck-list import and export against the card catalog database.
//!
//! This crate connects the pure text codec in `insight-catalog` to the
//! catalog queries and deck persistence in `insight-db`.

pub mod deck_import;
pub mod progress;

pub use deck_import::{
    ImportError, ImportOutcome, export_deck_list, import_deck_file, import_deck_list,
};
pub use progress::{ImportProgress, LogProgress, SilentProgress};
