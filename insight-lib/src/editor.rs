//! Deck editing session.
//!
//! A [`DeckEditor`] owns one [`DeckAggregate`] for the length of a create or
//! edit flow. Each action returns the notification shown to the user; only
//! storage and file failures are errors.

use std::path::Path;

use insight_catalog::{DeckAggregate, DeckError, MAX_COPIES};
use insight_db::{load_deck, queries, save_deck};
use insight_import::export_deck_list;
use rusqlite::Connection;

use crate::display;
use crate::error::EditorError;

pub struct DeckEditor {
    deck: DeckAggregate,
}

impl DeckEditor {
    /// Start a new, unsaved deck.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            deck: DeckAggregate::new(name),
        }
    }

    /// Edit an existing deck. `None` if the id is unknown.
    pub fn open(conn: &Connection, deck_id: i64) -> Result<Option<Self>, EditorError> {
        Ok(load_deck(conn, deck_id)?.map(|deck| Self { deck }))
    }

    pub fn deck(&self) -> &DeckAggregate {
        &self.deck
    }

    /// Add copies of a catalog card looked up by name.
    pub fn add_by_name(
        &mut self,
        conn: &Connection,
        name: &str,
        quantity: u32,
    ) -> Result<String, EditorError> {
        let Some(card) = queries::find_card_by_name(conn, name)? else {
            return Ok(format!("Card '{}' not found", name.trim()));
        };
        let applied = self.deck.add_card(&card, quantity);
        if applied == 0 && quantity > 0 {
            return Ok(format!(
                "'{}' is already at the limit of {} copies",
                card.name, MAX_COPIES
            ));
        }
        Ok(format!("Added {} {} to Deck", applied, card.name))
    }

    /// Remove copies of a card already in the deck.
    pub fn remove_by_name(&mut self, name: &str, quantity: u32) -> String {
        let display_name = self
            .deck
            .line(name)
            .map(|l| l.card.name.clone())
            .unwrap_or_else(|| name.trim().to_string());
        match self.deck.remove_card(name, quantity) {
            Ok(removed) => format!("{} '{}' were removed from the Deck", removed, display_name),
            Err(e @ DeckError::NotInDeck(_)) => e.to_string(),
        }
    }

    /// Persist the deck, replacing any stored deck of the same name.
    pub fn save(&mut self, conn: &Connection) -> Result<String, EditorError> {
        let record = save_deck(conn, &self.deck)?;
        self.deck.set_id(record.id);
        Ok("Deck saved successfully!".to_string())
    }

    /// Write the deck as an untap deck list.
    pub fn export(&self, path: &Path) -> Result<String, EditorError> {
        let written = export_deck_list(&self.deck, path)?;
        Ok(format!("Saved to file {}", written.display()))
    }

    /// Partial view shown above the editor menu.
    pub fn partial_view(&self) -> Option<String> {
        display::render_partial_view(&self.deck)
    }
}

/// Parse a copy count typed by the user.
pub fn parse_quantity(input: &str) -> Result<u32, EditorError> {
    let trimmed = input.trim();
    trimmed
        .parse::<u32>()
        .map_err(|_| EditorError::InvalidQuantity(trimmed.to_string()))
}

#[cfg(test)]
#[path = "tests/editor_tests.rs"]
mod tests;
