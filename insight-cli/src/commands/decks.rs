use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use insight_catalog::DeckRecord;
use insight_import::{ImportOutcome, LogProgress};
use insight_lib::{DeckEditor, display};
use rusqlite::Connection;

use crate::CliError;

use super::{open_context, resolve_deck};

/// Render the deck table, or a hint when there are no decks.
pub(crate) fn deck_table(conn: &Connection) -> Result<String, CliError> {
    let decks = insight_db::list_decks(conn)?;
    if decks.is_empty() {
        return Ok("You have no decks yet.".to_string());
    }
    Ok(display::render_deck_table(&decks))
}

/// Render the full view of a stored deck.
pub(crate) fn deck_view(conn: &Connection, record: &DeckRecord) -> Result<String, CliError> {
    let analysis = insight_db::analyze_deck(conn, record.id)?
        .ok_or_else(|| CliError::not_found(format!("Deck {} no longer exists", record.id)))?;
    let lines = insight_db::deck_cards(conn, record.id)?;
    Ok(display::render_deck_view(&analysis, &lines))
}

/// Log what an import did: the deck and any skipped names.
pub(crate) fn report_import(outcome: &ImportOutcome) {
    if let Some(view) = display::render_partial_view(&outcome.deck) {
        for line in view.lines() {
            log::info!("{}", line);
        }
        crate::log_blank();
    }
    for name in &outcome.skipped {
        log::warn!("Card '{}' not found, skipped", name);
    }
    log::info!(
        "{} Deck '{}' imported (id {})",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        outcome.record.name,
        outcome.record.id,
    );
}

pub(crate) fn run_decks_list(db: Option<PathBuf>) -> Result<(), CliError> {
    let ctx = open_context(db)?;
    for line in deck_table(&ctx.conn)?.lines() {
        log::info!("{}", line);
    }
    Ok(())
}

pub(crate) fn run_decks_show(db: Option<PathBuf>, key: &str) -> Result<(), CliError> {
    let ctx = open_context(db)?;
    let record = resolve_deck(&ctx.conn, key)?;
    for line in deck_view(&ctx.conn, &record)?.lines() {
        log::info!("{}", line);
    }
    Ok(())
}

pub(crate) fn run_decks_delete(db: Option<PathBuf>, key: &str) -> Result<(), CliError> {
    let ctx = open_context(db)?;
    let record = resolve_deck(&ctx.conn, key)?;
    insight_db::delete_deck(&ctx.conn, record.id)?;
    log::info!("Deck '{}' (id {}) deleted", record.name, record.id);
    Ok(())
}

pub(crate) fn run_decks_outcome(db: Option<PathBuf>, key: &str, won: bool) -> Result<(), CliError> {
    let ctx = open_context(db)?;
    let record = resolve_deck(&ctx.conn, key)?;
    insight_db::register_outcome(&ctx.conn, record.id, won)?;
    log::info!(
        "Registered a {} for '{}'",
        if won { "win" } else { "loss" },
        record.name
    );
    Ok(())
}

pub(crate) fn run_decks_import(db: Option<PathBuf>, file: PathBuf) -> Result<(), CliError> {
    let ctx = open_context(db)?;
    let outcome = insight_import::import_deck_file(&ctx.conn, &file, Some(&LogProgress))
        .map_err(|e| CliError::import(e.to_string()))?;
    report_import(&outcome);
    Ok(())
}

pub(crate) fn run_decks_export(db: Option<PathBuf>, key: &str, file: PathBuf) -> Result<(), CliError> {
    let ctx = open_context(db)?;
    let record = resolve_deck(&ctx.conn, key)?;
    let deck = insight_db::load_deck(&ctx.conn, record.id)?
        .ok_or_else(|| CliError::not_found(format!("No deck matches '{}'", key.trim())))?;
    let written = insight_import::export_deck_list(&deck, &file)
        .map_err(|e| CliError::import(e.to_string()))?;
    log::info!(
        "Saved '{}' to {}",
        deck.name(),
        written.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

pub(crate) fn run_decks_create(db: Option<PathBuf>, name: &str) -> Result<(), CliError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::other("Deck name cannot be empty"));
    }
    let ctx = open_context(db)?;
    super::menu::run_editor(&ctx, DeckEditor::new(name))
}

pub(crate) fn run_decks_edit(db: Option<PathBuf>, key: &str) -> Result<(), CliError> {
    let ctx = open_context(db)?;
    let record = resolve_deck(&ctx.conn, key)?;
    let editor = DeckEditor::open(&ctx.conn, record.id)
        .map_err(|e| CliError::database(e.to_string()))?
        .ok_or_else(|| CliError::not_found(format!("No deck matches '{}'", key.trim())))?;
    super::menu::run_editor(&ctx, editor)
}
