use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use insight_catalog::{Card, CardFilter};
use insight_lib::display;
use rusqlite::Connection;

use crate::CliError;

use super::open_context;

/// Query the catalog and log the result as a table.
pub(crate) fn print_cards(conn: &Connection, filter: &CardFilter) -> Result<usize, CliError> {
    let cards = insight_db::list_cards(conn, filter)?;
    if cards.is_empty() {
        log::info!("No cards match.");
        return Ok(0);
    }
    for line in display::render_card_table(&cards).lines() {
        log::info!("{}", line);
    }
    log::info!(
        "{} card{}",
        cards.len(),
        if cards.len() == 1 { "" } else { "s" }
    );
    Ok(cards.len())
}

pub(crate) fn run_cards_list(db: Option<PathBuf>, filter: CardFilter) -> Result<(), CliError> {
    let ctx = open_context(db)?;
    if insight_db::count_cards(&ctx.conn)? == 0 {
        log::warn!("The card catalog is empty.");
        log::info!("Run 'insight cards seed <file>' to load one.");
        return Ok(());
    }
    print_cards(&ctx.conn, &filter)?;
    Ok(())
}

pub(crate) fn run_cards_show(db: Option<PathBuf>, name: &str) -> Result<(), CliError> {
    let ctx = open_context(db)?;
    let card = insight_db::find_card_by_name(&ctx.conn, name)?
        .ok_or_else(|| CliError::not_found(format!("Card '{}' not found", name.trim())))?;
    log_card(&card);
    Ok(())
}

fn log_card(card: &Card) {
    log::info!(
        "{} {}",
        card.name.if_supports_color(Stdout, |t| t.bold()),
        format!("(id {})", card.id).if_supports_color(Stdout, |t| t.dimmed()),
    );
    log::info!("  Type:    {}", card.card_type);
    log::info!("  Region:  {}", card.region);
    log::info!("  Power:   {}", card.power);
    log::info!("  Madness: {}", card.madness);
    if !card.effect.is_empty() {
        crate::log_blank();
        for line in display::wrap(&card.effect, display::EFFECT_WIDTH).lines() {
            log::info!("  {}", line);
        }
    }
}

pub(crate) fn run_cards_seed(db: Option<PathBuf>, path: PathBuf) -> Result<(), CliError> {
    let ctx = open_context(db)?;
    let stats = insight_db::seed_from_yaml(&ctx.conn, &path)?;
    log::info!(
        "{} Seeded catalog from {}: {} inserted, {} updated",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display(),
        stats.inserted,
        stats.updated,
    );
    Ok(())
}
