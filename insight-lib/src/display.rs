//! Text rendering for decks and the card catalog.
//!
//! Everything here returns plain strings without ANSI colors so the CLI can
//! print them line by line through the logger and tests can compare them.

use insight_catalog::{Card, CardType, DeckAggregate, DeckLine, DeckStats, MADNESS_LEVELS};
use insight_db::{DeckAnalysis, DeckSummary};

/// Maximum width of the effect column before it wraps.
pub const EFFECT_WIDTH: usize = 50;

const SECTION_RULE: &str = "------------------------";

// ---------------------------------------------------------------------------
// Deck views
// ---------------------------------------------------------------------------

/// One dash per copy.
pub fn madness_bar(count: u32) -> String {
    "-".repeat(count as usize)
}

fn percent(stats: &DeckStats, quantity: u32) -> String {
    format!("{:.1} %", stats.percent(quantity))
}

/// `2x Wisp - forest creature`
pub fn format_deck_line(line: &DeckLine) -> String {
    format!(
        "{}x {} - {} {}",
        line.quantity, line.card.name, line.card.region, line.card.card_type
    )
}

/// Full view of a stored deck: cards, record, and distribution by region,
/// type, and madness with percentages.
pub fn render_deck_view(analysis: &DeckAnalysis, lines: &[DeckLine]) -> String {
    let stats = &analysis.stats;
    let record = &analysis.record;
    let mut out = Vec::new();

    out.push(format!("{} (id {}):", record.name, record.id));
    if lines.is_empty() {
        out.push("  (no cards)".to_string());
    }
    for line in lines {
        out.push(format!("  {}", format_deck_line(line)));
    }
    out.push(format!("Total: {} cards", stats.total));
    if let Some(rate) = record.win_rate() {
        out.push(format!(
            "Wins: {}\tGames: {}\tWin rate: {:.1} %",
            record.wins, record.games, rate
        ));
    }

    out.push(SECTION_RULE.to_string());
    out.push("Regions".to_string());
    for &region in &analysis.regions_present {
        let q = stats.region(region);
        out.push(format!("{}: {} ({})", region, q, percent(stats, q)));
    }

    out.push(SECTION_RULE.to_string());
    out.push("Card Types".to_string());
    for (card_type, q) in stats.by_type.iter() {
        out.push(format!("{}: {} ({})", card_type, q, percent(stats, q)));
    }

    out.push(SECTION_RULE.to_string());
    out.push("Madness Curve".to_string());
    for (level, &q) in stats.madness_curve.iter().enumerate() {
        out.push(format!(
            "{}: {} {} ({})",
            level,
            q,
            madness_bar(q),
            percent(stats, q)
        ));
    }

    out.join("\n")
}

/// Compact view shown while editing. `None` for an empty deck.
pub fn render_partial_view(deck: &DeckAggregate) -> Option<String> {
    if deck.is_empty() {
        return None;
    }
    let stats = deck.stats();
    let mut out = Vec::new();

    out.push(format!("Your current deck: {}", deck.name()));
    out.push("-------------------------------".to_string());
    out.push("Cards per region:".to_string());
    for (region, q) in &stats.by_region {
        out.push(format!("{} - {}", q, region));
    }
    out.push(String::new());
    out.push("Cards per type:".to_string());
    for card_type in CardType::all() {
        out.push(format!("{} - {}", stats.by_type.get(*card_type), card_type));
    }
    out.push(String::new());
    out.push("Madness Curve:".to_string());
    for level in 0..MADNESS_LEVELS {
        let q = stats.madness_curve[level];
        out.push(format!("{}: {} {}", level, q, madness_bar(q)));
    }
    out.push(String::new());
    out.push(format!("Cards in deck ({}):", stats.total));
    for line in deck.lines() {
        out.push(format_deck_line(line));
    }

    Some(out.join("\n"))
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

/// Box-drawn table with a rule between every row. Cells may span several
/// lines.
fn render_table(columns: &[(&str, Align)], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = columns.iter().map(|(h, _)| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            for line in cell.lines() {
                widths[i] = widths[i].max(line.chars().count());
            }
        }
    }

    let rule = |left: char, mid: char, right: char| {
        let mut s = String::new();
        s.push(left);
        for (i, w) in widths.iter().enumerate() {
            if i > 0 {
                s.push(mid);
            }
            s.push_str(&"─".repeat(w + 2));
        }
        s.push(right);
        s
    };

    let header: Vec<String> = columns.iter().map(|(h, _)| h.to_string()).collect();
    let header_align = vec![Align::Left; columns.len()];
    let aligns: Vec<Align> = columns.iter().map(|(_, a)| *a).collect();

    let mut out = vec![rule('┌', '┬', '┐')];
    push_row(&mut out, &header, &widths, &header_align);
    for row in rows {
        out.push(rule('├', '┼', '┤'));
        push_row(&mut out, row, &widths, &aligns);
    }
    out.push(rule('└', '┴', '┘'));
    out.join("\n")
}

fn push_row(out: &mut Vec<String>, cells: &[String], widths: &[usize], aligns: &[Align]) {
    let height = cells.iter().map(|c| c.lines().count()).max().unwrap_or(0).max(1);
    for k in 0..height {
        let mut line = String::from("│");
        for (i, cell) in cells.iter().enumerate() {
            let text = cell.lines().nth(k).unwrap_or("");
            let w = widths[i];
            match aligns[i] {
                Align::Left => line.push_str(&format!(" {:<w$} │", text)),
                Align::Right => line.push_str(&format!(" {:>w$} │", text)),
            }
        }
        out.push(line);
    }
}

/// Greedy word wrap. Words longer than `width` are kept whole.
pub fn wrap(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}

/// Catalog listing with the effect column wrapped at [`EFFECT_WIDTH`].
pub fn render_card_table(cards: &[Card]) -> String {
    let columns = [
        ("id", Align::Right),
        ("name", Align::Left),
        ("type", Align::Left),
        ("region", Align::Left),
        ("effect", Align::Left),
        ("power", Align::Right),
        ("madness", Align::Right),
    ];
    let rows: Vec<Vec<String>> = cards
        .iter()
        .map(|c| {
            vec![
                c.id.to_string(),
                c.name.clone(),
                c.card_type.to_string(),
                c.region.to_string(),
                wrap(&c.effect, EFFECT_WIDTH),
                c.power.to_string(),
                c.madness.to_string(),
            ]
        })
        .collect();
    render_table(&columns, &rows)
}

/// Deck listing: id, name, regions, card count, win rate, games.
pub fn render_deck_table(decks: &[DeckSummary]) -> String {
    let columns = [
        ("id", Align::Right),
        ("name", Align::Left),
        ("regions", Align::Left),
        ("cards", Align::Right),
        ("win rate", Align::Right),
        ("games", Align::Right),
    ];
    let rows: Vec<Vec<String>> = decks
        .iter()
        .map(|d| {
            vec![
                d.id.to_string(),
                d.name.clone(),
                d.regions
                    .iter()
                    .map(|r| r.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
                d.card_count.to_string(),
                format!("{}%", d.win_rate()),
                d.games.to_string(),
            ]
        })
        .collect();
    render_table(&columns, &rows)
}

#[cfg(test)]
#[path = "tests/display_tests.rs"]
mod tests;
