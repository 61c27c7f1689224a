//! Plain-text deck lists in the untap format.
//!
//! ```text
//! //Forest Rush
//! 2 Wisp (se1)
//! 1 Old Oak (se1)
//! ```
//!
//! The first line carries the deck name after `//`. Each further line is a
//! quantity, a card name, and a parenthesized set tag. The tag is ignored when
//! reading and always written as [`PROVENANCE_TAG`].

use thiserror::Error;

use crate::deck::DeckAggregate;

/// Set tag written after every card name.
pub const PROVENANCE_TAG: &str = "se1";

/// Structural problems in a deck list. Any of these aborts an import.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckListError {
    #[error("deck list is empty: expected a '//<deck name>' header line")]
    MissingHeader,
    #[error("line 1: deck name is empty")]
    EmptyDeckName,
    #[error("line {line}: invalid quantity '{token}'")]
    InvalidQuantity { line: usize, token: String },
    #[error("line {line}: missing card name")]
    MissingCardName { line: usize },
}

/// A parsed but unresolved deck list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckList {
    pub name: String,
    pub entries: Vec<DeckListEntry>,
}

/// One card line of a deck list, before catalog lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckListEntry {
    /// 1-based line number in the source text.
    pub line: usize,
    pub quantity: u32,
    pub name: String,
}

/// Parse a deck list, failing on the first malformed line.
///
/// Blank lines are skipped. Quantities must be non-negative integers. Only a
/// leading `//` is removed from the header, so a name containing `//` survives
/// a format/parse round trip.
pub fn parse_deck_list(text: &str) -> Result<DeckList, DeckListError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.lines();

    let header = lines.next().ok_or(DeckListError::MissingHeader)?;
    let name = header.trim();
    let name = name.strip_prefix("//").unwrap_or(name).trim();
    if name.is_empty() {
        return Err(DeckListError::EmptyDeckName);
    }

    let mut entries = Vec::new();
    for (idx, raw) in lines.enumerate() {
        let line = idx + 2;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        entries.push(parse_entry(line, trimmed)?);
    }

    Ok(DeckList {
        name: name.to_string(),
        entries,
    })
}

fn parse_entry(line: usize, trimmed: &str) -> Result<DeckListEntry, DeckListError> {
    let (token, rest) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""));

    let quantity = token
        .parse::<u32>()
        .map_err(|_| DeckListError::InvalidQuantity {
            line,
            token: token.to_string(),
        })?;

    let name = rest
        .split_once('(')
        .map_or(rest, |(before, _)| before)
        .trim();
    if name.is_empty() {
        return Err(DeckListError::MissingCardName { line });
    }

    Ok(DeckListEntry {
        line,
        quantity,
        name: name.to_string(),
    })
}

/// Render a deck in the untap format. Every line ends with `\n`.
pub fn format_deck_list(deck: &DeckAggregate) -> String {
    let mut out = format!("//{}\n", deck.name());
    for line in deck.lines() {
        out.push_str(&format!(
            "{} {} ({})\n",
            line.quantity, line.card.name, PROVENANCE_TAG
        ));
    }
    out
}
