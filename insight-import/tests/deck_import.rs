use std::cell::RefCell;

use insight_catalog::*;
use insight_db::*;
use insight_import::*;
use rusqlite::Connection;

fn definition(name: &str, region: Region, card_type: CardType, madness: i64) -> CardDefinition {
    CardDefinition {
        name: name.to_string(),
        region,
        card_type,
        effect: String::new(),
        power: 0,
        madness: Madness::new(madness).unwrap(),
    }
}

fn seeded() -> Connection {
    let conn = open_memory().unwrap();
    seed_cards(
        &conn,
        &[
            definition("Wisp", Region::Forest, CardType::Creature, 1),
            definition("Bell Tower", Region::Church, CardType::Permanent, 2),
            definition("Drowned Choir", Region::FishingHamlet, CardType::Event, 4),
            definition("Ghoul", Region::Graveyard, CardType::Creature, 3),
        ],
    )
    .unwrap();
    conn
}

fn card(conn: &Connection, name: &str) -> Card {
    find_card_by_name(conn, name).unwrap().unwrap()
}

fn deck_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM decks", [], |row| row.get(0))
        .unwrap()
}

#[derive(Default)]
struct Recorder {
    skipped: RefCell<Vec<(usize, String)>>,
    entries: RefCell<usize>,
}

impl ImportProgress for Recorder {
    fn on_entry(&self, _current: usize, _total: usize, _name: &str, _applied: u32) {
        *self.entries.borrow_mut() += 1;
    }
    fn on_skipped(&self, line: usize, name: &str) {
        self.skipped.borrow_mut().push((line, name.to_string()));
    }
    fn on_complete(&self, _message: &str) {}
}

#[test]
fn import_resolves_names_and_saves() {
    let conn = seeded();
    let text = "//Night Hunt\n2 wisp (se1)\n1 Drowned Choir (se1)\n";
    let outcome = import_deck_list(&conn, text, None).unwrap();

    assert_eq!(outcome.record.name, "Night Hunt");
    assert_eq!(outcome.deck.id(), Some(outcome.record.id));
    assert_eq!(outcome.deck.total(), 3);
    assert!(outcome.skipped.is_empty());

    let stored = load_deck(&conn, outcome.record.id).unwrap().unwrap();
    assert_eq!(stored, outcome.deck);
}

#[test]
fn export_then_import_round_trips() {
    let conn = seeded();
    let mut deck = DeckAggregate::new("Round Trip");
    deck.add_card(&card(&conn, "Ghoul"), 2);
    deck.add_card(&card(&conn, "Bell Tower"), 1);
    deck.add_card(&card(&conn, "Wisp"), 2);

    let dir = tempfile::tempdir().unwrap();
    let path = export_deck_list(&deck, &dir.path().join("round_trip")).unwrap();
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("txt"));

    let outcome = import_deck_file(&conn, &path, None).unwrap();
    let pairs = |d: &DeckAggregate| -> Vec<(String, u32)> {
        d.lines().map(|l| (l.card.name.clone(), l.quantity)).collect()
    };
    assert_eq!(outcome.deck.name(), "Round Trip");
    assert_eq!(pairs(&outcome.deck), pairs(&deck));
    assert_eq!(outcome.deck.stats(), deck.stats());
}

#[test]
fn export_keeps_explicit_extension() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("deck.list");
    let written = export_deck_list(&DeckAggregate::new("Empty"), &target).unwrap();
    assert_eq!(written, target);
    assert_eq!(std::fs::read_to_string(&written).unwrap(), "//Empty\n");
}

#[test]
fn card_removed_from_catalog_is_skipped() {
    let conn = seeded();
    let mut deck = DeckAggregate::new("Test");
    deck.add_card(&card(&conn, "Wisp"), 2);
    deck.add_card(&card(&conn, "Ghoul"), 1);
    let text = format_deck_list(&deck);

    conn.execute("DELETE FROM cards WHERE name = 'Ghoul'", [])
        .unwrap();

    let recorder = Recorder::default();
    let outcome = import_deck_list(&conn, &text, Some(&recorder)).unwrap();
    assert_eq!(outcome.skipped, vec!["Ghoul".to_string()]);
    assert_eq!(outcome.deck.total(), 2);
    assert!(outcome.deck.line("ghoul").is_none());
    assert_eq!(*recorder.entries.borrow(), 1);
    assert_eq!(recorder.skipped.borrow().as_slice(), &[(3, "Ghoul".to_string())]);
}

#[test]
fn malformed_line_aborts_before_any_write() {
    let conn = seeded();
    let text = "//Broken\n2 Wisp (se1)\ntwo Ghoul (se1)\n";
    let result = import_deck_list(&conn, text, None);
    match result {
        Err(ImportError::Parse(DeckListError::InvalidQuantity { line, token })) => {
            assert_eq!(line, 3);
            assert_eq!(token, "two");
        }
        other => panic!("expected invalid quantity, got {other:?}"),
    }
    assert_eq!(deck_count(&conn), 0);
}

#[test]
fn import_replaces_existing_deck_of_same_name() {
    let conn = seeded();
    let first = import_deck_list(&conn, "//Test\n2 Wisp\n", None).unwrap();
    let second = import_deck_list(&conn, "//Test\n1 Bell Tower\n", None).unwrap();

    assert_eq!(first.record.id, second.record.id);
    let lines = deck_cards(&conn, second.record.id).unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].card.name, "Bell Tower");
}

// Behavior change from the legacy importer: a repeated card keeps the larger
// quantity instead of summing, and quantities above the cap are clamped.
#[test]
fn repeated_entries_keep_the_larger_quantity() {
    let conn = seeded();
    let text = "//Dupes\n1 Wisp\n2 Wisp\n1 Wisp\n";
    let outcome = import_deck_list(&conn, text, None).unwrap();
    assert_eq!(outcome.deck.quantity_of("Wisp"), 2);
    assert_eq!(outcome.deck.total(), 2);
}

// Behavior change from the legacy importer: statistics move by the quantity
// actually applied to the line, so they always agree with the lines.
#[test]
fn oversized_quantities_are_clamped_and_stats_stay_consistent() {
    let conn = seeded();
    let text = "//Big\n5 Ghoul\n3 Drowned Choir\n";
    let outcome = import_deck_list(&conn, text, None).unwrap();
    let stats = outcome.deck.stats();
    assert_eq!(stats.total, 4);
    assert!(stats.is_consistent());
    assert_eq!(stats.madness_curve, [0, 0, 0, 2, 2, 0]);

    let analysis = analyze_deck(&conn, outcome.record.id).unwrap().unwrap();
    assert_eq!(&analysis.stats, stats);
}

#[test]
fn zero_quantity_entries_contribute_nothing() {
    let conn = seeded();
    let outcome = import_deck_list(&conn, "//Zero\n0 Wisp\n", None).unwrap();
    assert!(outcome.deck.is_empty());
    assert!(outcome.skipped.is_empty());
}

#[test]
fn missing_file_is_an_io_error() {
    let conn = seeded();
    let result = import_deck_file(&conn, std::path::Path::new("/nonexistent/deck.txt"), None);
    assert!(matches!(result, Err(ImportError::Io { .. })));
}
