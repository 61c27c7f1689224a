use insight_catalog::*;
use insight_db::*;
use rusqlite::Connection;

fn definition(name: &str, region: Region, card_type: CardType, power: i64, madness: i64) -> CardDefinition {
    CardDefinition {
        name: name.to_string(),
        region,
        card_type,
        effect: String::new(),
        power,
        madness: Madness::new(madness).unwrap(),
    }
}

fn seeded() -> Connection {
    let conn = open_memory().unwrap();
    seed_cards(
        &conn,
        &[
            definition("Wisp", Region::Forest, CardType::Creature, 1, 1),
            definition("Bell Tower", Region::Church, CardType::Permanent, 0, 2),
            definition("Drowned Choir", Region::FishingHamlet, CardType::Event, 0, 4),
            definition("Ghoul", Region::Graveyard, CardType::Creature, 3, 3),
        ],
    )
    .unwrap();
    conn
}

fn card(conn: &Connection, name: &str) -> Card {
    find_card_by_name(conn, name).unwrap().unwrap()
}

fn stored_lines(conn: &Connection, deck_id: i64) -> Vec<(i64, u32)> {
    let mut stmt = conn
        .prepare("SELECT card_id, quantity FROM deck_cards WHERE deck_id = ?1 ORDER BY card_id")
        .unwrap();
    stmt.query_map([deck_id], |row| Ok((row.get(0)?, row.get(1)?)))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

// ── save_deck ───────────────────────────────────────────────────────────────

#[test]
fn save_creates_deck_row_with_zero_record() {
    let conn = seeded();
    let mut deck = DeckAggregate::new("Test");
    deck.add_card(&card(&conn, "Wisp"), 2);

    let record = save_deck(&conn, &deck).unwrap();
    assert_eq!(record.name, "Test");
    assert_eq!(record.wins, 0);
    assert_eq!(record.games, 0);

    let wisp = card(&conn, "Wisp");
    assert_eq!(stored_lines(&conn, record.id), vec![(wisp.id, 2)]);
}

#[test]
fn second_save_fully_replaces_lines() {
    let conn = seeded();
    let mut first = DeckAggregate::new("Test");
    first.add_card(&card(&conn, "Wisp"), 2);
    first.add_card(&card(&conn, "Ghoul"), 1);
    let r1 = save_deck(&conn, &first).unwrap();

    let mut second = DeckAggregate::new("Test");
    second.add_card(&card(&conn, "Bell Tower"), 1);
    let r2 = save_deck(&conn, &second).unwrap();

    assert_eq!(r1.id, r2.id, "same name resolves to the same deck");
    let tower = card(&conn, "Bell Tower");
    assert_eq!(stored_lines(&conn, r2.id), vec![(tower.id, 1)]);
}

#[test]
fn saving_an_empty_deck_clears_lines() {
    let conn = seeded();
    let mut deck = DeckAggregate::new("Test");
    deck.add_card(&card(&conn, "Wisp"), 1);
    let record = save_deck(&conn, &deck).unwrap();

    deck.remove_card("wisp", 1).unwrap();
    save_deck(&conn, &deck).unwrap();
    assert!(stored_lines(&conn, record.id).is_empty());
}

#[test]
fn save_keeps_win_loss_record() {
    let conn = seeded();
    let mut deck = DeckAggregate::new("Test");
    deck.add_card(&card(&conn, "Wisp"), 1);
    let record = save_deck(&conn, &deck).unwrap();
    register_outcome(&conn, record.id, true).unwrap();

    deck.add_card(&card(&conn, "Ghoul"), 2);
    let record = save_deck(&conn, &deck).unwrap();
    assert_eq!((record.wins, record.games), (1, 1));
}

#[test]
fn failed_save_leaves_previous_lines() {
    let conn = seeded();
    let mut deck = DeckAggregate::new("Test");
    deck.add_card(&card(&conn, "Wisp"), 2);
    let record = save_deck(&conn, &deck).unwrap();

    // A card that is not in the catalog violates the foreign key on insert.
    let phantom = Card {
        id: 9999,
        name: "Phantom".to_string(),
        region: Region::Town,
        card_type: CardType::Event,
        effect: String::new(),
        power: 0,
        madness: Madness::new(0).unwrap(),
    };
    let mut broken = DeckAggregate::new("Test");
    broken.add_card(&phantom, 1);
    assert!(save_deck(&conn, &broken).is_err());

    let wisp = card(&conn, "Wisp");
    assert_eq!(stored_lines(&conn, record.id), vec![(wisp.id, 2)]);
}

// ── delete_deck ─────────────────────────────────────────────────────────────

#[test]
fn delete_removes_deck_and_lines() {
    let conn = seeded();
    let mut deck = DeckAggregate::new("Doomed");
    deck.add_card(&card(&conn, "Ghoul"), 2);
    let record = save_deck(&conn, &deck).unwrap();

    assert!(delete_deck(&conn, record.id).unwrap());
    assert!(find_deck(&conn, record.id).unwrap().is_none());
    assert!(stored_lines(&conn, record.id).is_empty());
}

#[test]
fn delete_unknown_deck_returns_false() {
    let conn = seeded();
    assert!(!delete_deck(&conn, 42).unwrap());
}

// ── register_outcome ────────────────────────────────────────────────────────

#[test]
fn register_outcome_counts_games_and_wins() {
    let conn = seeded();
    let record = save_deck(&conn, &DeckAggregate::new("Test")).unwrap();

    assert!(register_outcome(&conn, record.id, true).unwrap());
    assert!(register_outcome(&conn, record.id, false).unwrap());
    assert!(register_outcome(&conn, record.id, true).unwrap());

    let record = find_deck(&conn, record.id).unwrap().unwrap();
    assert_eq!(record.wins, 2);
    assert_eq!(record.games, 3);
}

#[test]
fn register_outcome_on_absent_deck_is_silent() {
    let conn = seeded();
    assert!(!register_outcome(&conn, 77, true).unwrap());
    let decks: i64 = conn
        .query_row("SELECT COUNT(*) FROM decks", [], |row| row.get(0))
        .unwrap();
    assert_eq!(decks, 0);
}

// ── Seeding ─────────────────────────────────────────────────────────────────

#[test]
fn seed_updates_existing_cards_in_place() {
    let conn = seeded();
    let before = card(&conn, "Ghoul");

    let stats = seed_cards(
        &conn,
        &[
            definition("ghoul", Region::Graveyard, CardType::Creature, 5, 3),
            definition("Lantern", Region::Town, CardType::Permanent, 0, 0),
        ],
    )
    .unwrap();
    assert_eq!(stats, SeedStats { inserted: 1, updated: 1 });

    let after = card(&conn, "Ghoul");
    assert_eq!(after.id, before.id);
    assert_eq!(after.power, 5);
    assert_eq!(count_cards(&conn).unwrap(), 5);
}

#[test]
fn seed_matches_non_ascii_names_ignoring_case() {
    let conn = open_memory().unwrap();
    seed_cards(
        &conn,
        &[definition("Éclair", Region::Academy, CardType::Event, 0, 1)],
    )
    .unwrap();
    let stats = seed_cards(
        &conn,
        &[definition("éclair", Region::Academy, CardType::Event, 2, 1)],
    )
    .unwrap();
    assert_eq!(stats, SeedStats { inserted: 0, updated: 1 });
    assert_eq!(count_cards(&conn).unwrap(), 1);
    assert_eq!(card(&conn, "ÉCLAIR").power, 2);
}

#[test]
fn seed_from_yaml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cards.yaml");
    std::fs::write(
        &path,
        "- name: Wisp\n  region: forest\n  type: creature\n  power: 1\n  madness: 1\n\
         - name: Drowned Choir\n  region: fishing hamlet\n  type: event\n  effect: Each player discards.\n  madness: 4\n",
    )
    .unwrap();

    let conn = open_memory().unwrap();
    let stats = seed_from_yaml(&conn, &path).unwrap();
    assert_eq!(stats.inserted, 2);

    let choir = card(&conn, "drowned choir");
    assert_eq!(choir.region, Region::FishingHamlet);
    assert_eq!(choir.effect, "Each player discards.");
    assert_eq!(choir.power, 0);
}

#[test]
fn seed_from_missing_yaml_is_an_error() {
    let conn = open_memory().unwrap();
    let result = seed_from_yaml(&conn, std::path::Path::new("/nonexistent/cards.yaml"));
    assert!(matches!(result, Err(OperationError::Seed(_))));
}
