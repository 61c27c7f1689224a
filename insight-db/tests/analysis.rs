use insight_catalog::*;
use insight_db::*;
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
            definition("Ghoul", Region::Graveyard, CardType::Creature, 1),
            definition("Sexton", Region::Church, CardType::Creature, 1),
        ],
    )
    .unwrap();
    conn
}

fn build(conn: &Connection, name: &str, cards: &[(&str, u32)]) -> DeckAggregate {
    let mut deck = DeckAggregate::new(name);
    for (card, qty) in cards {
        let card = find_card_by_name(conn, card).unwrap().unwrap();
        deck.add_card(&card, *qty);
    }
    deck
}

#[test]
fn analysis_matches_in_memory_statistics() {
    let conn = seeded();
    let deck = build(
        &conn,
        "Test",
        &[("Ghoul", 2), ("Wisp", 1), ("Bell Tower", 2), ("Sexton", 1), ("Drowned Choir", 1)],
    );
    let record = save_deck(&conn, &deck).unwrap();

    let analysis = analyze_deck(&conn, record.id).unwrap().unwrap();
    assert_eq!(analysis.record, record);
    assert_eq!(&analysis.stats, deck.stats());
    assert!(analysis.stats.is_consistent());
    assert_eq!(analysis.stats.total, 7);
    assert_eq!(analysis.stats.by_type.get(CardType::Creature), 4);
    assert_eq!(analysis.stats.madness_curve, [0, 4, 2, 0, 1, 0]);
}

#[test]
fn regions_present_follow_catalog_order() {
    let conn = seeded();
    let deck = build(&conn, "Test", &[("Sexton", 1), ("Ghoul", 1), ("Wisp", 1)]);
    let record = save_deck(&conn, &deck).unwrap();

    let analysis = analyze_deck(&conn, record.id).unwrap().unwrap();
    assert_eq!(
        analysis.regions_present,
        vec![Region::Forest, Region::Graveyard, Region::Church]
    );
}

#[test]
fn empty_deck_analyzes_to_zero() {
    let conn = seeded();
    let record = save_deck(&conn, &DeckAggregate::new("Empty")).unwrap();
    let analysis = analyze_deck(&conn, record.id).unwrap().unwrap();
    assert_eq!(analysis.stats, DeckStats::default());
    assert!(analysis.regions_present.is_empty());
}

#[test]
fn unknown_deck_analyzes_to_none() {
    let conn = seeded();
    assert!(analyze_deck(&conn, 12).unwrap().is_none());
    assert!(load_deck(&conn, 12).unwrap().is_none());
}

#[test]
fn hydrate_rebuilds_the_saved_aggregate() {
    let conn = seeded();
    let mut deck = build(&conn, "Test", &[("Wisp", 2), ("Drowned Choir", 1)]);
    let record = save_deck(&conn, &deck).unwrap();
    deck.set_id(record.id);

    let loaded = load_deck(&conn, record.id).unwrap().unwrap();
    assert_eq!(loaded, deck);
}

#[test]
fn hydrate_clamps_externally_written_quantities() {
    let conn = seeded();
    let record = save_deck(&conn, &build(&conn, "Test", &[("Wisp", 1)])).unwrap();
    conn.execute(
        "UPDATE deck_cards SET quantity = 5 WHERE deck_id = ?1",
        [record.id],
    )
    .unwrap();

    let analysis = analyze_deck(&conn, record.id).unwrap().unwrap();
    assert_eq!(analysis.stats.total, 5);

    let deck = hydrate_deck(&conn, &analysis).unwrap();
    assert_eq!(deck.total(), 2);
    assert!(deck.stats().is_consistent());
}
