use insight_catalog::*;
use insight_db::*;
use rusqlite::Connection;

fn definition(
    name: &str,
    region: Region,
    card_type: CardType,
    effect: &str,
    power: i64,
    madness: i64,
) -> CardDefinition {
    CardDefinition {
        name: name.to_string(),
        region,
        card_type,
        effect: effect.to_string(),
        power,
        madness: Madness::new(madness).unwrap(),
    }
}

fn catalog() -> Vec<CardDefinition> {
    vec![
        definition("Wisp", Region::Forest, CardType::Creature, "Gains 1 power at night.", 1, 1),
        definition("Wisp Lantern", Region::Town, CardType::Permanent, "Creatures gain 1 power.", 0, 0),
        definition("Bell Tower", Region::Church, CardType::Permanent, "Draw a card.", 0, 2),
        definition("Drowned Choir", Region::FishingHamlet, CardType::Event, "Each player discards.", 0, 4),
        definition("Ghoul", Region::Graveyard, CardType::Creature, "", 3, 3),
        definition("Lecturer", Region::Academy, CardType::Creature, "Draw a card.", 2, 5),
        definition("Jailer", Region::Dungeon, CardType::Creature, "", -1, 2),
        definition("Éclair Ardent", Region::Academy, CardType::Event, "Étourdit chaque créature.", 0, 1),
    ]
}

fn seeded() -> Connection {
    let conn = open_memory().unwrap();
    seed_cards(&conn, &catalog()).unwrap();
    conn
}

fn names(cards: &[Card]) -> Vec<&str> {
    cards.iter().map(|c| c.name.as_str()).collect()
}

// ── Card lookup ─────────────────────────────────────────────────────────────

#[test]
fn find_card_ignores_case_and_whitespace() {
    let conn = seeded();
    let card = find_card_by_name(&conn, "  drowned CHOIR ").unwrap().unwrap();
    assert_eq!(card.name, "Drowned Choir");
    assert_eq!(card.region, Region::FishingHamlet);
    assert_eq!(card.card_type, CardType::Event);
    assert_eq!(card.madness.value(), 4);

    let card = find_card_by_name(&conn, " éCLAIR ardent").unwrap().unwrap();
    assert_eq!(card.name, "Éclair Ardent");
}

#[test]
fn find_card_requires_exact_name() {
    let conn = seeded();
    assert!(find_card_by_name(&conn, "Wis").unwrap().is_none());
}

// ── Filtering ───────────────────────────────────────────────────────────────

#[test]
fn empty_filter_lists_whole_catalog_in_insertion_order() {
    let conn = seeded();
    let cards = list_cards(&conn, &CardFilter::new()).unwrap();
    let expected: Vec<String> = catalog().into_iter().map(|d| d.name).collect();
    assert_eq!(names(&cards), expected);
}

#[test]
fn name_filter_is_case_insensitive_substring() {
    let conn = seeded();
    let cards = list_cards(&conn, &CardFilter::new().with_name("WISP")).unwrap();
    assert_eq!(names(&cards), vec!["Wisp", "Wisp Lantern"]);
}

#[test]
fn text_filters_fold_non_ascii_case() {
    let conn = seeded();
    let cards = list_cards(&conn, &CardFilter::new().with_name("éCL")).unwrap();
    assert_eq!(names(&cards), vec!["Éclair Ardent"]);
    let cards = list_cards(&conn, &CardFilter::new().with_effect("ÉTOURDIT")).unwrap();
    assert_eq!(names(&cards), vec!["Éclair Ardent"]);
}

#[test]
fn type_and_region_filters_are_sets() {
    let conn = seeded();
    let filter = CardFilter::new()
        .with_type(CardType::Creature)
        .with_region(Region::Forest)
        .with_region(Region::Graveyard);
    let cards = list_cards(&conn, &filter).unwrap();
    assert_eq!(names(&cards), vec!["Wisp", "Ghoul"]);
}

#[test]
fn effect_filter_matches_substring() {
    let conn = seeded();
    let cards = list_cards(&conn, &CardFilter::new().with_effect("draw a")).unwrap();
    assert_eq!(names(&cards), vec!["Bell Tower", "Lecturer"]);
}

#[test]
fn multiple_conditions_on_one_field_are_anded() {
    let conn = seeded();
    let filter = CardFilter::new()
        .with_madness(NumericCondition::new(Comparator::Greater, 1))
        .with_madness(NumericCondition::new(Comparator::Less, 4));
    let cards = list_cards(&conn, &filter).unwrap();
    assert_eq!(names(&cards), vec!["Bell Tower", "Ghoul", "Jailer"]);
}

#[test]
fn power_condition_handles_negative_values() {
    let conn = seeded();
    let filter = CardFilter::new().with_power(NumericCondition::new(Comparator::Less, 0));
    let cards = list_cards(&conn, &filter).unwrap();
    assert_eq!(names(&cards), vec!["Jailer"]);
}

#[test]
fn sql_filtering_agrees_with_in_memory_matching() {
    let conn = seeded();
    let all = list_cards(&conn, &CardFilter::new()).unwrap();
    let filters = [
        CardFilter::new().with_name("er"),
        CardFilter::new()
            .with_type(CardType::Permanent)
            .with_effect("card"),
        CardFilter::new()
            .with_region(Region::Academy)
            .with_region(Region::Dungeon)
            .with_power(NumericCondition::new(Comparator::Greater, 0)),
        CardFilter::new().with_madness(NumericCondition::new(Comparator::Equal, 2)),
        CardFilter::new().with_name("zzz"),
        CardFilter::new().with_name("ÉCLAIR"),
        CardFilter::new().with_effect("créature"),
    ];
    for filter in filters {
        let from_sql = list_cards(&conn, &filter).unwrap();
        let in_memory: Vec<Card> = all.iter().filter(|c| filter.matches(c)).cloned().collect();
        assert_eq!(from_sql, in_memory, "mismatch for {filter:?}");
    }
}

#[test]
fn count_cards_counts_catalog() {
    let conn = seeded();
    assert_eq!(count_cards(&conn).unwrap(), 8);
}

// ── Decks ───────────────────────────────────────────────────────────────────

fn save(conn: &Connection, name: &str, cards: &[(&str, u32)]) -> DeckRecord {
    let mut deck = DeckAggregate::new(name);
    for (card, qty) in cards {
        let card = find_card_by_name(conn, card).unwrap().unwrap();
        deck.add_card(&card, *qty);
    }
    save_deck(conn, &deck).unwrap()
}

#[test]
fn resolve_deck_by_id_or_name() {
    let conn = seeded();
    let record = save(&conn, "Night Hunt", &[("Wisp", 2)]);

    let by_id = resolve_deck(&conn, &record.id.to_string()).unwrap().unwrap();
    assert_eq!(by_id, record);
    let by_name = resolve_deck(&conn, " Night Hunt ").unwrap().unwrap();
    assert_eq!(by_name, record);
    assert!(resolve_deck(&conn, "Day Hunt").unwrap().is_none());
}

#[test]
fn numeric_deck_name_falls_back_to_name_lookup() {
    let conn = seeded();
    let record = save(&conn, "1999", &[]);
    let resolved = resolve_deck(&conn, "1999").unwrap().unwrap();
    assert_eq!(resolved.id, record.id);
}

#[test]
fn deck_cards_returns_full_card_detail() {
    let conn = seeded();
    let record = save(&conn, "Test", &[("Ghoul", 1), ("Wisp", 2)]);
    let lines = deck_cards(&conn, record.id).unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].card.name, "Wisp");
    assert_eq!(lines[0].quantity, 2);
    assert_eq!(lines[1].card.name, "Ghoul");
    assert_eq!(lines[1].card.power, 3);
}

#[test]
fn list_decks_includes_empty_decks() {
    let conn = seeded();
    let a = save(
        &conn,
        "Church Bells",
        &[("Bell Tower", 2), ("Wisp", 1), ("Wisp Lantern", 1)],
    );
    let b = save(&conn, "Empty", &[]);
    register_outcome(&conn, a.id, true).unwrap();
    register_outcome(&conn, a.id, false).unwrap();
    register_outcome(&conn, a.id, false).unwrap();

    let decks = list_decks(&conn).unwrap();
    assert_eq!(decks.len(), 2);

    let first = &decks[0];
    assert_eq!(first.id, a.id);
    assert_eq!(first.card_count, 4);
    assert_eq!(
        first.regions,
        vec![Region::Church, Region::Town, Region::Forest]
    );
    assert_eq!(first.games, 3);
    assert_eq!(first.win_rate(), 33);

    let second = &decks[1];
    assert_eq!(second.id, b.id);
    assert_eq!(second.card_count, 0);
    assert!(second.regions.is_empty());
    assert_eq!(second.win_rate(), 0);
}

#[test]
fn win_rate_handles_large_records() {
    let summary = DeckSummary {
        id: 1,
        name: "Marathon".to_string(),
        regions: Vec::new(),
        card_count: 0,
        wins: 3_000_000_000,
        games: 4_000_000_000,
    };
    assert_eq!(summary.win_rate(), 75);
}
