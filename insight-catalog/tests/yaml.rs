use insight_catalog::{CardType, Region, YamlError, load_cards};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_yaml(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn load_cards_from_single_file() {
    let tmp = TempDir::new().unwrap();
    write_yaml(
        tmp.path(),
        "cards.yaml",
        r#"
- name: Wisp
  region: forest
  type: creature
  effect: "Flits between trees."
  power: 1
  madness: 1
- name: Drowned Choir
  region: fishing hamlet
  type: creature
  power: 4
  madness: 5
"#,
    );

    let cards = load_cards(&tmp.path().join("cards.yaml")).unwrap();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].name, "Wisp");
    assert_eq!(cards[0].region, Region::Forest);
    assert_eq!(cards[0].card_type, CardType::Creature);
    assert_eq!(cards[1].region, Region::FishingHamlet);
    assert_eq!(cards[1].effect, "");
    assert_eq!(cards[1].madness.value(), 5);
}

#[test]
fn load_cards_from_directory_in_file_name_order() {
    let tmp = TempDir::new().unwrap();
    write_yaml(
        tmp.path(),
        "b.yaml",
        "- { name: Lantern, region: dungeon, type: permanent, madness: 2 }\n",
    );
    write_yaml(
        tmp.path(),
        "a.yml",
        "- { name: Bell Toll, region: church, type: event, madness: 3 }\n",
    );
    write_yaml(tmp.path(), "notes.txt", "not yaml");

    let cards = load_cards(tmp.path()).unwrap();
    let names: Vec<_> = cards.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Bell Toll", "Lantern"]);
}

#[test]
fn madness_out_of_range_is_a_parse_error() {
    let tmp = TempDir::new().unwrap();
    write_yaml(
        tmp.path(),
        "bad.yaml",
        "- { name: Abyss, region: dungeon, type: event, madness: 9 }\n",
    );

    let err = load_cards(&tmp.path().join("bad.yaml")).unwrap_err();
    assert!(matches!(err, YamlError::Parse { .. }));
}

#[test]
fn unknown_region_is_a_parse_error() {
    let tmp = TempDir::new().unwrap();
    write_yaml(
        tmp.path(),
        "bad.yaml",
        "- { name: Abyss, region: swamp, type: event, madness: 1 }\n",
    );

    assert!(matches!(
        load_cards(&tmp.path().join("bad.yaml")),
        Err(YamlError::Parse { .. })
    ));
}

#[test]
fn duplicate_names_across_files_are_rejected() {
    let tmp = TempDir::new().unwrap();
    write_yaml(
        tmp.path(),
        "a.yaml",
        "- { name: Wisp, region: forest, type: creature, madness: 1 }\n",
    );
    write_yaml(
        tmp.path(),
        "b.yaml",
        "- { name: WISP, region: town, type: event, madness: 0 }\n",
    );

    match load_cards(tmp.path()) {
        Err(YamlError::DuplicateCard { name, .. }) => assert_eq!(name, "WISP"),
        other => panic!("expected duplicate error, got {:?}", other),
    }
}

#[test]
fn missing_path_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nonexistent");
    assert!(matches!(load_cards(&missing), Err(YamlError::NotFound(_))));
}

#[test]
fn empty_file_yields_no_cards() {
    let tmp = TempDir::new().unwrap();
    write_yaml(tmp.path(), "empty.yaml", "\n");
    assert!(load_cards(&tmp.path().join("empty.yaml")).unwrap().is_empty());
}
