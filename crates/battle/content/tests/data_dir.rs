//! Loading content from a data directory on disk.

use std::fs;
use std::path::Path;

use battle_content::ContentFactory;
use battle_core::{
    BattleConfig, BattleResult, BattleSession, Combatant, Element, EncounterKind, PlayerAction,
};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("write data file");
}

fn minimal_data_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    write(
        dir.path(),
        "moves.ron",
        r#"(moves: [(id: "splash", name: "Splash", element: Water, power: Fixed(40))])"#,
    );
    write(
        dir.path(),
        "fish.ron",
        r#"(fish: [(
            id: "carp",
            name: "Carp",
            element: Water,
            base_stats: (hp: 50, atk: 20, def: 5, spd: 20),
            moves: ["splash", "forgotten_move"],
        )])"#,
    );
    write(
        dir.path(),
        "enemies.ron",
        r#"(enemies: [(
            id: "minnow",
            name: "Minnow",
            base_stats: (hp: 5, atk: 1, def: 0, spd: 1),
        )])"#,
    );
    write(
        dir.path(),
        "items.ron",
        r#"(items: [(id: "pita", name: "Pita", effect: Heal(30))])"#,
    );
    write(
        dir.path(),
        "encounters.ron",
        r#"(encounters: [(id: "pond", enemies: [(id: "minnow", level: 1)])])"#,
    );
    write(
        dir.path(),
        "party.ron",
        r#"(fish: [(id: "carp", level: 1)], items: {"pita": 2})"#,
    );
    dir
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn optional_files_fall_back_to_defaults() {
    let dir = minimal_data_dir();
    let content = ContentFactory::new(dir.path())
        .load_oracles()
        .expect("minimal directory loads");

    assert_eq!(content.config(), &BattleConfig::default());
    assert_eq!(content.audit(), vec!["forgotten_move".to_string()]);
    assert_eq!(content.encounters().len(), 1);
    assert!(content.encounter("pond").is_some());
    assert!(content.encounter("desert").is_none());
}

#[test]
fn config_file_overrides_selected_keys() {
    let dir = minimal_data_dir();
    write(dir.path(), "config.toml", "crit_chance = 0.0\nlog_tail = 3\n");

    let content = ContentFactory::new(dir.path())
        .load_oracles()
        .expect("directory loads");
    assert_eq!(content.config().crit_chance, 0.0);
    assert_eq!(content.config().log_tail, 3);
    assert_eq!(content.config().revive_percent, BattleConfig::DEFAULT_REVIVE_PERCENT);
}

#[test]
fn missing_required_file_names_the_path() {
    let dir = minimal_data_dir();
    fs::remove_file(dir.path().join("items.ron")).expect("remove items");

    let err = ContentFactory::new(dir.path())
        .load_oracles()
        .expect_err("items are required");
    assert!(format!("{err:#}").contains("items.ron"));
}

#[test]
fn parse_errors_carry_the_file_name() {
    let dir = minimal_data_dir();
    write(dir.path(), "moves.ron", "(moves: [(id: \"broken\"");

    let err = ContentFactory::new(dir.path())
        .load_oracles()
        .expect_err("truncated catalog");
    assert!(format!("{err:#}").contains("moves.ron"));
}

// ============================================================================
// Playing
// ============================================================================

#[test]
fn loaded_content_drives_a_session() {
    let dir = minimal_data_dir();
    let content = ContentFactory::new(dir.path())
        .load_oracles()
        .expect("directory loads");
    let env = content.env();

    let mut party = content
        .party()
        .build(&content, &content)
        .expect("party templates exist");
    let carp = &party.fish[0];
    assert_eq!(carp.element(), Element::Water);
    // the unknown move id degrades to the generic strike
    assert_eq!(carp.moves().len(), 2);

    let encounter = content
        .encounter("pond")
        .expect("pond exists")
        .build(&env, 99)
        .expect("minnow exists");
    assert_eq!(encounter.kind(), EncounterKind::Regular);

    let mut session = BattleSession::start(content.config(), &party, encounter);
    for _ in 0..10 {
        if session.result().is_terminal() {
            break;
        }
        session
            .submit(&env, &mut party, PlayerAction::attack(0))
            .expect("attack is valid");
    }
    assert_eq!(session.result(), BattleResult::Victory);
    assert!(party.wins == 1);
}
