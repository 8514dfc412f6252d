//! Snapshot wire shape for presentation layers.

mod common;

use battle_core::{BattleConfig, BattleSession, Encounter, Party, PlayerAction};
use common::{Constant, library};

#[test]
fn snapshot_serializes_for_presentation() {
    let lib = library();
    let config = BattleConfig::deterministic();
    let rng = Constant(0);
    let env = lib.env(&rng, &config);

    let party = Party::new(vec![lib.spawn_fish("carp", 1)]);
    let encounter = Encounter::new(1).enemy(&env, "watcher", 1).expect("watcher exists");
    let session = BattleSession::start(&config, &party, encounter);

    let json = serde_json::to_value(session.snapshot()).expect("snapshot serializes");
    assert_eq!(json["round"], 0);
    assert_eq!(json["active_fish"]["name"], "Carp");
    assert_eq!(json["opponents"][0]["hp"], 200);
    assert_eq!(json["can_flee"], true);
}

#[test]
fn snapshot_tracks_the_round_and_log_tail() {
    let lib = library();
    let config = BattleConfig::deterministic();
    let rng = Constant(0);
    let env = lib.env(&rng, &config);

    let mut party = Party::new(vec![lib.spawn_fish("carp", 1)]);
    let encounter = Encounter::new(2).enemy(&env, "watcher", 1).expect("watcher exists");
    let mut session = BattleSession::start(&config, &party, encounter);
    session
        .submit(&env, &mut party, PlayerAction::attack(0))
        .expect("attack is valid");

    let json = serde_json::to_value(session.snapshot()).expect("snapshot serializes");
    assert_eq!(json["round"], 1);
    assert_eq!(json["opponents"][0]["hp"], 92);
    let tail = json["recent_log"].as_array().expect("log tail is a list");
    assert!(!tail.is_empty() && tail.len() <= BattleConfig::DEFAULT_LOG_TAIL);
}
