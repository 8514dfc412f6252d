//! End-to-end encounter scenarios against in-memory content.

mod common;

use battle_core::{
    ActionError, BaseStats, BattleConfig, BattleResult, BattleSession, Combatant, Element,
    Encounter, EncounterKind, EnemyTemplate, FishTemplate, IllegalState, InvalidAction, Move,
    MoveCategory, MoveEffect, Party, PcgRng, PlayerAction, Power, Rewards, StatusKind,
};
use common::{Constant, library};

fn contains(lines: &[String], needle: &str) -> bool {
    lines.iter().any(|line| line.contains(needle))
}

// ================================================================
// Settlement
// ================================================================

#[test]
fn victory_grants_rewards_once() {
    let lib = library();
    let config = BattleConfig::deterministic();
    let rng = Constant(0);
    let env = lib.env(&rng, &config);

    let mut party = Party::new(vec![lib.spawn_fish("carp", 1)]).with_currency(50);
    let encounter = Encounter::new(1)
        .enemy(&env, "minnow", 1)
        .expect("minnow exists")
        .with_bonus(Rewards {
            experience: 5,
            currency: 5,
            items: vec!["bread".into()],
        });
    let mut session = BattleSession::start(&config, &party, encounter);
    assert_eq!(session.result(), BattleResult::Ongoing);

    let report = session
        .submit(&env, &mut party, PlayerAction::attack(0))
        .expect("attack is valid");
    assert_eq!(report.result, BattleResult::Victory);
    assert!(contains(&report.lines, "Carp used Splash! (10 damage)"));
    assert!(contains(&report.lines, "Minnow was defeated!"));
    assert!(contains(&report.lines, "Victory!"));
    assert!(!contains(&report.lines, "Minnow used"));

    assert_eq!(party.currency, 70);
    assert_eq!(party.experience, 35);
    assert_eq!(party.wins, 1);
    assert_eq!(party.inventory.get("bread"), Some(&1));
    // the fish learns from the damage it dealt
    assert_eq!(party.fish[0].experience(), 10);

    let again = session
        .submit(&env, &mut party, PlayerAction::attack(0))
        .expect("settled sessions accept submissions");
    assert_eq!(again.result, BattleResult::Victory);
    assert!(again.lines.is_empty());
    assert_eq!(party.currency, 70);
    assert_eq!(party.wins, 1);
    assert_eq!(party.inventory.get("bread"), Some(&1));
}

#[test]
fn defeat_applies_penalty_once() {
    let lib = library();
    let config = BattleConfig::deterministic();
    let rng = Constant(0);
    let env = lib.env(&rng, &config);

    let mut party = Party::new(vec![lib.spawn_fish("sprat", 1)]).with_currency(100);
    let encounter = Encounter::new(2).enemy(&env, "brute", 1).expect("brute exists");
    let mut session = BattleSession::start(&config, &party, encounter);

    let report = session
        .submit(&env, &mut party, PlayerAction::attack(1))
        .expect("attack is valid");
    assert_eq!(report.result, BattleResult::Defeat);
    assert!(report.lines[0].starts_with("Brute used Crush!"));
    assert!(contains(&report.lines, "Sprat fainted!"));
    assert!(contains(&report.lines, "All your fish have fainted!"));
    assert!(!contains(&report.lines, "Sprat used"));

    assert_eq!(party.currency, 90);
    assert_eq!(party.losses, 1);
    // retreat revives fainted fish at half health
    assert_eq!(party.fish[0].hp(), 5);
    // 10 damage taken at 0.2 plus 10 for the faint
    assert!((party.meter - 12.0).abs() < 1e-9);

    let again = session
        .submit(&env, &mut party, PlayerAction::attack(0))
        .expect("settled sessions accept submissions");
    assert_eq!(again.result, BattleResult::Defeat);
    assert!(again.lines.is_empty());
    assert_eq!(party.currency, 90);
    assert_eq!(party.losses, 1);

    assert_eq!(
        session.validate(&env, &party, &PlayerAction::attack(0)),
        Err(ActionError::IllegalState(IllegalState::Settled(BattleResult::Defeat)))
    );
}

#[test]
fn empty_rosters_settle_immediately_without_payout() {
    let lib = library();
    let config = BattleConfig::deterministic();
    let rng = Constant(0);
    let env = lib.env(&rng, &config);

    let mut nobody = Party::new(Vec::new()).with_currency(40);
    let encounter = Encounter::new(0).enemy(&env, "minnow", 1).expect("minnow exists");
    let mut session = BattleSession::start(&config, &nobody, encounter);
    assert_eq!(session.result(), BattleResult::Defeat);
    let report = session
        .submit(&env, &mut nobody, PlayerAction::Flee)
        .expect("settled sessions accept submissions");
    assert!(report.lines.is_empty());
    assert_eq!(nobody.currency, 40);
    assert_eq!(nobody.losses, 0);

    let party = Party::new(vec![lib.spawn_fish("carp", 1)]);
    let session = BattleSession::start(&config, &party, Encounter::new(0));
    assert_eq!(session.result(), BattleResult::Victory);
    assert_eq!(party.wins, 0);
}

// ================================================================
// Fleeing
// ================================================================

#[test]
fn boss_flee_is_rejected_without_a_draw() {
    let lib = library();
    let config = BattleConfig::new();
    let rng = PcgRng;
    let env = lib.env(&rng, &config);

    let mut party = Party::new(vec![lib.spawn_fish("carp", 1)]);
    let encounter = Encounter::new(3).boss(&env, "steward", 1).expect("boss exists");
    assert_eq!(encounter.kind(), EncounterKind::Boss);
    let mut session = BattleSession::start(&config, &party, encounter);

    let intro = session.log().lines();
    assert_eq!(intro[0], "Steward, Master of the Feast, appears!");
    assert_eq!(intro[1], "Steward: Who dares disturb the banquet?");
    assert_eq!(intro[2], "Go, Carp!");
    assert!(!session.snapshot().can_flee);

    let err = session
        .submit(&env, &mut party, PlayerAction::Flee)
        .expect_err("boss battles cannot be fled");
    assert_eq!(err, ActionError::IllegalState(IllegalState::FleeDisallowed));
    assert_eq!(session.draws(), 0);
    assert_eq!(session.round(), 0);
    assert_eq!(session.result(), BattleResult::Ongoing);
    assert_eq!(
        session.log().lines().last().map(String::as_str),
        Some("Cannot do that: can't escape from a boss battle.")
    );
}

#[test]
fn fast_fish_escapes_regular_encounter() {
    let lib = library();
    let config = BattleConfig::deterministic();
    let rng = Constant(0);
    let env = lib.env(&rng, &config);

    let mut party = Party::new(vec![lib.spawn_fish("carp", 1)]).with_currency(10);
    let encounter = Encounter::new(4).enemy(&env, "minnow", 1).expect("minnow exists");
    let mut session = BattleSession::start(&config, &party, encounter);

    let report = session
        .submit(&env, &mut party, PlayerAction::Flee)
        .expect("flee is allowed");
    assert_eq!(report.result, BattleResult::Fled);
    assert_eq!(report.lines, vec!["Got away safely!".to_owned()]);
    assert_eq!(session.draws(), 1);
    assert_eq!(party.currency, 10);
    assert_eq!((party.wins, party.losses), (0, 0));
}

// ================================================================
// Boss phases
// ================================================================

#[test]
fn boss_phase_transition_fires_once() {
    let lib = library();
    let config = BattleConfig::deterministic();
    let rng = Constant(0);
    let env = lib.env(&rng, &config);

    let mut party = Party::new(vec![lib.spawn_fish("tilapia", 1)]);
    let encounter = Encounter::new(5).boss(&env, "steward", 1).expect("boss exists");
    let mut session = BattleSession::start(&config, &party, encounter);

    let mut lines = Vec::new();
    for round in 1..=2 {
        let report = session
            .submit(&env, &mut party, PlayerAction::attack(0))
            .expect("attack is valid");
        assert_eq!(report.round, round);
        lines.extend(report.lines);
    }
    // 100 -> 70 -> 40, then healed by 10% on entering phase 2
    let boss = session.snapshot().active_opponent.expect("boss still standing");
    assert_eq!(boss.phase, Some(2));
    assert_eq!(boss.hp, 50);
    assert!(contains(&lines, "Steward: Bring out the reserve jars!"));

    for _ in 0..2 {
        let report = session
            .submit(&env, &mut party, PlayerAction::attack(0))
            .expect("attack is valid");
        lines.extend(report.lines);
    }
    assert_eq!(session.result(), BattleResult::Victory);
    let transitions = lines.iter().filter(|line| line.contains("enters phase")).count();
    assert_eq!(transitions, 1);
    assert!(contains(&lines, "Steward: The good wine... saved for last."));
    assert_eq!(party.wins, 1);
    // default boss rewards at level 1
    assert_eq!(party.currency, 15);
}

// ================================================================
// Ordering
// ================================================================

#[test]
fn priority_beats_speed() {
    let lib = library();
    let config = BattleConfig::deterministic();
    let rng = Constant(0);
    let env = lib.env(&rng, &config);

    let mut party = Party::new(vec![lib.spawn_fish("sprat", 1)]);
    let encounter = Encounter::new(6).enemy(&env, "brute", 1).expect("brute exists");
    let mut session = BattleSession::start(&config, &party, encounter);

    let report = session
        .submit(&env, &mut party, PlayerAction::attack(0))
        .expect("attack is valid");
    assert!(report.lines[0].starts_with("Sprat used Quick Jab!"));
    assert!(report.lines[1].starts_with("Brute used Crush!"));
}

#[test]
fn replacement_opponent_waits_a_round() {
    let lib = library();
    let config = BattleConfig::deterministic();
    let rng = Constant(0);
    let env = lib.env(&rng, &config);

    let mut party = Party::new(vec![lib.spawn_fish("carp", 1)]);
    let encounter = Encounter::new(7)
        .enemy(&env, "minnow", 1)
        .and_then(|encounter| encounter.enemy(&env, "watcher", 1))
        .expect("enemies exist");
    let mut session = BattleSession::start(&config, &party, encounter);

    let first = session
        .submit(&env, &mut party, PlayerAction::attack(0))
        .expect("attack is valid");
    assert_eq!(first.result, BattleResult::Ongoing);
    assert!(contains(&first.lines, "Watcher appears!"));
    assert!(!contains(&first.lines, "Watcher used"));

    let second = session
        .submit(&env, &mut party, PlayerAction::attack(0))
        .expect("attack is valid");
    assert!(contains(&second.lines, "Watcher used Glare!"));
}

// ================================================================
// Switching
// ================================================================

#[test]
fn switch_validation_and_execution() {
    let lib = library();
    let config = BattleConfig::deterministic();
    let rng = Constant(0);
    let env = lib.env(&rng, &config);

    let mut sprat = lib.spawn_fish("sprat", 1);
    sprat.take_damage(100);
    let mut party = Party::new(vec![
        lib.spawn_fish("carp", 1),
        lib.spawn_fish("tilapia", 1),
        sprat,
    ]);
    let encounter = Encounter::new(8).enemy(&env, "watcher", 1).expect("watcher exists");
    let mut session = BattleSession::start(&config, &party, encounter);

    assert_eq!(
        session.validate(&env, &party, &PlayerAction::Switch { roster_index: 0 }),
        Err(ActionError::from(InvalidAction::SwitchTargetActive {
            name: "Carp".into()
        }))
    );
    assert_eq!(
        session.validate(&env, &party, &PlayerAction::Switch { roster_index: 2 }),
        Err(ActionError::from(InvalidAction::SwitchTargetFainted {
            name: "Sprat".into()
        }))
    );
    assert_eq!(
        session.validate(&env, &party, &PlayerAction::Switch { roster_index: 9 }),
        Err(ActionError::from(InvalidAction::RosterOutOfRange { index: 9, len: 3 }))
    );

    let report = session
        .submit(&env, &mut party, PlayerAction::Switch { roster_index: 1 })
        .expect("switch is valid");
    assert_eq!(report.lines[0], "Come back, Carp! Go, Tilapia!");
    assert_eq!(session.active_fish_index(), 1);
}

#[test]
fn out_of_range_move_is_rejected_and_logged() {
    let lib = library();
    let config = BattleConfig::deterministic();
    let rng = Constant(0);
    let env = lib.env(&rng, &config);

    let mut party = Party::new(vec![lib.spawn_fish("carp", 1)]);
    let encounter = Encounter::new(9).enemy(&env, "watcher", 1).expect("watcher exists");
    let mut session = BattleSession::start(&config, &party, encounter);
    let before = session.log().len();

    let err = session
        .submit(&env, &mut party, PlayerAction::attack(5))
        .expect_err("carp knows two moves");
    assert_eq!(
        err,
        ActionError::InvalidAction(InvalidAction::MoveOutOfRange { index: 5, len: 2 })
    );
    assert_eq!(session.log().len(), before + 1);
    assert_eq!(session.round(), 0);
    assert_eq!(session.draws(), 0);
}

// ================================================================
// Accuracy and upkeep
// ================================================================

#[test]
fn missed_attack_spends_the_turn() {
    let lib = library()
        .with_move(
            Move::new("wild_splash", "Wild Splash", Element::Water, Power::Fixed(80))
                .with_accuracy(50),
        )
        .with_fish(FishTemplate::new(
            "flounder",
            "Flounder",
            Element::Water,
            BaseStats::new(100, 100, 10, 100),
            vec!["wild_splash".into()],
        ));
    let config = BattleConfig::deterministic();
    // every d100 comes up 100
    let rng = Constant(99);
    let env = lib.env(&rng, &config);

    let mut party = Party::new(vec![lib.spawn_fish("flounder", 1)]);
    let encounter = Encounter::new(60).enemy(&env, "watcher", 1).expect("watcher exists");
    let mut session = BattleSession::start(&config, &party, encounter);

    let report = session
        .submit(&env, &mut party, PlayerAction::attack(0))
        .expect("attack is valid");
    assert_eq!(report.lines[0], "Flounder used Wild Splash, but it missed!");
    assert!(contains(&report.lines, "Watcher used Glare!"));
    assert_eq!(report.round, 1);
    assert_eq!(report.result, BattleResult::Ongoing);
    assert_eq!(session.active_opponent().map(|o| o.hp()), Some(200));
    assert_eq!(party.fish[0].experience(), 0);
}

#[test]
fn poison_wipe_on_both_sides_is_a_victory() {
    let lib = library()
        .with_move(
            Move::new("venom", "Venom Fang", Element::Dark, Power::Fixed(1)).with_effect(
                MoveEffect::Inflict {
                    status: StatusKind::Poisoned,
                    chance: 100,
                },
            ),
        )
        .with_move(
            Move::new("stare", "Stare", Element::Normal, Power::Fixed(0))
                .with_category(MoveCategory::Status),
        )
        .with_fish(FishTemplate::new(
            "eel",
            "Eel",
            Element::Dark,
            BaseStats::new(80, 0, 0, 100),
            vec!["venom".into()],
        ))
        .with_enemy(EnemyTemplate::new(
            "mite",
            "Mite",
            Element::Normal,
            BaseStats::new(2, 0, 0, 1),
            vec!["stare".into()],
        ));
    let config = BattleConfig::deterministic();
    let rng = Constant(0);
    let env = lib.env(&rng, &config);

    let mut eel = lib.spawn_fish("eel", 1);
    let lost = eel.max_hp() - 1;
    eel.take_damage(lost);
    eel.apply_status(StatusKind::Poisoned, None);
    let mut party = Party::new(vec![eel]).with_currency(100);
    let encounter = Encounter::new(61).enemy(&env, "mite", 1).expect("mite exists");
    let mut session = BattleSession::start(&config, &party, encounter);

    let report = session
        .submit(&env, &mut party, PlayerAction::attack(0))
        .expect("attack is valid");
    assert!(contains(&report.lines, "Eel is hurt by poison! (1 damage)"));
    assert!(contains(&report.lines, "Mite is hurt by poison! (1 damage)"));
    assert!(contains(&report.lines, "Mite was defeated!"));
    assert!(contains(&report.lines, "Victory!"));
    assert!(!contains(&report.lines, "Eel fainted!"));
    assert_eq!(report.result, BattleResult::Victory);

    assert!(party.fish[0].is_fainted());
    assert_eq!(party.wins, 1);
    assert_eq!(party.losses, 0);
    // only the single point of damage dealt feeds the meter
    assert!(session.meter() < 1.0);
}

// ================================================================
// Determinism
// ================================================================

#[test]
fn same_seed_replays_identically() {
    let lib = library();
    let config = BattleConfig::new();
    let rng = PcgRng;
    let env = lib.env(&rng, &config);

    let play = || {
        let mut party = Party::new(vec![lib.spawn_fish("tilapia", 1)]);
        let encounter = Encounter::new(42).enemy(&env, "watcher", 1).expect("watcher exists");
        let mut session = BattleSession::start(&config, &party, encounter);
        for _ in 0..3 {
            session
                .submit(&env, &mut party, PlayerAction::attack(0))
                .expect("attack is valid");
        }
        (session.log().lines().to_vec(), session.draws())
    };

    assert_eq!(play(), play());
}
