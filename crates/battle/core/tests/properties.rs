//! Property tests for damage and session invariants.

mod common;

use battle_core::{
    BattleConfig, BattleSession, Combatant, DamageParams, DamageRolls, Element, Encounter, Party,
    PcgRng, PlayerAction, calculate_damage,
};
use common::library;
use proptest::prelude::*;
use strum::IntoEnumIterator;

fn element() -> impl Strategy<Value = Element> {
    let all: Vec<Element> = Element::iter().collect();
    prop::sample::select(all)
}

fn action() -> impl Strategy<Value = PlayerAction> {
    prop_oneof![
        4 => (0usize..3).prop_map(PlayerAction::attack),
        2 => (0usize..4).prop_map(|roster_index| PlayerAction::Switch { roster_index }),
        1 => Just(PlayerAction::use_item("bread")),
        1 => Just(PlayerAction::Flee),
    ]
}

proptest! {
    #[test]
    fn damage_is_at_least_one(
        power in 0u32..500,
        attack in 0u32..1_000,
        defense in 0u32..5_000,
        critical in any::<bool>(),
        variance in 0.0f64..=1.5,
        attacker in element(),
        move_element in element(),
        defender in element(),
    ) {
        let params = DamageParams {
            attack,
            attacker_element: attacker,
            move_element,
            defense,
            defender_element: defender,
        };
        let rolls = DamageRolls { power, critical, variance };
        let result = calculate_damage(&params, rolls, &BattleConfig::new());
        prop_assert!(result.damage >= 1);
    }

    #[test]
    fn stronger_defense_never_increases_damage(
        power in 0u32..300,
        attack in 0u32..300,
        defense in 0u32..300,
        extra in 1u32..300,
    ) {
        let config = BattleConfig::deterministic();
        let base = DamageParams {
            attack,
            attacker_element: Element::Normal,
            move_element: Element::Normal,
            defense,
            defender_element: Element::Normal,
        };
        let tougher = DamageParams { defense: defense + extra, ..base };
        let soft = calculate_damage(&base, DamageRolls::flat(power), &config);
        let hard = calculate_damage(&tougher, DamageRolls::flat(power), &config);
        prop_assert!(hard.damage <= soft.damage);
    }

    #[test]
    fn sessions_keep_hp_in_bounds_and_settle_once(
        seed in any::<u64>(),
        actions in prop::collection::vec(action(), 1..40),
    ) {
        let lib = library();
        let config = BattleConfig::new();
        let rng = PcgRng;
        let env = lib.env(&rng, &config);

        let mut party = Party::new(vec![
            lib.spawn_fish("carp", 3),
            lib.spawn_fish("tilapia", 2),
            lib.spawn_fish("sprat", 1),
        ])
        .with_currency(100)
        .with_item("bread", 3);
        let encounter = Encounter::new(seed)
            .enemy(&env, "brute", 1)
            .and_then(|encounter| encounter.enemy(&env, "minnow", 2))
            .expect("enemies exist");
        let mut session = BattleSession::start(&config, &party, encounter);

        let mut settled_at = None;
        for action in actions {
            let round = session.round();
            let outcome = session.submit(&env, &mut party, action);

            if outcome.is_err() || settled_at.is_some() {
                prop_assert_eq!(session.round(), round);
            }
            if let Some(result) = settled_at {
                prop_assert_eq!(session.result(), result);
            } else if session.result().is_terminal() {
                settled_at = Some(session.result());
            }

            for fish in session.fish() {
                prop_assert!(fish.hp() <= fish.max_hp());
            }
            for opponent in session.opponents() {
                prop_assert!(opponent.hp() <= opponent.max_hp());
                prop_assert!(!opponent.is_fainted());
            }
            prop_assert!((0.0..=100.0).contains(&session.meter()));
        }
    }
}
