//! Scripted player that drives a session to completion.
//!
//! # Core Functions
//!
//! - [`choose_action`]: pick the next action from the session state
//! - [`play`]: run one encounter, printing each round's narration

use std::io::Write;

use anyhow::Result;
use battle_core::{
    BattleEnv, BattleResult, BattleSession, Combatant, ConsumableEffect, Encounter, Party,
    PlayerAction, PlayerAggregate,
};

/// Active fish below this share of max HP gets fed before attacking.
const HEAL_BELOW_PERCENT: u32 = 35;

/// Candidate actions in priority order; the first valid one is played.
///
/// 1. Revive a fainted fish
/// 2. Heal the active fish when it is low
/// 3. Perform an unlocked miracle
/// 4. Call a recruited ally
/// 5. Attack with the strongest usable move
pub fn choose_action(session: &BattleSession, env: &BattleEnv<'_>, party: &Party) -> PlayerAction {
    let mut candidates = Vec::new();

    let held: Vec<(String, ConsumableEffect)> = party
        .inventory
        .keys()
        .filter_map(|id| env.items().item(id).map(|item| (id.clone(), item.effect)))
        .collect();

    if let Some(fainted) = session.fish().iter().position(|fish| fish.is_fainted()) {
        for (id, effect) in &held {
            if matches!(effect, ConsumableEffect::Revive(_)) {
                candidates.push(PlayerAction::UseItem {
                    item_id: id.clone(),
                    target: Some(fainted),
                });
            }
        }
    }

    if let Some(active) = session.active_fish()
        && active.hp() * 100 < active.max_hp() * HEAL_BELOW_PERCENT
    {
        for (id, effect) in &held {
            if matches!(
                effect,
                ConsumableEffect::Heal(_)
                    | ConsumableEffect::HealPercent(_)
                    | ConsumableEffect::HealAndCure(_)
            ) {
                candidates.push(PlayerAction::use_item(id.clone()));
            }
        }
    }

    for kind in &party.miracles {
        candidates.push(PlayerAction::Miracle { kind: *kind });
    }
    for ally in &party.allies {
        candidates.push(PlayerAction::AllyAbility { ally: *ally });
    }

    if let Some(active) = session.active_fish() {
        let mut moves: Vec<(usize, u32)> = active
            .moves()
            .iter()
            .enumerate()
            .filter(|(_, mv)| mv.deals_damage())
            .map(|(index, mv)| (index, mv.power.max()))
            .collect();
        moves.sort_by(|a, b| b.1.cmp(&a.1));
        candidates.extend(moves.into_iter().map(|(index, _)| PlayerAction::attack(index)));
    }

    candidates
        .into_iter()
        .find(|action| session.validate(env, party, action).is_ok())
        .unwrap_or(PlayerAction::attack(0))
}

/// Play `encounter` for at most `max_rounds`, writing narration to `out`.
///
/// Returns the final result; `Ongoing` means the round limit was reached.
pub fn play<W: Write>(
    env: &BattleEnv<'_>,
    party: &mut Party,
    encounter: Encounter,
    max_rounds: u32,
    out: &mut W,
) -> Result<BattleResult> {
    let mut session = BattleSession::start(env.config(), party, encounter);
    for line in session.log().lines() {
        writeln!(out, "{line}")?;
    }

    while !session.result().is_terminal() && session.round() < max_rounds {
        let action = choose_action(&session, env, party);
        tracing::debug!(round = session.round() + 1, action = action.kind_name(), "autopilot");

        match session.submit(env, party, action) {
            Ok(report) => {
                writeln!(out)?;
                writeln!(out, "-- Round {} --", report.round)?;
                for line in &report.lines {
                    writeln!(out, "{line}")?;
                }
            }
            Err(err) => {
                // validate passed a moment ago, so only a fallback attack lands here
                tracing::warn!(error = %err, "autopilot action rejected");
                break;
            }
        }
    }

    let result = session.result();
    if !result.is_terminal() {
        tracing::warn!(rounds = session.round(), "round limit reached");
        writeln!(out, "The battle drags on; both sides withdraw.")?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "Result: {result} after {} rounds. Denarii: {}. Meter: {:.1}.",
        session.round(),
        party.currency(),
        party.miracle_meter()
    )?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_content::ContentOracles;

    fn builtin() -> ContentOracles {
        ContentOracles::builtin().expect("embedded data parses")
    }

    #[test]
    fn every_builtin_encounter_runs_to_the_limit_or_an_end() {
        let content = builtin();
        let env = content.env();
        for spec in content.encounters() {
            let mut party = content
                .party()
                .build(&content, &content)
                .expect("party templates exist");
            let encounter = spec.build(&env, 42).expect("encounter templates exist");
            let mut out = Vec::new();
            let result = play(&env, &mut party, encounter, 30, &mut out).expect("writes to a vec");

            let text = String::from_utf8(out).expect("utf-8 narration");
            assert!(text.contains("Result:"), "{} printed a summary", spec.id);
            assert_ne!(result, BattleResult::Fled);
        }
    }

    #[test]
    fn same_seed_narrates_identically() {
        let content = builtin();
        let env = content.env();
        let spec = &content.encounters()[0];

        let run = || {
            let mut party = content.party().build(&content, &content).expect("party");
            let encounter = spec.build(&env, 7).expect("encounter");
            let mut out = Vec::new();
            play(&env, &mut party, encounter, 30, &mut out).expect("play");
            out
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn low_fish_is_fed_first() {
        let content = builtin();
        let env = content.env();
        let mut party = content.party().build(&content, &content).expect("party");
        let lost = party.fish[0].max_hp() - 1;
        party.fish[0].take_damage(lost);
        party.allies.clear();
        party.miracles.clear();

        let encounter = content.encounters()[0].build(&env, 3).expect("encounter");
        let session = BattleSession::start(env.config(), &party, encounter);
        let action = choose_action(&session, &env, &party);
        assert!(matches!(action, PlayerAction::UseItem { target: None, .. }));
    }
}
