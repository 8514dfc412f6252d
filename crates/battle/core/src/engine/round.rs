//! Round resolution: ordering, attacks, faints and end-of-round upkeep.

use arrayvec::ArrayVec;

use crate::combat::{
    AttackOutcome, DamageParams, DamageResult, calculate_damage, check_hit, hit_threshold,
    resolve_attack, roll_damage,
};
use crate::combatant::{Combatant, LevelUp, Move, MoveCategory, MoveEffect, TickReport};
use crate::config::BattleConfig;
use crate::env::{BattleEnv, RngOracle, RollCursor};
use crate::player::PlayerAggregate;
use crate::stats::{Stat, StatusKind};

use super::session::BattleSession;
use super::{BattleLog, BattleResult, Initiative, PlayerAction, Side, turn_order};

/// Whether a combatant gets to act this turn.
enum Readiness {
    Ready,
    Skip(String),
    HurtSelf,
}

/// Status gates checked before a combatant acts.
///
/// Paralysis and confusion each draw only while the status is present.
fn readiness(combatant: &dyn Combatant, cursor: &mut RollCursor, rng: &dyn RngOracle) -> Readiness {
    let name = combatant.name();
    if combatant.has_status(StatusKind::Frozen) {
        return Readiness::Skip(format!("{name} is frozen solid!"));
    }
    if combatant.has_status(StatusKind::Asleep) {
        return Readiness::Skip(format!("{name} is fast asleep."));
    }
    if combatant.has_status(StatusKind::Stunned) {
        return Readiness::Skip(format!("{name} is stunned and can't move!"));
    }
    if combatant.has_status(StatusKind::Paralyzed) && cursor.chance(rng, 0.5) {
        return Readiness::Skip(format!("{name} is paralyzed! It can't move!"));
    }
    if combatant.has_status(StatusKind::Confused) && cursor.chance(rng, 0.5) {
        return Readiness::HurtSelf;
    }
    Readiness::Ready
}

/// Accuracy check and damage for one move. Status moves only roll to hit.
fn strike(
    attacker: &dyn Combatant,
    defender: &dyn Combatant,
    mv: &Move,
    cursor: &mut RollCursor,
    rng: &dyn RngOracle,
    config: &BattleConfig,
) -> AttackOutcome {
    let threshold = hit_threshold(
        mv.accuracy,
        attacker.stat_multiplier(Stat::Accuracy),
        defender.stat_multiplier(Stat::Evasion),
    );
    if !mv.deals_damage() {
        if threshold < 100 && !check_hit(threshold, cursor.roll_d100(rng)) {
            return AttackOutcome::Miss;
        }
        return AttackOutcome::Hit(DamageResult {
            damage: 0,
            critical: false,
            effectiveness: 1.0,
        });
    }

    let params = DamageParams {
        attack: attacker.effective_stat(Stat::Atk),
        attacker_element: attacker.element(),
        move_element: mv.element,
        defense: defender.effective_stat(Stat::Def),
        defender_element: defender.element(),
    };
    resolve_attack(cursor, rng, &params, mv.power, threshold, config)
}

/// A confused combatant hits itself with a generic strike.
fn confusion_damage(
    combatant: &dyn Combatant,
    cursor: &mut RollCursor,
    rng: &dyn RngOracle,
    config: &BattleConfig,
) -> u32 {
    let mv = Move::generic_strike(combatant.base_stat(Stat::Atk));
    let params = DamageParams {
        attack: combatant.effective_stat(Stat::Atk),
        attacker_element: combatant.element(),
        move_element: mv.element,
        defense: combatant.effective_stat(Stat::Def),
        defender_element: combatant.element(),
    };
    let rolls = roll_damage(cursor, rng, mv.power, config);
    calculate_damage(&params, rolls, config).damage
}

fn hit_line(attacker: &str, mv: &Move, result: &DamageResult, dealt: u32) -> String {
    let mut line = format!("{attacker} used {}!", mv.name);
    if result.critical {
        line.push_str(" Critical hit!");
    }
    if result.is_super_effective() {
        line.push_str(" It's super effective!");
    } else if result.is_resisted() {
        line.push_str(" It's not very effective...");
    }
    if mv.deals_damage() {
        line.push_str(&format!(" ({dealt} damage)"));
    }
    line
}

pub(super) fn stat_label(stat: Stat) -> String {
    stat.as_ref().to_ascii_uppercase()
}

fn tick_lines(name: &str, report: &TickReport, log: &mut BattleLog) {
    for (kind, amount) in &report.damage {
        let source = match kind {
            StatusKind::Burned => "its burn",
            _ => "poison",
        };
        log.push(format!("{name} is hurt by {source}! ({amount} damage)"));
    }
    for kind in &report.expired {
        match kind {
            StatusKind::Immunity => log.push(format!("{name} is no longer protected.")),
            other => log.push(format!("{name} is no longer {other}.")),
        }
    }
    if report.expired_modifiers > 0 {
        log.push(format!("{name}'s stat changes wore off."));
    }
}

impl BattleSession {
    /// Play one validated action plus the opponent's reply.
    pub(super) fn play_round<P>(&mut self, env: &BattleEnv<'_>, player: &mut P, action: &PlayerAction)
    where
        P: PlayerAggregate + ?Sized,
    {
        let plan = self.plan_opponent(env.rng());
        let acting_fish = self.active_fish;

        let order = match (&plan, self.opponents.get(self.active_opponent)) {
            (Some((_, reply)), Some(opponent)) => {
                let fish = &self.fish[acting_fish];
                let priority = match action {
                    PlayerAction::Attack { move_index } => {
                        fish.moves().get(*move_index).map_or(0, |mv| mv.priority)
                    }
                    _ => 0,
                };
                turn_order(
                    Initiative {
                        priority,
                        speed: fish.effective_stat(Stat::Spd),
                    },
                    Initiative {
                        priority: reply.priority,
                        speed: opponent.effective_stat(Stat::Spd),
                    },
                )
            }
            _ => [Side::Player, Side::Opponent],
        };
        tracing::debug!(round = self.round, first = %order[0], "turn order");

        for side in order {
            if self.result.is_terminal() {
                return;
            }
            match side {
                Side::Player => self.player_turn(env, player, action, acting_fish),
                Side::Opponent => {
                    if let Some((serial, reply)) = &plan {
                        if *serial == self.opponent_serial {
                            self.opponent_turn(env, player, reply);
                        }
                    }
                }
            }
        }

        if !self.result.is_terminal() {
            self.end_of_round(env.config());
        }
    }

    /// The active opponent's move for this round, tagged with its serial.
    fn plan_opponent(&mut self, rng: &dyn RngOracle) -> Option<(u32, Move)> {
        let opponent = self.opponents.get_mut(self.active_opponent)?;
        let mut reply = opponent.choose_move(&mut self.cursor, rng);
        if opponent.has_status(StatusKind::Silenced) && reply.category != MoveCategory::Physical {
            reply = Move::generic_strike(opponent.base_stat(Stat::Atk));
        }
        Some((self.opponent_serial, reply))
    }

    fn player_turn<P>(
        &mut self,
        env: &BattleEnv<'_>,
        player: &mut P,
        action: &PlayerAction,
        acting_fish: usize,
    ) where
        P: PlayerAggregate + ?Sized,
    {
        match action {
            PlayerAction::Attack { move_index } => {
                if self.active_fish != acting_fish {
                    let line = format!("{} is no longer in battle.", self.fish[acting_fish].name());
                    self.log.push(line);
                    return;
                }
                self.fish_attack(env, player, *move_index);
            }
            PlayerAction::Switch { roster_index } => self.switch_to(*roster_index),
            PlayerAction::UseItem { item_id, target } => {
                let target = target.unwrap_or(self.active_fish);
                self.use_item(env, player, item_id, target);
            }
            PlayerAction::Flee => self.try_flee(env),
            PlayerAction::Miracle { kind } => self.perform_miracle(*kind),
            PlayerAction::AllyAbility { ally } => self.call_ally(env.config(), player, *ally),
        }
    }

    // ========================================================================
    // Attacks
    // ========================================================================

    fn fish_attack<P>(&mut self, env: &BattleEnv<'_>, player: &mut P, move_index: usize)
    where
        P: PlayerAggregate + ?Sized,
    {
        let (rng, config) = (env.rng(), env.config());
        let index = self.active_fish;
        let target = self.active_opponent;
        if target >= self.opponents.len() {
            return;
        }

        match readiness(&self.fish[index], &mut self.cursor, rng) {
            Readiness::Skip(line) => {
                self.log.push(line);
                return;
            }
            Readiness::HurtSelf => {
                self.hurt_self(Side::Player, config, rng);
                return;
            }
            Readiness::Ready => {}
        }

        let Some(mv) = self.fish[index].moves().get(move_index).cloned() else {
            return;
        };
        let outcome = strike(
            &self.fish[index],
            &self.opponents[target],
            &mv,
            &mut self.cursor,
            rng,
            config,
        );
        let AttackOutcome::Hit(result) = outcome else {
            let line = format!("{} used {}, but it missed!", self.fish[index].name(), mv.name);
            self.log.push(line);
            return;
        };

        let dealt = self.opponents[target].take_damage(result.damage);
        let line = hit_line(self.fish[index].name(), &mv, &result, dealt);
        self.log.push(line);
        if dealt > 0 {
            self.meter.add(dealt as f64 * config.meter_per_damage_dealt);
            let level_ups = self.fish[index].gain_experience(dealt);
            self.log_level_ups(index, &level_ups);
        }

        self.apply_move_effect(Side::Player, &mv, rng, player);
        self.resolve_opponent_faints();
        self.check_boss_phases();
    }

    fn opponent_turn<P>(&mut self, env: &BattleEnv<'_>, player: &mut P, mv: &Move)
    where
        P: PlayerAggregate + ?Sized,
    {
        let (rng, config) = (env.rng(), env.config());
        let index = self.active_opponent;
        let target = self.active_fish;
        if index >= self.opponents.len() {
            return;
        }

        match readiness(&self.opponents[index], &mut self.cursor, rng) {
            Readiness::Skip(line) => {
                self.log.push(line);
                return;
            }
            Readiness::HurtSelf => {
                self.hurt_self(Side::Opponent, config, rng);
                return;
            }
            Readiness::Ready => {}
        }

        let outcome = strike(
            &self.opponents[index],
            &self.fish[target],
            mv,
            &mut self.cursor,
            rng,
            config,
        );
        let AttackOutcome::Hit(result) = outcome else {
            let line = format!("{} used {}, but it missed!", self.opponents[index].name(), mv.name);
            self.log.push(line);
            return;
        };

        let taken = self.fish[target].take_damage(result.damage);
        let line = hit_line(self.opponents[index].name(), mv, &result, taken);
        self.log.push(line);
        self.meter.add(taken as f64 * config.meter_per_damage_taken);

        self.apply_move_effect(Side::Opponent, mv, rng, player);
        if self.fish[target].is_fainted() {
            self.on_fish_fainted(target, config);
        }
    }

    fn hurt_self(&mut self, side: Side, config: &BattleConfig, rng: &dyn RngOracle) {
        match side {
            Side::Player => {
                let index = self.active_fish;
                let fish = &mut self.fish[index];
                let damage = confusion_damage(&*fish, &mut self.cursor, rng, config);
                let dealt = fish.take_damage(damage);
                let line = format!("{} is confused! It hurt itself! ({dealt} damage)", fish.name());
                self.log.push(line);
                if self.fish[index].is_fainted() {
                    self.on_fish_fainted(index, config);
                }
            }
            Side::Opponent => {
                let index = self.active_opponent;
                let opponent = &mut self.opponents[index];
                let damage = confusion_damage(&*opponent, &mut self.cursor, rng, config);
                let dealt = opponent.take_damage(damage);
                let line = format!("{} is confused! It hurt itself! ({dealt} damage)", opponent.name());
                self.log.push(line);
                self.resolve_opponent_faints();
                self.check_boss_phases();
            }
        }
    }

    /// Secondary effect of a move that hit.
    fn apply_move_effect<P>(&mut self, user: Side, mv: &Move, rng: &dyn RngOracle, player: &mut P)
    where
        P: PlayerAggregate + ?Sized,
    {
        let Some(effect) = mv.effect else {
            return;
        };
        let (fish, opponent) = (self.active_fish, self.active_opponent);
        if opponent >= self.opponents.len() {
            return;
        }

        match effect {
            MoveEffect::Inflict { status, chance } => {
                if chance == 0 || (chance < 100 && !self.cursor.chance(rng, chance as f64 / 100.0)) {
                    return;
                }
                let target: &mut dyn Combatant = match user {
                    Side::Player => &mut self.opponents[opponent],
                    Side::Opponent => &mut self.fish[fish],
                };
                if target.is_fainted() {
                    return;
                }
                let line = if target.apply_status(status, None) {
                    format!("{} is now {status}!", target.name())
                } else {
                    format!("{} is unaffected.", target.name())
                };
                self.log.push(line);
            }
            MoveEffect::LowerTarget {
                stat,
                multiplier,
                turns,
            } => {
                let target: &mut dyn Combatant = match user {
                    Side::Player => &mut self.opponents[opponent],
                    Side::Opponent => &mut self.fish[fish],
                };
                if target.is_fainted() {
                    return;
                }
                target.apply_modifier(stat, multiplier, Some(turns));
                let line = format!("{}'s {} fell!", target.name(), stat_label(stat));
                self.log.push(line);
            }
            MoveEffect::RaiseSelf {
                stat,
                multiplier,
                turns,
            } => {
                let this: &mut dyn Combatant = match user {
                    Side::Player => &mut self.fish[fish],
                    Side::Opponent => &mut self.opponents[opponent],
                };
                this.apply_modifier(stat, multiplier, Some(turns));
                let line = format!("{}'s {} rose!", this.name(), stat_label(stat));
                self.log.push(line);
            }
            MoveEffect::StealCurrency(amount) => match user {
                Side::Player => {
                    self.pending.currency = self.pending.currency.saturating_add(amount);
                    let line = format!("{} snatched {amount} denarii!", self.fish[fish].name());
                    self.log.push(line);
                }
                Side::Opponent => {
                    let taken = player.remove_currency(amount);
                    if taken > 0 {
                        let line = format!("{} stole {taken} denarii!", self.opponents[opponent].name());
                        self.log.push(line);
                    }
                }
            },
        }
    }

    fn log_level_ups(&mut self, index: usize, level_ups: &[LevelUp]) {
        let name = self.fish[index].name().to_owned();
        for level_up in level_ups {
            self.log
                .push(format!("{name} grew to level {}!", level_up.level));
            for learned in &level_up.learned {
                self.log.push(format!("{name} learned {learned}!"));
            }
        }
    }

    // ========================================================================
    // Switching and fleeing
    // ========================================================================

    fn switch_to(&mut self, index: usize) {
        let available = index != self.active_fish
            && self.fish.get(index).is_some_and(|fish| !fish.is_fainted());
        if !available {
            self.log.push("The switch could not be made.");
            return;
        }
        let previous = self.active_fish;
        self.fish[previous].reset_stat_modifiers();
        self.active_fish = index;
        let line = format!(
            "Come back, {}! Go, {}!",
            self.fish[previous].name(),
            self.fish[index].name()
        );
        self.log.push(line);
    }

    fn try_flee(&mut self, env: &BattleEnv<'_>) {
        let config = env.config();
        let fish_speed = self.fish[self.active_fish].effective_stat(Stat::Spd) as f64;
        let opponent_speed = self
            .opponents
            .get(self.active_opponent)
            .map_or(1, |opponent| opponent.effective_stat(Stat::Spd))
            .max(1) as f64;
        let chance =
            config.flee_base_chance + config.flee_speed_weight * (fish_speed / opponent_speed - 1.0);

        if self.cursor.chance(env.rng(), chance) {
            self.log.push("Got away safely!");
            self.finish(BattleResult::Fled);
        } else {
            self.log.push("Couldn't escape!");
        }
    }

    // ========================================================================
    // Faints
    // ========================================================================

    /// Remove defeated opponents, bank their rewards and bring in the next.
    pub(super) fn resolve_opponent_faints(&mut self) {
        let before = self.opponents.len();
        let active_lost = self
            .opponents
            .get(self.active_opponent)
            .is_some_and(|opponent| opponent.is_fainted());

        let mut index = 0;
        while index < self.opponents.len() {
            if !self.opponents[index].is_fainted() {
                index += 1;
                continue;
            }
            let fallen = self.opponents.remove(index);
            self.log.push(format!("{} was defeated!", fallen.name()));
            self.pending.absorb(fallen.rewards());
            if let Some(boss) = fallen.as_boss() {
                self.fallen_boss = Some((boss.name().to_owned(), boss.defeat_dialogue().to_owned()));
            }
            tracing::debug!(opponent = %fallen.name(), "opponent defeated");
        }
        if self.opponents.len() == before {
            return;
        }

        if self.opponents.is_empty() {
            if let Some((name, line)) = &self.fallen_boss {
                if !line.is_empty() {
                    let line = format!("{name}: {line}");
                    self.log.push(line);
                }
            }
            self.log.push("Victory!");
            self.finish(BattleResult::Victory);
        } else if active_lost {
            self.active_opponent = 0;
            self.opponent_serial += 1;
            let line = format!("{} appears!", self.opponents[0].name());
            self.log.push(line);
        }
    }

    /// Evaluate phase thresholds for every boss still standing.
    pub(super) fn check_boss_phases(&mut self) {
        for opponent in &mut self.opponents {
            let Some(boss) = opponent.as_boss_mut() else {
                continue;
            };
            if let Some(transition) = boss.check_phase_transition() {
                let name = boss.name().to_owned();
                self.log.push(format!(
                    "{name} enters phase {}! (+{} HP)",
                    transition.phase, transition.healed
                ));
                if let Some(line) = transition.dialogue {
                    self.log.push(format!("{name}: {line}"));
                }
            }
        }
    }

    /// Book-keeping for a fish that just reached 0 HP.
    pub(super) fn on_fish_fainted(&mut self, index: usize, config: &BattleConfig) {
        let line = format!("{} fainted!", self.fish[index].name());
        self.log.push(line);
        self.meter.add(config.meter_on_faint);
        if index == self.active_fish {
            self.replace_active_fish();
        }
    }

    fn replace_active_fish(&mut self) {
        if self.result.is_terminal() {
            return;
        }
        match self.fish.iter().position(|fish| !fish.is_fainted()) {
            Some(next) => {
                self.active_fish = next;
                let line = format!("Go, {}!", self.fish[next].name());
                self.log.push(line);
            }
            None => {
                self.log.push("All your fish have fainted!");
                self.finish(BattleResult::Defeat);
            }
        }
    }

    // ========================================================================
    // Upkeep
    // ========================================================================

    /// Tick every living combatant, then resolve any damage-over-time faints.
    ///
    /// Opponent faints resolve first, so a simultaneous wipe is a victory and
    /// the fish that fell with it are not reported.
    fn end_of_round(&mut self, config: &BattleConfig) {
        let standing: ArrayVec<bool, { BattleConfig::MAX_PARTY }> =
            self.fish.iter().map(|fish| !fish.is_fainted()).collect();

        for (fish, alive) in self.fish.iter_mut().zip(&standing) {
            if *alive {
                let report = fish.tick();
                tick_lines(fish.name(), &report, &mut self.log);
            }
        }
        for opponent in &mut self.opponents {
            if !opponent.is_fainted() {
                let report = opponent.tick();
                tick_lines(opponent.name(), &report, &mut self.log);
            }
        }

        self.resolve_opponent_faints();
        if self.result.is_terminal() {
            return;
        }
        self.check_boss_phases();
        for (index, alive) in standing.iter().enumerate() {
            if *alive && self.fish[index].is_fainted() {
                self.on_fish_fainted(index, config);
            }
        }
    }
}
