//! Session lifecycle: start, validation and round submission.

use arrayvec::ArrayVec;

use crate::combatant::{Combatant, MoveCategory, Opponent, PlayerFish, Rewards};
use crate::config::BattleConfig;
use crate::env::{BattleEnv, ConsumableEffect, ItemDefinition, RollCursor};
use crate::error::GameError;
use crate::meters::{AllyEffect, MiracleKind, MiracleMeter, OneShotFlags};
use crate::player::PlayerAggregate;
use crate::stats::StatusKind;

use super::{
    ActionError, BattleLog, BattleResult, Encounter, EncounterKind, IllegalState, InvalidAction,
    PlayerAction, RoundReport,
};

pub(super) type Roster = ArrayVec<PlayerFish, { BattleConfig::MAX_PARTY }>;

/// One encounter between the player's fish and an opposing roster.
#[derive(Clone, Debug)]
pub struct BattleSession {
    pub(super) fish: Roster,
    pub(super) opponents: Vec<Opponent>,
    pub(super) active_fish: usize,
    pub(super) active_opponent: usize,
    /// Bumped whenever a new opponent takes the field.
    pub(super) opponent_serial: u32,
    pub(super) round: u32,
    pub(super) result: BattleResult,
    pub(super) kind: EncounterKind,
    pub(super) flags: OneShotFlags,
    /// Multiplier on consumable amounts.
    pub(super) item_potency: f64,
    pub(super) meter: MiracleMeter,
    /// Rewards accumulated from defeated opponents.
    pub(super) pending: Rewards,
    pub(super) bonus: Rewards,
    /// Name and defeat line of the last boss beaten.
    pub(super) fallen_boss: Option<(String, String)>,
    pub(super) cursor: RollCursor,
    pub(super) log: BattleLog,
    pub(super) log_tail: usize,
}

impl BattleSession {
    /// Open an encounter.
    ///
    /// The roster is read from `player` (at most `MAX_PARTY` fish). A session
    /// with no living fish starts as a defeat and one with no opponents as a
    /// victory; neither grants rewards nor penalties.
    pub fn start<P>(config: &BattleConfig, player: &P, encounter: Encounter) -> Self
    where
        P: PlayerAggregate + ?Sized,
    {
        let Encounter {
            opponents,
            kind,
            bonus,
            seed,
        } = encounter;
        let fish: Roster = player
            .active_party()
            .into_iter()
            .take(BattleConfig::MAX_PARTY)
            .collect();

        let mut session = Self {
            fish,
            opponents,
            active_fish: 0,
            active_opponent: 0,
            opponent_serial: 0,
            round: 0,
            result: BattleResult::Ongoing,
            kind,
            flags: OneShotFlags::empty(),
            item_potency: 1.0,
            meter: MiracleMeter::new(player.miracle_meter()),
            pending: Rewards::default(),
            bonus,
            fallen_boss: None,
            cursor: RollCursor::new(seed),
            log: BattleLog::new(),
            log_tail: config.log_tail,
        };

        session.opponents.retain(|opponent| !opponent.is_fainted());
        session.announce_opponents();

        match session.fish.iter().position(|fish| !fish.is_fainted()) {
            None => {
                session.log.push("You have no fish able to battle!");
                session.result = BattleResult::Defeat;
            }
            Some(_) if session.opponents.is_empty() => {
                session.log.push("There is nothing to fight.");
                session.result = BattleResult::Victory;
            }
            Some(index) => {
                session.active_fish = index;
                let line = format!("Go, {}!", session.fish[index].name());
                session.log.push(line);
            }
        }

        tracing::info!(
            seed,
            kind = %session.kind,
            fish = session.fish.len(),
            opponents = session.opponents.len(),
            result = %session.result,
            "battle started"
        );
        session
    }

    fn announce_opponents(&mut self) {
        for opponent in &self.opponents {
            match opponent.as_boss() {
                Some(boss) => {
                    if boss.title().is_empty() {
                        self.log.push(format!("{} appears!", boss.name()));
                    } else {
                        self.log
                            .push(format!("{}, {}, appears!", boss.name(), boss.title()));
                    }
                    if !boss.intro_dialogue().is_empty() {
                        self.log
                            .push(format!("{}: {}", boss.name(), boss.intro_dialogue()));
                    }
                }
                None => self.log.push(format!("A wild {} appears!", opponent.name())),
            }
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn result(&self) -> BattleResult {
        self.result
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn kind(&self) -> EncounterKind {
        self.kind
    }

    pub fn fish(&self) -> &[PlayerFish] {
        &self.fish
    }

    pub fn opponents(&self) -> &[Opponent] {
        &self.opponents
    }

    pub fn active_fish(&self) -> Option<&PlayerFish> {
        self.fish.get(self.active_fish)
    }

    pub fn active_fish_index(&self) -> usize {
        self.active_fish
    }

    pub fn active_opponent(&self) -> Option<&Opponent> {
        self.opponents.get(self.active_opponent)
    }

    pub fn meter(&self) -> f64 {
        self.meter.value()
    }

    pub fn flags(&self) -> OneShotFlags {
        self.flags
    }

    pub fn item_potency(&self) -> f64 {
        self.item_potency
    }

    pub fn pending_rewards(&self) -> &Rewards {
        &self.pending
    }

    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    /// Random draws consumed so far.
    pub fn draws(&self) -> u64 {
        self.cursor.draws()
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Check an action against the current state without changing anything.
    ///
    /// # Errors
    ///
    /// `InvalidAction` when the action references something unusable,
    /// `IllegalState` when it is well-formed but not allowed right now.
    pub fn validate<P>(
        &self,
        env: &BattleEnv<'_>,
        player: &P,
        action: &PlayerAction,
    ) -> Result<(), ActionError>
    where
        P: PlayerAggregate + ?Sized,
    {
        if self.result.is_terminal() {
            return Err(IllegalState::Settled(self.result).into());
        }
        let len = self.fish.len();
        let active = self
            .fish
            .get(self.active_fish)
            .ok_or(InvalidAction::RosterOutOfRange {
                index: self.active_fish,
                len,
            })?;

        match action {
            PlayerAction::Attack { move_index } => {
                let moves = active.moves();
                let mv = moves.get(*move_index).ok_or(InvalidAction::MoveOutOfRange {
                    index: *move_index,
                    len: moves.len(),
                })?;
                if active.has_status(StatusKind::Silenced) && mv.category != MoveCategory::Physical
                {
                    return Err(InvalidAction::Silenced {
                        name: active.name().to_owned(),
                        move_name: mv.name.clone(),
                    }
                    .into());
                }
            }
            PlayerAction::Switch { roster_index } => {
                let target = self.fish.get(*roster_index).ok_or(
                    InvalidAction::RosterOutOfRange {
                        index: *roster_index,
                        len,
                    },
                )?;
                if *roster_index == self.active_fish {
                    return Err(InvalidAction::SwitchTargetActive {
                        name: target.name().to_owned(),
                    }
                    .into());
                }
                if target.is_fainted() {
                    return Err(InvalidAction::SwitchTargetFainted {
                        name: target.name().to_owned(),
                    }
                    .into());
                }
            }
            PlayerAction::UseItem { item_id, target } => {
                if player.item_count(item_id) == 0 {
                    return Err(InvalidAction::ItemNotHeld(item_id.clone()).into());
                }
                let index = target.unwrap_or(self.active_fish);
                let fish = self
                    .fish
                    .get(index)
                    .ok_or(InvalidAction::RosterOutOfRange { index, len })?;
                let effect = env
                    .items()
                    .item(item_id)
                    .map(|definition| definition.effect)
                    .unwrap_or(ConsumableEffect::Heal(ItemDefinition::FALLBACK_HEAL));
                if effect.targets_fainted() != fish.is_fainted() {
                    return Err(InvalidAction::NoEffect {
                        item: item_id.clone(),
                        target: fish.name().to_owned(),
                    }
                    .into());
                }
            }
            PlayerAction::Flee => {
                if self.kind == EncounterKind::Boss {
                    return Err(IllegalState::FleeDisallowed.into());
                }
            }
            PlayerAction::Miracle { kind } => self.check_miracle(player, *kind)?,
            PlayerAction::AllyAbility { ally } => {
                if !player.has_ally(*ally) {
                    return Err(InvalidAction::AllyNotRecruited(*ally).into());
                }
                if self.flags.contains(OneShotFlags::APOSTLE_USED) {
                    return Err(IllegalState::AllyAbilityUsed.into());
                }
                match ally.ability().effect {
                    AllyEffect::ConditionalDamage { below_percent, .. }
                        if !self.opponent_below(below_percent) =>
                    {
                        return Err(InvalidAction::ConditionUnmet { below_percent }.into());
                    }
                    AllyEffect::ResourceExchange { .. } if self.sacrifice_candidate().is_none() => {
                        return Err(InvalidAction::NoSacrifice.into());
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn check_miracle<P>(&self, player: &P, kind: MiracleKind) -> Result<(), ActionError>
    where
        P: PlayerAggregate + ?Sized,
    {
        if self.flags.contains(OneShotFlags::MIRACLE_USED) {
            return Err(IllegalState::MiracleAlreadyUsed.into());
        }
        if !player.miracle_unlocked(kind) {
            return Err(IllegalState::MiracleLocked(kind).into());
        }
        let cost = kind.definition().cost;
        if !self.meter.can_afford(cost) {
            return Err(IllegalState::InsufficientMeter {
                kind,
                cost,
                meter: self.meter.value(),
            }
            .into());
        }
        Ok(())
    }

    /// Whether the active opponent's HP is strictly below `percent` of max.
    pub(super) fn opponent_below(&self, percent: u32) -> bool {
        self.active_opponent().is_some_and(|opponent| {
            (opponent.hp() as u64) * 100 < (percent as u64) * (opponent.max_hp() as u64)
        })
    }

    /// Living benched fish with the lowest HP; the earliest wins ties.
    pub(super) fn sacrifice_candidate(&self) -> Option<usize> {
        self.fish
            .iter()
            .enumerate()
            .filter(|(index, fish)| *index != self.active_fish && !fish.is_fainted())
            .min_by_key(|(_, fish)| fish.hp())
            .map(|(index, _)| index)
    }

    // ========================================================================
    // Submission
    // ========================================================================

    /// Validate and play one round.
    ///
    /// A settled session returns an empty report. A rejected action appends
    /// one log line and returns the error; nothing else changes. After a
    /// played round the roster and meter are written back to `player`, along
    /// with rewards or penalties when the round settled the encounter.
    ///
    /// # Errors
    ///
    /// Returns the validation error for a rejected action.
    pub fn submit<P>(
        &mut self,
        env: &BattleEnv<'_>,
        player: &mut P,
        action: PlayerAction,
    ) -> Result<RoundReport, ActionError>
    where
        P: PlayerAggregate + ?Sized,
    {
        if self.result.is_terminal() {
            return Ok(self.report(self.log.len()));
        }
        if let Err(err) = self.validate(env, player, &action) {
            tracing::debug!(
                action = action.kind_name(),
                code = err.error_code(),
                severity = ?err.severity(),
                "action rejected"
            );
            self.log.push(format!("Cannot do that: {err}."));
            return Err(err);
        }

        let mark = self.log.len();
        self.round += 1;
        tracing::debug!(round = self.round, action = action.kind_name(), "round begins");

        self.play_round(env, player, &action);
        self.settle(env.config(), player);

        player.store_party(self.fish.iter().cloned().collect());
        player.set_miracle_meter(self.meter.value());

        if self.result.is_terminal() {
            tracing::info!(round = self.round, result = %self.result, "battle settled");
        }
        Ok(self.report(mark))
    }

    fn report(&self, mark: usize) -> RoundReport {
        RoundReport {
            round: self.round,
            result: self.result,
            lines: self.log.since(mark),
        }
    }

    /// Settle the encounter with `result` if it is still ongoing.
    pub(super) fn finish(&mut self, result: BattleResult) {
        if !self.result.is_terminal() {
            self.result = result;
        }
    }
}
