//! Encounter description handed to [`BattleSession::start`](super::BattleSession::start).

use crate::combatant::{Boss, Enemy, Opponent, Rewards};
use crate::env::{BattleEnv, TemplateError};

use super::EncounterKind;

/// Opposing roster plus encounter-wide parameters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Encounter {
    pub(super) opponents: Vec<Opponent>,
    pub(super) kind: EncounterKind,
    pub(super) bonus: Rewards,
    pub(super) seed: u64,
}

impl Encounter {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Add an already-built opponent. Adding a boss makes this a boss
    /// encounter.
    pub fn with_opponent(mut self, opponent: impl Into<Opponent>) -> Self {
        let opponent = opponent.into();
        if opponent.is_boss() {
            self.kind = EncounterKind::Boss;
        }
        self.opponents.push(opponent);
        self
    }

    /// Add an enemy built from its template.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::MissingCombatant` if the template is unknown.
    pub fn enemy(self, env: &BattleEnv<'_>, id: &str, level: u32) -> Result<Self, TemplateError> {
        let template = env
            .combatants()
            .enemy(id)
            .ok_or_else(|| TemplateError::MissingCombatant(id.to_owned()))?;
        Ok(self.with_opponent(Enemy::from_template(&template, level, env.moves())))
    }

    /// Add a boss built from its template.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::MissingCombatant` if the template is unknown.
    pub fn boss(self, env: &BattleEnv<'_>, id: &str, level: u32) -> Result<Self, TemplateError> {
        let template = env
            .combatants()
            .boss(id)
            .ok_or_else(|| TemplateError::MissingCombatant(id.to_owned()))?;
        Ok(self.with_opponent(Boss::from_template(&template, level, env.moves())))
    }

    /// Mark the encounter as unfleeable without adding a boss.
    pub fn boss_fight(mut self) -> Self {
        self.kind = EncounterKind::Boss;
        self
    }

    /// Rewards granted on victory in addition to each opponent's own.
    pub fn with_bonus(mut self, bonus: Rewards) -> Self {
        self.bonus = bonus;
        self
    }

    pub fn opponents(&self) -> &[Opponent] {
        &self.opponents
    }

    pub fn kind(&self) -> EncounterKind {
        self.kind
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}
