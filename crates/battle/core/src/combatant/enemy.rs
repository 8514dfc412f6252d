//! Opposing combatants.

use crate::combat::Element;
use crate::env::{MoveOracle, RngOracle, RollCursor, resolve_moves};
use crate::stats::BaseStats;

use super::{AiPolicy, Boss, Combatant, CombatantCore, Move};

/// Static enemy definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub element: Element,
    pub base_stats: BaseStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub moves: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ai: AiPolicy,
    /// Defaults to `level × 10 + 20`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub experience_reward: Option<u32>,
    /// Defaults to `level × 5 + 10`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub currency_reward: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub item_drops: Vec<String>,
}

impl EnemyTemplate {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        element: Element,
        base_stats: BaseStats,
        moves: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            element,
            base_stats,
            moves,
            ai: AiPolicy::Random,
            experience_reward: None,
            currency_reward: None,
            item_drops: Vec::new(),
        }
    }

    pub fn with_ai(mut self, ai: AiPolicy) -> Self {
        self.ai = ai;
        self
    }

    pub fn with_rewards(mut self, experience: u32, currency: u32) -> Self {
        self.experience_reward = Some(experience);
        self.currency_reward = Some(currency);
        self
    }
}

/// Experience, currency and items granted for defeating opponents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rewards {
    pub experience: u32,
    pub currency: u32,
    pub items: Vec<String>,
}

impl Rewards {
    pub fn absorb(&mut self, other: &Rewards) {
        self.experience = self.experience.saturating_add(other.experience);
        self.currency = self.currency.saturating_add(other.currency);
        self.items.extend(other.items.iter().cloned());
    }

    pub fn is_empty(&self) -> bool {
        self.experience == 0 && self.currency == 0 && self.items.is_empty()
    }
}

/// A regular opponent.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enemy {
    core: CombatantCore,
    ai: AiPolicy,
    rewards: Rewards,
    /// Rotation cursor for [`AiPolicy::Cycle`].
    cycle: usize,
}

impl Enemy {
    /// Stat growth per level, in percent.
    pub const GROWTH_PERCENT: u32 = 5;

    pub fn from_template(template: &EnemyTemplate, level: u32, moves: &dyn MoveOracle) -> Self {
        let level = level.max(1);
        let stats = BaseStats::scaled(&template.base_stats, level, Self::GROWTH_PERCENT);
        let (known, _missing) = resolve_moves(moves, &template.moves, stats.atk);

        Self {
            core: CombatantCore::new(
                template.id.clone(),
                template.name.clone(),
                template.element,
                level,
                stats,
                known,
            ),
            ai: template.ai,
            rewards: Rewards {
                experience: template.experience_reward.unwrap_or(level * 10 + 20),
                currency: template.currency_reward.unwrap_or(level * 5 + 10),
                items: template.item_drops.clone(),
            },
            cycle: 0,
        }
    }

    pub fn ai(&self) -> AiPolicy {
        self.ai
    }

    pub fn rewards(&self) -> &Rewards {
        &self.rewards
    }

    /// Choose this round's move. An enemy without moves uses a generic strike.
    pub fn choose_move(&mut self, cursor: &mut RollCursor, rng: &dyn RngOracle) -> Move {
        if self.core.moves.is_empty() {
            return Move::generic_strike(self.core.stats.atk);
        }
        let index = self.ai.choose(&self.core.moves, &mut self.cycle, cursor, rng);
        tracing::debug!(enemy = %self.core.name, ai = %self.ai, index, "opponent chose move");
        self.core.moves[index].clone()
    }
}

impl Combatant for Enemy {
    fn core(&self) -> &CombatantCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut CombatantCore {
        &mut self.core
    }
}

/// A member of the opposing roster.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Opponent {
    Enemy(Enemy),
    Boss(Boss),
}

impl Opponent {
    pub fn is_boss(&self) -> bool {
        matches!(self, Opponent::Boss(_))
    }

    pub fn as_boss(&self) -> Option<&Boss> {
        match self {
            Opponent::Boss(boss) => Some(boss),
            Opponent::Enemy(_) => None,
        }
    }

    pub fn as_boss_mut(&mut self) -> Option<&mut Boss> {
        match self {
            Opponent::Boss(boss) => Some(boss),
            Opponent::Enemy(_) => None,
        }
    }

    pub fn rewards(&self) -> &Rewards {
        match self {
            Opponent::Enemy(enemy) => enemy.rewards(),
            Opponent::Boss(boss) => boss.enemy().rewards(),
        }
    }

    pub fn choose_move(&mut self, cursor: &mut RollCursor, rng: &dyn RngOracle) -> Move {
        match self {
            Opponent::Enemy(enemy) => enemy.choose_move(cursor, rng),
            Opponent::Boss(boss) => boss.enemy_mut().choose_move(cursor, rng),
        }
    }
}

impl From<Enemy> for Opponent {
    fn from(enemy: Enemy) -> Self {
        Opponent::Enemy(enemy)
    }
}

impl From<Boss> for Opponent {
    fn from(boss: Boss) -> Self {
        Opponent::Boss(boss)
    }
}

impl Combatant for Opponent {
    fn core(&self) -> &CombatantCore {
        match self {
            Opponent::Enemy(enemy) => enemy.core(),
            Opponent::Boss(boss) => boss.core(),
        }
    }

    fn core_mut(&mut self) -> &mut CombatantCore {
        match self {
            Opponent::Enemy(enemy) => enemy.core_mut(),
            Opponent::Boss(boss) => boss.core_mut(),
        }
    }
}
