//! Player-controlled fish.

use crate::combat::Element;
use crate::config::BattleConfig;
use crate::env::{MoveOracle, resolve_moves};
use crate::stats::{ActiveStatus, BaseStats, Stat, StatModifiers, StatusSet, Vitals};

use super::{Combatant, CombatantCore, Move};

/// Static fish definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FishTemplate {
    pub id: String,
    pub name: String,
    pub element: Element,
    pub base_stats: BaseStats,
    /// Move ids; each move's `learn_level` decides when it is known.
    pub moves: Vec<String>,
    /// Passive experience multiplier.
    #[cfg_attr(feature = "serde", serde(default = "FishTemplate::default_xp_multiplier"))]
    pub xp_multiplier: f64,
}

impl FishTemplate {
    #[cfg(feature = "serde")]
    fn default_xp_multiplier() -> f64 {
        1.0
    }

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
            xp_multiplier: 1.0,
        }
    }
}

/// Equipment held by a fish: flat stat bonuses added before modifiers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeldItem {
    pub id: String,
    pub atk_bonus: u32,
    pub def_bonus: u32,
    pub spd_bonus: u32,
}

impl HeldItem {
    pub const fn bonus(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Atk => self.atk_bonus,
            Stat::Def => self.def_bonus,
            Stat::Spd => self.spd_bonus,
            Stat::Accuracy | Stat::Evasion => 0,
        }
    }
}

/// Mutable fish state persisted between encounters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PersistedCombatant {
    pub id: String,
    pub level: u32,
    pub experience: u32,
    pub current_hp: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub held_item: Option<HeldItem>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub active_status_effects: Vec<ActiveStatus>,
}

/// A level gained, with the moves it unlocked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelUp {
    pub level: u32,
    pub learned: Vec<String>,
}

/// A fish in the player's roster.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerFish {
    core: CombatantCore,
    template: FishTemplate,
    experience: u32,
    held_item: Option<HeldItem>,
    /// Moves not yet learned, in template order.
    learnset: Vec<Move>,
}

impl PlayerFish {
    /// Stat growth per level, in percent.
    pub const GROWTH_PERCENT: u32 = 7;

    /// Build a fresh fish at `level` with full HP.
    ///
    /// Unknown move ids become generic strikes. A fish with no usable move
    /// knows a generic strike.
    pub fn from_template(template: &FishTemplate, level: u32, moves: &dyn MoveOracle) -> Self {
        let level = level.clamp(1, BattleConfig::MAX_LEVEL);
        let stats = BaseStats::scaled(&template.base_stats, level, Self::GROWTH_PERCENT);
        let (all, _missing) = resolve_moves(moves, &template.moves, stats.atk);
        let (mut known, learnset): (Vec<Move>, Vec<Move>) =
            all.into_iter().partition(|mv| mv.learn_level <= level);
        if known.is_empty() {
            known.push(Move::generic_strike(stats.atk));
        }

        Self {
            core: CombatantCore::new(
                template.id.clone(),
                template.name.clone(),
                template.element,
                level,
                stats,
                known,
            ),
            template: template.clone(),
            experience: 0,
            held_item: None,
            learnset,
        }
    }

    /// Rebuild a fish from its persisted record.
    pub fn restore(
        template: &FishTemplate,
        record: &PersistedCombatant,
        moves: &dyn MoveOracle,
    ) -> Self {
        let mut fish = Self::from_template(template, record.level, moves);
        fish.experience = record.experience;
        fish.held_item = record.held_item.clone();
        fish.core.vitals = Vitals::new(record.current_hp, fish.core.vitals.max());
        let mut statuses = StatusSet::new();
        for status in &record.active_status_effects {
            statuses.add(status.kind, status.remaining);
        }
        fish.core.statuses = statuses;
        fish
    }

    pub fn to_persisted(&self) -> PersistedCombatant {
        PersistedCombatant {
            id: self.core.id.clone(),
            level: self.core.level,
            experience: self.experience,
            current_hp: self.core.vitals.current(),
            held_item: self.held_item.clone(),
            active_status_effects: self.core.statuses.iter().copied().collect(),
        }
    }

    pub fn template(&self) -> &FishTemplate {
        &self.template
    }

    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn held_item(&self) -> Option<&HeldItem> {
        self.held_item.as_ref()
    }

    pub fn equip(&mut self, item: HeldItem) -> Option<HeldItem> {
        self.held_item.replace(item)
    }

    pub fn unequip(&mut self) -> Option<HeldItem> {
        self.held_item.take()
    }

    pub fn modifiers(&self) -> &StatModifiers {
        &self.core.modifiers
    }

    /// Add experience, levelling up every 100 points up to the level cap.
    ///
    /// Level-ups recompute stats, raise HP by the max HP gain and learn any
    /// moves whose learn level was reached.
    pub fn gain_experience(&mut self, amount: u32) -> Vec<LevelUp> {
        let scaled = (amount as f64 * self.template.xp_multiplier).floor() as u32;
        self.experience = self.experience.saturating_add(scaled);

        let mut gained = Vec::new();
        while self.experience >= BattleConfig::XP_PER_LEVEL
            && self.core.level < BattleConfig::MAX_LEVEL
        {
            self.experience -= BattleConfig::XP_PER_LEVEL;
            gained.push(self.level_up());
        }
        gained
    }

    fn level_up(&mut self) -> LevelUp {
        let level = self.core.level + 1;
        self.core.level = level;
        self.core.stats =
            BaseStats::scaled(&self.template.base_stats, level, Self::GROWTH_PERCENT);
        if !self.core.vitals.is_depleted() {
            self.core.vitals.grow_max(self.core.stats.hp);
        } else {
            self.core.vitals = Vitals::new(0, self.core.stats.hp);
        }

        let (ready, pending): (Vec<Move>, Vec<Move>) = core::mem::take(&mut self.learnset)
            .into_iter()
            .partition(|mv| mv.learn_level <= level);
        self.learnset = pending;
        let learned = ready.iter().map(|mv| mv.name.clone()).collect();
        self.core.moves.extend(ready);

        LevelUp { level, learned }
    }

    /// Fully restore HP and clear statuses and modifiers.
    pub fn restore_fully(&mut self) {
        let max = self.core.vitals.max();
        self.core.vitals = Vitals::full(max);
        self.core.statuses.clear();
        self.core.modifiers.reset();
    }
}

impl Combatant for PlayerFish {
    fn core(&self) -> &CombatantCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut CombatantCore {
        &mut self.core
    }

    fn base_stat(&self, stat: Stat) -> u32 {
        let bonus = self.held_item.as_ref().map_or(0, |item| item.bonus(stat));
        self.core.stats.get(stat) + bonus
    }
}
