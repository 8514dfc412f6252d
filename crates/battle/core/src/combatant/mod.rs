//! Combatants: player fish, enemies and bosses.
//!
//! Every combatant kind stores its shared state in a [`CombatantCore`] and
//! implements [`Combatant`], which derives effective stats and owns the HP,
//! status and modifier mutations. Kind-specific behaviour (held items and
//! experience for fish, AI for enemies, phases for bosses) lives on the
//! concrete types.

pub mod ai;
pub mod boss;
pub mod enemy;
pub mod fish;
pub mod moves;

pub use ai::AiPolicy;
pub use boss::{Boss, BossTemplate, PhaseTransition};
pub use enemy::{Enemy, EnemyTemplate, Opponent, Rewards};
pub use fish::{FishTemplate, HeldItem, LevelUp, PersistedCombatant, PlayerFish};
pub use moves::{Move, MoveCategory, MoveEffect};

use crate::combat::{Element, percent_of};
use crate::stats::{BaseStats, Stat, StatModifiers, StatusKind, StatusSet, Vitals};

/// State shared by every combatant kind.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantCore {
    pub id: String,
    pub name: String,
    pub element: Element,
    pub level: u32,
    /// Level-scaled base stats.
    pub stats: BaseStats,
    pub vitals: Vitals,
    pub modifiers: StatModifiers,
    pub statuses: StatusSet,
    pub moves: Vec<Move>,
}

impl CombatantCore {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        element: Element,
        level: u32,
        stats: BaseStats,
        moves: Vec<Move>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            element,
            level,
            stats,
            vitals: Vitals::full(stats.hp),
            modifiers: StatModifiers::new(),
            statuses: StatusSet::new(),
            moves,
        }
    }
}

/// Effects of one end-of-round tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Damage-over-time applied, per status.
    pub damage: Vec<(StatusKind, u32)>,
    pub expired: Vec<StatusKind>,
    pub expired_modifiers: usize,
}

impl TickReport {
    pub fn total_damage(&self) -> u32 {
        self.damage.iter().map(|(_, amount)| amount).sum()
    }
}

/// Common interface over fish, enemies and bosses.
pub trait Combatant {
    fn core(&self) -> &CombatantCore;
    fn core_mut(&mut self) -> &mut CombatantCore;

    /// Base value of a stat before modifiers. Fish add held-item bonuses.
    fn base_stat(&self, stat: Stat) -> u32 {
        self.core().stats.get(stat)
    }

    fn id(&self) -> &str {
        &self.core().id
    }

    fn name(&self) -> &str {
        &self.core().name
    }

    fn element(&self) -> Element {
        self.core().element
    }

    fn level(&self) -> u32 {
        self.core().level
    }

    fn hp(&self) -> u32 {
        self.core().vitals.current()
    }

    fn max_hp(&self) -> u32 {
        self.core().vitals.max()
    }

    fn is_fainted(&self) -> bool {
        self.core().vitals.is_depleted()
    }

    fn has_status(&self, kind: StatusKind) -> bool {
        self.core().statuses.has(kind)
    }

    fn moves(&self) -> &[Move] {
        &self.core().moves
    }

    /// Cumulative multiplier for a stat: modifiers plus status shifts.
    fn stat_multiplier(&self, stat: Stat) -> f64 {
        let core = self.core();
        let mut multiplier = core.modifiers.multiplier(stat);
        if matches!(stat, Stat::Atk | Stat::Def | Stat::Spd) {
            if core.statuses.has(StatusKind::Blessed) {
                multiplier *= 1.2;
            }
            if core.statuses.has(StatusKind::Cursed) {
                multiplier *= 0.8;
            }
        }
        if stat == Stat::Accuracy && core.statuses.has(StatusKind::Blinded) {
            multiplier *= 0.5;
        }
        multiplier
    }

    /// `floor(base × cumulative multiplier)`.
    fn effective_stat(&self, stat: Stat) -> u32 {
        (self.base_stat(stat) as f64 * self.stat_multiplier(stat)).floor() as u32
    }

    /// Lose HP; returns the amount actually lost. Damage wakes a sleeper.
    fn take_damage(&mut self, amount: u32) -> u32 {
        let core = self.core_mut();
        let lost = core.vitals.lose(amount);
        if lost > 0 {
            core.statuses.remove(StatusKind::Asleep);
        }
        lost
    }

    /// Restore HP; returns the amount actually restored. Fainted combatants
    /// are not healed.
    fn heal(&mut self, amount: u32) -> u32 {
        if self.is_fainted() {
            return 0;
        }
        self.core_mut().vitals.restore(amount)
    }

    /// Bring a fainted combatant back with a percentage of max HP.
    fn revive(&mut self, percent: u32) -> bool {
        if !self.is_fainted() {
            return false;
        }
        let core = self.core_mut();
        let amount = percent_of(core.vitals.max(), percent.min(100));
        core.vitals.restore(amount);
        core.statuses.cure();
        true
    }

    /// Apply a status; `turns = None` uses the kind's default duration.
    ///
    /// Returns false when blocked (Immunity or a full status set).
    fn apply_status(&mut self, kind: StatusKind, turns: Option<u32>) -> bool {
        let turns = turns.or(kind.default_duration());
        self.core_mut().statuses.add(kind, turns)
    }

    fn apply_modifier(&mut self, stat: Stat, multiplier: f64, duration: Option<u32>) {
        self.core_mut().modifiers.apply(stat, multiplier, duration);
    }

    fn reset_stat_modifiers(&mut self) {
        self.core_mut().modifiers.reset();
    }

    /// End-of-round upkeep.
    ///
    /// Damage over time is applied first (skipped under Immunity), then
    /// status durations and timed modifiers count down.
    fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();
        let core = self.core_mut();

        if !core.statuses.has(StatusKind::Immunity) {
            let dots: Vec<(StatusKind, u32)> = core
                .statuses
                .iter()
                .filter_map(|s| s.kind.damage_per_round_percent().map(|p| (s.kind, p)))
                .collect();
            for (kind, percent) in dots {
                if core.vitals.is_depleted() {
                    break;
                }
                let lost = core.vitals.lose(percent_of(core.vitals.max(), percent));
                report.damage.push((kind, lost));
            }
        }

        report.expired = core.statuses.tick();
        report.expired_modifiers = core.modifiers.tick();
        report
    }
}
