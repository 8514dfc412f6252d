//! Stat system for combatants.
//!
//! # Layers
//!
//! 1. **Base**: level-scaled hp/atk/def/spd ([`BaseStats`])
//! 2. **Modifiers**: persistent and timed multipliers ([`StatModifiers`])
//! 3. **Statuses**: named conditions with durations ([`StatusSet`])
//!
//! Effective stats are derived on demand from all three and never stored.
//! Current HP lives in [`Vitals`], the only resource persisted across rounds.

pub mod modifiers;
pub mod status;

pub use modifiers::{ModifierTrack, StatModifiers, TimedModifier};
pub use status::{ActiveStatus, StatusKind, StatusSet};

/// Stats that accept multiplicative modifiers.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Stat {
    Atk,
    Def,
    Spd,
    Accuracy,
    Evasion,
}

/// Level-scaled base stats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub hp: u32,
    pub atk: u32,
    pub def: u32,
    pub spd: u32,
}

impl BaseStats {
    pub const fn new(hp: u32, atk: u32, def: u32, spd: u32) -> Self {
        Self { hp, atk, def, spd }
    }

    /// Scale template stats to `level` with a per-level growth in percent.
    ///
    /// Formula: `floor(base × (1 + growth × (level − 1)))`
    pub fn scaled(template: &BaseStats, level: u32, growth_percent: u32) -> Self {
        let scale = |base: u32| -> u32 {
            let factor = 100 + growth_percent * level.saturating_sub(1);
            (base as u64 * factor as u64 / 100) as u32
        };
        Self {
            hp: scale(template.hp).max(1),
            atk: scale(template.atk),
            def: scale(template.def),
            spd: scale(template.spd),
        }
    }

    /// Base value for a stat. Accuracy and evasion have no base value and
    /// report 100 (a percentage).
    pub const fn get(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::Spd => self.spd,
            Stat::Accuracy | Stat::Evasion => 100,
        }
    }
}

/// Current and maximum HP.
///
/// Invariant: `0 ≤ current ≤ max`. Mutators clamp; debug builds assert.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vitals {
    current: u32,
    max: u32,
}

impl Vitals {
    pub fn full(max: u32) -> Self {
        let max = max.max(1);
        Self { current: max, max }
    }

    /// Creates vitals with `current` clamped to `max`.
    pub fn new(current: u32, max: u32) -> Self {
        let max = max.max(1);
        Self {
            current: current.min(max),
            max,
        }
    }

    pub const fn current(&self) -> u32 {
        self.current
    }

    pub const fn max(&self) -> u32 {
        self.max
    }

    pub const fn is_depleted(&self) -> bool {
        self.current == 0
    }

    /// Current HP as a percentage of max (0-100).
    pub fn percent(&self) -> f64 {
        self.current as f64 * 100.0 / self.max as f64
    }

    /// Subtract up to `amount`; returns the HP actually removed.
    pub fn lose(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.current);
        self.current -= lost;
        self.check();
        lost
    }

    /// Add up to `amount` without exceeding max; returns the HP actually restored.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.max - self.current);
        self.current += gained;
        self.check();
        gained
    }

    /// Set current HP, clamped to `[0, max]`.
    pub fn set(&mut self, current: u32) {
        self.current = current.min(self.max);
    }

    /// Change max HP, keeping current within bounds and raising it by the gain.
    pub fn grow_max(&mut self, new_max: u32) {
        let new_max = new_max.max(1);
        let gain = new_max.saturating_sub(self.max);
        self.max = new_max;
        self.current = (self.current + gain).min(self.max);
        self.check();
    }

    #[inline]
    fn check(&self) {
        debug_assert!(self.current <= self.max, "hp {} above max {}", self.current, self.max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaling_uses_growth_per_level() {
        let template = BaseStats::new(100, 50, 20, 10);
        assert_eq!(BaseStats::scaled(&template, 1, 7), template);
        // 1 + 0.07 × 9 = 1.63
        let lvl10 = BaseStats::scaled(&template, 10, 7);
        assert_eq!(lvl10, BaseStats::new(163, 81, 32, 16));
    }

    #[test]
    fn vitals_clamp_both_ways() {
        let mut v = Vitals::new(500, 120);
        assert_eq!(v.current(), 120);
        assert_eq!(v.lose(200), 120);
        assert!(v.is_depleted());
        assert_eq!(v.restore(30), 30);
        assert_eq!(v.restore(1_000), 90);
        assert_eq!(v.current(), v.max());
    }

    #[test]
    fn growing_max_heals_by_the_gain() {
        let mut v = Vitals::new(40, 100);
        v.grow_max(107);
        assert_eq!(v.current(), 47);
        assert_eq!(v.max(), 107);
    }
}
