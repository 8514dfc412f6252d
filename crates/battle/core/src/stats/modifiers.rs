//! Multiplicative stat modifiers.
//!
//! Each modifiable [`Stat`] carries a [`ModifierTrack`]: a persistent factor
//! plus a list of timed entries. The effective multiplier is recomputed from
//! the live entries on every read, so an expired entry leaves no residue and
//! repeated apply/expire cycles cannot drift.
//!
//! Formula: `multiplier = clamp(persistent × Π timed.multiplier)`

use super::Stat;

/// Lower and upper bounds for any effective multiplier.
pub const MIN_MULTIPLIER: f64 = 0.1;
pub const MAX_MULTIPLIER: f64 = 10.0;

/// A multiplier that expires after a number of rounds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimedModifier {
    pub multiplier: f64,
    pub remaining: u32,
}

/// Modifier state for one stat.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierTrack {
    persistent: f64,
    timed: Vec<TimedModifier>,
}

impl Default for ModifierTrack {
    fn default() -> Self {
        Self {
            persistent: 1.0,
            timed: Vec::new(),
        }
    }
}

impl ModifierTrack {
    /// Effective multiplier, clamped to `[MIN_MULTIPLIER, MAX_MULTIPLIER]`.
    pub fn multiplier(&self) -> f64 {
        let raw = self
            .timed
            .iter()
            .fold(self.persistent, |acc, entry| acc * entry.multiplier);
        debug_assert!(raw.is_finite() && raw > 0.0, "modifier left valid range: {raw}");
        raw.clamp(MIN_MULTIPLIER, MAX_MULTIPLIER)
    }

    pub fn timed(&self) -> &[TimedModifier] {
        &self.timed
    }

    fn apply(&mut self, multiplier: f64, duration: Option<u32>) {
        if !(multiplier.is_finite() && multiplier > 0.0) {
            debug_assert!(false, "rejected modifier multiplier {multiplier}");
            return;
        }
        match duration {
            Some(turns) if turns > 0 => self.timed.push(TimedModifier {
                multiplier,
                remaining: turns,
            }),
            _ => self.persistent *= multiplier,
        }
    }

    /// Decrement timed entries; returns how many expired.
    fn tick(&mut self) -> usize {
        let before = self.timed.len();
        for entry in &mut self.timed {
            entry.remaining = entry.remaining.saturating_sub(1);
        }
        self.timed.retain(|entry| entry.remaining > 0);
        before - self.timed.len()
    }

    fn is_neutral(&self) -> bool {
        self.persistent == 1.0 && self.timed.is_empty()
    }
}

/// Modifier tracks for every modifiable stat.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifiers {
    atk: ModifierTrack,
    def: ModifierTrack,
    spd: ModifierTrack,
    accuracy: ModifierTrack,
    evasion: ModifierTrack,
}

impl StatModifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&self, stat: Stat) -> &ModifierTrack {
        match stat {
            Stat::Atk => &self.atk,
            Stat::Def => &self.def,
            Stat::Spd => &self.spd,
            Stat::Accuracy => &self.accuracy,
            Stat::Evasion => &self.evasion,
        }
    }

    fn track_mut(&mut self, stat: Stat) -> &mut ModifierTrack {
        match stat {
            Stat::Atk => &mut self.atk,
            Stat::Def => &mut self.def,
            Stat::Spd => &mut self.spd,
            Stat::Accuracy => &mut self.accuracy,
            Stat::Evasion => &mut self.evasion,
        }
    }

    /// Current multiplier for a stat.
    pub fn multiplier(&self, stat: Stat) -> f64 {
        self.track(stat).multiplier()
    }

    /// Apply a multiplier. With `Some(turns)` the multiplier expires after
    /// that many ticks; otherwise it persists until [`reset`](Self::reset).
    pub fn apply(&mut self, stat: Stat, multiplier: f64, duration: Option<u32>) {
        self.track_mut(stat).apply(multiplier, duration);
    }

    /// Advance one round; returns the number of expired entries.
    pub fn tick(&mut self) -> usize {
        self.atk.tick()
            + self.def.tick()
            + self.spd.tick()
            + self.accuracy.tick()
            + self.evasion.tick()
    }

    /// Clear every stat back to neutral.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_neutral(&self) -> bool {
        self.atk.is_neutral()
            && self.def.is_neutral()
            && self.spd.is_neutral()
            && self.accuracy.is_neutral()
            && self.evasion.is_neutral()
    }
}
