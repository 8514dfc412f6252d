//! Status effect system for combatants.
//!
//! Status effects are named conditions that restrict actions, deal damage over
//! time, or shift stats. Each carries an optional remaining-round counter;
//! `None` means the status lasts until removed.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;

/// Types of status effects.
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
pub enum StatusKind {
    // ========================================================================
    // Stat shifts
    // ========================================================================
    /// +20% ATK/DEF/SPD.
    Blessed,
    /// -20% ATK/DEF/SPD.
    Cursed,

    // ========================================================================
    // Damage over time
    // ========================================================================
    /// Loses 5% max HP per round.
    Poisoned,
    /// Loses 3% max HP per round.
    Burned,

    // ========================================================================
    // Action restriction
    // ========================================================================
    /// Cannot act.
    Frozen,
    /// 50% chance to lose the turn.
    Paralyzed,
    /// 50% chance to strike itself instead.
    Confused,
    /// Cannot act; wakes when hit.
    Asleep,
    /// Accuracy halved.
    Blinded,
    /// Cannot act.
    Stunned,
    /// Only physical moves are usable.
    Silenced,

    // ========================================================================
    // Special
    // ========================================================================
    /// Blocks new statuses and damage over time.
    Immunity,
    /// HP and weaknesses are visible to the player.
    Revealed,
}

impl StatusKind {
    /// Rounds a status lasts when applied without an explicit duration.
    pub const fn default_duration(self) -> Option<u32> {
        use StatusKind::*;
        match self {
            Blessed | Cursed | Paralyzed | Confused | Asleep | Blinded | Silenced => Some(3),
            Poisoned | Burned => Some(5),
            Frozen | Immunity => Some(2),
            Stunned => Some(1),
            Revealed => None,
        }
    }

    /// Max-HP percentage lost per round.
    pub const fn damage_per_round_percent(self) -> Option<u32> {
        match self {
            StatusKind::Poisoned => Some(5),
            StatusKind::Burned => Some(3),
            _ => None,
        }
    }

    /// Whether the status always costs the holder its turn.
    pub const fn prevents_action(self) -> bool {
        matches!(self, StatusKind::Frozen | StatusKind::Asleep | StatusKind::Stunned)
    }

    /// Cured by healing effects that clear conditions.
    pub const fn is_curable(self) -> bool {
        !matches!(
            self,
            StatusKind::Blessed | StatusKind::Immunity | StatusKind::Revealed
        )
    }
}

/// A single active status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveStatus {
    pub kind: StatusKind,
    /// Rounds left; `None` never expires.
    pub remaining: Option<u32>,
}

/// Active status effects on a combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusSet {
    effects: ArrayVec<ActiveStatus, { BattleConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn remaining(&self, kind: StatusKind) -> Option<u32> {
        self.effects
            .iter()
            .find(|e| e.kind == kind)
            .and_then(|e| e.remaining)
    }

    /// Adds a status. Returns false if it was blocked.
    ///
    /// - `Immunity` blocks every other status
    /// - Re-applying keeps the longer duration (a permanent status stays permanent)
    /// - A full set silently drops the new status
    pub fn add(&mut self, kind: StatusKind, turns: Option<u32>) -> bool {
        if kind != StatusKind::Immunity && self.has(StatusKind::Immunity) {
            return false;
        }

        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == kind) {
            existing.remaining = match (existing.remaining, turns) {
                (Some(current), Some(new)) => Some(current.max(new)),
                _ => None,
            };
            return true;
        }

        if self.effects.is_full() {
            return false;
        }
        self.effects.push(ActiveStatus {
            kind,
            remaining: turns,
        });
        true
    }

    /// Removes a status. Returns true if it was present.
    pub fn remove(&mut self, kind: StatusKind) -> bool {
        let before = self.effects.len();
        self.effects.retain(|e| e.kind != kind);
        before != self.effects.len()
    }

    /// Removes every curable status; returns how many were removed.
    pub fn cure(&mut self) -> usize {
        let before = self.effects.len();
        self.effects.retain(|e| !e.kind.is_curable());
        before - self.effects.len()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// Decrement durations and remove statuses that reach zero.
    ///
    /// Returns the kinds that expired.
    pub fn tick(&mut self) -> Vec<StatusKind> {
        let mut expired = Vec::new();
        for effect in &mut self.effects {
            if let Some(turns) = effect.remaining.as_mut() {
                *turns = turns.saturating_sub(1);
                if *turns == 0 {
                    expired.push(effect.kind);
                }
            }
        }
        self.effects.retain(|e| e.remaining != Some(0));
        expired
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveStatus> {
        self.effects.iter()
    }

    pub fn kinds(&self) -> Vec<StatusKind> {
        self.effects.iter().map(|e| e.kind).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn immunity_blocks_new_statuses() {
        let mut set = StatusSet::new();
        assert!(set.add(StatusKind::Immunity, Some(2)));
        assert!(!set.add(StatusKind::Poisoned, Some(5)));
        assert!(!set.has(StatusKind::Poisoned));
    }

    #[test]
    fn reapplying_keeps_longer_duration() {
        let mut set = StatusSet::new();
        set.add(StatusKind::Burned, Some(2));
        set.add(StatusKind::Burned, Some(5));
        set.add(StatusKind::Burned, Some(1));
        assert_eq!(set.remaining(StatusKind::Burned), Some(5));
        assert_eq!(set.kinds().len(), 1);
    }

    #[test]
    fn tick_expires_at_zero_and_keeps_permanent() {
        let mut set = StatusSet::new();
        set.add(StatusKind::Stunned, Some(1));
        set.add(StatusKind::Revealed, None);
        assert_eq!(set.tick(), vec![StatusKind::Stunned]);
        assert!(set.has(StatusKind::Revealed));
        assert!(!set.has(StatusKind::Stunned));
    }

    #[test]
    fn cure_keeps_beneficial_statuses() {
        let mut set = StatusSet::new();
        set.add(StatusKind::Blessed, Some(3));
        set.add(StatusKind::Poisoned, Some(5));
        set.add(StatusKind::Frozen, Some(2));
        assert_eq!(set.cure(), 2);
        assert_eq!(set.kinds(), vec![StatusKind::Blessed]);
    }
}
