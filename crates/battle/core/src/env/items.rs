use crate::stats::Stat;

/// Read-only consumable definitions keyed by id.
pub trait ItemOracle: Send + Sync {
    fn item(&self, id: &str) -> Option<ItemDefinition>;
}

/// Consumable item definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub id: String,
    pub name: String,
    pub effect: ConsumableEffect,
}

impl ItemDefinition {
    /// HP restored by the stand-in for an unknown consumable.
    pub const FALLBACK_HEAL: u32 = 30;

    pub fn new(id: impl Into<String>, name: impl Into<String>, effect: ConsumableEffect) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            effect,
        }
    }

    /// Stand-in used when an item id cannot be resolved.
    pub fn fallback(id: &str) -> Self {
        Self::new(id, id, ConsumableEffect::Heal(Self::FALLBACK_HEAL))
    }
}

/// Consumable effects.
///
/// Amounts are scaled by the encounter's item potency when used.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConsumableEffect {
    /// Restore a flat amount of HP.
    Heal(u32),
    /// Restore a percentage of max HP.
    HealPercent(u32),
    /// Remove curable statuses.
    Cure,
    /// Restore HP and remove curable statuses.
    HealAndCure(u32),
    /// Revive a fainted fish with a percentage of max HP.
    Revive(u32),
    /// Timed multiplier on one stat.
    Buff {
        stat: Stat,
        multiplier: f64,
        turns: u32,
    },
}

impl ConsumableEffect {
    /// Whether the effect targets a fainted fish.
    pub const fn targets_fainted(&self) -> bool {
        matches!(self, ConsumableEffect::Revive(_))
    }
}
