//! Miracle meter and the static miracle registry.

use crate::config::BattleConfig;

/// Miracles the player can invoke once the meter is charged.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MiracleKind {
    Healing,
    LoavesAndFishes,
    DivineJudgment,
    Resurrection,
}

/// What a miracle does when invoked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MiracleEffect {
    /// Fully heal every living fish and cure their statuses.
    HealAll,
    /// Multiply consumable potency for the rest of the encounter.
    ItemPotency(f64),
    /// Flat damage to every opponent plus a timed ATK/DEF/SPD multiplier.
    Judgment {
        damage: u32,
        multiplier: f64,
        turns: u32,
    },
    /// Revive fainted fish to full HP and grant Immunity to the whole roster.
    ReviveAll { immunity_turns: u32 },
}

/// Immutable miracle descriptor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MiracleDefinition {
    pub kind: MiracleKind,
    pub name: &'static str,
    /// Meter points consumed.
    pub cost: f64,
    pub description: &'static str,
    pub effect: MiracleEffect,
}

static MIRACLES: [MiracleDefinition; 4] = [
    MiracleDefinition {
        kind: MiracleKind::Healing,
        name: "Healing Miracle",
        cost: 50.0,
        description: "Fully heals all fish and cures every ailment.",
        effect: MiracleEffect::HealAll,
    },
    MiracleDefinition {
        kind: MiracleKind::LoavesAndFishes,
        name: "Loaves and Fishes",
        cost: 40.0,
        description: "Bread items are three times as potent for the rest of the battle.",
        effect: MiracleEffect::ItemPotency(3.0),
    },
    MiracleDefinition {
        kind: MiracleKind::DivineJudgment,
        name: "Divine Judgment",
        cost: 75.0,
        description: "Strikes every enemy for 300 damage and halves their stats for 3 turns.",
        effect: MiracleEffect::Judgment {
            damage: 300,
            multiplier: 0.5,
            turns: 3,
        },
    },
    MiracleDefinition {
        kind: MiracleKind::Resurrection,
        name: "Resurrection Power",
        cost: 100.0,
        description: "Revives fainted fish at full HP and grants immunity for 2 turns.",
        effect: MiracleEffect::ReviveAll { immunity_turns: 2 },
    },
];

impl MiracleKind {
    pub fn definition(self) -> &'static MiracleDefinition {
        match self {
            MiracleKind::Healing => &MIRACLES[0],
            MiracleKind::LoavesAndFishes => &MIRACLES[1],
            MiracleKind::DivineJudgment => &MIRACLES[2],
            MiracleKind::Resurrection => &MIRACLES[3],
        }
    }
}

/// The full miracle registry.
pub fn miracle_registry() -> &'static [MiracleDefinition] {
    &MIRACLES
}

/// Player-side limit-break resource, 0 to 100.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MiracleMeter {
    value: f64,
}

impl MiracleMeter {
    pub fn new(value: f64) -> Self {
        let mut meter = Self::default();
        meter.set(value);
        meter
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    fn set(&mut self, value: f64) {
        self.value = if value.is_finite() {
            value.clamp(0.0, BattleConfig::METER_MAX)
        } else {
            0.0
        };
    }

    /// Add charge, saturating at 100.
    pub fn add(&mut self, amount: f64) {
        if amount > 0.0 {
            self.set(self.value + amount);
        }
    }

    pub fn can_afford(&self, cost: f64) -> bool {
        self.value >= cost
    }

    /// Subtract exactly `cost`, keeping any surplus. Returns false and leaves
    /// the meter unchanged when short.
    pub fn spend(&mut self, cost: f64) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        self.set(self.value - cost);
        true
    }
}
