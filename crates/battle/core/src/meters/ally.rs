//! Recruited allies and their once-per-encounter abilities.

use crate::stats::Stat;

/// Recruitable allies.
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
pub enum AllyId {
    Peter,
    Andrew,
    James,
    John,
    Philip,
    Bartholomew,
    Matthew,
    Thomas,
    JamesAlphaeus,
    Thaddaeus,
    SimonZealot,
    Judas,
}

/// Damage dealt by [`AllyEffect::DamageAll`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageAmount {
    Fixed(u32),
    /// Percentage of the active fish's current HP.
    PercentOfActiveHp(u32),
}

/// Effect of an ally ability.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AllyEffect {
    /// Flat damage to every opponent.
    DamageAll(DamageAmount),
    /// Heal every living fish, optionally curing statuses.
    HealAll { amount: u32, cure: bool },
    /// Timed multiplier on the party (or only the active fish).
    PartyBuff {
        stats: &'static [Stat],
        multiplier: f64,
        turns: u32,
        active_only: bool,
    },
    /// Timed multiplier on every opponent, optionally taking currency.
    EnemyDebuff {
        stat: Stat,
        multiplier: f64,
        turns: u32,
        steal: u32,
    },
    /// Damage to the active opponent, only while it is below the threshold.
    ConditionalDamage { power: u32, below_percent: u32 },
    /// Sacrifice the weakest benched fish for currency and a party buff.
    ResourceExchange {
        currency: u32,
        stat: Stat,
        multiplier: f64,
        turns: u32,
    },
    /// Multiply consumable potency for the rest of the encounter.
    MultiplyItems(f64),
    /// Reveal every opponent's HP and weaknesses.
    Reveal,
}

/// Immutable ally ability descriptor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AllyAbility {
    pub ally: AllyId,
    pub ally_name: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub effect: AllyEffect,
}

static ALLIES: [AllyAbility; 12] = [
    AllyAbility {
        ally: AllyId::Peter,
        ally_name: "Peter",
        name: "Rock Foundation",
        description: "+50% DEF to all party fish for 3 turns.",
        effect: AllyEffect::PartyBuff {
            stats: &[Stat::Def],
            multiplier: 1.5,
            turns: 3,
            active_only: false,
        },
    },
    AllyAbility {
        ally: AllyId::Andrew,
        ally_name: "Andrew",
        name: "Fisher's Net",
        description: "Nets every enemy, halving their evasion for 3 turns.",
        effect: AllyEffect::EnemyDebuff {
            stat: Stat::Evasion,
            multiplier: 0.5,
            turns: 3,
            steal: 0,
        },
    },
    AllyAbility {
        ally: AllyId::James,
        ally_name: "James",
        name: "Sons of Thunder",
        description: "150 damage to all enemies.",
        effect: AllyEffect::DamageAll(DamageAmount::Fixed(150)),
    },
    AllyAbility {
        ally: AllyId::John,
        ally_name: "John",
        name: "Beloved's Healing",
        description: "Restores 100 HP to all party fish.",
        effect: AllyEffect::HealAll {
            amount: 100,
            cure: false,
        },
    },
    AllyAbility {
        ally: AllyId::Philip,
        ally_name: "Philip",
        name: "Bread Multiplication",
        description: "Bread items are twice as potent for the rest of the battle.",
        effect: AllyEffect::MultiplyItems(2.0),
    },
    AllyAbility {
        ally: AllyId::Bartholomew,
        ally_name: "Bartholomew",
        name: "True Sight",
        description: "Reveals enemy HP and weaknesses.",
        effect: AllyEffect::Reveal,
    },
    AllyAbility {
        ally: AllyId::Matthew,
        ally_name: "Matthew",
        name: "Tax Audit",
        description: "Steals 100 denarii and lowers enemy ATK by 30% for 3 turns.",
        effect: AllyEffect::EnemyDebuff {
            stat: Stat::Atk,
            multiplier: 0.7,
            turns: 3,
            steal: 100,
        },
    },
    AllyAbility {
        ally: AllyId::Thomas,
        ally_name: "Thomas",
        name: "Doubting Strike",
        description: "200 damage, only if the enemy is below 50% HP.",
        effect: AllyEffect::ConditionalDamage {
            power: 200,
            below_percent: 50,
        },
    },
    AllyAbility {
        ally: AllyId::JamesAlphaeus,
        ally_name: "James (son of Alphaeus)",
        name: "Lesser Miracle",
        description: "Restores 50 HP to all fish and cures status.",
        effect: AllyEffect::HealAll {
            amount: 50,
            cure: true,
        },
    },
    AllyAbility {
        ally: AllyId::Thaddaeus,
        ally_name: "Thaddaeus",
        name: "Righteous Zeal",
        description: "+40% ATK and SPD to the active fish for 3 turns.",
        effect: AllyEffect::PartyBuff {
            stats: &[Stat::Atk, Stat::Spd],
            multiplier: 1.4,
            turns: 3,
            active_only: true,
        },
    },
    AllyAbility {
        ally: AllyId::SimonZealot,
        ally_name: "Simon the Zealot",
        name: "Revolutionary Fervor",
        description: "Damage equal to 50% of the active fish's HP to all enemies.",
        effect: AllyEffect::DamageAll(DamageAmount::PercentOfActiveHp(50)),
    },
    AllyAbility {
        ally: AllyId::Judas,
        ally_name: "Judas Iscariot",
        name: "Thirty Silver",
        description: "Sacrifice one fish for 300 denarii and +50% party ATK for 3 turns.",
        effect: AllyEffect::ResourceExchange {
            currency: 300,
            stat: Stat::Atk,
            multiplier: 1.5,
            turns: 3,
        },
    },
];

impl AllyId {
    pub fn ability(self) -> &'static AllyAbility {
        let index = self as usize;
        &ALLIES[index]
    }
}

/// The full ally registry, in recruitment order.
pub fn ally_registry() -> &'static [AllyAbility] {
    &ALLIES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_matches_ids() {
        use strum::IntoEnumIterator;
        for ally in AllyId::iter() {
            assert_eq!(ally.ability().ally, ally);
        }
        assert_eq!(ally_registry().len(), 12);
    }

    #[test]
    fn ids_use_snake_case() {
        assert_eq!(AllyId::SimonZealot.as_ref(), "simon_zealot");
        assert_eq!("james_alphaeus".parse::<AllyId>().ok(), Some(AllyId::JamesAlphaeus));
    }
}
