//! Move descriptors.

use crate::combat::{Element, Power};
use crate::stats::{Stat, StatusKind};

/// Damage class of a move. Silenced combatants may only use `Physical`.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MoveCategory {
    #[default]
    Physical,
    Special,
    /// Deals no damage; only applies its effect.
    Status,
}

/// Secondary effect of a move, applied after a hit.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveEffect {
    /// Inflict a status on the target with `chance` percent (default duration).
    Inflict { status: StatusKind, chance: u32 },
    /// Timed multiplier on the target's stat.
    LowerTarget {
        stat: Stat,
        multiplier: f64,
        turns: u32,
    },
    /// Timed multiplier on the user's own stat.
    RaiseSelf {
        stat: Stat,
        multiplier: f64,
        turns: u32,
    },
    /// Take currency from the opposing side.
    StealCurrency(u32),
}

/// Immutable move descriptor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub element: Element,
    pub power: Power,
    #[cfg_attr(feature = "serde", serde(default = "Move::default_accuracy"))]
    pub accuracy: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub priority: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: MoveCategory,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effect: Option<MoveEffect>,
    /// Level at which a fish learns the move; 1 means known from the start.
    #[cfg_attr(feature = "serde", serde(default = "Move::default_learn_level"))]
    pub learn_level: u32,
}

impl Move {
    pub const GENERIC_STRIKE_ID: &'static str = "strike";

    #[cfg(feature = "serde")]
    fn default_accuracy() -> u32 {
        100
    }

    #[cfg(feature = "serde")]
    fn default_learn_level() -> u32 {
        1
    }

    pub fn new(id: impl Into<String>, name: impl Into<String>, element: Element, power: Power) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            element,
            power,
            accuracy: 100,
            priority: 0,
            category: MoveCategory::Physical,
            effect: None,
            learn_level: 1,
        }
    }

    pub fn with_accuracy(mut self, accuracy: u32) -> Self {
        self.accuracy = accuracy.min(100);
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_category(mut self, category: MoveCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_effect(mut self, effect: MoveEffect) -> Self {
        self.effect = Some(effect);
        self
    }

    pub fn learned_at(mut self, level: u32) -> Self {
        self.learn_level = level.max(1);
        self
    }

    /// Safe fallback when a move cannot be resolved.
    ///
    /// Normal element, power `[atk/2, atk]`, always hits.
    pub fn generic_strike(atk: u32) -> Self {
        Self::new(
            Self::GENERIC_STRIKE_ID,
            "Strike",
            Element::Normal,
            Power::Range(atk / 2, atk),
        )
    }

    pub fn deals_damage(&self) -> bool {
        self.category != MoveCategory::Status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_strike_scales_with_attack() {
        let strike = Move::generic_strike(40);
        assert_eq!(strike.power, Power::Range(20, 40));
        assert_eq!(strike.accuracy, 100);
        assert_eq!(strike.element, Element::Normal);
        assert!(strike.deals_damage());
    }

    #[test]
    fn builders_clamp_inputs() {
        let mv = Move::new("m", "M", Element::Water, Power::Fixed(10))
            .with_accuracy(150)
            .learned_at(0);
        assert_eq!(mv.accuracy, 100);
        assert_eq!(mv.learn_level, 1);
    }
}
