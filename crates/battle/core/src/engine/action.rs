//! Player actions.

use crate::meters::{AllyId, MiracleKind};

/// One player decision for a round.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerAction {
    /// The active fish uses one of its known moves.
    Attack { move_index: usize },
    /// Bench the active fish and send out another.
    Switch { roster_index: usize },
    /// Use a consumable; `target` defaults to the active fish.
    UseItem {
        item_id: String,
        target: Option<usize>,
    },
    Flee,
    Miracle { kind: MiracleKind },
    AllyAbility { ally: AllyId },
}

impl PlayerAction {
    pub const fn attack(move_index: usize) -> Self {
        Self::Attack { move_index }
    }

    pub fn use_item(item_id: impl Into<String>) -> Self {
        Self::UseItem {
            item_id: item_id.into(),
            target: None,
        }
    }

    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Attack { .. } => "attack",
            Self::Switch { .. } => "switch",
            Self::UseItem { .. } => "use_item",
            Self::Flee => "flee",
            Self::Miracle { .. } => "miracle",
            Self::AllyAbility { .. } => "ally_ability",
        }
    }
}
