//! Player-side resources: the miracle meter and one-shot ability gates.
//!
//! The registries here are immutable statics; everything that changes during
//! an encounter (meter charge, which one-shots were spent) is owned by the
//! session.

use bitflags::bitflags;

pub mod ally;
pub mod miracle;

pub use ally::{AllyAbility, AllyEffect, AllyId, DamageAmount, ally_registry};
pub use miracle::{MiracleDefinition, MiracleEffect, MiracleKind, MiracleMeter, miracle_registry};

bitflags! {
    /// Per-encounter one-shot state.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct OneShotFlags: u8 {
        /// A miracle was invoked this encounter.
        const MIRACLE_USED = 1 << 0;
        /// An ally ability was invoked this encounter (shared by every ally).
        const APOSTLE_USED = 1 << 1;
        /// Victory rewards were written to the player.
        const REWARDS_GRANTED = 1 << 2;
        /// Defeat penalties were written to the player.
        const PENALTY_APPLIED = 1 << 3;
    }
}
