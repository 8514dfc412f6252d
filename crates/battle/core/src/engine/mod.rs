//! Encounter state machine.
//!
//! A [`BattleSession`] owns both rosters for the length of one encounter and
//! is the only mutator of combat state. Each call to
//! [`BattleSession::submit`] validates one [`PlayerAction`], plays a full
//! round (opponent choice, ordering, both actions, end-of-round upkeep) and
//! writes the roster, meter and any settlement back to the borrowed
//! [`PlayerAggregate`](crate::player::PlayerAggregate). A rejected action
//! appends a single log line and changes nothing else.

mod abilities;
mod action;
mod encounter;
mod errors;
mod log;
mod rewards;
mod round;
mod scheduler;
mod session;
mod snapshot;

pub use action::PlayerAction;
pub use encounter::Encounter;
pub use errors::{ActionError, IllegalState, InvalidAction};
pub use log::BattleLog;
pub use scheduler::{Initiative, Side, turn_order};
pub use session::BattleSession;
pub use snapshot::{BattleSnapshot, CombatantView, RevealedOpponent};

/// Encounter outcome.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BattleResult {
    #[default]
    Ongoing,
    Victory,
    Defeat,
    Fled,
}

impl BattleResult {
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, BattleResult::Ongoing)
    }
}

/// Regular encounters allow fleeing; boss encounters do not.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EncounterKind {
    #[default]
    Regular,
    Boss,
}

/// Outcome of one submitted action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundReport {
    /// Round number after the action (unchanged for settled sessions).
    pub round: u32,
    pub result: BattleResult,
    /// Log lines appended by this action.
    pub lines: Vec<String>,
}
