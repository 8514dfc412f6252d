//! Error types for action submission.

use crate::error::{ErrorSeverity, GameError};
use crate::meters::{AllyId, MiracleKind};

use super::BattleResult;

/// The action references something that cannot be used.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum InvalidAction {
    #[error("move {index} is out of range ({len} known)")]
    MoveOutOfRange { index: usize, len: usize },

    #[error("roster slot {index} is out of range ({len} fish)")]
    RosterOutOfRange { index: usize, len: usize },

    #[error("{name} has fainted and cannot battle")]
    SwitchTargetFainted { name: String },

    #[error("{name} is already in battle")]
    SwitchTargetActive { name: String },

    #[error("{name} is silenced and cannot use {move_name}")]
    Silenced { name: String, move_name: String },

    #[error("you don't have any {0}")]
    ItemNotHeld(String),

    #[error("{item} would have no effect on {target}")]
    NoEffect { item: String, target: String },

    #[error("{0} has not been recruited")]
    AllyNotRecruited(AllyId),

    #[error("the enemy must be below {below_percent}% HP")]
    ConditionUnmet { below_percent: u32 },

    #[error("no benched fish can be sacrificed")]
    NoSacrifice,
}

/// The action is well-formed but not allowed right now.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum IllegalState {
    #[error("can't escape from a boss battle")]
    FleeDisallowed,

    #[error("a miracle was already performed this battle")]
    MiracleAlreadyUsed,

    #[error("an apostle ability was already used this battle")]
    AllyAbilityUsed,

    #[error("{0} has not been unlocked")]
    MiracleLocked(MiracleKind),

    #[error("{kind} needs {cost} meter (have {meter:.1})")]
    InsufficientMeter {
        kind: MiracleKind,
        cost: f64,
        meter: f64,
    },

    #[error("the battle is over ({0})")]
    Settled(BattleResult),
}

/// A rejected action. Rejections never change combat state.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    InvalidAction(#[from] InvalidAction),

    #[error(transparent)]
    IllegalState(#[from] IllegalState),
}

impl GameError for InvalidAction {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use InvalidAction::*;
        match self {
            MoveOutOfRange { .. } => "ACTION_MOVE_OUT_OF_RANGE",
            RosterOutOfRange { .. } => "ACTION_ROSTER_OUT_OF_RANGE",
            SwitchTargetFainted { .. } => "ACTION_SWITCH_TARGET_FAINTED",
            SwitchTargetActive { .. } => "ACTION_SWITCH_TARGET_ACTIVE",
            Silenced { .. } => "ACTION_SILENCED",
            ItemNotHeld(_) => "ACTION_ITEM_NOT_HELD",
            NoEffect { .. } => "ACTION_ITEM_NO_EFFECT",
            AllyNotRecruited(_) => "ACTION_ALLY_NOT_RECRUITED",
            ConditionUnmet { .. } => "ACTION_CONDITION_UNMET",
            NoSacrifice => "ACTION_NO_SACRIFICE",
        }
    }
}

impl GameError for IllegalState {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        use IllegalState::*;
        match self {
            FleeDisallowed => "STATE_FLEE_DISALLOWED",
            MiracleAlreadyUsed => "STATE_MIRACLE_ALREADY_USED",
            AllyAbilityUsed => "STATE_ALLY_ABILITY_USED",
            MiracleLocked(_) => "STATE_MIRACLE_LOCKED",
            InsufficientMeter { .. } => "STATE_INSUFFICIENT_METER",
            Settled(_) => "STATE_SETTLED",
        }
    }
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ActionError::InvalidAction(err) => err.severity(),
            ActionError::IllegalState(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ActionError::InvalidAction(err) => err.error_code(),
            ActionError::IllegalState(err) => err.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapper_delegates_classification() {
        let err = ActionError::from(IllegalState::FleeDisallowed);
        assert_eq!(err.severity(), ErrorSeverity::Recoverable);
        assert_eq!(err.error_code(), "STATE_FLEE_DISALLOWED");
        assert_eq!(err.to_string(), "can't escape from a boss battle");

        let err = ActionError::from(InvalidAction::NoSacrifice);
        assert_eq!(err.severity(), ErrorSeverity::Validation);
    }
}
