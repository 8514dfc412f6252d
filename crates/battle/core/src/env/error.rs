//! Template lookup errors.

use crate::error::{ErrorSeverity, GameError};

/// A referenced template id was not found in the static data provider.
///
/// Never aborts a round: callers degrade to a safe default (a generic strike
/// for moves, a 30 HP heal for consumables) and log the miss.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TemplateError {
    #[error("move template '{0}' not found")]
    MissingMove(String),

    #[error("combatant template '{0}' not found")]
    MissingCombatant(String),

    #[error("item template '{0}' not found")]
    MissingItem(String),
}

impl TemplateError {
    pub fn id(&self) -> &str {
        match self {
            TemplateError::MissingMove(id)
            | TemplateError::MissingCombatant(id)
            | TemplateError::MissingItem(id) => id,
        }
    }
}

impl GameError for TemplateError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            TemplateError::MissingMove(_) => "TEMPLATE_MISSING_MOVE",
            TemplateError::MissingCombatant(_) => "TEMPLATE_MISSING_COMBATANT",
            TemplateError::MissingItem(_) => "TEMPLATE_MISSING_ITEM",
        }
    }
}
