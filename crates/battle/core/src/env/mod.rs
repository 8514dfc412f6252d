//! Traits describing read-only encounter data.
//!
//! Oracles expose move, combatant and item templates plus the random source.
//! The [`BattleEnv`] aggregate bundles them with the [`BattleConfig`] so the
//! engine can reach everything it needs without coupling to a concrete
//! content provider.
mod error;
mod items;
mod rng;

pub use error::TemplateError;
pub use items::{ConsumableEffect, ItemDefinition, ItemOracle};
pub use rng::{PcgRng, RngOracle, RollCursor, compute_seed};

use crate::combatant::{BossTemplate, EnemyTemplate, FishTemplate, Move};
use crate::config::BattleConfig;

/// Move templates keyed by id.
pub trait MoveOracle: Send + Sync {
    fn move_template(&self, id: &str) -> Option<Move>;
}

/// Fish, enemy and boss templates keyed by id.
pub trait CombatantOracle: Send + Sync {
    fn fish(&self, id: &str) -> Option<FishTemplate>;
    fn enemy(&self, id: &str) -> Option<EnemyTemplate>;
    fn boss(&self, id: &str) -> Option<BossTemplate>;
}

/// Aggregates the read-only oracles and balance configuration.
#[derive(Clone, Copy)]
pub struct BattleEnv<'a> {
    moves: &'a dyn MoveOracle,
    combatants: &'a dyn CombatantOracle,
    items: &'a dyn ItemOracle,
    rng: &'a dyn RngOracle,
    config: &'a BattleConfig,
}

impl<'a> BattleEnv<'a> {
    pub fn new(
        moves: &'a dyn MoveOracle,
        combatants: &'a dyn CombatantOracle,
        items: &'a dyn ItemOracle,
        rng: &'a dyn RngOracle,
        config: &'a BattleConfig,
    ) -> Self {
        Self {
            moves,
            combatants,
            items,
            rng,
            config,
        }
    }

    pub fn moves(&self) -> &'a dyn MoveOracle {
        self.moves
    }

    pub fn combatants(&self) -> &'a dyn CombatantOracle {
        self.combatants
    }

    pub fn items(&self) -> &'a dyn ItemOracle {
        self.items
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }

    pub fn config(&self) -> &'a BattleConfig {
        self.config
    }

    /// Look up a consumable, falling back to a basic heal.
    pub fn item_or_fallback(&self, id: &str) -> (ItemDefinition, Option<TemplateError>) {
        match self.items.item(id) {
            Some(definition) => (definition, None),
            None => {
                tracing::warn!(item = id, "unknown item; using fallback heal");
                (
                    ItemDefinition::fallback(id),
                    Some(TemplateError::MissingItem(id.to_owned())),
                )
            }
        }
    }
}

impl core::fmt::Debug for BattleEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BattleEnv")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}

/// Resolve a move id.
///
/// # Errors
///
/// Returns `TemplateError::MissingMove` if the oracle has no such move.
pub fn resolve_move(moves: &dyn MoveOracle, id: &str) -> Result<Move, TemplateError> {
    moves
        .move_template(id)
        .ok_or_else(|| TemplateError::MissingMove(id.to_owned()))
}

/// Resolve a list of move ids, substituting a generic strike for each miss.
///
/// Returns the resolved moves together with the ids that were not found.
pub fn resolve_moves(
    moves: &dyn MoveOracle,
    ids: &[String],
    atk: u32,
) -> (Vec<Move>, Vec<TemplateError>) {
    let mut resolved = Vec::with_capacity(ids.len());
    let mut missing = Vec::new();
    for id in ids {
        match resolve_move(moves, id) {
            Ok(mv) => resolved.push(mv),
            Err(err) => {
                tracing::warn!(move_id = %id, "unknown move; substituting generic strike");
                missing.push(err);
                resolved.push(Move::generic_strike(atk));
            }
        }
    }
    (resolved, missing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{Element, Power};

    struct OneMove;

    impl MoveOracle for OneMove {
        fn move_template(&self, id: &str) -> Option<Move> {
            (id == "splash").then(|| Move::new("splash", "Splash", Element::Water, Power::Fixed(8)))
        }
    }

    #[test]
    fn missing_moves_degrade_to_strike() {
        let ids = vec!["splash".to_owned(), "nope".to_owned()];
        let (moves, missing) = resolve_moves(&OneMove, &ids, 20);
        assert_eq!(moves.len(), 2);
        assert_eq!(moves[0].id, "splash");
        assert_eq!(moves[1].id, Move::GENERIC_STRIKE_ID);
        assert_eq!(missing, vec![TemplateError::MissingMove("nope".into())]);
    }
}
