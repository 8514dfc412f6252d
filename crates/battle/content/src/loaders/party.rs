//! Starting party definitions.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use battle_core::{AllyId, CombatantOracle, MiracleKind, MoveOracle, Party, PlayerFish};
use serde::{Deserialize, Serialize};

use crate::loaders::{LevelledId, LoadResult, parse_ron, read_file};

/// A party as written in data: fish by template id plus starting resources.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PartySpec {
    pub fish: Vec<LevelledId>,
    pub currency: u32,
    pub items: BTreeMap<String, u32>,
    pub allies: Vec<AllyId>,
    pub miracles: Vec<MiracleKind>,
    pub meter: f64,
}

impl PartySpec {
    /// Spawn the fish and assemble a [`Party`].
    pub fn build(&self, combatants: &dyn CombatantOracle, moves: &dyn MoveOracle) -> LoadResult<Party> {
        let mut fish = Vec::with_capacity(self.fish.len());
        for entry in &self.fish {
            let template = combatants
                .fish(&entry.id)
                .ok_or_else(|| anyhow::anyhow!("unknown fish template '{}'", entry.id))?;
            fish.push(PlayerFish::from_template(&template, entry.level, moves));
        }

        let mut party = Party::new(fish)
            .with_currency(self.currency)
            .with_meter(self.meter);
        for (id, count) in &self.items {
            party = party.with_item(id.clone(), *count);
        }
        for ally in &self.allies {
            party = party.with_ally(*ally);
        }
        for kind in &self.miracles {
            party = party.with_miracle(*kind);
        }
        Ok(party)
    }
}

/// Loader for the starting party.
pub struct PartyLoader;

impl PartyLoader {
    pub fn parse(content: &str) -> LoadResult<PartySpec> {
        parse_ron(content, "party")
    }

    pub fn load(path: &Path) -> LoadResult<PartySpec> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn party_spec_parses_resources() {
        let spec = PartyLoader::parse(
            r#"(
                fish: [(id: "carp_diem", level: 5)],
                currency: 50,
                items: {"plain_pita": 3},
                allies: [peter, thomas],
                miracles: [loaves_and_fishes],
                meter: 20.0,
            )"#,
        )
        .expect("party parses");

        assert_eq!(spec.fish[0].id, "carp_diem");
        assert_eq!(spec.items.get("plain_pita"), Some(&3));
        assert_eq!(spec.allies, vec![AllyId::Peter, AllyId::Thomas]);
        assert_eq!(spec.miracles, vec![MiracleKind::LoavesAndFishes]);
    }
}
