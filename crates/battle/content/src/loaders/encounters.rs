//! Named encounter tables.

use std::path::Path;

use anyhow::Context;
use battle_core::{BattleEnv, Encounter, Rewards, TemplateError};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// A template id at a given level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelledId {
    pub id: String,
    pub level: u32,
}

/// One named encounter: regular enemies, an optional boss and a bonus purse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterSpec {
    pub id: String,
    #[serde(default)]
    pub enemies: Vec<LevelledId>,
    #[serde(default)]
    pub boss: Option<LevelledId>,
    #[serde(default)]
    pub bonus: Option<Rewards>,
}

impl EncounterSpec {
    /// Instantiate the opponents through `env`.
    ///
    /// Fails on the first template id the environment cannot resolve.
    pub fn build(&self, env: &BattleEnv<'_>, seed: u64) -> Result<Encounter, TemplateError> {
        let mut encounter = Encounter::new(seed);
        if let Some(boss) = &self.boss {
            encounter = encounter.boss(env, &boss.id, boss.level)?;
        }
        for enemy in &self.enemies {
            encounter = encounter.enemy(env, &enemy.id, enemy.level)?;
        }
        if let Some(bonus) = &self.bonus {
            encounter = encounter.with_bonus(bonus.clone());
        }
        Ok(encounter)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterTable {
    pub encounters: Vec<EncounterSpec>,
}

/// Loader for encounter tables.
pub struct EncounterLoader;

impl EncounterLoader {
    pub fn parse(content: &str) -> LoadResult<Vec<EncounterSpec>> {
        let table: EncounterTable = parse_ron(content, "encounter table")?;
        for spec in &table.encounters {
            if spec.enemies.is_empty() && spec.boss.is_none() {
                anyhow::bail!("encounter '{}' has no opponents", spec.id);
            }
        }
        Ok(table.encounters)
    }

    pub fn load(path: &Path) -> LoadResult<Vec<EncounterSpec>> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }
}
