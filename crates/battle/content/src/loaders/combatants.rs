//! Fish, enemy and boss catalog loaders.

use std::path::Path;

use anyhow::Context;
use battle_core::{BossTemplate, EnemyTemplate, FishTemplate};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FishCatalog {
    pub fish: Vec<FishTemplate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyCatalog {
    pub enemies: Vec<EnemyTemplate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossCatalog {
    pub bosses: Vec<BossTemplate>,
}

/// Loader for catchable fish templates.
pub struct FishLoader;

impl FishLoader {
    pub fn parse(content: &str) -> LoadResult<Vec<FishTemplate>> {
        let catalog: FishCatalog = parse_ron(content, "fish catalog")?;
        Ok(catalog.fish)
    }

    pub fn load(path: &Path) -> LoadResult<Vec<FishTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }
}

/// Loader for regular enemy templates.
pub struct EnemyLoader;

impl EnemyLoader {
    pub fn parse(content: &str) -> LoadResult<Vec<EnemyTemplate>> {
        let catalog: EnemyCatalog = parse_ron(content, "enemy catalog")?;
        Ok(catalog.enemies)
    }

    pub fn load(path: &Path) -> LoadResult<Vec<EnemyTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }
}

/// Loader for boss templates.
///
/// Phase counts outside 1..=3 are rejected here rather than clamped later.
pub struct BossLoader;

impl BossLoader {
    pub fn parse(content: &str) -> LoadResult<Vec<BossTemplate>> {
        let catalog: BossCatalog = parse_ron(content, "boss catalog")?;
        for boss in &catalog.bosses {
            if !(1..=3).contains(&boss.phases) {
                anyhow::bail!(
                    "boss '{}' declares {} phases (expected 1 to 3)",
                    boss.base.id,
                    boss.phases
                );
            }
        }
        Ok(catalog.bosses)
    }

    pub fn load(path: &Path) -> LoadResult<Vec<BossTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }
}
