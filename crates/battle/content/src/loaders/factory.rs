//! Content factory for building oracles from a data directory.

use std::path::{Path, PathBuf};

use battle_core::{BattleConfig, BossTemplate, EnemyTemplate, FishTemplate, ItemDefinition, Move};

use crate::loaders::{
    BossLoader, ConfigLoader, EncounterLoader, EncounterSpec, EnemyLoader, FishLoader, ItemLoader,
    LoadResult, MoveLoader, PartyLoader, PartySpec,
};
use crate::oracle::ContentOracles;

/// Loads battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml      (optional, defaults otherwise)
/// ├── moves.ron
/// ├── fish.ron
/// ├── enemies.ron
/// ├── bosses.ron       (optional)
/// ├── items.ron
/// ├── encounters.ron
/// └── party.ron        (optional)
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load `config.toml`, falling back to defaults when it is absent.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file; using defaults");
            return Ok(BattleConfig::default());
        }
        ConfigLoader::load(&path)
    }

    pub fn load_moves(&self) -> LoadResult<Vec<Move>> {
        MoveLoader::load(&self.data_dir.join("moves.ron"))
    }

    pub fn load_fish(&self) -> LoadResult<Vec<FishTemplate>> {
        FishLoader::load(&self.data_dir.join("fish.ron"))
    }

    pub fn load_enemies(&self) -> LoadResult<Vec<EnemyTemplate>> {
        EnemyLoader::load(&self.data_dir.join("enemies.ron"))
    }

    pub fn load_bosses(&self) -> LoadResult<Vec<BossTemplate>> {
        let path = self.data_dir.join("bosses.ron");
        if !path.exists() {
            return Ok(Vec::new());
        }
        BossLoader::load(&path)
    }

    pub fn load_items(&self) -> LoadResult<Vec<ItemDefinition>> {
        ItemLoader::load(&self.data_dir.join("items.ron"))
    }

    pub fn load_encounters(&self) -> LoadResult<Vec<EncounterSpec>> {
        EncounterLoader::load(&self.data_dir.join("encounters.ron"))
    }

    pub fn load_party(&self) -> LoadResult<PartySpec> {
        let path = self.data_dir.join("party.ron");
        if !path.exists() {
            return Ok(PartySpec::default());
        }
        PartyLoader::load(&path)
    }

    /// Load every file and assemble the oracles.
    pub fn load_oracles(&self) -> LoadResult<ContentOracles> {
        let mut content = ContentOracles::new(self.load_config()?);
        content.extend_moves(self.load_moves()?);
        content.extend_fish(self.load_fish()?);
        content.extend_enemies(self.load_enemies()?);
        content.extend_bosses(self.load_bosses()?);
        content.extend_items(self.load_items()?);
        content.set_encounters(self.load_encounters()?);
        content.set_party(self.load_party()?);

        let missing = content.audit();
        tracing::info!(
            data_dir = %self.data_dir.display(),
            encounters = content.encounters().len(),
            missing_moves = missing.len(),
            "content loaded"
        );
        Ok(content)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }
}
