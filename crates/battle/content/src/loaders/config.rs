//! Balance configuration loader.

use std::path::Path;

use anyhow::Context;
use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`BattleConfig`] from TOML files.
///
/// Keys left out keep their `BattleConfig::DEFAULT_*` values.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        Self::check(&config)?;
        Ok(config)
    }

    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    fn check(config: &BattleConfig) -> LoadResult<()> {
        if !(0.0..=1.0).contains(&config.crit_chance) {
            anyhow::bail!("crit_chance must be within 0.0..=1.0, got {}", config.crit_chance);
        }
        if config.variance_min > config.variance_max {
            anyhow::bail!(
                "variance_min ({}) exceeds variance_max ({})",
                config.variance_min,
                config.variance_max
            );
        }
        if config.defeat_penalty_percent > 100 || config.revive_percent > 100 {
            anyhow::bail!("percentages must not exceed 100");
        }
        Ok(())
    }
}
