//! Content loaders for reading battle data from files.
//!
//! Every loader exposes `parse` for in-memory text and `load` for a path, so
//! the same code serves data directories and the embedded defaults.

pub mod combatants;
pub mod config;
pub mod encounters;
pub mod factory;
pub mod items;
pub mod moves;
pub mod party;

pub use combatants::{BossLoader, EnemyLoader, FishLoader};
pub use config::ConfigLoader;
pub use encounters::{EncounterLoader, EncounterSpec, LevelledId};
pub use factory::ContentFactory;
pub use items::ItemLoader;
pub use moves::MoveLoader;
pub use party::{PartyLoader, PartySpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Parse RON text, naming `what` in the error.
pub(crate) fn parse_ron<T>(content: &str, what: &str) -> LoadResult<T>
where
    T: serde::de::DeserializeOwned,
{
    ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse {} RON: {}", what, e))
}
