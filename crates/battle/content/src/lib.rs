//! Data-driven battle content and loaders.
//!
//! This crate reads RON/TOML data files into the templates `battle-core`
//! consumes:
//! - Moves, fish, enemies and bosses (RON)
//! - Consumable items (RON)
//! - Named encounters and the starting party (RON)
//! - Balance configuration (TOML)
//!
//! [`ContentOracles`] implements the core oracle traits over the loaded data.
//! A copy of `data/` is compiled in and available through
//! [`ContentOracles::builtin`].

pub mod loaders;
pub mod oracle;

pub use loaders::{
    BossLoader, ConfigLoader, ContentFactory, EncounterLoader, EncounterSpec, EnemyLoader,
    FishLoader, ItemLoader, LevelledId, LoadResult, MoveLoader, PartyLoader, PartySpec,
};
pub use oracle::ContentOracles;
