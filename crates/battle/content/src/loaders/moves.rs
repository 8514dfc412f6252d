//! Move catalog loader.

use std::path::Path;

use anyhow::Context;
use battle_core::Move;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Move catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveCatalog {
    pub moves: Vec<Move>,
}

/// Loader for the move catalog.
pub struct MoveLoader;

impl MoveLoader {
    pub fn parse(content: &str) -> LoadResult<Vec<Move>> {
        let catalog: MoveCatalog = parse_ron(content, "move catalog")?;
        Ok(catalog.moves)
    }

    /// Load the move catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<Move>> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }
}
