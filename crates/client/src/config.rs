//! Client configuration read from the process environment.
use std::env;
use std::path::PathBuf;

/// Settings for one auto-played encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Data directory; the compiled-in content is used when unset.
    pub data_dir: Option<PathBuf>,
    pub encounter: Option<String>,
    pub seed: u64,
    pub max_rounds: u32,
    pub log_dir: Option<PathBuf>,
    pub session_id: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            encounter: None,
            seed: Self::DEFAULT_SEED,
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
            log_dir: None,
            session_id: None,
        }
    }
}

impl ClientConfig {
    pub const DEFAULT_SEED: u64 = 0x5EED;
    pub const DEFAULT_MAX_ROUNDS: u32 = 50;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CONTENT_DATA_DIR` - Directory of RON/TOML content (default: built-in content)
    /// - `BATTLE_ENCOUNTER` - Encounter id to play (default: first in the table)
    /// - `BATTLE_SEED` - Encounter seed (default: 0x5EED)
    /// - `BATTLE_MAX_ROUNDS` - Rounds before the autopilot gives up (default: 50)
    /// - `BATTLE_LOG_DIR` - Log directory (default: platform cache dir)
    /// - `BATTLE_SESSION_ID` - Log subdirectory name (default: derived from the seed)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.data_dir = env::var("CONTENT_DATA_DIR").ok().map(PathBuf::from);
        config.encounter = env::var("BATTLE_ENCOUNTER").ok().filter(|id| !id.is_empty());

        if let Some(seed) = read_env::<u64>("BATTLE_SEED") {
            config.seed = seed;
        }
        if let Some(rounds) = read_env::<u32>("BATTLE_MAX_ROUNDS") {
            config.max_rounds = rounds.max(1);
        }

        config.log_dir = env::var("BATTLE_LOG_DIR").ok().map(PathBuf::from);
        config.session_id = env::var("BATTLE_SESSION_ID").ok();

        config
    }

    pub fn session_id(&self) -> String {
        self.session_id
            .clone()
            .unwrap_or_else(|| format!("battle_{:x}", self.seed))
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
