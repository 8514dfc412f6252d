//! Loaves and Fishes battle client.
//!
//! Plays one encounter with a scripted pilot and prints the narration.
//!
//! ```bash
//! # Built-in content, first encounter
//! cargo run -p battle-client
//!
//! # A specific encounter from a data directory
//! CONTENT_DATA_DIR=crates/battle/content/data BATTLE_ENCOUNTER=wedding_at_cana \
//!     cargo run -p battle-client
//! ```

use anyhow::{Context, Result};
use battle_client::{ClientConfig, logging, play};
use battle_content::{ContentFactory, ContentOracles};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let config = ClientConfig::from_env();

    // 2. Setup logging
    let log_dir = config.log_dir.clone().unwrap_or_else(logging::default_log_dir);
    let _guard = logging::setup_logging(&log_dir, &config.session_id())?;
    tracing::info!(seed = config.seed, max_rounds = config.max_rounds, "starting battle client");

    // 3. Load content
    let content = match &config.data_dir {
        Some(dir) => ContentFactory::new(dir).load_oracles()?,
        None => ContentOracles::builtin()?,
    };
    let env = content.env();

    // 4. Assemble party and encounter
    let spec = match &config.encounter {
        Some(id) => content
            .encounter(id)
            .with_context(|| format!("Unknown encounter '{id}'"))?,
        None => content
            .encounters()
            .first()
            .context("Content defines no encounters")?,
    };
    let mut party = content.party().build(&content, &content)?;
    let encounter = spec
        .build(&env, config.seed)
        .with_context(|| format!("Failed to build encounter '{}'", spec.id))?;

    // 5. Play
    let stdout = std::io::stdout();
    let result = play(&env, &mut party, encounter, config.max_rounds, &mut stdout.lock())?;

    tracing::info!(encounter = %spec.id, %result, "client shutdown complete");
    Ok(())
}
