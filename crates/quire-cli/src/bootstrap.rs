use std::path::PathBuf;

use quire_config::QuireConfig;

use crate::cli::GlobalFlags;

/// Load layered config (including `.env`) and apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<QuireConfig> {
    let mut config = QuireConfig::load_with_dotenv()?;
    apply_overrides(&mut config, flags);
    config.validate()?;
    Ok(config)
}

fn apply_overrides(config: &mut QuireConfig, flags: &GlobalFlags) {
    if let Some(db) = &flags.db {
        tracing::debug!(db, "database path overridden on the command line");
        config.database.path = PathBuf::from(db);
    }
}
