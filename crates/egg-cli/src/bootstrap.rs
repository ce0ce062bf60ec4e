use std::path::Path;

use anyhow::Context;
use egg_config::{EggConfig, MEMORY};
use egg_db::StoreRegistry;

use crate::cli::GlobalFlags;

/// Load configuration from `.env`, TOML files and the environment.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<EggConfig> {
    EggConfig::load_with_dotenv(flags.config.as_deref())
        .context("failed to load objeggtives configuration")
}

/// Store registry recording trails where the config asks for them.
pub fn store_registry(config: &EggConfig) -> StoreRegistry {
    StoreRegistry::new().with_trail_dir(config.store.trail_dir.clone())
}

/// Database path for `store_file`, creating the data directory when needed.
pub fn store_path(config: &EggConfig, store_file: &str) -> anyhow::Result<String> {
    let path = config.store.resolve(store_file);
    if path != MEMORY
        && let Some(parent) = Path::new(&path).parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create data directory {}", parent.display()))?;
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_path_creates_missing_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = EggConfig::default();
        config.store.data_dir = dir.path().join("nested").join("data");

        let path = store_path(&config, "shopping.db").unwrap();

        assert!(dir.path().join("nested").join("data").is_dir());
        assert!(path.ends_with("shopping.db"));
    }

    #[test]
    fn in_memory_config_touches_nothing() {
        let mut config = EggConfig::default();
        config.store.in_memory = true;
        assert_eq!(store_path(&config, "shopping.db").unwrap(), MEMORY);
    }
}
