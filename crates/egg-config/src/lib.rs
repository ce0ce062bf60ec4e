//! # egg-config
//!
//! Layered configuration loading for objeggtives using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`OBJEGGTIVES_*` prefix, `__` as separator)
//! 2. Bare `DISCORD_TOKEN` / `GUILD_ID` variables
//! 3. An explicit config file (`egg --config <path>`)
//! 4. Project-level `.objeggtives/config.toml`
//! 5. User-level `~/.config/objeggtives/config.toml`
//! 6. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `OBJEGGTIVES_DISCORD__TOKEN` -> `discord.token`,
//! `OBJEGGTIVES_STORE__DATA_DIR` -> `store.data_dir`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use egg_config::EggConfig;
//!
//! // Load from all sources (dotenvy + TOML + env):
//! let config = EggConfig::load_with_dotenv(None).expect("config");
//!
//! if config.discord.is_configured() {
//!     println!("token: {}", config.discord.redacted_token());
//! }
//! ```

mod discord;
mod error;
mod logging;
mod store;

pub use discord::{DiscordConfig, IntentsConfig};
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use store::{MEMORY, StoreConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix for all namespaced environment variables.
pub const ENV_PREFIX: &str = "OBJEGGTIVES_";

/// Project-local config file, relative to the working directory.
const LOCAL_CONFIG: &str = ".objeggtives/config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EggConfig {
    #[serde(default)]
    pub discord: DiscordConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EggConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_file
            && !path.exists()
        {
            return Err(ConfigError::InvalidValue {
                field: "config".into(),
                reason: format!("file '{}' does not exist", path.display()),
            });
        }

        let config: Self = Self::figment(config_file).extract()?;
        config.discord.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Loads `.env` from the directory of `config_file` (when given) and then
    /// from the working directory. Variables already set win over both.
    pub fn load_with_dotenv(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(dir) = config_file.and_then(Path::parent) {
            let env_path = dir.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
            }
        }
        let _ = dotenvy::dotenv();
        Self::load(config_file)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment(config_file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(LOCAL_CONFIG);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        if let Some(path) = config_file {
            figment = figment.merge(Toml::file(path));
        }

        figment
            .merge(Self::legacy_env())
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Bare variable names used by older deployments.
    fn legacy_env() -> Env {
        Env::raw()
            .only(&["DISCORD_TOKEN", "GUILD_ID"])
            .map(|key| {
                if key.as_str().eq_ignore_ascii_case("guild_id") {
                    "discord.guild_id".into()
                } else {
                    "discord.token".into()
                }
            })
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("objeggtives").join("config.toml"))
    }
}
