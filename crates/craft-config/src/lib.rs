//! # craft-config
//!
//! Layered configuration loading for autocraft using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`AUTOCRAFT_*` prefix, `__` as separator)
//! 2. `OPENAI_API_KEY`, mapped onto `generator.api_key`
//! 3. Project-level `.autocraft/config.toml`
//! 4. User-level `~/.config/autocraft/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `AUTOCRAFT_GENERATOR__BACKEND` -> `generator.backend`,
//! `AUTOCRAFT_STORAGE__DB_PATH` -> `storage.db_path`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use craft_config::CraftConfig;
//!
//! let config = CraftConfig::load_with_dotenv().expect("config");
//! config.validate().expect("usable config");
//! println!("generator backend: {}", config.generator.backend);
//! ```

mod error;
mod generator;
mod storage;

pub use error::ConfigError;
pub use generator::{GeneratorBackend, GeneratorConfig};
pub use storage::{DEFAULT_DB_PATH, StorageConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file, relative to the working directory.
pub const LOCAL_CONFIG_PATH: &str = ".autocraft/config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CraftConfig {
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl CraftConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support from the working directory.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment
            .merge(
                Env::raw()
                    .only(&["OPENAI_API_KEY"])
                    .map(|_| "generator.api_key".into()),
            )
            .merge(Env::prefixed("AUTOCRAFT_").split("__"))
    }

    /// Check every section for values that cannot work at runtime.
    ///
    /// # Errors
    ///
    /// Returns the first section error found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generator.validate()
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("autocraft").join("config.toml"))
    }
}
