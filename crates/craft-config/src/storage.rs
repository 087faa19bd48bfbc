//! Artifact store configuration.

use serde::{Deserialize, Serialize};

/// Default database location, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = ".autocraft/autocraft.db";

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Path to the libSQL database file, or `:memory:`.
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

impl StorageConfig {
    /// Whether the store lives only for the lifetime of the process.
    pub fn is_in_memory(&self) -> bool {
        self.db_path == ":memory:"
    }
}
