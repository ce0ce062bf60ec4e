//! List store locations.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use egg_core::MEMORY;

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Directory holding one database file per list.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Directory for JSONL mutation trails. Trails are off when unset.
    #[serde(default)]
    pub trail_dir: Option<PathBuf>,

    /// Keep every list in memory (nothing survives a restart).
    #[serde(default)]
    pub in_memory: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            trail_dir: None,
            in_memory: false,
        }
    }
}

impl StoreConfig {
    /// Database path for a store file name, as handed to libSQL.
    pub fn resolve(&self, file_name: &str) -> String {
        if self.in_memory || file_name == MEMORY {
            return MEMORY.to_string();
        }
        self.data_dir.join(file_name).to_string_lossy().into_owned()
    }
}
