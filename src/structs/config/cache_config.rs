use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CacheConfig {
    /// SQLite file; a leading `~/` is expanded to the home directory.
    #[serde(default = "ConfigHelper::default_cache_path")]
    pub path: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: ConfigHelper::default_cache_path(),
        }
    }
}
