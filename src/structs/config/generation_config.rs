use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GenerationConfig {
    #[serde(default = "ConfigHelper::default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "ConfigHelper::default_max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: ConfigHelper::default_request_timeout_secs(),
            max_concurrent: ConfigHelper::default_max_concurrent(),
        }
    }
}
