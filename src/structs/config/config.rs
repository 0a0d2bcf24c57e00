use serde::{Deserialize, Serialize};
use crate::structs::config::ai_config::AiConfig;
use crate::structs::config::cache_config::CacheConfig;
use crate::structs::config::generation_config::GenerationConfig;
use crate::structs::config::github_config::GithubConfig;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub github: GithubConfig,

    #[serde(default)]
    pub ai: AiConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub generation: GenerationConfig,
}
