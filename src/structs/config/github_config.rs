use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GithubConfig {
    #[serde(default)]
    pub owner: String,

    #[serde(default)]
    pub repo: String,

    #[serde(default = "ConfigHelper::default_github_api_base")]
    pub api_base: String,

    #[serde(default = "ConfigHelper::default_github_token_env")]
    pub token_env: Option<String>,

    #[serde(default = "ConfigHelper::default_page_size")]
    pub page_size: u32,

    #[serde(default = "ConfigHelper::default_max_diff_chars")]
    pub max_diff_chars: usize,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            owner: String::new(),
            repo: String::new(),
            api_base: ConfigHelper::default_github_api_base(),
            token_env: ConfigHelper::default_github_token_env(),
            page_size: ConfigHelper::default_page_size(),
            max_diff_chars: ConfigHelper::default_max_diff_chars(),
        }
    }
}
