use std::path::PathBuf;
use crate::config::constants::{
    ANTHROPIC_API_KEY_ENV, CONFIG_DIR_NAME, DEFAULT_ANTHROPIC_BASE_URL, DEFAULT_GITHUB_API_BASE,
    GITHUB_TOKEN_ENV,
};

pub struct ConfigHelper;

impl ConfigHelper {
    pub fn default_github_api_base() -> String {
        DEFAULT_GITHUB_API_BASE.to_string()
    }

    pub fn default_github_token_env() -> Option<String> {
        Some(GITHUB_TOKEN_ENV.to_string())
    }

    pub fn default_page_size() -> u32 {
        10
    }

    pub fn default_max_diff_chars() -> usize {
        20_000
    }

    pub fn default_model() -> String {
        "claude-sonnet-4-20250514".to_string()
    }

    pub fn default_max_tokens() -> u32 {
        2048
    }

    pub fn default_temperature() -> f32 {
        0.2
    }

    pub fn default_api_key_env() -> Option<String> {
        Some(ANTHROPIC_API_KEY_ENV.to_string())
    }

    pub fn default_anthropic_base_url() -> String {
        DEFAULT_ANTHROPIC_BASE_URL.to_string()
    }

    pub fn default_cache_path() -> String {
        format!("~/{}/cache.db", CONFIG_DIR_NAME)
    }

    pub fn default_request_timeout_secs() -> u64 {
        120
    }

    pub fn default_max_concurrent() -> usize {
        3
    }

    /// Expands a leading `~/` against the home directory.
    pub fn expand_home(path: &str) -> PathBuf {
        match (path.strip_prefix("~/"), dirs::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(path),
        }
    }

    /// Reads a secret from the environment variable named in the config.
    pub fn read_env(var_name: Option<&str>) -> Option<String> {
        var_name
            .and_then(|name| std::env::var(name).ok())
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}
