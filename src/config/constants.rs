use std::time::Duration;

pub const CONFIG_DIR_NAME: &str = "prnotes";
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const ANTHROPIC_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";

pub const USER_AGENT: &str = concat!("prnotes-cli/", env!("CARGO_PKG_VERSION"));

pub const DIFF_TRUNCATION_MARKER: &str = "\n... [diff truncated]";

pub fn timeout_duration(seconds: u64) -> Duration {
    Duration::from_secs(seconds)
}
