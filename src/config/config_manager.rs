use std::fs;
use std::path::{Path, PathBuf};
use crate::config::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::enums::notes_provider::NotesProvider;
use crate::errors::{PrNotesError, PrNotesResult};
use crate::structs::config::config::Config;
use crate::structs::config::github_config::GithubConfig;

const SAMPLE_CONFIG: &str = r#"# PrNotes Configuration

# Repository whose merged pull requests are listed
[github]
owner = "rust-lang"
repo = "cargo"
api_base = "https://api.github.com"
# Optional, raises the API rate limit and allows private repositories
token_env = "GITHUB_TOKEN"
page_size = 10
# Diffs longer than this are truncated before being cached
max_diff_chars = 20000

# Notes generation backend
[ai]
# "anthropic" talks to the Messages API directly,
# "http" posts {id, description, diffText} to `endpoint` and streams the reply
provider = "anthropic"
model = "claude-sonnet-4-20250514"
max_tokens = 2048
temperature = 0.2
api_key_env = "ANTHROPIC_API_KEY"
base_url = "https://api.anthropic.com/v1"
# endpoint = "http://localhost:3000/api/generate-notes"

[cache]
path = "~/prnotes/cache.db"

[generation]
# Whole-request bound for one notes stream
request_timeout_secs = 120
# Parallel streams for `generate --all`
max_concurrent = 3
"#;

pub struct ConfigManager;

impl ConfigManager {
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    pub fn load(path: Option<&Path>) -> PrNotesResult<Config> {
        let config_path = path.map_or_else(Self::default_config_path, Path::to_path_buf);

        if !config_path.exists() {
            if path.is_some() {
                return Err(PrNotesError::ConfigurationFileError {
                    path: config_path.display().to_string(),
                    reason: "file does not exist".to_string(),
                });
            }
            log::debug!("No config at {}, using defaults", config_path.display());
            return Ok(Config::default());
        }

        log::info!("📋 Loading config from: {}", config_path.display());
        let content = fs::read_to_string(&config_path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> PrNotesResult<Config> {
        Ok(toml::from_str(content)?)
    }

    pub fn create_sample_config(path: Option<&Path>) -> PrNotesResult<PathBuf> {
        let config_path = path.map_or_else(Self::default_config_path, Path::to_path_buf);

        if config_path.exists() {
            return Err(PrNotesError::ConfigurationFileError {
                path: config_path.display().to_string(),
                reason: "a config file already exists".to_string(),
            });
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&config_path, SAMPLE_CONFIG)?;
        log::info!("✅ Created sample config at: {}", config_path.display());
        Ok(config_path)
    }

    pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if config.ai.provider == NotesProvider::Http
            && config.ai.endpoint.as_deref().map_or(true, |e| e.trim().is_empty())
        {
            errors.push("ai.endpoint is required when ai.provider = \"http\"".to_string());
        }

        if config.ai.max_tokens == 0 {
            errors.push("ai.max_tokens must be greater than zero".to_string());
        }

        if config.generation.request_timeout_secs == 0 {
            errors.push("generation.request_timeout_secs must be greater than zero".to_string());
        }

        if config.generation.max_concurrent == 0 {
            errors.push("generation.max_concurrent must be greater than zero".to_string());
        }

        if config.cache.path.trim().is_empty() {
            errors.push("cache.path must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Checks only what listing changes needs.
    pub fn validate_github(github: &GithubConfig) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if github.owner.trim().is_empty() {
            errors.push("github.owner is not set".to_string());
        }
        if github.repo.trim().is_empty() {
            errors.push("github.repo is not set".to_string());
        }
        if github.page_size == 0 || github.page_size > 100 {
            errors.push(format!("github.page_size must be between 1 and 100, got {}", github.page_size));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_config_parses_and_validates() {
        let config = ConfigManager::parse(SAMPLE_CONFIG).expect("sample parses");

        assert_eq!(config.github.owner, "rust-lang");
        assert_eq!(config.ai.provider, NotesProvider::Anthropic);
        assert_eq!(config.generation.max_concurrent, 3);
        assert!(ConfigManager::validate_config(&config).is_ok());
        assert!(ConfigManager::validate_github(&config.github).is_ok());
    }

    #[test]
    fn empty_file_falls_back_to_defaults() {
        let config = ConfigManager::parse("").expect("empty config parses");

        assert_eq!(config.github.page_size, 10);
        assert_eq!(config.generation.request_timeout_secs, 120);
        assert_eq!(config.cache.path, "~/prnotes/cache.db");
        assert!(ConfigManager::validate_config(&config).is_ok());
        assert!(ConfigManager::validate_github(&config.github).is_err());
    }

    #[test]
    fn http_provider_requires_endpoint() {
        let config = ConfigManager::parse("[ai]\nprovider = \"http\"\n").expect("parses");
        let errors = ConfigManager::validate_config(&config).unwrap_err();
        assert!(errors[0].contains("ai.endpoint"));
    }

    #[test]
    fn unknown_provider_is_a_parse_error() {
        assert!(ConfigManager::parse("[ai]\nprovider = \"carrier-pigeon\"\n").is_err());
    }

    #[test]
    fn sample_is_written_once() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested/config.toml");

        ConfigManager::create_sample_config(Some(&path)).expect("first write");
        assert!(ConfigManager::load(Some(&path)).is_ok());
        assert!(ConfigManager::create_sample_config(Some(&path)).is_err());
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(ConfigManager::load(Some(&dir.path().join("missing.toml"))).is_err());
    }
}
