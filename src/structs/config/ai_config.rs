use serde::{Deserialize, Serialize};
use crate::enums::notes_provider::NotesProvider;
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AiConfig {
    #[serde(default)]
    pub provider: NotesProvider,

    #[serde(default = "ConfigHelper::default_model")]
    pub model: String,

    #[serde(default = "ConfigHelper::default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "ConfigHelper::default_temperature")]
    pub temperature: f32,

    #[serde(default = "ConfigHelper::default_api_key_env")]
    pub api_key_env: Option<String>,

    #[serde(default = "ConfigHelper::default_anthropic_base_url")]
    pub base_url: String,

    /// Notes endpoint used when `provider = "http"`.
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: NotesProvider::default(),
            model: ConfigHelper::default_model(),
            max_tokens: ConfigHelper::default_max_tokens(),
            temperature: ConfigHelper::default_temperature(),
            api_key_env: ConfigHelper::default_api_key_env(),
            base_url: ConfigHelper::default_anthropic_base_url(),
            endpoint: None,
        }
    }
}
