pub mod ai_config;
pub mod cache_config;
pub mod config;
pub mod generation_config;
pub mod github_config;
