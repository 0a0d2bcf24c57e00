use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Subset of the GitHub pull request listing payload.
#[derive(Deserialize, Debug, Clone)]
pub struct GithubPullRequest {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub merged_at: Option<DateTime<Utc>>,
}
