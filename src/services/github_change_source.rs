use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, RequestBuilder};
use crate::config::constants::{DIFF_TRUNCATION_MARKER, USER_AGENT};
use crate::enums::transport_error::TransportError;
use crate::errors::{PrNotesError, PrNotesResult};
use crate::services::notes_backends::ensure_success;
use crate::structs::change_page::ChangePage;
use crate::structs::change_record::ChangeRecord;
use crate::structs::config::github_config::GithubConfig;
use crate::structs::github::github_pull_request::GithubPullRequest;
use crate::traits::change_source::ChangeSource;

/// Lists merged pull requests of one GitHub repository, newest first.
pub struct GithubChangeSource {
    client: Client,
    api_base: String,
    owner: String,
    repo: String,
    token: Option<String>,
    page_size: u32,
    max_diff_chars: usize,
}

impl GithubChangeSource {
    pub fn new(config: &GithubConfig, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            owner: config.owner.clone(),
            repo: config.repo.clone(),
            token,
            page_size: config.page_size,
            max_diff_chars: config.max_diff_chars,
        }
    }

    fn get(&self, url: &str, accept: &str) -> RequestBuilder {
        let builder = self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", accept)
            .header("X-GitHub-Api-Version", "2022-11-28");

        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn fetch_pull_requests(&self, page: u32) -> Result<Vec<GithubPullRequest>, TransportError> {
        let url = format!(
            "{}/repos/{}/{}/pulls?state=closed&sort=updated&direction=desc&per_page={}&page={}",
            self.api_base, self.owner, self.repo, self.page_size, page
        );
        log::debug!("📥 GET {}", url);

        let response = self
            .get(&url, "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| TransportError::NetworkError(e.to_string()))?;

        ensure_success(response)
            .await?
            .json::<Vec<GithubPullRequest>>()
            .await
            .map_err(|e| TransportError::SerializationError(e.to_string()))
    }

    async fn fetch_diff(&self, number: u64) -> Result<String, TransportError> {
        let url = format!("{}/repos/{}/{}/pulls/{}", self.api_base, self.owner, self.repo, number);

        let response = self
            .get(&url, "application/vnd.github.v3.diff")
            .send()
            .await
            .map_err(|e| TransportError::NetworkError(e.to_string()))?;

        ensure_success(response)
            .await?
            .text()
            .await
            .map_err(|e| TransportError::NetworkError(e.to_string()))
    }

    fn parse_page_token(page_token: Option<&str>) -> PrNotesResult<u32> {
        match page_token {
            None => Ok(1),
            Some(token) => token
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|page| *page >= 1)
                .ok_or_else(|| {
                    PrNotesError::config_error(
                        &format!("invalid page token '{}'", token),
                        Some("Page tokens are page numbers starting at 1"),
                    )
                }),
        }
    }
}

pub fn change_id(owner: &str, repo: &str, number: u64) -> String {
    format!("{}/{}#{}", owner, repo, number)
}

pub fn build_description(title: &str, body: Option<&str>) -> String {
    match body.map(str::trim).filter(|body| !body.is_empty()) {
        Some(body) => format!("{}\n\n{}", title.trim(), body),
        None => title.trim().to_string(),
    }
}

/// Cuts `diff` to at most `max_chars` characters, marking the cut.
pub fn truncate_diff(diff: &str, max_chars: usize) -> String {
    match diff.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}{}", &diff[..byte_index], DIFF_TRUNCATION_MARKER),
        None => diff.to_string(),
    }
}

#[async_trait]
impl ChangeSource for GithubChangeSource {
    async fn fetch_page(&self, page_token: Option<&str>) -> PrNotesResult<ChangePage> {
        let page = Self::parse_page_token(page_token)?;
        let pull_requests = self.fetch_pull_requests(page).await?;
        let upstream_count = pull_requests.len();

        let mut items = Vec::new();
        for pr in pull_requests.into_iter().filter(|pr| pr.merged_at.is_some()) {
            let diff = self.fetch_diff(pr.number).await?;

            items.push(ChangeRecord {
                id: change_id(&self.owner, &self.repo, pr.number),
                description: build_description(&pr.title, pr.body.as_deref()),
                diff_text: truncate_diff(&diff, self.max_diff_chars),
                source_url: pr.html_url,
                fetched_at: Utc::now(),
                developer_note: None,
                marketing_note: None,
                notes_updated_at: None,
            });
        }

        log::info!(
            "📥 Page {}: {} merged of {} closed pull requests",
            page,
            items.len(),
            upstream_count
        );

        let next_page_token = (upstream_count as u64 >= u64::from(self.page_size)).then(|| (page + 1).to_string());

        Ok(ChangePage {
            items,
            next_page_token,
            current_page: page,
            page_size: self.page_size,
        })
    }
}
