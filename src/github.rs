use crate::error::{FetchError, Result};
use crate::model::{CommitRecord, RepositorySummary};
use reqwest::header::{ACCEPT, RETRY_AFTER, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Commits requested per repository. Only the first page is read.
pub const COMMITS_PER_PAGE: u32 = 100;

const MAX_RETRIES: usize = 4;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Where repositories and commits come from.
pub trait GithubSource {
    /// First page of the repositories owned by `username`.
    fn user_repos(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Vec<RepositorySummary>>> + Send;

    /// Up to [`COMMITS_PER_PAGE`] most recent commits of `owner/repo`.
    fn repo_commits(
        &self,
        owner: &str,
        repo: &str,
    ) -> impl Future<Output = Result<Vec<CommitRecord>>> + Send;
}

#[derive(Clone)]
pub struct GithubClient {
    base_url: Arc<String>,
    token: Option<Arc<String>>,
    http: Arc<Client>,
}

impl GithubClient {
    /// Create a REST client. Requests are anonymous when `token` is `None`.
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            base_url: Arc::new(base_url.trim_end_matches('/').to_string()),
            token: token.filter(|t| !t.is_empty()).map(Arc::new),
            http: Arc::new(http),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET with basic retry/backoff, returning the parsed JSON body.
    async fn get_json(&self, path: &str) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let mut attempt = 0usize;

        loop {
            attempt += 1;

            let mut req = self
                .http
                .get(&url)
                .header(USER_AGENT, "gh-profile-analyzer")
                .header(ACCEPT, "application/vnd.github+json");
            if let Some(token) = &self.token {
                req = req.bearer_auth(token.as_str());
            }

            debug!(%url, attempt, "GET");
            let resp = req.send().await?;

            let status = resp.status();
            let headers = resp.headers().clone();
            let body = resp.text().await?;

            if status.is_success() {
                return Ok(serde_json::from_str(&body)?);
            }

            // Primary rate limit: GitHub answers 403 with zero remaining quota.
            let quota_exhausted = headers
                .get("X-RateLimit-Remaining")
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v == "0");

            if status == StatusCode::TOO_MANY_REQUESTS
                || (status == StatusCode::FORBIDDEN && quota_exhausted)
            {
                if attempt >= MAX_RETRIES || quota_exhausted {
                    return Err(FetchError::RateLimited);
                }
                let wait_secs = headers
                    .get(RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(2);
                warn!(%url, wait_secs, "rate limited, waiting");
                sleep(Duration::from_secs(wait_secs)).await;
                continue;
            }

            if status.is_server_error() && attempt < MAX_RETRIES {
                let backoff = Duration::from_millis(250u64.saturating_mul(1 << (attempt - 1)));
                warn!(%url, %status, ?backoff, "server error, retrying");
                sleep(backoff).await;
                continue;
            }

            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let json = self.get_json(path).await?;
        Ok(serde_json::from_value(json)?)
    }
}

impl GithubSource for GithubClient {
    async fn user_repos(&self, username: &str) -> Result<Vec<RepositorySummary>> {
        self.get(&format!("/users/{username}/repos")).await
    }

    async fn repo_commits(&self, owner: &str, repo: &str) -> Result<Vec<CommitRecord>> {
        let items: Vec<Value> = self
            .get(&format!(
                "/repos/{owner}/{repo}/commits?per_page={COMMITS_PER_PAGE}"
            ))
            .await?;
        Ok(commit_records(items))
    }
}

/// Decode commit list elements one by one.
///
/// An element whose shape does not match becomes an empty record, so it is
/// skipped by the aggregator instead of failing the whole repository.
pub fn commit_records(items: Vec<Value>) -> Vec<CommitRecord> {
    items
        .into_iter()
        .map(|item| serde_json::from_value(item).unwrap_or_default())
        .collect()
}
