#![allow(dead_code)]

use gh_profile_analyzer::error::{FetchError, Result};
use gh_profile_analyzer::github::GithubSource;
use gh_profile_analyzer::model::{CommitRecord, RepositorySummary};
use std::collections::HashMap;
use std::sync::Mutex;

/// How the fake answers a commit request for one repository.
#[derive(Clone)]
pub enum Commits {
    Dates(Vec<&'static str>),
    Records(Vec<CommitRecord>),
    HttpError(u16),
    Malformed,
}

/// In-memory stand-in for the GitHub REST API.
#[derive(Default)]
pub struct FakeGithub {
    pub repos: Vec<RepositorySummary>,
    pub repos_status: Option<u16>,
    pub commits: HashMap<String, Commits>,
    pub commit_calls: Mutex<Vec<String>>,
}

impl FakeGithub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repo(mut self, name: &str, commits: Commits) -> Self {
        self.repos.push(repo(self.repos.len() as u64 + 1, name));
        self.commits.insert(name.to_string(), commits);
        self
    }

    pub fn failing_repo_list(mut self, status: u16) -> Self {
        self.repos_status = Some(status);
        self
    }

    pub fn fetched(&self) -> Vec<String> {
        self.commit_calls.lock().unwrap().clone()
    }
}

pub fn repo(id: u64, name: &str) -> RepositorySummary {
    RepositorySummary {
        id,
        name: name.to_string(),
        html_url: format!("https://github.com/octocat/{name}"),
        stargazers_count: 0,
        forks_count: 0,
        updated_at: "2024-06-01T00:00:00Z".to_string(),
    }
}

fn malformed() -> FetchError {
    serde_json::from_str::<serde_json::Value>("{\"message\": ")
        .unwrap_err()
        .into()
}

impl GithubSource for FakeGithub {
    async fn user_repos(&self, _username: &str) -> Result<Vec<RepositorySummary>> {
        match self.repos_status {
            Some(status) => Err(FetchError::Status {
                status,
                body: "{\"message\":\"Not Found\"}".to_string(),
            }),
            None => Ok(self.repos.clone()),
        }
    }

    async fn repo_commits(&self, owner: &str, repo: &str) -> Result<Vec<CommitRecord>> {
        self.commit_calls
            .lock()
            .unwrap()
            .push(format!("{owner}/{repo}"));

        match self.commits.get(repo).cloned() {
            Some(Commits::Dates(dates)) => Ok(dates
                .into_iter()
                .map(CommitRecord::with_author_date)
                .collect()),
            Some(Commits::Records(records)) => Ok(records),
            Some(Commits::HttpError(status)) => Err(FetchError::Status {
                status,
                body: String::new(),
            }),
            Some(Commits::Malformed) => Err(malformed()),
            None => Ok(Vec::new()),
        }
    }
}
