use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Repository as listed by `GET /users/{username}/repos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub id: u64,
    pub name: String,
    pub html_url: String,
    pub stargazers_count: u32,
    pub forks_count: u32,
    pub updated_at: String,
}

/// One element of `GET /repos/{owner}/{repo}/commits`.
///
/// Only `commit.author.date` is consumed and every level of that path may be
/// absent or null.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitRecord {
    pub commit: Option<CommitDetail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitDetail {
    pub author: Option<CommitAuthor>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitAuthor {
    pub date: Option<String>,
}

impl CommitRecord {
    /// Record carrying only an author date.
    pub fn with_author_date(date: impl Into<String>) -> Self {
        Self {
            commit: Some(CommitDetail {
                author: Some(CommitAuthor {
                    date: Some(date.into()),
                }),
            }),
        }
    }

    pub fn author_date(&self) -> Option<&str> {
        self.commit
            .as_ref()
            .and_then(|c| c.author.as_ref())
            .and_then(|a| a.date.as_deref())
    }
}

/// Number of commits authored on one UTC calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u32,
}

/// Everything one query produced.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub username: String,
    pub repositories: Vec<RepositorySummary>,
    pub analyzed_repos: Vec<String>,
    pub failed_repos: Vec<String>,
    pub daily_commits: Vec<DailyCount>,
}

impl Analysis {
    pub fn total_commits(&self) -> u64 {
        self.daily_commits.iter().map(|d| u64::from(d.count)).sum()
    }
}
