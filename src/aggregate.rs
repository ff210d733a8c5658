//! Commit activity aggregation.
//!
//! Commit timestamps from a user's first few repositories are bucketed by
//! their UTC calendar date and emitted as an ascending daily series. A
//! repository whose commits cannot be fetched contributes nothing and does
//! not stop the others.

use crate::github::GithubSource;
use crate::model::{DailyCount, RepositorySummary};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Only this many repositories, taken in list order, are analyzed.
pub const MAX_ANALYZED_REPOS: usize = 5;

/// Output of [`collect_commit_activity`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommitActivity {
    pub analyzed_repos: Vec<String>,
    pub failed_repos: Vec<String>,
    pub daily_commits: Vec<DailyCount>,
}

/// UTC calendar date of an RFC 3339 timestamp.
///
/// Date-only values and timestamps without an offset are not accepted and
/// yield `None`; GitHub always sends full timestamps with a `Z` suffix.
pub fn date_key(timestamp: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(timestamp.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc).date_naive())
}

/// Count timestamps per UTC day, sorted by date. Unparseable entries are skipped.
pub fn daily_counts<'a, I>(timestamps: I) -> Vec<DailyCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut by_date: BTreeMap<NaiveDate, u32> = BTreeMap::new();

    for ts in timestamps {
        match date_key(ts) {
            Some(date) => *by_date.entry(date).or_insert(0) += 1,
            None => warn!(timestamp = ts, "skipping unparseable commit date"),
        }
    }

    by_date
        .into_iter()
        .map(|(date, count)| DailyCount { date, count })
        .collect()
}

/// Fetch commits of the first [`MAX_ANALYZED_REPOS`] repositories one after
/// another and fold their author dates into a daily series.
pub async fn collect_commit_activity<S: GithubSource>(
    source: &S,
    username: &str,
    repos: &[RepositorySummary],
) -> CommitActivity {
    let mut activity = CommitActivity::default();
    let mut dates: Vec<String> = Vec::new();

    for repo in repos.iter().take(MAX_ANALYZED_REPOS) {
        match source.repo_commits(username, &repo.name).await {
            Ok(commits) => {
                let before = dates.len();
                dates.extend(
                    commits
                        .iter()
                        .filter_map(|c| c.author_date())
                        .map(str::to_owned),
                );
                info!(
                    repo = %repo.name,
                    commits = commits.len(),
                    dated = dates.len() - before,
                    "fetched commits"
                );
                activity.analyzed_repos.push(repo.name.clone());
            }
            Err(e) => {
                // one bad repository must not sink the whole query
                warn!(repo = %repo.name, error = %e, "failed to fetch commits");
                activity.failed_repos.push(repo.name.clone());
            }
        }
    }

    activity.daily_commits = daily_counts(dates.iter().map(String::as_str));
    activity
}
