use crate::aggregate::collect_commit_activity;
use crate::error::QueryError;
use crate::github::GithubSource;
use crate::model::Analysis;
use tracing::info;

const MAX_LOGIN_LEN: usize = 39;

/// Where a query currently stands.
#[derive(Debug, Clone, Default)]
pub enum QueryState {
    #[default]
    Idle,
    Loading {
        username: String,
    },
    Ready(Analysis),
    Failed {
        username: String,
        error: String,
    },
}

impl QueryState {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading { .. })
    }

    pub fn analysis(&self) -> Option<&Analysis> {
        match self {
            QueryState::Ready(analysis) => Some(analysis),
            _ => None,
        }
    }
}

/// Trim `input` and check it looks like a GitHub login.
pub fn validate_username(input: &str) -> Result<&str, QueryError> {
    let name = input.trim();
    // Older accounts may carry hyphens GitHub no longer allows at signup.
    let valid = !name.is_empty()
        && name.len() <= MAX_LOGIN_LEN
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');

    if valid {
        Ok(name)
    } else {
        Err(QueryError::InvalidUsername(input.to_string()))
    }
}

/// Fetch `username`'s repositories, then aggregate commit activity of the
/// first few of them.
///
/// Only the repository list is load-bearing: if it cannot be fetched the
/// query fails. Commit fetch failures are absorbed per repository.
pub async fn analyze_user<S: GithubSource>(
    source: &S,
    username: &str,
) -> Result<Analysis, QueryError> {
    let username = validate_username(username)?;

    let repositories = source
        .user_repos(username)
        .await
        .map_err(QueryError::Repositories)?;
    info!(username, repos = repositories.len(), "fetched repositories");

    let activity = if repositories.is_empty() {
        Default::default()
    } else {
        collect_commit_activity(source, username, &repositories).await
    };

    Ok(Analysis {
        username: username.to_string(),
        repositories,
        analyzed_repos: activity.analyzed_repos,
        failed_repos: activity.failed_repos,
        daily_commits: activity.daily_commits,
    })
}

/// Holds the state of the most recent query.
#[derive(Debug, Default)]
pub struct Session {
    state: QueryState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Mark a query for `username` as in flight.
    pub fn begin(&mut self, username: &str) -> &QueryState {
        self.state = QueryState::Loading {
            username: username.trim().to_string(),
        };
        &self.state
    }

    /// Record the outcome of the in-flight query.
    pub fn finish(&mut self, result: Result<Analysis, QueryError>) -> &QueryState {
        let username = match &self.state {
            QueryState::Loading { username } => username.clone(),
            _ => String::new(),
        };
        self.state = match result {
            Ok(analysis) => QueryState::Ready(analysis),
            Err(e) => QueryState::Failed {
                username,
                error: e.to_string(),
            },
        };
        &self.state
    }

    /// Run one query to completion, replacing whatever the previous one left.
    pub async fn submit<S: GithubSource>(&mut self, source: &S, username: &str) -> &QueryState {
        self.begin(username);
        let result = analyze_user(source, username).await;
        self.finish(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_logins() {
        assert_eq!(validate_username("octocat").unwrap(), "octocat");
        assert_eq!(validate_username("  rust-lang \n").unwrap(), "rust-lang");
        assert!(validate_username(&"a".repeat(39)).is_ok());
    }

    #[test]
    fn accepts_legacy_hyphenated_logins() {
        for name in ["trail-", "dou--ble", "-lead"] {
            assert_eq!(validate_username(name).unwrap(), name);
        }
    }

    #[test]
    fn rejects_malformed_logins() {
        for bad in ["", "   ", "sl/ash", "a b", "ünï", "dot.name"] {
            assert!(
                matches!(validate_username(bad), Err(QueryError::InvalidUsername(_))),
                "{bad:?} should be rejected"
            );
        }
        assert!(validate_username(&"a".repeat(40)).is_err());
    }

    #[test]
    fn fresh_state_is_idle() {
        let session = Session::new();
        assert!(matches!(session.state(), QueryState::Idle));
        assert!(!session.state().is_loading());
        assert!(session.state().analysis().is_none());
    }

    #[test]
    fn begin_exposes_loading_until_finish() {
        let mut session = Session::new();

        let state = session.begin(" octocat ");
        assert!(state.is_loading());
        assert!(matches!(state, QueryState::Loading { username } if username == "octocat"));

        let state = session.finish(Err(QueryError::InvalidUsername("x y".into())));
        assert!(!state.is_loading());
        match state {
            QueryState::Failed { username, error } => {
                assert_eq!(username, "octocat");
                assert!(error.contains("Invalid GitHub username"));
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }
}
