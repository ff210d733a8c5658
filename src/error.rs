use thiserror::Error;

/// Failure of a single GitHub REST call.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("GitHub API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Rate limit exceeded and retries exhausted")]
    RateLimited,
}

/// Failure of a whole user query.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Invalid GitHub username: {0:?}")]
    InvalidUsername(String),

    #[error("Failed to fetch repositories: {0}")]
    Repositories(#[source] FetchError),
}

pub type Result<T> = std::result::Result<T, FetchError>;
