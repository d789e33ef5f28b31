use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::types::{SearchPage, SearchQuery};

/// Errors from talking to the GitHub API.
#[derive(Debug, Clone, PartialEq)]
pub enum GithubError {
    /// Client could not be built (bad token header, TLS backend). Not retryable.
    Config(String),
    /// Transport failure (timeout, DNS, connection refused).
    Network(String),
    /// Non-2xx response. `message` is GitHub's `message` field, or the raw body.
    Api { status: u16, message: String },
    /// Body did not have the expected shape.
    Parse(String),
}

impl fmt::Display for GithubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GithubError::Config(msg) => write!(f, "config error: {msg}"),
            GithubError::Network(msg) => write!(f, "network error: {msg}"),
            GithubError::Api { status, message } if message.is_empty() => {
                write!(f, "Request failed with status code {status}")
            }
            GithubError::Api { status, message } => {
                write!(f, "Request failed with status code {status}: {message}")
            }
            GithubError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for GithubError {}

/// Coarse classification the UI acts on, derived from the HTTP status.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Network,
    /// 403 or 429: the search quota is spent or access is forbidden.
    RateLimited,
    /// 422: malformed query, or GitHub's way of rejecting an exhausted search.
    Validation,
    Unknown,
}

impl GithubError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GithubError::Network(_) => ErrorKind::Network,
            GithubError::Api { status: 403 | 429, .. } => ErrorKind::RateLimited,
            GithubError::Api { status: 422, .. } => ErrorKind::Validation,
            GithubError::Api { .. } | GithubError::Config(_) | GithubError::Parse(_) => {
                ErrorKind::Unknown
            }
        }
    }
}

#[async_trait]
pub trait GithubClient: Send + Sync {
    /// Runs one users search. Never retries.
    async fn search_users(&self, query: &SearchQuery) -> Result<SearchPage, GithubError>;

    /// Reads the remaining search-category quota from the rate limit endpoint.
    async fn search_rate_limit(&self) -> Result<i64, GithubError>;
}
