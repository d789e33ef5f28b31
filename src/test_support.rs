//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::state::{App, SearchState};
use crate::github::{GithubClient, GithubError, SearchPage, SearchQuery, User};

/// A client that answers from canned results and records what it was asked.
pub struct MockGithubClient {
    pub search_result: Result<SearchPage, GithubError>,
    pub rate_limit_result: Result<i64, GithubError>,
    pub searches: Mutex<Vec<SearchQuery>>,
    pub rate_limit_calls: Mutex<usize>,
}

impl MockGithubClient {
    pub fn new(
        search_result: Result<SearchPage, GithubError>,
        rate_limit_result: Result<i64, GithubError>,
    ) -> Self {
        Self {
            search_result,
            rate_limit_result,
            searches: Mutex::new(Vec::new()),
            rate_limit_calls: Mutex::new(0),
        }
    }
}

#[async_trait]
impl GithubClient for MockGithubClient {
    async fn search_users(&self, query: &SearchQuery) -> Result<SearchPage, GithubError> {
        self.searches.lock().unwrap().push(query.clone());
        self.search_result.clone()
    }

    async fn search_rate_limit(&self) -> Result<i64, GithubError> {
        *self.rate_limit_calls.lock().unwrap() += 1;
        self.rate_limit_result.clone()
    }
}

pub fn test_user(login: &str) -> User {
    User {
        login: login.to_string(),
        avatar_url: format!("https://avatars.example.com/{login}.png"),
        kind: "User".to_string(),
        score: 1.0,
    }
}

/// Creates a test App with a quota of 10 and a page size of 20.
pub fn test_app() -> App {
    App::new(SearchState::new(10), 20)
}
