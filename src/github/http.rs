//! `reqwest`-backed GitHub client.
//!
//! Unauthenticated search is limited to a handful of calls per minute, so the
//! optional token matters in practice. GitHub also rejects requests without a
//! `User-Agent`.

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;

use super::client::{GithubClient, GithubError};
use super::types::{
    ApiErrorBody, RateLimitResponse, SearchPage, SearchQuery, SearchResponse,
};

/// Response header carrying the remaining quota for the current window.
pub const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";

pub struct HttpGithubClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGithubClient {
    /// Creates a client for `base_url` (e.g. `https://api.github.com`).
    ///
    /// Fails only if the token can't be used as a header value or the
    /// underlying client can't be constructed.
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self, GithubError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("ghsearch/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| GithubError::Config(format!("invalid token: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| GithubError::Config(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Sends a GET and returns the response if the status is 2xx.
    async fn get(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<reqwest::Response, GithubError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .send()
            .await
            .map_err(|e| GithubError::Network(e.to_string()))?;

        debug!("GitHub {} response status: {}", path, response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.message)
                .unwrap_or_else(|_| body.trim().to_string());
            warn!("GitHub API error on {}: {} - {}", path, status, message);
            return Err(GithubError::Api { status, message });
        }

        Ok(response)
    }
}

/// Reads the body as text and parses it, keeping transport and shape errors apart.
async fn parse_body<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, GithubError> {
    let body = response
        .text()
        .await
        .map_err(|e| GithubError::Network(e.to_string()))?;
    serde_json::from_str(&body).map_err(|e| GithubError::Parse(e.to_string()))
}

/// Parses the remaining-quota header. `None` when absent or not an integer.
fn remaining_from_headers(headers: &HeaderMap) -> Option<i64> {
    headers
        .get(RATE_LIMIT_REMAINING_HEADER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

#[async_trait]
impl GithubClient for HttpGithubClient {
    async fn search_users(&self, query: &SearchQuery) -> Result<SearchPage, GithubError> {
        info!(
            "Searching users: q={:?}, per_page={}",
            query.fragment, query.per_page
        );

        let response = self
            .get(
                "/search/users",
                &[
                    ("q", query.fragment.clone()),
                    ("per_page", query.per_page.to_string()),
                ],
            )
            .await?;

        let remaining = remaining_from_headers(response.headers());
        let body: SearchResponse = parse_body(response).await?;

        debug!(
            "Search returned {} users, remaining={:?}",
            body.items.len(),
            remaining
        );

        Ok(SearchPage {
            users: body.items,
            remaining,
        })
    }

    async fn search_rate_limit(&self) -> Result<i64, GithubError> {
        let response = self.get("/rate_limit", &[]).await?;
        let body: RateLimitResponse = parse_body(response).await?;
        debug!("Rate limit: search remaining={}", body.resources.search.remaining);
        Ok(body.resources.search.remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_header_parses_integer() {
        let mut headers = HeaderMap::new();
        headers.insert("X-RateLimit-Remaining", HeaderValue::from_static("58"));
        assert_eq!(remaining_from_headers(&headers), Some(58));
    }

    #[test]
    fn test_remaining_header_absent_or_garbage() {
        let mut headers = HeaderMap::new();
        assert_eq!(remaining_from_headers(&headers), None);

        headers.insert(RATE_LIMIT_REMAINING_HEADER, HeaderValue::from_static("lots"));
        assert_eq!(remaining_from_headers(&headers), None);
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let client = HttpGithubClient::new("http://localhost:9999/", None).unwrap();
        assert_eq!(client.base_url, "http://localhost:9999");
    }

    #[test]
    fn test_new_rejects_token_with_newline() {
        let result = HttpGithubClient::new("http://localhost", Some("bad\ntoken"));
        assert!(matches!(result, Err(GithubError::Config(_))));
    }
}
