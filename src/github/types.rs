use serde::{Deserialize, Serialize};

/// A user as returned by the search endpoint. Fields we don't render are ignored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub login: String,
    pub avatar_url: String,
    /// Account type ("User", "Organization", ...).
    #[serde(rename = "type")]
    pub kind: String,
    pub score: f64,
}

/// Parameters for one users-search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Raw text typed by the user. Encoded once when the request is built.
    pub fragment: String,
    pub per_page: u32,
}

/// A successful search: the item list plus the remaining-quota header, if present.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub users: Vec<User>,
    pub remaining: Option<i64>,
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Deserialize, Debug)]
pub(crate) struct SearchResponse {
    pub items: Vec<User>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct RateLimitResponse {
    pub resources: RateLimitResources,
}

#[derive(Deserialize, Debug)]
pub(crate) struct RateLimitResources {
    pub search: RateLimitCategory,
}

#[derive(Deserialize, Debug)]
pub(crate) struct RateLimitCategory {
    pub remaining: i64,
}

/// Error body GitHub attaches to 4xx responses.
#[derive(Deserialize, Debug)]
pub(crate) struct ApiErrorBody {
    pub message: String,
}
