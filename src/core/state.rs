//! # Application State
//!
//! Two layers, both plain data:
//!
//! ```text
//! App
//! ├── store: SearchState        // persisted across runs
//! │   ├── current_username      // mirrors the input box, always
//! │   ├── users                 // last search result, API order
//! │   ├── remaining_search_time // advisory quota estimate, may go negative
//! │   ├── error                 // last error text ("" = none)
//! │   └── error_kind            // structured class of `error`
//! ├── is_loading: bool          // a search is in flight (view-local)
//! ├── error_message: String     // last search rejection (view-local)
//! └── per_page: u32             // fixed page size for searches
//! ```
//!
//! State changes only happen through `update(app, action)` in action.rs.

use serde::{Deserialize, Serialize};

use crate::core::config::ResolvedConfig;
use crate::github::{ErrorKind, User};

/// Searches fire only once the input has at least this many characters.
pub const MIN_QUERY_LEN: usize = 3;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchState {
    pub current_username: String,
    pub users: Vec<User>,
    pub remaining_search_time: i64,
    pub error: String,
    #[serde(default)]
    pub error_kind: Option<ErrorKind>,
}

impl SearchState {
    pub fn new(initial_rate_limit: i64) -> Self {
        Self {
            current_username: String::new(),
            users: Vec::new(),
            remaining_search_time: initial_rate_limit,
            error: String::new(),
            error_kind: None,
        }
    }

    pub fn clear_error(&mut self) {
        self.error.clear();
        self.error_kind = None;
    }

    /// The last recorded error was a 403/429 from GitHub.
    pub fn is_rate_limited(&self) -> bool {
        self.error_kind == Some(ErrorKind::RateLimited)
    }

    /// The search input accepts no keystrokes while this holds.
    pub fn search_disabled(&self) -> bool {
        self.remaining_search_time == 0 || self.is_rate_limited()
    }

    /// Whether the status line should invite another search.
    pub fn can_search(&self) -> bool {
        self.remaining_search_time > 0 && !self.is_rate_limited()
    }
}

pub struct App {
    pub store: SearchState,
    pub is_loading: bool,
    pub error_message: String,
    pub per_page: u32,
}

impl App {
    pub fn new(store: SearchState, per_page: u32) -> Self {
        Self {
            store,
            is_loading: false,
            error_message: String::new(),
            per_page,
        }
    }

    /// Builds the app from config, preferring a rehydrated store when one exists.
    pub fn from_config(config: &ResolvedConfig, restored: Option<SearchState>) -> Self {
        let store = restored.unwrap_or_else(|| SearchState::new(config.initial_rate_limit));
        Self::new(store, config.per_page)
    }
}
