//! # Actions
//!
//! Everything that can happen in ghsearch becomes an `Action`.
//! User types a character? That's `Action::InputChanged(text)`.
//! GitHub answers? That's `Action::SearchCompleted(result)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing the I/O the caller should
//! perform. No side effects here. I/O happens in the TUI shell.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, warn};

use crate::core::state::{App, MIN_QUERY_LEN};
use crate::github::{ErrorKind, GithubError, SearchPage, SearchQuery};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Keystroke handler: the search field now holds this text.
    InputChanged(String),
    SetCurrentUsername(String),
    RemoveUsers,
    SearchCompleted(Result<SearchPage, GithubError>),
    /// The refresh timer fired.
    RefreshTick,
    RateLimitRefreshed(Result<i64, GithubError>),
    Quit,
}

/// I/O requested by `update()`. The event loop carries these out.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    SpawnSearch(SearchQuery),
    SpawnRateLimitRefresh,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::InputChanged(value) => {
            update(app, Action::SetCurrentUsername(value.clone()));
            if value.chars().count() >= MIN_QUERY_LEN {
                app.is_loading = true;
                Effect::SpawnSearch(SearchQuery {
                    fragment: value,
                    per_page: app.per_page,
                })
            } else {
                update(app, Action::RemoveUsers)
            }
        }
        Action::SetCurrentUsername(text) => {
            app.store.current_username = text;
            Effect::None
        }
        Action::RemoveUsers => {
            app.store.users.clear();
            Effect::None
        }
        Action::SearchCompleted(result) => {
            // Completions aren't matched to requests; whichever lands last wins.
            app.is_loading = false;
            match result {
                Ok(page) => {
                    debug!("Search completed with {} users", page.users.len());
                    app.store.users = page.users;
                    app.store.clear_error();
                    match page.remaining {
                        Some(remaining) => app.store.remaining_search_time = remaining,
                        None => warn!(
                            "Search response carried no usable remaining header, keeping {}",
                            app.store.remaining_search_time
                        ),
                    }
                    app.error_message.clear();
                }
                Err(err) => {
                    warn!("Search failed: {}", err);
                    let kind = err.kind();
                    if kind == ErrorKind::Validation {
                        app.store.remaining_search_time -= 1;
                    }
                    app.store.error = err.to_string();
                    app.store.error_kind = Some(kind);
                    app.error_message = app.store.error.clone();
                }
            }
            Effect::None
        }
        Action::RefreshTick => Effect::SpawnRateLimitRefresh,
        Action::RateLimitRefreshed(Ok(remaining)) => {
            app.store.clear_error();
            app.store.remaining_search_time = remaining;
            Effect::None
        }
        Action::RateLimitRefreshed(Err(err)) => {
            warn!("Rate limit refresh failed, keeping previous count: {}", err);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
