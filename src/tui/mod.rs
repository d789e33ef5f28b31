//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into `core::Action` values, and carries out the
//! `Effect`s the reducer returns by spawning GitHub requests on tokio.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Ownership
//!
//! The event loop owns `App` and is its only writer. Background tasks (search
//! requests, rate-limit refreshes, the refresh timer) never touch state; they
//! send `Action`s back over an mpsc channel that the loop drains between
//! frames.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the spinner animates.
//! - **Idle**: sleeps up to 250ms, only redraws on input or background actions.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use tokio::task::{AbortHandle, JoinHandle};

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::persist::StateFile;
use crate::core::state::App;
use crate::github::{GithubClient, HttpGithubClient, SearchQuery};
use crate::tui::component::EventHandler;
use crate::tui::components::{SearchInput, SearchInputEvent, UserTableState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub search_input: SearchInput,
    pub user_table: UserTableState,
}

impl TuiState {
    /// `initial_text` seeds the search field so it matches the restored store.
    pub fn new(initial_text: &str) -> Self {
        Self {
            search_input: SearchInput::new(initial_text),
            user_table: UserTableState::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableBracketedPaste)?;
        info!("Terminal modes enabled (bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste);
    }
}

/// Periodic rate-limit refresh. Fires one period after start, then every
/// period; stops when dropped.
struct RefreshTimer {
    handle: AbortHandle,
}

impl RefreshTimer {
    fn start(period: Duration, tx: mpsc::Sender<Action>) -> Self {
        info!("Starting rate limit refresh timer ({}s)", period.as_secs());
        let handle = tokio::spawn(async move {
            let mut interval =
                tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            loop {
                interval.tick().await;
                debug!("Refresh timer fired");
                if tx.send(Action::RefreshTick).is_err() {
                    warn!("Refresh timer stopping: receiver dropped");
                    return;
                }
            }
        });
        Self {
            handle: handle.abort_handle(),
        }
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        debug!("Stopping rate limit refresh timer");
        self.handle.abort();
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let client: Arc<dyn GithubClient> = Arc::new(
        HttpGithubClient::new(&config.api_base_url, config.github_token.as_deref())
            .map_err(std::io::Error::other)?,
    );

    let mut state_file = StateFile::new(config.state_file.clone());
    let mut app = App::from_config(&config, state_file.restore());
    let mut tui = TuiState::new(&app.store.current_username);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Stopped on every exit path when dropped
    let _refresh_timer = RefreshTimer::start(config.refresh_interval, tx.clone());

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        tui.search_input.disabled = app.store.search_disabled();

        if app.is_loading {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if app.is_loading {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(250)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                TuiEvent::Resize => {}
                TuiEvent::ForceQuit | TuiEvent::Escape => {
                    if dispatch(update(&mut app, Action::Quit), &client, &tx) {
                        break 'main;
                    }
                }
                TuiEvent::CursorUp
                | TuiEvent::CursorDown
                | TuiEvent::PageUp
                | TuiEvent::PageDown => {
                    tui.user_table.handle_event(&event, app.store.users.len());
                }
                _ => {
                    // Disabled state may have changed earlier in this batch
                    tui.search_input.disabled = app.store.search_disabled();
                    if let Some(SearchInputEvent::Changed(text)) =
                        tui.search_input.handle_event(&event)
                    {
                        let effect = update(&mut app, Action::InputChanged(text));
                        dispatch(effect, &client, &tx);
                    }
                }
            }
        }

        // Handle background task actions (search results, refreshes, timer)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if dispatch(effect, &client, &tx) {
                break 'main;
            }
        }

        state_file.save_if_changed(&app.store);
    }

    state_file.save_if_changed(&app.store);

    ratatui::restore();
    Ok(())
}

/// Carries out an effect. Returns `true` if the app should quit.
fn dispatch(effect: Effect, client: &Arc<dyn GithubClient>, tx: &mpsc::Sender<Action>) -> bool {
    match effect {
        Effect::None => false,
        Effect::SpawnSearch(query) => {
            spawn_search(client.clone(), query, tx.clone());
            false
        }
        Effect::SpawnRateLimitRefresh => {
            spawn_rate_limit_refresh(client.clone(), tx.clone());
            false
        }
        Effect::Quit => true,
    }
}

/// Runs one search in the background and reports the outcome as
/// `Action::SearchCompleted`. Earlier searches are not cancelled.
fn spawn_search(
    client: Arc<dyn GithubClient>,
    query: SearchQuery,
    tx: mpsc::Sender<Action>,
) -> JoinHandle<()> {
    info!("Spawning search request for {:?}", query.fragment);
    tokio::spawn(async move {
        let result = client.search_users(&query).await;
        if tx.send(Action::SearchCompleted(result)).is_err() {
            warn!(
                "Failed to send search result for {:?}: receiver dropped",
                query.fragment
            );
        }
    })
}

/// Reads the search quota in the background and reports it as
/// `Action::RateLimitRefreshed`.
fn spawn_rate_limit_refresh(
    client: Arc<dyn GithubClient>,
    tx: mpsc::Sender<Action>,
) -> JoinHandle<()> {
    info!("Spawning rate limit refresh");
    tokio::spawn(async move {
        let result = client.search_rate_limit().await;
        if tx.send(Action::RateLimitRefreshed(result)).is_err() {
            warn!("Failed to send rate limit result: receiver dropped");
        }
    })
}
