//! # Core Application Logic
//!
//! This module contains ghsearch's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No network. No UI.     │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │   GitHub   │
//!     │  Adapter   │ ── Effect::Spawn* ─────▶ │   client   │
//!     │ (ratatui)  │ ◀── Action::*Completed ─ │ (reqwest)  │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `SearchState` (persisted) and `App` (owned by the event loop)
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`config`]: Layered configuration
//! - [`persist`]: JSON snapshot of `SearchState`

pub mod action;
pub mod config;
pub mod persist;
pub mod state;
