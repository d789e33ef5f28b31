//! # User Table Component
//!
//! The search results: one row per user in API order, four columns
//! (Username, Avatar, Type, Score). Up/Down/PageUp/PageDown move the
//! highlighted row.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `UserTableState` lives in `TuiState`
//! - `UserTable` is created each frame with borrowed state and users

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph, Row, Table, TableState};

use crate::github::User;
use crate::tui::event::TuiEvent;

/// Rows skipped by PageUp/PageDown.
const PAGE_STEP: usize = 10;

/// Persistent selection state for the table.
#[derive(Default)]
pub struct UserTableState {
    pub table_state: TableState,
}

impl UserTableState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the selection. `len` is the current number of rows.
    pub fn handle_event(&mut self, event: &TuiEvent, len: usize) {
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let last = len - 1;
        let current = self.table_state.selected();
        let next = match event {
            TuiEvent::CursorUp => current.map(|i| i.saturating_sub(1)).unwrap_or(last),
            TuiEvent::CursorDown => current.map(|i| (i + 1).min(last)).unwrap_or(0),
            TuiEvent::PageUp => current.unwrap_or(0).saturating_sub(PAGE_STEP),
            TuiEvent::PageDown => (current.unwrap_or(0) + PAGE_STEP).min(last),
            _ => return,
        };
        self.table_state.select(Some(next));
    }

    /// Drop or clamp a selection that no longer points at a row.
    fn clamp(&mut self, len: usize) {
        match self.table_state.selected() {
            Some(_) if len == 0 => self.table_state.select(None),
            Some(i) if i >= len => self.table_state.select(Some(len - 1)),
            _ => {}
        }
    }
}

/// Transient render wrapper for the results table.
pub struct UserTable<'a> {
    state: &'a mut UserTableState,
    users: &'a [User],
}

impl<'a> UserTable<'a> {
    pub fn new(state: &'a mut UserTableState, users: &'a [User]) -> Self {
        Self { state, users }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" User ");

        if self.users.is_empty() {
            let empty = Paragraph::new("No results found")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        self.state.clamp(self.users.len());

        let header = Row::new(["Username", "Avatar", "Type", "Score"])
            .style(Style::default().add_modifier(Modifier::BOLD));

        let rows = self.users.iter().map(|user| {
            Row::new([
                user.login.clone(),
                user.avatar_url.clone(),
                user.kind.clone(),
                user.score.to_string(),
            ])
        });

        let widths = [
            Constraint::Length(20),
            Constraint::Fill(1),
            Constraint::Length(14),
            Constraint::Length(8),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            );

        frame.render_stateful_widget(table, area, &mut self.state.table_state);
    }
}
