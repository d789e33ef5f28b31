//! # SearchInput Component
//!
//! Single-line text field for the username fragment.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste, backspace, delete)
//! - Move the cursor (left, right, home, end)
//! - Emit `Changed(text)` after every edit so the parent can dispatch
//!   `Action::InputChanged`
//! - Refuse all input while `disabled` (quota spent or rate limited)
//!
//! The buffer is internal state. `disabled` is a prop derived from the store
//! every frame.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by the SearchInput
#[derive(Debug, Clone, PartialEq)]
pub enum SearchInputEvent {
    /// The text changed; carries the full new value.
    Changed(String),
}

pub struct SearchInput {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Input is ignored and dimmed (Prop)
    pub disabled: bool,
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    cursor: usize,
}

impl SearchInput {
    /// Create a field pre-filled with `text`, cursor at the end.
    pub fn new(text: &str) -> Self {
        Self {
            buffer: text.to_string(),
            disabled: false,
            cursor: text.len(),
        }
    }

    fn changed(&self) -> Option<SearchInputEvent> {
        Some(SearchInputEvent::Changed(self.buffer.clone()))
    }

    /// Text to draw and the cursor column, scrolled so the cursor stays visible.
    fn visible_window(&self, inner_width: u16) -> (&str, u16) {
        let inner_width = inner_width as usize;
        let mut start = 0;
        // Control characters count as zero columns on both sides of the loop.
        let mut prefix_width: usize = self.buffer[..self.cursor]
            .chars()
            .map(|c| c.width().unwrap_or(0))
            .sum();
        while inner_width > 0 && prefix_width >= inner_width && start < self.cursor {
            let Some(c) = self.buffer[start..].chars().next() else {
                break;
            };
            prefix_width = prefix_width.saturating_sub(c.width().unwrap_or(0));
            start += c.len_utf8();
        }
        (&self.buffer[start..], prefix_width as u16)
    }
}

fn prev_char_boundary(s: &str, pos: usize) -> usize {
    s[..pos].char_indices().next_back().map(|(i, _)| i).unwrap_or(0)
}

fn next_char_boundary(s: &str, pos: usize) -> usize {
    s[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(pos)
}

impl Component for SearchInput {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (title, style) = if self.disabled {
            (
                "Search Username (disabled)",
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            )
        } else {
            ("Search Username", Style::default().fg(Color::Green))
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(title);

        let inner_width = area.width.saturating_sub(2);
        let (visible, cursor_col) = self.visible_window(inner_width);

        frame.render_widget(Paragraph::new(visible).block(block).style(style), area);

        if !self.disabled {
            frame.set_cursor_position((area.x + 1 + cursor_col, area.y + 1));
        }
    }
}

impl EventHandler for SearchInput {
    type Event = SearchInputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.disabled {
            return None;
        }
        match event {
            TuiEvent::InputChar(c) if !c.is_control() => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                self.changed()
            }
            TuiEvent::Paste(text) => {
                // Single-line field: drop line breaks, tabs and escapes
                let text: String = text.chars().filter(|c| !c.is_control()).collect();
                if text.is_empty() {
                    return None;
                }
                self.buffer.insert_str(self.cursor, &text);
                self.cursor += text.len();
                self.changed()
            }
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                self.changed()
            }
            TuiEvent::Delete => {
                if self.cursor >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                self.changed()
            }
            TuiEvent::CursorLeft => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorRight => {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.buffer.len();
                None
            }
            _ => None,
        }
    }
}
