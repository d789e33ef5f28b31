//! # Status and Error Lines
//!
//! Two stateless one-line components under the search field:
//!
//! 1. `StatusLine`: how many searches are believed to remain, or a "wait"
//!    notice once the quota is spent or GitHub has rate-limited us.
//! 2. `ErrorLine`: the last search rejection in red. Renders nothing when
//!    there is no error.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::tui::component::Component;

pub struct StatusLine {
    pub remaining: i64,
    /// False once the quota is spent or the last error was a rate limit.
    pub can_search: bool,
}

impl StatusLine {
    pub fn new(remaining: i64, can_search: bool) -> Self {
        Self {
            remaining,
            can_search,
        }
    }

    pub fn text(&self) -> String {
        if self.can_search {
            format!("You can search {} more time(s)", self.remaining)
        } else {
            "You can not search anymore, have to wait a little bit".to_string()
        }
    }
}

impl Component for StatusLine {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = if self.can_search {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Yellow)
        };
        frame.render_widget(Span::styled(self.text(), style), area);
    }
}

pub struct ErrorLine<'a> {
    pub message: &'a str,
}

impl Component for ErrorLine<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.message.is_empty() {
            return;
        }
        frame.render_widget(
            Span::styled(self.message, Style::default().fg(Color::Red)),
            area,
        );
    }
}
