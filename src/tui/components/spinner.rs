//! Loading indicator shown in place of the table while a search is in flight.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct Spinner {
    frame_index: usize,
}

impl Spinner {
    pub fn new(frame_index: usize) -> Self {
        Self { frame_index }
    }

    fn glyph(&self) -> &'static str {
        FRAMES[self.frame_index % FRAMES.len()]
    }
}

impl Component for Spinner {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [_, center, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);

        let text = format!("{} Searching...", self.glyph());
        frame.render_widget(
            Paragraph::new(text)
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center),
            center,
        );
    }
}
