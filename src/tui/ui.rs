use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{ErrorLine, Spinner, StatusLine, UserTable};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

const HELP_TEXT: &str = " Type 3+ chars to search  ↑/↓ Select  Esc Quit ";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(3), Length(1), Length(1), Min(0), Length(1)]);
    let [input_area, status_area, error_area, main_area, help_area] = layout.areas(frame.area());

    tui.search_input.render(frame, input_area);

    StatusLine::new(app.store.remaining_search_time, app.store.can_search())
        .render(frame, status_area);

    ErrorLine {
        message: &app.error_message,
    }
    .render(frame, error_area);

    // Main area - spinner OR results
    if app.is_loading {
        Spinner::new(spinner_frame).render(frame, main_area);
    } else {
        UserTable::new(&mut tui.user_table, &app.store.users).render(frame, main_area);
    }

    frame.render_widget(
        Span::styled(HELP_TEXT, Style::default().fg(Color::DarkGray)),
        help_area,
    );
}
