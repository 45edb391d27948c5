use super::panel_border;
use crate::app::AppState;
use crate::app::mode::Mode;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const PLACEHOLDER: &str = "Press / to search for a location";

pub fn render(f: &mut Frame, state: &AppState, area: Rect) {
    let editing = state.mode == Mode::Search;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(panel_border(state, editing))
        .title(" Search ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let busy = busy_label(state);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(busy.as_ref().map_or(0, |s| s.chars().count() as u16 + 1)),
        ])
        .split(inner);

    let text = if state.search_input.text().is_empty() && !editing {
        Line::from(Span::styled(PLACEHOLDER, Style::default().fg(state.theme.dimmed)))
    } else {
        Line::from(Span::styled(
            state.search_input.text(),
            Style::default().fg(state.theme.foreground),
        ))
    };
    f.render_widget(Paragraph::new(text), chunks[0]);

    if let Some(busy) = busy {
        f.render_widget(
            Paragraph::new(Span::styled(busy, Style::default().fg(state.theme.highlight))),
            chunks[1],
        );
    }

    if editing {
        let offset = state.search_input.display_cursor_offset().min(chunks[0].width.saturating_sub(1));
        f.set_cursor_position((chunks[0].x + offset, chunks[0].y));
    }
}

fn busy_label(state: &AppState) -> Option<String> {
    let spinner = state.get_spinner_char();
    match (state.search_in_flight(), state.locate_in_flight()) {
        (true, true) => Some(format!("{spinner} Searching, locating")),
        (true, false) => Some(format!("{spinner} Searching...")),
        (false, true) => Some(format!("{spinner} Locating...")),
        (false, false) => None,
    }
}
