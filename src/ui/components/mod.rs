pub mod color_panel;
pub mod map_view;
pub mod search_bar;
pub mod status_bar;
pub mod todo_panel;

use crate::app::AppState;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const TODO_PANEL_WIDTH: u16 = 40;
const COLOR_PANEL_WIDTH: u16 = 34;

pub fn render(f: &mut Frame, state: &mut AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Min(1),    // Panels and map
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    search_bar::render(f, state, rows[0]);

    let panels = state.session.panels();
    let mut constraints = Vec::with_capacity(3);
    if panels.todo_list {
        constraints.push(Constraint::Length(TODO_PANEL_WIDTH));
    }
    constraints.push(Constraint::Min(10));
    if panels.color_library {
        constraints.push(Constraint::Length(COLOR_PANEL_WIDTH));
    }
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(rows[1]);

    let mut next = 0;
    if panels.todo_list {
        todo_panel::render(f, state, columns[next]);
        next += 1;
    }
    let map_area = columns[next];
    map_view::render(f, state, map_area);
    next += 1;
    if panels.color_library {
        color_panel::render(f, state, columns[next]);
    }

    status_bar::render(f, state, rows[2]);

    if state.notice.is_some() {
        render_notice(f, state, map_area);
    }

    if state.show_help {
        render_help_overlay(f, state);
    }
}

/// Inline lookup error, anchored to the bottom of the map.
fn render_notice(f: &mut Frame, state: &AppState, map_area: Rect) {
    let Some(notice) = &state.notice else {
        return;
    };

    let width = map_area.width.saturating_sub(4).min(60);
    let height = 4.min(map_area.height);
    let area = Rect {
        x: map_area.x + (map_area.width.saturating_sub(width)) / 2,
        y: map_area.y + map_area.height.saturating_sub(height + 1),
        width,
        height,
    };

    let text = vec![
        Line::from(Span::styled(
            notice.message(),
            Style::default().fg(state.theme.foreground),
        )),
        Line::from(Span::styled(
            "Esc to dismiss",
            Style::default().fg(state.theme.dimmed),
        )),
    ];
    let paragraph = Paragraph::new(text).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(state.theme.notice))
            .title(" Error ")
            .style(Style::default().bg(state.theme.background)),
    );

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

fn render_help_overlay(f: &mut Frame, state: &AppState) {
    let key_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(state.theme.foreground);
    let section_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

    let section = |title: &str| Line::from(Span::styled(format!("  ── {title} ──"), section_style));
    let entry = |keys: &str, desc: &str| {
        Line::from(vec![
            Span::styled(format!("    {keys:<16}"), key_style),
            Span::styled(desc.to_string(), desc_style),
        ])
    };

    let lines = vec![
        Line::from(Span::styled(
            "  PIN-TUI Help",
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section("Anywhere"),
        entry("/", "Search for a place"),
        entry("g", "Show my current location"),
        entry("t", "Toggle todo panel"),
        entry("c", "Toggle color library"),
        entry("X", "Clear custom markers"),
        entry("Tab", "Cycle focus"),
        entry("Esc", "Dismiss error"),
        entry("q", "Quit"),
        Line::from(""),
        section("Map"),
        entry("←↓↑→ / hjkl", "Pan"),
        entry("+ / -", "Zoom in / out"),
        entry("Enter / click", "Click map (drop marker or set todo location)"),
        Line::from(""),
        section("Todos"),
        entry("a", "Add todo"),
        entry("Space / x", "Toggle done"),
        entry("d", "Delete todo"),
        entry("L", "Pick location on map"),
        entry("r", "Remove location"),
        entry("v / Enter", "View on map"),
        entry("p", "Pick color from library"),
        entry("1-8", "Quick color"),
        Line::from(""),
        section("Colors"),
        entry("a", "Add color"),
        entry("Enter", "Use color for waiting todo"),
        entry("d", "Delete library color"),
        entry("f", "Cycle category filter"),
    ];

    let area = centered_rect(60, 80, f.area());
    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .title_bottom(Line::from(" Esc or ? to close ").centered())
            .style(Style::default().bg(state.theme.background)),
    );

    f.render_widget(Clear, area);
    f.render_widget(help, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Border style for a panel, highlighted when it has focus.
pub(crate) fn panel_border(state: &AppState, focused: bool) -> Style {
    if focused {
        Style::default().fg(state.theme.highlight)
    } else {
        Style::default().fg(state.theme.dimmed)
    }
}
