use super::panel_border;
use crate::app::AppState;
use crate::app::mode::{Focus, Mode};
use crate::ui::theme::Theme;
use pin_tui::todo::TodoItem;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

pub fn render(f: &mut Frame, state: &AppState, area: Rect) {
    let focused = state.focus == Focus::Todos;
    let todos = state.session.todos();
    let done = todos.completed().count();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(panel_border(state, focused))
        .title(format!(" Todos {}/{} ", done, todos.len()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let banner = pending_banner(state);
    let adding = state.mode == Mode::AddTodo;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(if adding { 2 } else { 0 }),
            Constraint::Length(if banner.is_some() { 2 } else { 0 }),
            Constraint::Min(1),
        ])
        .split(inner);

    if adding {
        render_input(f, state, chunks[0]);
    }
    if let Some(banner) = banner {
        f.render_widget(Paragraph::new(banner).wrap(Wrap { trim: true }), chunks[1]);
    }

    let visible = state.visible_todos();
    if visible.is_empty() {
        let hint = Paragraph::new(Span::styled(
            "No todos yet. Press a to add one.",
            Style::default().fg(state.theme.dimmed),
        ))
        .wrap(Wrap { trim: true });
        f.render_widget(hint, chunks[2]);
        return;
    }

    let pending_target = state.session.pending().target();
    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(i, todo)| {
            let is_selected = focused && i == state.todo_cursor;
            todo_row(todo, is_selected, pending_target == Some(todo.id), &state.theme)
        })
        .collect();

    let mut list_state = ListState::default().with_selected(Some(state.todo_cursor));
    f.render_stateful_widget(List::new(items), chunks[2], &mut list_state);
}

fn todo_row(todo: &TodoItem, is_selected: bool, is_pending: bool, theme: &Theme) -> ListItem<'static> {
    let checkbox = if todo.completed { "[x]" } else { "[ ]" };
    let swatch = Span::styled(
        "■",
        Style::default().fg(Theme::color_value(todo.color_value(), theme.todo_marker)),
    );

    let text_style = if is_selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else if todo.completed {
        Style::default()
            .fg(theme.completed)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(theme.foreground)
    };

    let mut first = vec![
        Span::raw(if is_pending { "»" } else { " " }),
        swatch,
        Span::raw(format!(" {checkbox} ")),
        Span::styled(todo.text.clone(), text_style),
    ];
    if let Some(category) = todo.color_category() {
        first.push(Span::styled(
            format!(" ({category})"),
            Style::default().fg(theme.dimmed),
        ));
    }

    let mut lines = vec![Line::from(first)];
    if let Some(name) = todo.location_name() {
        lines.push(Line::from(Span::styled(
            format!("       @ {name}"),
            Style::default().fg(theme.dimmed),
        )));
    }
    ListItem::new(lines)
}

fn render_input(f: &mut Frame, state: &AppState, area: Rect) {
    let prompt = "New: ";
    let line = Line::from(vec![
        Span::styled(prompt, Style::default().fg(state.theme.highlight)),
        Span::styled(
            state.todo_input.text().to_string(),
            Style::default().fg(state.theme.foreground),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);

    let offset = prompt.len() as u16 + state.todo_input.display_cursor_offset();
    f.set_cursor_position((area.x + offset.min(area.width.saturating_sub(1)), area.y));
}

fn pending_banner(state: &AppState) -> Option<Line<'static>> {
    let pending = state.session.pending();
    let (id, text) = if let Some(id) = pending.awaiting_location() {
        (id, "Click the map to place")
    } else if let Some(id) = pending.awaiting_color() {
        (id, "Pick a color for")
    } else {
        return None;
    };
    let name = state
        .session
        .todos()
        .get(id)
        .map(|t| t.text.clone())
        .unwrap_or_default();

    Some(Line::from(Span::styled(
        format!("{text} \"{name}\""),
        Style::default().fg(state.theme.pending).add_modifier(Modifier::BOLD),
    )))
}
