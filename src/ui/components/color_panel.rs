use super::panel_border;
use crate::app::AppState;
use crate::app::mode::{ColorField, Focus, Mode};
use crate::app::state::ColorEntry;
use crate::ui::theme::Theme;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

pub fn render(f: &mut Frame, state: &AppState, area: Rect) {
    let focused = state.focus == Focus::Colors;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(panel_border(state, focused))
        .title(format!(" Colors [{}] ", state.category_filter));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let picking = state.session.pending().awaiting_color().is_some();
    let adding = state.mode == Mode::AddColor;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(if picking { 2 } else { 0 }),
            Constraint::Length(if adding { 4 } else { 0 }),
            Constraint::Min(1),
        ])
        .split(inner);

    if picking {
        let banner = Paragraph::new(Span::styled(
            "Choose a color for your todo item.",
            Style::default().fg(state.theme.pending).add_modifier(Modifier::BOLD),
        ))
        .wrap(Wrap { trim: true });
        f.render_widget(banner, chunks[0]);
    }
    if adding {
        render_form(f, state, chunks[1]);
    }

    let entries = state.color_entries();
    let items: Vec<ListItem> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| color_row(entry, focused && i == state.color_cursor, &state.theme))
        .collect();

    let mut list_state = ListState::default().with_selected(Some(state.color_cursor));
    f.render_stateful_widget(List::new(items), chunks[2], &mut list_state);
}

fn color_row(entry: &ColorEntry<'_>, is_selected: bool, theme: &Theme) -> ListItem<'static> {
    let name_style = if is_selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().fg(theme.foreground)
    };
    let marker = match entry {
        ColorEntry::Palette(_) => " ",
        ColorEntry::Library(_) => "*",
    };

    ListItem::new(Line::from(vec![
        Span::raw(marker),
        Span::styled(
            "■ ",
            Style::default().fg(Theme::color_value(Some(entry.value()), theme.foreground)),
        ),
        Span::styled(entry.name().to_string(), name_style),
        Span::styled(
            format!(" {} ({})", entry.value(), entry.category()),
            Style::default().fg(theme.dimmed),
        ),
    ]))
}

fn render_form(f: &mut Frame, state: &AppState, area: Rect) {
    let form = &state.color_form;
    let fields = [
        (ColorField::Name, "Name:     ", &form.name),
        (ColorField::Value, "Color:    ", &form.value),
        (ColorField::Category, "Category: ", &form.category),
    ];

    let mut lines: Vec<Line> = fields
        .iter()
        .map(|(field, label, input)| {
            let label_style = if *field == form.field {
                Style::default().fg(state.theme.highlight).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(state.theme.dimmed)
            };
            Line::from(vec![
                Span::styled(*label, label_style),
                Span::styled(input.text().to_string(), Style::default().fg(state.theme.foreground)),
            ])
        })
        .collect();
    lines.push(Line::from(Span::styled(
        "Tab next field, Enter save, Esc cancel",
        Style::default().fg(state.theme.dimmed),
    )));
    f.render_widget(Paragraph::new(lines), area);

    if let Some((row, (_, label, input))) = fields
        .iter()
        .enumerate()
        .find(|(_, (field, _, _))| *field == form.field)
    {
        let offset = label.len() as u16 + input.display_cursor_offset();
        f.set_cursor_position((
            area.x + offset.min(area.width.saturating_sub(1)),
            area.y + row as u16,
        ));
    }
}
