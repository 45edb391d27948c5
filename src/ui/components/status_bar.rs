use crate::app::AppState;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn render(f: &mut Frame, state: &AppState, area: Rect) {
    if let Some((message, time)) = &state.status_message
        && time.elapsed().as_secs() <= 3
    {
        render_status_message(f, message, area);
        return;
    }

    let base_style = Style::default()
        .fg(state.theme.status_bar_fg)
        .bg(state.theme.status_bar_bg);

    let pending = state.session.pending();
    let pending_text = if pending.is_idle() {
        String::new()
    } else {
        format!(" [{pending}]")
    };

    let left_content = format!(
        " {} | {} | {} todos | {} markers",
        state.mode,
        state.focus,
        state.session.todos().len(),
        state.session.markers().count(),
    );
    let nav_hint = "? help  q quit";
    let version_text = format!("v{VERSION}");

    let used = left_content.chars().count()
        + pending_text.chars().count()
        + nav_hint.len()
        + version_text.len()
        + 3;
    let padding = (area.width as usize).saturating_sub(used);

    let line = Line::from(vec![
        Span::styled(left_content, base_style),
        Span::styled(
            pending_text,
            base_style.fg(state.theme.pending).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {nav_hint}{:padding$} {version_text} ", ""), base_style),
    ]);

    f.render_widget(Paragraph::new(line).style(base_style), area);
}

fn render_status_message(f: &mut Frame, message: &str, area: Rect) {
    let display_message = format!(" {message} ");

    let style = Style::default()
        .fg(Color::White)
        .bg(Color::Rgb(0, 100, 0))
        .add_modifier(Modifier::BOLD);

    let padding = (area.width as usize).saturating_sub(display_message.chars().count());
    let status_line = format!("{display_message}{:padding$}", "");

    f.render_widget(Paragraph::new(Line::from(Span::styled(status_line, style))), area);
}
