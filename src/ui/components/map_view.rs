use super::panel_border;
use crate::app::AppState;
use crate::app::mode::Focus;
use crate::ui::theme::Theme;
use pin_tui::map::{MarkerData, MarkerKind};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Borders,
        canvas::{Canvas, Map, MapResolution},
    },
};

const MAX_LABEL_CHARS: usize = 24;

/// Zoom from which the detailed coastline is used
const HIGH_RESOLUTION_ZOOM: u8 = 3;

pub fn render(f: &mut Frame, state: &mut AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(panel_border(state, state.focus == Focus::Map))
        .title(title(state));
    let inner = block.inner(area);

    // The first drawn frame attaches the map surface
    state.map_area = Some(inner);
    state.session.attach_map();

    let state = &*state;
    let view = state.session.view();
    let viewport = view.viewport(inner.width, inner.height);
    let center = view.center();
    let resolution = if view.zoom() >= HIGH_RESOLUTION_ZOOM {
        MapResolution::High
    } else {
        MapResolution::Low
    };
    let show_crosshair = state.focus == Focus::Map;
    let theme = &state.theme;
    let markers: Vec<(f64, f64, &MarkerData)> = state
        .session
        .markers()
        .filter_map(|m| viewport.place(m.position).map(|(x, y)| (x, y, m)))
        .collect();

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .background_color(theme.background)
        .x_bounds([viewport.west, viewport.east])
        .y_bounds([viewport.south, viewport.north])
        .paint(move |ctx| {
            ctx.draw(&Map {
                color: theme.map_outline,
                resolution,
            });
            ctx.layer();

            if show_crosshair {
                ctx.print(
                    center.lng,
                    center.lat,
                    Span::styled("+", Style::default().fg(theme.dimmed)),
                );
            }

            for &(x, y, marker) in &markers {
                ctx.print(x, y, marker_label(marker, theme));
            }
        });

    f.render_widget(canvas, area);
}

fn title(state: &AppState) -> Line<'static> {
    let view = state.session.view();
    let mut spans = vec![Span::raw(format!(
        " Map {}  z{} ",
        view.center().short_label(),
        view.zoom()
    ))];

    if state.session.pending().awaiting_location().is_some() {
        spans.push(Span::styled(
            " Click on the map to set the todo location ",
            Style::default()
                .fg(Color::Black)
                .bg(state.theme.pending)
                .add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

fn marker_label(marker: &MarkerData, theme: &Theme) -> Line<'static> {
    let (symbol, color) = match &marker.kind {
        MarkerKind::Search => ("◆", theme.search_marker),
        MarkerKind::CurrentLocation => ("◉", theme.current_marker),
        MarkerKind::Custom => ("✚", theme.custom_marker),
        MarkerKind::Todo {
            completed: true, ..
        } => ("○", theme.completed),
        MarkerKind::Todo { color, .. } => ("●", Theme::color_value(color.as_deref(), theme.todo_marker)),
    };
    let style = Style::default().fg(color).add_modifier(Modifier::BOLD);

    // Custom markers carry only coordinates, so they stay unlabeled
    if marker.is_custom() {
        return Line::from(Span::styled(symbol, style));
    }

    let name: String = marker.name.chars().take(MAX_LABEL_CHARS).collect();
    Line::from(vec![
        Span::styled(symbol, style),
        Span::styled(format!(" {name}"), Style::default().fg(theme.foreground)),
    ])
}
