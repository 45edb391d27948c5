use crate::config::Config;
use pin_tui::color::parse_hex_color;
use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub dimmed: Color,
    pub highlight: Color,
    pub map_outline: Color,
    pub search_marker: Color,
    pub current_marker: Color,
    pub custom_marker: Color,
    /// Todo markers without a color of their own
    pub todo_marker: Color,
    pub completed: Color,
    pub notice: Color,
    pub pending: Color,
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            background: Color::Reset,
            foreground: Color::White,
            dimmed: Color::DarkGray,
            highlight: Color::Cyan,
            map_outline: Color::Rgb(90, 110, 130),
            search_marker: Color::Rgb(239, 68, 68),
            current_marker: Color::Rgb(59, 130, 246),
            custom_marker: Color::Rgb(245, 158, 11),
            todo_marker: Color::Rgb(16, 185, 129),
            completed: Color::DarkGray,
            notice: Color::Red,
            pending: Color::Yellow,
            status_bar_bg: Color::Rgb(40, 40, 40),
            status_bar_fg: Color::White,
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::Black,
            map_outline: Color::Rgb(70, 85, 100),
            ..Self::default_theme()
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::White,
            foreground: Color::Black,
            dimmed: Color::Gray,
            highlight: Color::Blue,
            map_outline: Color::Rgb(120, 140, 160),
            completed: Color::Gray,
            pending: Color::Rgb(180, 130, 0),
            status_bar_bg: Color::LightBlue,
            status_bar_fg: Color::Black,
            ..Self::default_theme()
        }
    }

    pub fn from_config(config: &Config) -> Self {
        match config.theme.as_str() {
            "dark" => Self::dark(),
            "light" => Self::light(),
            _ => Self::default_theme(),
        }
    }

    /// Terminal color for a stored color value, `fallback` when it is absent
    /// or not a hex color.
    pub fn color_value(value: Option<&str>, fallback: Color) -> Color {
        value
            .and_then(parse_hex_color)
            .map(|(r, g, b)| Color::Rgb(r, g, b))
            .unwrap_or(fallback)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_config_picks_named_theme() {
        let config = Config {
            theme: "light".to_string(),
            ..Config::default()
        };
        assert_eq!(Theme::from_config(&config).foreground, Color::Black);
    }

    #[test]
    fn test_color_value_falls_back() {
        assert_eq!(
            Theme::color_value(Some("#EF4444"), Color::White),
            Color::Rgb(239, 68, 68)
        );
        assert_eq!(Theme::color_value(Some("tomato"), Color::White), Color::White);
        assert_eq!(Theme::color_value(None, Color::Green), Color::Green);
    }
}
