/// Built-in quick-pick color, always offered next to the user's library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteColor {
    pub name: &'static str,
    pub color: &'static str,
    pub category: &'static str,
}

const fn default_color(name: &'static str, color: &'static str) -> PaletteColor {
    PaletteColor {
        name,
        color,
        category: "Default",
    }
}

pub static QUICK_PALETTE: [PaletteColor; 8] = [
    default_color("Blue", "#3B82F6"),
    default_color("Red", "#EF4444"),
    default_color("Green", "#10B981"),
    default_color("Yellow", "#F59E0B"),
    default_color("Purple", "#8B5CF6"),
    default_color("Pink", "#EC4899"),
    default_color("Orange", "#F97316"),
    default_color("Teal", "#14B8A6"),
];

/// Parse `#RRGGBB` or `#RGB` (leading `#` optional) into RGB components.
pub fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        3 => {
            let expand = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some((expand(0)?, expand(1)?, expand(2)?))
        }
        _ => None,
    }
}
