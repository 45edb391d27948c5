pub mod library;
pub mod palette;

pub use library::{CategoryFilter, ColorLibrary, ColorLibraryItem};
pub use palette::{PaletteColor, QUICK_PALETTE, parse_hex_color};
