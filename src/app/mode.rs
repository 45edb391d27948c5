use std::fmt;

/// Keyboard mode: which input, if any, receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Navigate,
    Search,
    AddTodo,
    AddColor,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Navigate => write!(f, "NAVIGATE"),
            Mode::Search => write!(f, "SEARCH"),
            Mode::AddTodo => write!(f, "NEW TODO"),
            Mode::AddColor => write!(f, "NEW COLOR"),
        }
    }
}

/// Panel receiving navigation keys in `Mode::Navigate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Map,
    Todos,
    Colors,
}

impl fmt::Display for Focus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Focus::Map => write!(f, "map"),
            Focus::Todos => write!(f, "todos"),
            Focus::Colors => write!(f, "colors"),
        }
    }
}

/// Field of the add-color form being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorField {
    #[default]
    Name,
    Value,
    Category,
}

impl ColorField {
    pub fn next(self) -> Self {
        match self {
            ColorField::Name => ColorField::Value,
            ColorField::Value => ColorField::Category,
            ColorField::Category => ColorField::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ColorField::Name => ColorField::Category,
            ColorField::Value => ColorField::Name,
            ColorField::Category => ColorField::Value,
        }
    }
}
