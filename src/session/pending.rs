use std::fmt;
use uuid::Uuid;

/// The single cross-panel operation waiting for the user's next gesture.
///
/// Only one can be live; starting another replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingMode {
    #[default]
    Idle,
    /// The next map click sets this todo's location.
    AwaitingLocationFor(Uuid),
    /// The next color pick sets this todo's color.
    AwaitingColorFor(Uuid),
}

impl PendingMode {
    pub fn is_idle(&self) -> bool {
        matches!(self, PendingMode::Idle)
    }

    pub fn target(&self) -> Option<Uuid> {
        match self {
            PendingMode::Idle => None,
            PendingMode::AwaitingLocationFor(id) | PendingMode::AwaitingColorFor(id) => Some(*id),
        }
    }

    pub fn targets(&self, id: Uuid) -> bool {
        self.target() == Some(id)
    }

    pub fn awaiting_location(&self) -> Option<Uuid> {
        match self {
            PendingMode::AwaitingLocationFor(id) => Some(*id),
            _ => None,
        }
    }

    pub fn awaiting_color(&self) -> Option<Uuid> {
        match self {
            PendingMode::AwaitingColorFor(id) => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for PendingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PendingMode::Idle => write!(f, "idle"),
            PendingMode::AwaitingLocationFor(_) => write!(f, "PICK LOCATION"),
            PendingMode::AwaitingColorFor(_) => write!(f, "PICK COLOR"),
        }
    }
}
