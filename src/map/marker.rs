use crate::geo::{LatLng, Place};
use crate::todo::TodoItem;
use serde::Serialize;
use uuid::Uuid;

pub const SEARCH_MARKER_ID: &str = "search";
pub const CURRENT_LOCATION_MARKER_ID: &str = "current-location";
pub const CURRENT_LOCATION_LABEL: &str = "Your current location";

/// What a marker stands for. Todo markers carry a back-reference plus the
/// display state copied from their todo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MarkerKind {
    Search,
    CurrentLocation,
    Custom,
    Todo {
        todo_id: Uuid,
        completed: bool,
        color: Option<String>,
    },
}

impl MarkerKind {
    pub fn todo_id(&self) -> Option<Uuid> {
        match self {
            MarkerKind::Todo { todo_id, .. } => Some(*todo_id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerData {
    pub id: String,
    pub position: LatLng,
    pub name: String,
    pub kind: MarkerKind,
}

impl MarkerData {
    pub fn is_custom(&self) -> bool {
        self.kind == MarkerKind::Custom
    }
}

/// Derive every non-custom marker from its sources.
///
/// Output order is search, current location, then todos in list order. Ids are
/// derived from the source, so equal inputs give equal output.
pub fn project_markers<'a>(
    search: Option<&Place>,
    current_location: Option<LatLng>,
    todos: impl IntoIterator<Item = &'a TodoItem>,
) -> Vec<MarkerData> {
    let mut markers = Vec::new();

    if let Some(place) = search {
        markers.push(MarkerData {
            id: SEARCH_MARKER_ID.to_string(),
            position: place.position,
            name: place.display_name.clone(),
            kind: MarkerKind::Search,
        });
    }

    if let Some(position) = current_location {
        markers.push(MarkerData {
            id: CURRENT_LOCATION_MARKER_ID.to_string(),
            position,
            name: CURRENT_LOCATION_LABEL.to_string(),
            kind: MarkerKind::CurrentLocation,
        });
    }

    for todo in todos {
        let Some(position) = todo.position() else {
            continue;
        };
        markers.push(MarkerData {
            id: format!("todo-{}", todo.id),
            position,
            name: todo.text.clone(),
            kind: MarkerKind::Todo {
                todo_id: todo.id,
                completed: todo.completed,
                color: todo.color_value().map(str::to_string),
            },
        });
    }

    markers
}

/// Markers dropped by plain map clicks. They are not derived from anything
/// and live until [`CustomMarkers::clear`].
#[derive(Debug, Clone, Default)]
pub struct CustomMarkers {
    markers: Vec<MarkerData>,
}

impl CustomMarkers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, position: LatLng) -> &MarkerData {
        self.markers.push(MarkerData {
            id: format!("custom-{}", Uuid::new_v4()),
            position,
            name: format!("Custom location ({})", position.short_label()),
            kind: MarkerKind::Custom,
        });
        &self.markers[self.markers.len() - 1]
    }

    /// Returns how many markers were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.markers.len();
        self.markers.clear();
        removed
    }

    pub fn as_slice(&self) -> &[MarkerData] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
