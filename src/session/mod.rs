pub mod pending;

pub use pending::PendingMode;

use crate::color::{CategoryFilter, ColorLibrary, ColorLibraryItem};
use crate::error::AppError;
use crate::geo::{LatLng, Place};
use crate::map::view::{GEOLOCATION_ZOOM, SEARCH_ZOOM, TODO_ZOOM};
use crate::map::{CustomMarkers, MapView, MarkerData, project_markers};
use crate::todo::{TodoItem, TodoList};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Visibility of the side panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Panels {
    pub todo_list: bool,
    pub color_library: bool,
}

/// What a map click turned into.
#[derive(Debug, Clone, PartialEq)]
pub enum MapClickOutcome {
    /// Consumed by a pending location request.
    LocationAssigned { todo_id: Uuid, position: LatLng },
    /// No request pending, so a custom marker was dropped.
    CustomMarkerAdded { marker_id: String },
}

/// All in-memory application state and the operations that keep it consistent.
///
/// Todo, search and current-location markers are re-projected from their
/// sources after every change; custom markers are a separate pool that only
/// map clicks add to and only [`Session::clear_custom_markers`] empties.
#[derive(Debug, Clone, Default)]
pub struct Session {
    todos: TodoList,
    colors: ColorLibrary,
    pending: PendingMode,
    search_result: Option<Place>,
    current_location: Option<LatLng>,
    derived_markers: Vec<MarkerData>,
    custom_markers: CustomMarkers,
    marker_revision: u64,
    view: MapView,
    panels: Panels,
}

impl Session {
    pub fn new(view: MapView) -> Self {
        Self {
            view,
            ..Self::default()
        }
    }

    // ── accessors ──

    pub fn todos(&self) -> &TodoList {
        &self.todos
    }

    pub fn colors(&self) -> &ColorLibrary {
        &self.colors
    }

    pub fn pending(&self) -> PendingMode {
        self.pending
    }

    pub fn search_result(&self) -> Option<&Place> {
        self.search_result.as_ref()
    }

    pub fn current_location(&self) -> Option<LatLng> {
        self.current_location
    }

    pub fn view(&self) -> &MapView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut MapView {
        &mut self.view
    }

    pub fn panels(&self) -> Panels {
        self.panels
    }

    /// Derived markers first, then custom markers in drop order.
    pub fn markers(&self) -> impl Iterator<Item = &MarkerData> {
        self.derived_markers
            .iter()
            .chain(self.custom_markers.as_slice().iter())
    }

    pub fn derived_markers(&self) -> &[MarkerData] {
        &self.derived_markers
    }

    pub fn custom_markers(&self) -> &[MarkerData] {
        self.custom_markers.as_slice()
    }

    /// Bumped whenever the marker set actually changes. The terminal loop
    /// draws a frame when this moves even if nothing else marked it dirty.
    pub fn marker_revision(&self) -> u64 {
        self.marker_revision
    }

    /// Re-derive markers from todos and lookup results. Returns `true` when the
    /// derived set changed; an unchanged projection leaves the revision alone.
    pub fn refresh_markers(&mut self) -> bool {
        let next = project_markers(
            self.search_result.as_ref(),
            self.current_location,
            self.todos.iter(),
        );
        if next == self.derived_markers {
            return false;
        }
        self.derived_markers = next;
        self.marker_revision += 1;
        true
    }

    // ── todo store ──

    pub fn add_todo(&mut self, text: &str) -> Result<Uuid, AppError> {
        let id = self.todos.add(text)?;
        debug!(%id, "todo added");
        Ok(id)
    }

    pub fn toggle_todo(&mut self, id: Uuid) -> bool {
        if !self.todos.toggle(id) {
            warn!(%id, "toggle on unknown todo id ignored");
            return false;
        }
        self.refresh_markers();
        true
    }

    /// Removes the todo, its marker and any pending request aimed at it.
    pub fn delete_todo(&mut self, id: Uuid) -> bool {
        if self.todos.remove(id).is_none() {
            warn!(%id, "delete on unknown todo id ignored");
            return false;
        }
        if self.pending.targets(id) {
            debug!(%id, pending = %self.pending, "pending request cancelled by delete");
            self.pending = PendingMode::Idle;
        }
        self.refresh_markers();
        debug!(%id, "todo deleted");
        true
    }

    pub fn set_todo_location(&mut self, id: Uuid, position: LatLng, name: impl Into<String>) -> bool {
        if !position.is_finite() {
            warn!(%id, %position, "non-finite todo location ignored");
            return false;
        }
        if !self.todos.set_location(id, position, name) {
            warn!(%id, "set location on unknown todo id ignored");
            return false;
        }
        self.refresh_markers();
        true
    }

    pub fn clear_todo_location(&mut self, id: Uuid) -> bool {
        if !self.todos.clear_location(id) {
            warn!(%id, "clear location on unknown todo id ignored");
            return false;
        }
        self.refresh_markers();
        true
    }

    /// Direct color assignment (quick picker on the todo row).
    pub fn set_todo_color(&mut self, id: Uuid, value: &str, category: Option<&str>) -> bool {
        if !self
            .todos
            .set_color(id, value, category.map(str::to_string))
        {
            warn!(%id, "set color on unknown todo id ignored");
            return false;
        }
        self.refresh_markers();
        true
    }

    // ── color library ──

    pub fn add_color(&mut self, name: &str, color: &str, category: &str) -> Result<Uuid, AppError> {
        let id = self.colors.add(name, color, category)?;
        debug!(%id, "color added to library");
        Ok(id)
    }

    /// Todos that already copied this color keep it.
    pub fn delete_color(&mut self, id: Uuid) -> bool {
        if self.colors.remove(id).is_none() {
            warn!(%id, "delete on unknown color id ignored");
            return false;
        }
        debug!(%id, "color removed from library");
        true
    }

    pub fn filtered_colors<'a>(
        &'a self,
        filter: &'a CategoryFilter,
    ) -> impl Iterator<Item = &'a ColorLibraryItem> {
        self.colors.filtered(filter)
    }

    // ── pending mode ──

    /// Next map click sets the location of `id`. Replaces any other pending
    /// request; refused for unknown ids.
    pub fn request_location_for(&mut self, id: Uuid) -> bool {
        if !self.todos.contains(id) {
            warn!(%id, "location request for unknown todo id refused");
            return false;
        }
        self.pending = PendingMode::AwaitingLocationFor(id);
        debug!(%id, "awaiting map click for todo location");
        true
    }

    /// Next color pick sets the color of `id`; opens the color library.
    pub fn request_color_for(&mut self, id: Uuid) -> bool {
        if !self.todos.contains(id) {
            warn!(%id, "color request for unknown todo id refused");
            return false;
        }
        self.pending = PendingMode::AwaitingColorFor(id);
        self.panels.color_library = true;
        debug!(%id, "awaiting color pick for todo");
        true
    }

    pub fn handle_map_click(&mut self, position: LatLng) -> MapClickOutcome {
        let position = position.normalized();

        if let Some(todo_id) = self.pending.awaiting_location() {
            self.pending = PendingMode::Idle;
            self.set_todo_location(todo_id, position, position.short_label());
            info!(%todo_id, %position, "todo location set from map click");
            return MapClickOutcome::LocationAssigned { todo_id, position };
        }

        let marker_id = self.custom_markers.push(position).id.clone();
        self.marker_revision += 1;
        debug!(%marker_id, %position, "custom marker dropped");
        MapClickOutcome::CustomMarkerAdded { marker_id }
    }

    /// Completes a pending color request. Returns the todo that received the
    /// color, or `None` when nothing was waiting.
    pub fn select_color(&mut self, value: &str, category: Option<&str>) -> Option<Uuid> {
        let todo_id = self.pending.awaiting_color()?;
        self.pending = PendingMode::Idle;
        self.panels.color_library = false;
        self.set_todo_color(todo_id, value, category);
        info!(%todo_id, color = value, "todo color picked");
        Some(todo_id)
    }

    // ── markers ──

    /// Removes custom markers only; returns how many went away.
    pub fn clear_custom_markers(&mut self) -> usize {
        let removed = self.custom_markers.clear();
        if removed > 0 {
            self.marker_revision += 1;
        }
        debug!(removed, "custom markers cleared");
        removed
    }

    /// Non-finite positions are dropped; they would never compare equal and
    /// would re-signal on every refresh.
    pub fn apply_search_result(&mut self, place: Place) {
        if !place.position.is_finite() {
            warn!(position = %place.position, "non-finite search result ignored");
            return;
        }
        info!(name = %place.display_name, position = %place.position, "search result");
        let position = place.position;
        self.search_result = Some(place);
        self.refresh_markers();
        self.view.recenter_and_zoom(position, SEARCH_ZOOM);
    }

    pub fn apply_current_location(&mut self, position: LatLng) {
        if !position.is_finite() {
            warn!(%position, "non-finite current location ignored");
            return;
        }
        info!(%position, "current location");
        self.current_location = Some(position);
        self.refresh_markers();
        self.view.recenter_and_zoom(position, GEOLOCATION_ZOOM);
    }

    // ── map view ──

    pub fn attach_map(&mut self) {
        self.view.attach();
    }

    /// Recenters on the todo's location. `false` if it has none.
    pub fn view_todo_on_map(&mut self, id: Uuid) -> bool {
        let Some(position) = self.todos.get(id).and_then(TodoItem::position) else {
            return false;
        };
        self.view.recenter_and_zoom(position, TODO_ZOOM)
    }

    // ── panels ──

    pub fn toggle_todo_panel(&mut self) {
        self.panels.todo_list = !self.panels.todo_list;
    }

    pub fn toggle_color_library(&mut self) {
        self.panels.color_library = !self.panels.color_library;
    }
}
