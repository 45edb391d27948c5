use super::mode::{ColorField, Focus, Mode};
use crate::ui::theme::Theme;
use pin_tui::color::{CategoryFilter, ColorLibraryItem, PaletteColor, QUICK_PALETTE};
use pin_tui::error::{AppError, LookupSource};
use pin_tui::geo::{self, Geocoder, GeolocationProvider, LatLng, Place};
use pin_tui::session::{MapClickOutcome, Session};
use pin_tui::todo::TodoItem;
use pin_tui::utils::input::TextInput;
use ratatui::layout::Rect;
use std::sync::{Arc, mpsc};
use std::time::Instant;
use tracing::debug;
use uuid::Uuid;

const STATUS_MESSAGE_SECS: u64 = 3;
const DEFAULT_NEW_COLOR: &str = "#3B82F6";

/// Dismissable lookup failure shown over the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub source: LookupSource,
    pub error: AppError,
}

impl Notice {
    pub fn message(&self) -> String {
        self.error.user_message(self.source)
    }
}

/// The add-color form in the library panel
#[derive(Debug, Clone)]
pub struct ColorForm {
    pub name: TextInput,
    pub value: TextInput,
    pub category: TextInput,
    pub field: ColorField,
}

impl Default for ColorForm {
    fn default() -> Self {
        Self {
            name: TextInput::new(),
            value: TextInput::with_text(DEFAULT_NEW_COLOR),
            category: TextInput::new(),
            field: ColorField::Name,
        }
    }
}

impl ColorForm {
    pub fn active_input(&mut self) -> &mut TextInput {
        match self.field {
            ColorField::Name => &mut self.name,
            ColorField::Value => &mut self.value,
            ColorField::Category => &mut self.category,
        }
    }
}

/// A row of the color panel: built-in quick colors first, then the library.
#[derive(Debug, Clone, Copy)]
pub enum ColorEntry<'a> {
    Palette(&'static PaletteColor),
    Library(&'a ColorLibraryItem),
}

impl ColorEntry<'_> {
    pub fn name(&self) -> &str {
        match self {
            ColorEntry::Palette(p) => p.name,
            ColorEntry::Library(item) => &item.name,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            ColorEntry::Palette(p) => p.color,
            ColorEntry::Library(item) => &item.color,
        }
    }

    pub fn category(&self) -> &str {
        match self {
            ColorEntry::Palette(p) => p.category,
            ColorEntry::Library(item) => &item.category,
        }
    }
}

pub struct AppState {
    pub session: Session,
    pub mode: Mode,
    pub focus: Focus,
    pub search_input: TextInput,
    pub todo_input: TextInput,
    pub color_form: ColorForm,
    pub todo_cursor: usize,
    pub color_cursor: usize,
    pub category_filter: CategoryFilter,
    pub theme: Theme,
    pub should_quit: bool,
    pub show_help: bool,
    pub status_message: Option<(String, Instant)>,
    pub notice: Option<Notice>,
    /// Inner map canvas area, updated on each render for click translation
    pub map_area: Option<Rect>,
    pub spinner_frame: usize,
    geocoder: Arc<dyn Geocoder>,
    locator: Arc<dyn GeolocationProvider>,
    search_rx: Option<mpsc::Receiver<Result<Place, AppError>>>,
    locate_rx: Option<mpsc::Receiver<Result<LatLng, AppError>>>,
}

impl AppState {
    pub fn new(
        session: Session,
        theme: Theme,
        geocoder: Arc<dyn Geocoder>,
        locator: Arc<dyn GeolocationProvider>,
    ) -> Self {
        Self {
            session,
            mode: Mode::Navigate,
            focus: Focus::Map,
            search_input: TextInput::new(),
            todo_input: TextInput::new(),
            color_form: ColorForm::default(),
            todo_cursor: 0,
            color_cursor: 0,
            category_filter: CategoryFilter::All,
            theme,
            should_quit: false,
            show_help: false,
            status_message: None,
            notice: None,
            map_area: None,
            spinner_frame: 0,
            geocoder,
            locator,
            search_rx: None,
            locate_rx: None,
        }
    }

    // ── lookups ──

    pub fn search_in_flight(&self) -> bool {
        self.search_rx.is_some()
    }

    pub fn locate_in_flight(&self) -> bool {
        self.locate_rx.is_some()
    }

    /// Start a geocoding request for the search box text. Returns `false` when
    /// the control is busy or the query is blank; the typed text stays put.
    pub fn submit_search(&mut self) -> bool {
        if self.search_in_flight() {
            return false;
        }
        let Ok(query) = geo::geocoding::validate_query(self.search_input.text()) else {
            return false;
        };

        self.notice = None;
        self.search_rx = Some(geo::spawn_search(self.geocoder.clone(), query.to_string()));
        self.mode = Mode::Navigate;
        true
    }

    pub fn request_current_location(&mut self) -> bool {
        if self.locate_in_flight() {
            return false;
        }
        self.notice = None;
        self.locate_rx = Some(geo::spawn_locate(self.locator.clone()));
        true
    }

    /// Poll in-flight lookups without blocking.
    /// Apply finished lookups. Returns `true` when anything arrived.
    pub fn check_lookups(&mut self) -> bool {
        let mut arrived = false;
        if let Some(result) = poll(&mut self.search_rx) {
            arrived = true;
            match result {
                Ok(place) => {
                    self.search_input.clear();
                    self.set_status_message(format!("Found: {}", place.display_name));
                    self.session.apply_search_result(place);
                }
                Err(error) => {
                    self.notice = Some(Notice {
                        source: LookupSource::Search,
                        error,
                    });
                }
            }
        }

        if let Some(result) = poll(&mut self.locate_rx) {
            arrived = true;
            match result {
                Ok(position) => {
                    self.session.apply_current_location(position);
                    self.set_status_message(format!("Current location {position}"));
                }
                Err(error) => {
                    self.notice = Some(Notice {
                        source: LookupSource::Geolocation,
                        error,
                    });
                }
            }
        }
        arrived
    }

    pub fn dismiss_notice(&mut self) -> bool {
        self.notice.take().is_some()
    }

    // ── todos ──

    /// Panel order: active todos, then completed ones.
    pub fn visible_todos(&self) -> Vec<&TodoItem> {
        let todos = self.session.todos();
        todos.active().chain(todos.completed()).collect()
    }

    pub fn selected_todo_id(&self) -> Option<Uuid> {
        self.visible_todos().get(self.todo_cursor).map(|t| t.id)
    }

    pub fn move_todo_cursor(&mut self, delta: isize) {
        let len = self.session.todos().len();
        self.todo_cursor = step_cursor(self.todo_cursor, delta, len);
    }

    pub fn submit_todo(&mut self) -> bool {
        match self.session.add_todo(self.todo_input.text()) {
            Ok(id) => {
                self.todo_input.clear();
                self.mode = Mode::Navigate;
                if let Some(idx) = self.visible_todos().iter().position(|t| t.id == id) {
                    self.todo_cursor = idx;
                }
                true
            }
            Err(e) => {
                debug!(error = %e, "todo submission rejected");
                false
            }
        }
    }

    pub fn toggle_selected_todo(&mut self) {
        let Some(id) = self.selected_todo_id() else {
            return;
        };
        self.session.toggle_todo(id);
        // Keep the cursor on the same todo after it moves between groups
        if let Some(idx) = self.visible_todos().iter().position(|t| t.id == id) {
            self.todo_cursor = idx;
        }
    }

    pub fn delete_selected_todo(&mut self) {
        let Some(id) = self.selected_todo_id() else {
            return;
        };
        self.session.delete_todo(id);
        self.clamp_cursors();
    }

    pub fn request_location_for_selected(&mut self) {
        let Some(id) = self.selected_todo_id() else {
            return;
        };
        if self.session.request_location_for(id) {
            self.set_status_message(
                "Click on the map to add a location to your selected todo item.".to_string(),
            );
        }
    }

    pub fn remove_location_from_selected(&mut self) {
        if let Some(id) = self.selected_todo_id() {
            self.session.clear_todo_location(id);
        }
    }

    pub fn view_selected_on_map(&mut self) {
        if let Some(id) = self.selected_todo_id()
            && self.session.view_todo_on_map(id)
        {
            self.focus = Focus::Map;
        }
    }

    pub fn request_color_for_selected(&mut self) {
        let Some(id) = self.selected_todo_id() else {
            return;
        };
        if self.session.request_color_for(id) {
            self.focus = Focus::Colors;
        }
    }

    /// Quick picker on the todo row: assign a palette color directly.
    pub fn quick_color_selected(&mut self, palette_index: usize) {
        let (Some(id), Some(entry)) = (self.selected_todo_id(), QUICK_PALETTE.get(palette_index))
        else {
            return;
        };
        self.session
            .set_todo_color(id, entry.color, Some(entry.category));
    }

    // ── color library ──

    pub fn color_entries(&self) -> Vec<ColorEntry<'_>> {
        QUICK_PALETTE
            .iter()
            .map(ColorEntry::Palette)
            .chain(
                self.session
                    .filtered_colors(&self.category_filter)
                    .map(ColorEntry::Library),
            )
            .collect()
    }

    pub fn move_color_cursor(&mut self, delta: isize) {
        let len = self.color_entries().len();
        self.color_cursor = step_cursor(self.color_cursor, delta, len);
    }

    /// Completes a pending color request with the highlighted entry.
    pub fn pick_selected_color(&mut self) {
        let picked = self
            .color_entries()
            .get(self.color_cursor)
            .map(|e| (e.value().to_string(), e.category().to_string()));
        let Some((value, category)) = picked else {
            return;
        };

        if self.session.select_color(&value, Some(&category)).is_some() {
            self.sync_focus();
        } else {
            self.set_status_message("Press p on a todo to choose its color first.".to_string());
        }
    }

    pub fn submit_color(&mut self) -> bool {
        let form = &self.color_form;
        match self.session.add_color(
            form.name.text(),
            form.value.text(),
            form.category.text(),
        ) {
            Ok(_) => {
                self.color_form = ColorForm::default();
                self.mode = Mode::Navigate;
                true
            }
            Err(e) => {
                debug!(error = %e, "color submission rejected");
                false
            }
        }
    }

    /// Only library entries can be deleted; quick colors are built in.
    pub fn delete_selected_color(&mut self) {
        let id = match self.color_entries().get(self.color_cursor) {
            Some(ColorEntry::Library(item)) => item.id,
            _ => return,
        };
        self.session.delete_color(id);
        let categories = self.session.colors().categories();
        if let CategoryFilter::Category(name) = &self.category_filter
            && !categories.contains(name)
        {
            self.category_filter = CategoryFilter::All;
        }
        self.clamp_cursors();
    }

    pub fn cycle_category_filter(&mut self) {
        let categories = self.session.colors().categories();
        self.category_filter = self.category_filter.next(&categories);
        self.color_cursor = 0;
    }

    // ── map ──

    /// Translate a terminal cell to a coordinate and deliver it as a map click.
    /// Returns `None` for cells outside the map canvas.
    pub fn map_click_at(&mut self, column: u16, row: u16) -> Option<MapClickOutcome> {
        let area = self.map_area?;
        if column < area.x
            || row < area.y
            || column >= area.x + area.width
            || row >= area.y + area.height
        {
            return None;
        }

        let viewport = self.session.view().viewport(area.width, area.height);
        let fx = (f64::from(column - area.x) + 0.5) / f64::from(area.width);
        let fy = (f64::from(row - area.y) + 0.5) / f64::from(area.height);
        Some(self.handle_map_click(viewport.coordinate_at(fx, fy)))
    }

    /// Keyboard equivalent of clicking at the crosshair.
    pub fn click_map_center(&mut self) -> MapClickOutcome {
        let center = self.session.view().center();
        self.handle_map_click(center)
    }

    fn handle_map_click(&mut self, position: LatLng) -> MapClickOutcome {
        let outcome = self.session.handle_map_click(position);
        if let MapClickOutcome::LocationAssigned { position, .. } = &outcome {
            self.set_status_message(format!("Todo location set to {position}"));
        }
        outcome
    }

    pub fn clear_custom_markers(&mut self) {
        let removed = self.session.clear_custom_markers();
        if removed > 0 {
            self.set_status_message(format!(
                "Cleared {} custom marker{}",
                removed,
                if removed == 1 { "" } else { "s" }
            ));
        }
    }

    // ── panels and focus ──

    pub fn toggle_todo_panel(&mut self) {
        self.session.toggle_todo_panel();
        if self.session.panels().todo_list {
            self.focus = Focus::Todos;
        }
        self.sync_focus();
    }

    pub fn toggle_color_library(&mut self) {
        self.session.toggle_color_library();
        if self.session.panels().color_library {
            self.focus = Focus::Colors;
        }
        self.sync_focus();
    }

    pub fn cycle_focus(&mut self) {
        let panels = self.session.panels();
        let order = [
            (Focus::Map, true),
            (Focus::Todos, panels.todo_list),
            (Focus::Colors, panels.color_library),
        ];
        let current = order.iter().position(|(f, _)| *f == self.focus).unwrap_or(0);
        for offset in 1..=order.len() {
            let (candidate, visible) = order[(current + offset) % order.len()];
            if visible {
                self.focus = candidate;
                return;
            }
        }
    }

    /// Move focus off a panel that is no longer visible.
    pub fn sync_focus(&mut self) {
        let panels = self.session.panels();
        let hidden = match self.focus {
            Focus::Map => false,
            Focus::Todos => !panels.todo_list,
            Focus::Colors => !panels.color_library,
        };
        if hidden {
            self.focus = if panels.todo_list && self.session.pending().is_idle() {
                Focus::Todos
            } else {
                Focus::Map
            };
        }
    }

    pub fn clamp_cursors(&mut self) {
        let todo_len = self.session.todos().len();
        self.todo_cursor = self.todo_cursor.min(todo_len.saturating_sub(1));
        let color_len = self.color_entries().len();
        self.color_cursor = self.color_cursor.min(color_len.saturating_sub(1));
    }

    // ── status line ──

    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    pub fn clear_expired_status_message(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message
            && time.elapsed().as_secs() > STATUS_MESSAGE_SECS
        {
            self.status_message = None;
            return true;
        }
        false
    }

    pub fn tick_spinner(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % 8;
    }

    /// One-line snapshot for crash reports.
    pub fn crash_summary(&self) -> String {
        let view = self.session.view();
        format!(
            "mode={} focus={} pending={:?} todos={} colors={} markers={} revision={} center={} zoom={}",
            self.mode,
            self.focus,
            self.session.pending(),
            self.session.todos().len(),
            self.session.colors().len(),
            self.session.markers().count(),
            self.session.marker_revision(),
            view.center().short_label(),
            view.zoom(),
        )
    }

    pub fn get_spinner_char(&self) -> char {
        const SPINNER_FRAMES: [char; 8] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧'];
        SPINNER_FRAMES[self.spinner_frame]
    }
}

/// Take the result out of a one-shot lookup channel if it has arrived.
fn poll<T>(slot: &mut Option<mpsc::Receiver<Result<T, AppError>>>) -> Option<Result<T, AppError>> {
    let rx = slot.as_ref()?;
    let result = match rx.try_recv() {
        Ok(result) => result,
        Err(mpsc::TryRecvError::Empty) => return None,
        Err(mpsc::TryRecvError::Disconnected) => {
            Err(AppError::request_failed("lookup thread exited"))
        }
    };
    *slot = None;
    Some(result)
}

fn step_cursor(cursor: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    cursor.saturating_add_signed(delta).min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pin_tui::geo::FixedGeolocation;
    use pin_tui::map::MarkerKind;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    struct StubGeocoder;

    impl Geocoder for StubGeocoder {
        fn search(&self, query: &str) -> Result<Place, AppError> {
            match query {
                "Paris" => Ok(Place {
                    position: LatLng::new(48.8566, 2.3522),
                    display_name: "Paris, France".to_string(),
                }),
                "offline" => Err(AppError::request_failed("connection refused")),
                other => Err(AppError::NotFound {
                    query: other.to_string(),
                }),
            }
        }
    }

    struct DeniedLocator;

    impl GeolocationProvider for DeniedLocator {
        fn locate(&self) -> Result<LatLng, AppError> {
            Err(AppError::PermissionDenied("user declined".to_string()))
        }
    }

    fn test_state() -> AppState {
        test_state_with_locator(Arc::new(FixedGeolocation(LatLng::new(64.1466, -21.9426))))
    }

    fn test_state_with_locator(locator: Arc<dyn GeolocationProvider>) -> AppState {
        let mut session = Session::default();
        session.attach_map();
        let mut state = AppState::new(session, Theme::default(), Arc::new(StubGeocoder), locator);
        state.map_area = Some(Rect::new(10, 5, 80, 20));
        state
    }

    fn wait_for_lookups(state: &mut AppState) {
        for _ in 0..500 {
            state.check_lookups();
            if !state.search_in_flight() && !state.locate_in_flight() {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("lookups did not finish");
    }

    fn type_into(input: &mut TextInput, text: &str) {
        for c in text.chars() {
            input.insert(c);
        }
    }

    fn add_todo(state: &mut AppState, text: &str) -> Uuid {
        type_into(&mut state.todo_input, text);
        assert!(state.submit_todo());
        state.selected_todo_id().unwrap()
    }

    #[test]
    fn test_crash_summary_names_pending_request() {
        let mut state = test_state();
        let id = add_todo(&mut state, "Buy milk");
        state.request_location_for_selected();

        let summary = state.crash_summary();
        assert!(summary.starts_with("mode="), "{summary}");
        assert!(summary.contains(&format!("AwaitingLocationFor({id})")), "{summary}");
        assert!(summary.contains("todos=1"), "{summary}");
        assert!(summary.contains("zoom="), "{summary}");
    }

    #[test]
    fn test_idle_polling_reports_nothing_to_redraw() {
        let mut state = test_state();
        assert!(!state.check_lookups());
        assert!(!state.clear_expired_status_message());

        state.status_message = Some((
            "old".to_string(),
            Instant::now() - Duration::from_secs(STATUS_MESSAGE_SECS + 1),
        ));
        assert!(state.clear_expired_status_message());
        assert!(state.status_message.is_none());
    }

    #[test]
    fn test_blank_search_is_rejected_in_place() {
        let mut state = test_state();
        state.mode = Mode::Search;
        type_into(&mut state.search_input, "   ");

        assert!(!state.submit_search());
        assert!(!state.search_in_flight());
        assert_eq!(state.mode, Mode::Search);
        assert_eq!(state.search_input.text(), "   ");
        assert!(state.notice.is_none());
    }

    #[test]
    fn test_successful_search_adds_marker_and_clears_input() {
        let mut state = test_state();
        type_into(&mut state.search_input, "Paris");

        assert!(state.submit_search());
        assert!(state.search_in_flight());
        // Control stays disabled while the first request is outstanding
        assert!(!state.submit_search());

        wait_for_lookups(&mut state);
        assert_eq!(state.search_input.text(), "");
        assert!(state.notice.is_none());
        let search: Vec<_> = state
            .session
            .markers()
            .filter(|m| m.kind == MarkerKind::Search)
            .collect();
        assert_eq!(search.len(), 1);
        assert_eq!(state.session.view().center(), LatLng::new(48.8566, 2.3522));
    }

    #[test]
    fn test_not_found_keeps_markers_and_shows_notice() {
        let mut state = test_state();
        state.session.handle_map_click(LatLng::new(1.0, 1.0));
        type_into(&mut state.search_input, "Atlantis");

        state.submit_search();
        wait_for_lookups(&mut state);

        let notice = state.notice.clone().unwrap();
        assert!(matches!(notice.error, AppError::NotFound { .. }));
        assert_eq!(notice.message(), "Location not found. Try a different search term.");
        assert_eq!(state.search_input.text(), "Atlantis");
        assert_eq!(state.session.markers().count(), 1);

        assert!(state.dismiss_notice());
        assert!(state.notice.is_none());
        // Re-enabled after failure
        assert!(state.submit_search());
    }

    #[test]
    fn test_request_failure_worded_differently() {
        let mut state = test_state();
        type_into(&mut state.search_input, "offline");
        state.submit_search();
        wait_for_lookups(&mut state);

        assert_eq!(
            state.notice.as_ref().unwrap().message(),
            "Failed to search location. Please try again."
        );
    }

    #[test]
    fn test_current_location_and_search_run_independently() {
        let mut state = test_state();
        type_into(&mut state.search_input, "Paris");

        assert!(state.submit_search());
        assert!(state.request_current_location());
        assert!(!state.request_current_location());

        wait_for_lookups(&mut state);
        assert_eq!(state.session.current_location(), Some(LatLng::new(64.1466, -21.9426)));
        assert!(state.session.search_result().is_some());
    }

    #[test]
    fn test_permission_denied_notice() {
        let mut state = test_state_with_locator(Arc::new(DeniedLocator));
        state.request_current_location();
        wait_for_lookups(&mut state);

        let notice = state.notice.as_ref().unwrap();
        assert_eq!(notice.source, LookupSource::Geolocation);
        assert!(notice.message().contains("permission denied"));
        assert_eq!(state.session.markers().count(), 0);
    }

    #[test]
    fn test_blank_todo_leaves_form_unchanged() {
        let mut state = test_state();
        state.mode = Mode::AddTodo;
        type_into(&mut state.todo_input, "  ");

        assert!(!state.submit_todo());
        assert_eq!(state.mode, Mode::AddTodo);
        assert_eq!(state.todo_input.text(), "  ");
    }

    #[test]
    fn test_map_click_routes_to_pending_todo() {
        let mut state = test_state();
        let id = add_todo(&mut state, "Buy milk");

        state.request_location_for_selected();
        let outcome = state.map_click_at(50, 15).unwrap();
        assert!(matches!(outcome, MapClickOutcome::LocationAssigned { todo_id, .. } if todo_id == id));
        assert!(state.session.custom_markers().is_empty());

        let outcome = state.map_click_at(20, 6).unwrap();
        assert!(matches!(outcome, MapClickOutcome::CustomMarkerAdded { .. }));
        assert_eq!(state.session.custom_markers().len(), 1);

        // Outside the canvas
        assert!(state.map_click_at(0, 0).is_none());
    }

    #[test]
    fn test_click_past_the_dateline_drops_a_visible_marker() {
        let mut state = test_state();
        state.session.view_mut().recenter_and_zoom(LatLng::new(0.0, 179.0), 3);
        let area = state.map_area.unwrap();

        state.map_click_at(area.x + area.width - 2, area.y + area.height / 2);
        let dropped = state.session.custom_markers()[0].position;
        assert!(dropped.lng < -100.0);

        let vp = state.session.view().viewport(area.width, area.height);
        let (x, _) = vp.place(dropped).unwrap();
        assert!(x > 180.0);
        assert_eq!(
            state.session.markers().filter(|m| vp.contains(m.position)).count(),
            1
        );
    }

    #[test]
    fn test_click_at_canvas_center_hits_camera_center() {
        let mut state = test_state();
        let center = state.session.view().center();
        let area = state.map_area.unwrap();
        let vp = state.session.view().viewport(area.width, area.height);

        state.map_click_at(area.x + area.width / 2, area.y + area.height / 2);
        let dropped = state.session.custom_markers()[0].position;
        assert!((dropped.lat - center.lat).abs() <= vp.lat_span() / f64::from(area.height));
        assert!((dropped.lng - center.lng).abs() <= vp.lng_span() / f64::from(area.width));
    }

    #[test]
    fn test_color_request_then_pick_from_panel() {
        let mut state = test_state();
        let id = add_todo(&mut state, "Paint");

        state.request_color_for_selected();
        assert_eq!(state.focus, Focus::Colors);
        assert!(state.session.panels().color_library);

        state.color_cursor = 1; // Red
        state.pick_selected_color();

        let todo = state.session.todos().get(id).unwrap();
        assert_eq!(todo.color_value(), Some("#EF4444"));
        assert_eq!(todo.color_category(), Some("Default"));
        assert!(!state.session.panels().color_library);
        assert_ne!(state.focus, Focus::Colors);
    }

    #[test]
    fn test_pick_without_request_is_noop() {
        let mut state = test_state();
        let id = add_todo(&mut state, "Paint");
        state.pick_selected_color();
        assert!(state.session.todos().get(id).unwrap().color.is_none());
        assert!(state.status_message.is_some());
    }

    #[test]
    fn test_add_and_delete_library_color() {
        let mut state = test_state();
        state.mode = Mode::AddColor;
        type_into(&mut state.color_form.name, "Moss");
        type_into(&mut state.color_form.category, "Garden");

        assert!(state.submit_color());
        assert_eq!(state.mode, Mode::Navigate);
        assert_eq!(state.session.colors().items()[0].color, DEFAULT_NEW_COLOR);
        assert_eq!(state.color_entries().len(), QUICK_PALETTE.len() + 1);

        state.cycle_category_filter();
        assert_eq!(state.category_filter, CategoryFilter::Category("Garden".to_string()));

        state.color_cursor = QUICK_PALETTE.len();
        state.delete_selected_color();
        assert!(state.session.colors().is_empty());
        assert_eq!(state.category_filter, CategoryFilter::All);

        // Built-in colors are not deletable
        state.color_cursor = 0;
        state.delete_selected_color();
        assert_eq!(state.color_entries().len(), QUICK_PALETTE.len());
    }

    #[test]
    fn test_incomplete_color_form_is_kept() {
        let mut state = test_state();
        state.mode = Mode::AddColor;
        type_into(&mut state.color_form.name, "Moss");

        assert!(!state.submit_color());
        assert_eq!(state.mode, Mode::AddColor);
        assert_eq!(state.color_form.name.text(), "Moss");
    }

    #[test]
    fn test_toggle_keeps_cursor_on_todo() {
        let mut state = test_state();
        let first = add_todo(&mut state, "first");
        add_todo(&mut state, "second");

        state.todo_cursor = 0;
        state.toggle_selected_todo();
        // Completed todos sort after active ones
        assert_eq!(state.todo_cursor, 1);
        assert_eq!(state.selected_todo_id(), Some(first));
    }

    #[test]
    fn test_delete_last_todo_clamps_cursor() {
        let mut state = test_state();
        add_todo(&mut state, "a");
        add_todo(&mut state, "b");

        state.todo_cursor = 1;
        state.delete_selected_todo();
        assert_eq!(state.todo_cursor, 0);
        state.delete_selected_todo();
        assert_eq!(state.todo_cursor, 0);
        assert!(state.selected_todo_id().is_none());
    }

    #[test]
    fn test_panel_toggles_move_focus() {
        let mut state = test_state();
        state.toggle_todo_panel();
        assert_eq!(state.focus, Focus::Todos);

        state.toggle_color_library();
        assert_eq!(state.focus, Focus::Colors);

        state.cycle_focus();
        assert_eq!(state.focus, Focus::Map);
        state.cycle_focus();
        assert_eq!(state.focus, Focus::Todos);

        state.toggle_todo_panel();
        assert_eq!(state.focus, Focus::Map);
    }

    #[test]
    fn test_quick_color_assigns_directly() {
        let mut state = test_state();
        let id = add_todo(&mut state, "Paint");
        state.quick_color_selected(7);
        assert_eq!(state.session.todos().get(id).unwrap().color_value(), Some("#14B8A6"));
        assert!(state.session.pending().is_idle());
    }

    #[test]
    fn test_step_cursor_bounds() {
        assert_eq!(step_cursor(0, -1, 3), 0);
        assert_eq!(step_cursor(2, 1, 3), 2);
        assert_eq!(step_cursor(1, 1, 3), 2);
        assert_eq!(step_cursor(5, 1, 0), 0);
    }
}
