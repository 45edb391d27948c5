use super::mode::{Focus, Mode};
use super::state::AppState;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use pin_tui::utils::input::TextInput;

/// Pan steps per arrow key press
const PAN_STEPS: i32 = 1;

pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Result<()> {
    if state.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            state.show_help = false;
        }
        return Ok(());
    }

    match state.mode {
        Mode::Navigate => handle_navigate_mode(key, state),
        Mode::Search => handle_search_mode(key, state),
        Mode::AddTodo => handle_add_todo_mode(key, state),
        Mode::AddColor => handle_add_color_mode(key, state),
    }
    Ok(())
}

pub fn handle_mouse_event(mouse: MouseEvent, state: &mut AppState) -> Result<()> {
    if state.show_help || state.mode != Mode::Navigate {
        return Ok(());
    }

    let over_map = state.map_area.is_some_and(|area| {
        mouse.column >= area.x
            && mouse.column < area.x + area.width
            && mouse.row >= area.y
            && mouse.row < area.y + area.height
    });
    if !over_map {
        return Ok(());
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            state.focus = Focus::Map;
            state.map_click_at(mouse.column, mouse.row);
        }
        MouseEventKind::ScrollUp => state.session.view_mut().zoom_in(),
        MouseEventKind::ScrollDown => state.session.view_mut().zoom_out(),
        _ => {}
    }
    Ok(())
}

fn handle_navigate_mode(key: KeyEvent, state: &mut AppState) {
    // Keys that work regardless of focus
    match key.code {
        KeyCode::Char('q') => {
            state.should_quit = true;
            return;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.should_quit = true;
            return;
        }
        KeyCode::Char('?') => {
            state.show_help = true;
            return;
        }
        KeyCode::Esc => {
            // Pending requests stay live; only the notice goes away
            state.dismiss_notice();
            return;
        }
        KeyCode::Char('/') => {
            state.mode = Mode::Search;
            return;
        }
        KeyCode::Char('g') => {
            if !state.request_current_location() {
                state.set_status_message("Already locating...".to_string());
            }
            return;
        }
        KeyCode::Char('t') => {
            state.toggle_todo_panel();
            return;
        }
        KeyCode::Char('c') => {
            state.toggle_color_library();
            return;
        }
        KeyCode::Char('X') => {
            state.clear_custom_markers();
            return;
        }
        KeyCode::Tab => {
            state.cycle_focus();
            return;
        }
        _ => {}
    }

    match state.focus {
        Focus::Map => handle_map_keys(key, state),
        Focus::Todos => handle_todo_keys(key, state),
        Focus::Colors => handle_color_keys(key, state),
    }
}

fn handle_map_keys(key: KeyEvent, state: &mut AppState) {
    let view = state.session.view_mut();
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => view.pan(-PAN_STEPS, 0),
        KeyCode::Right | KeyCode::Char('l') => view.pan(PAN_STEPS, 0),
        KeyCode::Up | KeyCode::Char('k') => view.pan(0, PAN_STEPS),
        KeyCode::Down | KeyCode::Char('j') => view.pan(0, -PAN_STEPS),
        KeyCode::Char('+') | KeyCode::Char('=') => view.zoom_in(),
        KeyCode::Char('-') => view.zoom_out(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            state.click_map_center();
        }
        _ => {}
    }
}

fn handle_todo_keys(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => state.move_todo_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => state.move_todo_cursor(1),
        KeyCode::Char('a') | KeyCode::Char('n') => state.mode = Mode::AddTodo,
        KeyCode::Char(' ') | KeyCode::Char('x') => state.toggle_selected_todo(),
        KeyCode::Char('d') => state.delete_selected_todo(),
        KeyCode::Char('L') => state.request_location_for_selected(),
        KeyCode::Char('r') => state.remove_location_from_selected(),
        KeyCode::Char('v') | KeyCode::Enter => state.view_selected_on_map(),
        KeyCode::Char('p') => state.request_color_for_selected(),
        KeyCode::Char(c @ '1'..='8') => {
            state.quick_color_selected(c as usize - '1' as usize);
        }
        _ => {}
    }
}

fn handle_color_keys(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => state.move_color_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => state.move_color_cursor(1),
        KeyCode::Char('a') | KeyCode::Char('n') => state.mode = Mode::AddColor,
        KeyCode::Enter | KeyCode::Char(' ') => state.pick_selected_color(),
        KeyCode::Char('d') => state.delete_selected_color(),
        KeyCode::Char('f') => state.cycle_category_filter(),
        _ => {}
    }
}

fn handle_search_mode(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Esc => state.mode = Mode::Navigate,
        KeyCode::Enter => {
            if state.search_in_flight() {
                state.set_status_message("Searching...".to_string());
            } else if !state.submit_search() {
                state.set_status_message("Please enter a search term.".to_string());
            }
        }
        _ => edit_text(key, &mut state.search_input),
    }
}

fn handle_add_todo_mode(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Esc => {
            state.todo_input.clear();
            state.mode = Mode::Navigate;
        }
        KeyCode::Enter => {
            state.submit_todo();
        }
        _ => edit_text(key, &mut state.todo_input),
    }
}

fn handle_add_color_mode(key: KeyEvent, state: &mut AppState) {
    let form = &mut state.color_form;
    match key.code {
        KeyCode::Esc => state.mode = Mode::Navigate,
        KeyCode::Tab | KeyCode::Down => form.field = form.field.next(),
        KeyCode::BackTab | KeyCode::Up => form.field = form.field.prev(),
        KeyCode::Enter => {
            if !state.submit_color() {
                state.set_status_message("Name, color and category are all required.".to_string());
            }
        }
        _ => edit_text(key, form.active_input()),
    }
}

/// Shared line editing for every text field.
fn edit_text(key: KeyEvent, input: &mut TextInput) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let word = ctrl || key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
        KeyCode::Char('w') if ctrl => input.delete_word_back(),
        KeyCode::Char('u') if ctrl => input.clear(),
        KeyCode::Char('a') if ctrl => input.move_home(),
        KeyCode::Char('e') if ctrl => input.move_end(),
        KeyCode::Char(c) if !ctrl => input.insert(c),
        KeyCode::Backspace if word => input.delete_word_back(),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left if word => input.move_word_left(),
        KeyCode::Right if word => input.move_word_right(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::Theme;
    use pin_tui::error::AppError;
    use pin_tui::geo::{DisabledGeolocation, Geocoder, LatLng, Place};
    use pin_tui::session::Session;
    use pretty_assertions::assert_eq;
    use ratatui::layout::Rect;
    use std::sync::Arc;

    struct NoGeocoder;

    impl Geocoder for NoGeocoder {
        fn search(&self, query: &str) -> Result<Place, AppError> {
            Err(AppError::NotFound {
                query: query.to_string(),
            })
        }
    }

    fn state() -> AppState {
        let mut session = Session::default();
        session.attach_map();
        let mut state = AppState::new(
            session,
            Theme::default(),
            Arc::new(NoGeocoder),
            Arc::new(DisabledGeolocation),
        );
        state.map_area = Some(Rect::new(0, 3, 60, 20));
        state
    }

    fn press(state: &mut AppState, code: KeyCode) {
        handle_key_event(KeyEvent::new(code, KeyModifiers::NONE), state).unwrap();
    }

    fn type_str(state: &mut AppState, text: &str) {
        for c in text.chars() {
            press(state, KeyCode::Char(c));
        }
    }

    fn click(state: &mut AppState, column: u16, row: u16) {
        let mouse = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse_event(mouse, state).unwrap();
    }

    #[test]
    fn test_add_todo_through_keys() {
        let mut state = state();
        press(&mut state, KeyCode::Char('t'));
        press(&mut state, KeyCode::Char('a'));
        assert_eq!(state.mode, Mode::AddTodo);

        type_str(&mut state, "Buy milk");
        press(&mut state, KeyCode::Enter);

        assert_eq!(state.mode, Mode::Navigate);
        assert_eq!(state.session.todos().items()[0].text, "Buy milk");
    }

    #[test]
    fn test_esc_keeps_pending_location_request() {
        let mut state = state();
        press(&mut state, KeyCode::Char('t'));
        press(&mut state, KeyCode::Char('a'));
        type_str(&mut state, "Buy milk");
        press(&mut state, KeyCode::Enter);
        let id = state.selected_todo_id().unwrap();

        press(&mut state, KeyCode::Char('L'));
        press(&mut state, KeyCode::Esc);
        assert_eq!(state.session.pending().awaiting_location(), Some(id));

        click(&mut state, 30, 10);
        let todo = state.session.todos().get(id).unwrap();
        assert!(todo.position().is_some());
        assert!(state.session.pending().is_idle());
        assert!(state.session.custom_markers().is_empty());
    }

    #[test]
    fn test_click_outside_map_is_ignored() {
        let mut state = state();
        click(&mut state, 30, 0);
        assert!(state.session.custom_markers().is_empty());

        click(&mut state, 30, 10);
        assert_eq!(state.session.custom_markers().len(), 1);
    }

    #[test]
    fn test_enter_on_map_drops_marker_at_center() {
        let mut state = state();
        let center = state.session.view().center();
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.session.custom_markers()[0].position, center);

        press(&mut state, KeyCode::Char('X'));
        assert!(state.session.custom_markers().is_empty());
    }

    #[test]
    fn test_arrow_keys_pan_map() {
        let mut state = state();
        let before = state.session.view().center();
        press(&mut state, KeyCode::Right);
        let after = state.session.view().center();
        assert!(after.lng > before.lng);
        assert_eq!(after.lat, before.lat);

        press(&mut state, KeyCode::Char('+'));
        assert_eq!(state.session.view().zoom(), 14);
    }

    #[test]
    fn test_search_edit_keys() {
        let mut state = state();
        press(&mut state, KeyCode::Char('/'));
        type_str(&mut state, "new york");
        handle_key_event(
            KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL),
            &mut state,
        )
        .unwrap();
        assert_eq!(state.search_input.text(), "new ");

        press(&mut state, KeyCode::Esc);
        assert_eq!(state.mode, Mode::Navigate);
        // Text survives leaving the search box
        assert_eq!(state.search_input.text(), "new ");
    }

    #[test]
    fn test_blank_search_stays_in_search_mode() {
        let mut state = state();
        press(&mut state, KeyCode::Char('/'));
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.mode, Mode::Search);
        assert!(!state.search_in_flight());
    }

    #[test]
    fn test_color_form_field_cycling() {
        let mut state = state();
        press(&mut state, KeyCode::Char('c'));
        press(&mut state, KeyCode::Char('a'));
        type_str(&mut state, "Moss");
        press(&mut state, KeyCode::Tab);
        press(&mut state, KeyCode::Tab);
        type_str(&mut state, "Garden");
        press(&mut state, KeyCode::Enter);

        let item = &state.session.colors().items()[0];
        assert_eq!(item.name, "Moss");
        assert_eq!(item.category, "Garden");
        assert_eq!(state.mode, Mode::Navigate);
    }

    #[test]
    fn test_help_swallows_keys() {
        let mut state = state();
        press(&mut state, KeyCode::Char('?'));
        press(&mut state, KeyCode::Enter);
        assert!(state.session.custom_markers().is_empty());
        press(&mut state, KeyCode::Esc);
        assert!(!state.show_help);
        assert_eq!(state.session.view().center(), LatLng::new(40.7128, -74.0060));
    }
}
