pub mod components;
pub mod theme;

use crate::app::AppState;
use crate::app::event::{handle_key_event, handle_mouse_event};
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Write};
use std::time::Duration;

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = disable_raw_mode();
        let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
        let _ = stdout.flush();
    }
}

pub fn run_tui(mut state: AppState) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut state);
    terminal.show_cursor()?;

    result
}

/// Decides whether the next loop iteration needs a frame.
///
/// Input, lookup results, spinner ticks and expiring messages mark it dirty;
/// a changed marker revision forces a frame even without a mark.
#[derive(Debug)]
struct RedrawGate {
    dirty: bool,
    drawn_revision: Option<u64>,
}

impl RedrawGate {
    fn new() -> Self {
        Self {
            dirty: true,
            drawn_revision: None,
        }
    }

    fn mark(&mut self) {
        self.dirty = true;
    }

    fn should_draw(&mut self, marker_revision: u64) -> bool {
        if !self.dirty && self.drawn_revision == Some(marker_revision) {
            return false;
        }
        self.dirty = false;
        self.drawn_revision = Some(marker_revision);
        true
    }
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, state: &mut AppState) -> Result<()> {
    let mut gate = RedrawGate::new();

    loop {
        if gate.should_draw(state.session.marker_revision()) {
            terminal.draw(|f| {
                components::render(f, state);
            })?;
            crate::record_crash_context(state.crash_summary());
        }

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handle_key_event(key, state)?;
                    gate.mark();
                }
                Event::Mouse(mouse) => {
                    handle_mouse_event(mouse, state)?;
                    gate.mark();
                }
                Event::Resize(..) => gate.mark(),
                _ => {}
            }
        }

        if state.check_lookups() {
            gate.mark();
        }
        if state.search_in_flight() || state.locate_in_flight() {
            state.tick_spinner();
            gate.mark();
        }
        if state.clear_expired_status_message() {
            gate.mark();
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_draws_first_frame_then_waits() {
        let mut gate = RedrawGate::new();
        assert!(gate.should_draw(0));
        assert!(!gate.should_draw(0));
        assert!(!gate.should_draw(0));
    }

    #[test]
    fn test_gate_redraws_on_mark_or_new_revision() {
        let mut gate = RedrawGate::new();
        assert!(gate.should_draw(0));

        gate.mark();
        assert!(gate.should_draw(0));
        assert!(!gate.should_draw(0));

        assert!(gate.should_draw(1));
        assert!(!gate.should_draw(1));
    }
}
