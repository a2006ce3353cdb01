//! Event handling for the workout screen.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::FitError;

/// Action requested by a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Pause or resume.
    TogglePause,
    /// End the current phase.
    Skip,
    /// Leave and keep the session for `workout resume`.
    Minimize,
    /// Stop and record progress.
    Stop,
    /// Stop without recording.
    Discard,
}

/// Map a key press to an action.
#[must_use]
pub fn action_for(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Stop);
    }

    match key.code {
        KeyCode::Char(' ' | 'p') => Some(Action::TogglePause),
        KeyCode::Char('s' | 'n') | KeyCode::Right => Some(Action::Skip),
        KeyCode::Char('m') => Some(Action::Minimize),
        KeyCode::Char('q') => Some(Action::Stop),
        KeyCode::Char('x') | KeyCode::Esc => Some(Action::Discard),
        _ => None,
    }
}

/// Wait up to `timeout` for a key press.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn next_action(timeout: Duration) -> Result<Option<Action>, FitError> {
    if event::poll(timeout).map_err(|e| FitError::Terminal(format!("Event poll failed: {e}")))? {
        if let Event::Key(key) =
            event::read().map_err(|e| FitError::Terminal(format!("Event read failed: {e}")))?
        {
            return Ok(action_for(key));
        }
    }
    Ok(None)
}
