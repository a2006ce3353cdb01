//! Full-screen workout timer.
//!
//! Built with ratatui and crossterm. The event loop blocks on key input only
//! until the next tick deadline, so the countdown stays on whole seconds.

mod app;
mod event;
mod ui;

pub use app::App;
pub use event::{action_for, Action};

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::error::FitError;
use crate::features::timer::{Metronome, RunOutcome, WorkoutTimerEngine};

/// Run the engine's current session on the full-screen timer.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or drawn.
pub fn run_workout(engine: &mut WorkoutTimerEngine, interval: Duration) -> Result<RunOutcome, FitError> {
    enable_raw_mode().map_err(|e| FitError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| FitError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| FitError::Terminal(format!("Failed to create terminal: {e}")))?;

    let mut app = App::new(engine, Metronome::new(interval));
    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App<'_>) -> Result<RunOutcome, FitError> {
    loop {
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| FitError::Terminal(format!("Failed to draw: {e}")))?;

        if let Some(action) = event::next_action(app.poll_timeout(Instant::now()))? {
            tracing::debug!(?action, "key action");
            let now = Instant::now();
            match action {
                Action::TogglePause => app.toggle_pause(now),
                Action::Skip => app.skip(now),
                Action::Minimize => app.minimize(),
                Action::Stop => app.stop(true),
                Action::Discard => app.stop(false),
            }
        }

        if app.exit.is_none() {
            app.on_time(Instant::now());
        }

        if let Some(exit) = app.exit.take() {
            return Ok(exit);
        }
    }
}
