//! UI rendering for the workout screen.

use chrono::Duration;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::core::format_mmss;
use crate::features::timer::Phase;
use crate::tui::app::App;

const KEYS: &str = "space:pause | s/→:skip | m:minimize | q:stop & save | x:discard";

/// Render the workout screen.
pub fn render(frame: &mut Frame<'_>, app: &App<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(7),    // Current phase
            Constraint::Length(3), // Phase gauge
            Constraint::Length(3), // Session gauge
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_phase(frame, app, chunks[1]);
    render_phase_gauge(frame, app, chunks[2]);
    render_session_gauge(frame, app, chunks[3]);
    render_status_bar(frame, app, chunks[4]);
}

fn phase_color(app: &App<'_>) -> Color {
    if app.engine.is_paused() {
        return Color::Yellow;
    }
    match app.engine.snapshot().map(|s| s.phase) {
        Some(Phase::Rest) => Color::Green,
        _ => Color::Red,
    }
}

fn render_header(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let name = app.engine.plan().map_or("", |p| p.name.as_str());
    let elapsed = app.engine.elapsed().unwrap_or_else(Duration::zero);
    let title = format!(" {name}  {} ", format_mmss(elapsed));

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(header, area);
}

fn render_phase(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let (Some(snapshot), Some(entry)) = (app.engine.snapshot(), app.engine.current_entry()) else {
        return;
    };
    let color = phase_color(app);
    let exercise = app
        .engine
        .current_exercise()
        .map_or_else(|| entry.exercise_id.clone(), |e| e.name);
    let phase = if app.engine.is_paused() {
        "PAUSED".to_string()
    } else {
        snapshot.phase.display_name().to_uppercase()
    };
    let exercise_count = app.engine.plan().map_or(0, |p| p.exercises.len());

    let mut lines = vec![
        Line::from(Span::styled(
            exercise,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "Exercise {}/{}  Set {}/{}",
            snapshot.exercise_index + 1,
            exercise_count,
            snapshot.current_set,
            entry.sets
        )),
        Line::from(vec![
            Span::styled(phase, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                format_mmss(Duration::seconds(i64::from(snapshot.seconds_remaining))),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(format!(
            "{:.1} kcal  |  {} work",
            snapshot.total_calories_burned,
            format_mmss(Duration::seconds(
                i64::try_from(snapshot.actual_work_seconds).unwrap_or(i64::MAX)
            ))
        )),
    ];

    if let Some(next) = app.engine.next_exercise() {
        lines.push(Line::from(Span::styled(
            format!("Up next: {}", next.name),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(body, area);
}

fn render_phase_gauge(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let ratio = app
        .engine
        .snapshot()
        .zip(app.engine.plan())
        .map_or(0.0, |(s, p)| s.phase_progress(p));

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Phase "))
        .gauge_style(Style::default().fg(phase_color(app)))
        .ratio(ratio.clamp(0.0, 1.0));

    frame.render_widget(gauge, area);
}

fn render_session_gauge(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let (ratio, label) = app
        .engine
        .snapshot()
        .zip(app.engine.plan())
        .map_or((0.0, String::new()), |(s, p)| {
            (
                s.session_progress(p),
                format!("{}/{} sets", s.sets_completed_count, p.total_sets()),
            )
        });

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Workout "))
        .gauge_style(Style::default().fg(Color::Cyan))
        .label(label)
        .ratio(ratio.clamp(0.0, 1.0));

    frame.render_widget(gauge, area);
}

fn render_status_bar(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let text = app.status.as_deref().map_or_else(
        || KEYS.to_string(),
        |status| format!("{status}  |  {KEYS}"),
    );
    let status = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}
