//! Pure view/render functions for the TUI.
//!
//! This module contains all rendering logic. Functions here:
//! - Take `&AppState` by immutable reference
//! - Draw to a ratatui Frame
//! - Never mutate state or return effects
//!
//! Screens pre-shape their content as `Vec<Line>` so the transition engine
//! can transform whole lines and scrolling can clamp against a known count.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::features::{daily, detail, home, patterns, problems, session, settings, stats};
use crate::navigation::Screen;
use crate::state::{AppState, StatusKind};

/// Height of the title bar.
const TITLE_HEIGHT: u16 = 1;

/// Height of the status/hint line at the bottom.
const STATUS_HEIGHT: u16 = 1;

/// Horizontal body margin (left and right).
const BODY_MARGIN: u16 = 1;

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TITLE_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);

    render_title_bar(app, frame, chunks[0]);
    render_body(app, frame, chunks[1]);
    render_status_line(app, frame, chunks[2]);
}

/// The body lines for the current screen, before transition and scroll.
///
/// Also used by the reducer to clamp scrolling, so offsets always agree
/// with what is actually drawn.
pub(crate) fn body_lines(app: &AppState, width: u16) -> Vec<Line<'static>> {
    match app.tui.nav.current {
        Screen::Home => home::lines(app, width),
        Screen::PatternSelect => patterns::lines(app, width),
        Screen::ProblemList => problems::lines(app, width),
        Screen::ProblemDetail => detail::lines(app, width),
        Screen::Session => session::lines(app, width),
        Screen::Stats => stats::lines(app, width),
        Screen::Daily => daily::lines(app, width),
        Screen::Settings => settings::lines(app, width),
    }
}

fn render_title_bar(app: &AppState, frame: &mut Frame, area: Rect) {
    let theme = &app.tui.theme;
    let title = app.tui.nav.current.title();
    let name = concat!("etude ", env!("CARGO_PKG_VERSION"));
    let pad = usize::from(area.width).saturating_sub(title.width() + name.width() + 2);

    let line = Line::from(vec![
        Span::styled(
            format!(" {title}"),
            theme.accent_style().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ".repeat(pad)),
        Span::styled(format!("{name} "), theme.dim_style()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_body(app: &AppState, frame: &mut Frame, area: Rect) {
    let body_area = Rect {
        x: area.x + BODY_MARGIN,
        y: area.y,
        width: area.width.saturating_sub(BODY_MARGIN * 2),
        height: area.height,
    };

    let lines = body_lines(app, body_area.width);
    let height = usize::from(body_area.height);
    let offset = usize::from(app.tui.body_scroll).min(lines.len().saturating_sub(height));

    let mut visible: Vec<Line<'static>> =
        lines.into_iter().skip(offset).take(height).collect();
    if let Some(transition) = &app.tui.transition {
        visible = transition.apply(visible, body_area.width);
    }

    // NOTE: No .wrap() here - views pre-wrap their own prose. Adding wrap
    // would double-wrap transitioned lines.
    frame.render_widget(Paragraph::new(visible), body_area);
}

fn render_status_line(app: &AppState, frame: &mut Frame, area: Rect) {
    let theme = &app.tui.theme;

    let spans: Vec<Span> = if let Some(status) = &app.tui.status {
        let (marker, style) = match status.kind {
            StatusKind::Info => ("·", theme.dim_style()),
            StatusKind::Success => ("✓", theme.success_style()),
            StatusKind::Warning => ("!", theme.warning_style()),
            StatusKind::Error => ("✗", theme.error_style()),
        };
        let dismiss =
            if status.kind == StatusKind::Error && app.tui.nav.current != Screen::Session {
                "  r retry  Esc dismiss"
            } else {
                "  Esc dismiss"
            };
        vec![
            Span::styled(format!(" {marker} "), style),
            Span::styled(status.text.clone(), style),
            Span::styled(dismiss, theme.dim_style()),
        ]
    } else {
        hint_spans(app)
    };

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Key hints for the current screen, shown when no status is visible.
fn hint_spans(app: &AppState) -> Vec<Span<'static>> {
    let hints: Vec<(&str, &str)> = match app.tui.nav.current {
        Screen::Home => vec![("j/k", "move"), ("Enter", "select"), ("q", "quit")],
        Screen::PatternSelect | Screen::ProblemList => vec![
            ("j/k", "move"),
            ("Enter", "select"),
            ("Esc", "back"),
            ("q", "quit"),
        ],
        Screen::ProblemDetail => vec![
            ("Enter", "start"),
            ("m", "mode"),
            ("l", "language"),
            ("j/k", "scroll"),
            ("Esc", "back"),
        ],
        Screen::Session => session_hints(app),
        Screen::Daily => vec![("Enter", "open"), ("Esc", "back")],
        Screen::Stats | Screen::Settings => vec![("j/k", "scroll"), ("Esc", "back")],
    };

    let theme = &app.tui.theme;
    let mut spans = Vec::with_capacity(hints.len() * 2 + 1);
    spans.push(Span::raw(" "));
    for (i, (key, label)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled((*key).to_string(), theme.accent_style()));
        spans.push(Span::styled(format!(" {label}"), theme.dim_style()));
    }
    spans
}

fn session_hints(app: &AppState) -> Vec<(&'static str, &'static str)> {
    let Some(session) = app.session.as_ref() else {
        return vec![("Esc", "back")];
    };
    if session.confirm_exit.is_some() {
        return vec![("y", "confirm"), ("n", "keep going")];
    }
    if session.phase.is_final() {
        return vec![("n", "next"), ("q", "back")];
    }
    let pause = if session.phase == crate::features::session::SessionPhase::Paused {
        ("p", "resume")
    } else {
        ("p", "pause")
    };
    vec![
        ("r", "run"),
        ("e", "edit"),
        ("Enter", "submit"),
        ("h", "hint"),
        ("s", "solution"),
        pause,
        ("n", "skip"),
        ("q", "quit"),
    ]
}

#[cfg(test)]
mod tests {
    use etude_core::config::Config;

    use super::*;
    use crate::state::LaunchOptions;

    // Views are exercised through reducer tests; this only checks that
    // every screen produces content with empty caches (nothing loaded).
    #[test]
    fn test_every_screen_renders_lines_before_data_loads() {
        let mut app = AppState::new(Config::default(), &LaunchOptions::default());
        for screen in [
            Screen::Home,
            Screen::PatternSelect,
            Screen::ProblemList,
            Screen::ProblemDetail,
            Screen::Session,
            Screen::Stats,
            Screen::Daily,
            Screen::Settings,
        ] {
            app.tui.nav.navigate(screen);
            assert!(
                !body_lines(&app, 80).is_empty(),
                "screen {screen:?} rendered nothing"
            );
        }
    }
}
