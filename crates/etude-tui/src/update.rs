//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects. No IO happens in this module, which
//! is what lets the whole state machine run in tests without a terminal.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::animation::{FADE_DURATION, SLIDE_DURATION, Transition, TransitionKind};
use crate::effects::UiEffect;
use crate::events::{AppError, UiEvent};
use crate::features::session::update as session_update;
use crate::features::{daily, home, patterns};
use crate::navigation::Screen;
use crate::render;
use crate::state::{AppState, StatusMessage};

/// Effects to run at startup, before the first event.
///
/// Kicks off the data loads and fades the home screen in. A `--pattern`
/// launch jumps straight to the problem list; the filter is validated once
/// the problems arrive.
pub fn init(app: &mut AppState) -> Vec<UiEffect> {
    if app.tui.pattern_filter.is_some() {
        app.tui.nav.navigate(Screen::ProblemList);
    }
    app.tui.transition = Some(Transition::new(
        TransitionKind::FadeIn,
        FADE_DURATION,
        Instant::now(),
    ));
    vec![UiEffect::LoadProblems, UiEffect::LoadStats]
}

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::Frame { width, height } => {
            app.tui.frame_width = width;
            app.tui.frame_height = height;
            Vec::new()
        }
        UiEvent::Tick { now } => {
            if let Some(transition) = app.tui.transition.as_mut() {
                transition.update(now);
                if transition.is_complete() {
                    app.tui.transition = None;
                }
            }
            Vec::new()
        }

        UiEvent::ProblemsLoaded { problems } => on_problems_loaded(app, problems),
        UiEvent::StatsLoaded {
            summary,
            solved_today,
            solved_ids,
        } => {
            app.tui.stats = Some(summary);
            app.tui.solved_today = solved_today;
            app.tui.solved_ids = solved_ids;
            Vec::new()
        }

        UiEvent::SessionReady {
            session,
            scratch,
            code,
            now,
        } => session_update::on_ready(app, session, scratch, code, now),
        UiEvent::SessionFailed { session, error } => session_update::on_failed(app, session, error),
        UiEvent::SessionTick { session, now } => session_update::on_tick(app, session, now),
        UiEvent::TestsFinished {
            session,
            results,
            now,
        } => session_update::on_tests_finished(app, session, results, now),
        UiEvent::TestsFailed { session, error } => {
            session_update::on_tests_failed(app, session, error)
        }
        UiEvent::EditorClosed { session, code } => {
            session_update::on_editor_closed(app, session, code)
        }
        UiEvent::EditorFailed { session, error } => {
            session_update::on_editor_failed(app, session, error)
        }

        UiEvent::AttemptRecorded {
            summary,
            solved_today,
            solved_ids,
            unlocked,
        } => {
            app.tui.stats = Some(summary);
            app.tui.solved_today = solved_today;
            app.tui.solved_ids = solved_ids;
            if !unlocked.is_empty() {
                let badges = unlocked
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" · ");
                tracing::info!(%badges, "achievements unlocked");
                app.tui
                    .set_status(StatusMessage::success(format!("Unlocked: {badges}")));
            }
            Vec::new()
        }

        UiEvent::Error(error) => {
            app.tui.report_error(&error);
            Vec::new()
        }
    }
}

fn on_problems_loaded(
    app: &mut AppState,
    problems: Vec<etude_core::problems::Problem>,
) -> Vec<UiEffect> {
    let mut patterns: Vec<String> = Vec::new();
    for problem in &problems {
        for tag in &problem.patterns {
            if !patterns.contains(tag) {
                patterns.push(tag.clone());
            }
        }
    }
    app.tui.problems = problems;
    app.tui.patterns = patterns;
    app.tui.problems_loaded = true;

    if let Some(filter) = app.tui.pattern_filter.clone() {
        if !app.tui.patterns.contains(&filter) {
            app.tui.pattern_filter = None;
            app.tui
                .report_error(&AppError::Navigation(format!("Unknown pattern '{filter}'")));
        }
    }
    app.tui.rebuild_active_list();
    Vec::new()
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        // The next Frame event carries the new size; views re-shape then.
        Event::Resize(_, _) => Vec::new(),
        _ => Vec::new(),
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    // Ctrl+C quits from anywhere, bypassing confirmations.
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return vec![UiEffect::Quit];
    }

    // A pending exit confirmation owns the keyboard until answered.
    if app.tui.nav.current == Screen::Session && session_update::confirm_pending(app) {
        return session_update::handle_key(app, key);
    }

    // Esc dismisses a visible status message before anything else.
    if key.code == KeyCode::Esc && app.tui.status.is_some() {
        app.tui.clear_status();
        return Vec::new();
    }

    // r reloads cached data on every non-session screen (retry after a
    // failed load). Inside a session r means "run tests".
    if app.tui.nav.current != Screen::Session && key.code == KeyCode::Char('r') {
        app.tui.clear_status();
        return vec![UiEffect::LoadProblems, UiEffect::LoadStats];
    }

    match app.tui.nav.current {
        Screen::Home => home_key(app, key),
        Screen::PatternSelect => patterns_key(app, key),
        Screen::ProblemList => problems_key(app, key),
        Screen::ProblemDetail => detail_key(app, key),
        Screen::Session => session_update::handle_key(app, key),
        Screen::Daily => daily_key(app, key),
        Screen::Stats | Screen::Settings => info_key(app, key),
    }
}

fn home_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.tui.home_cursor = (app.tui.home_cursor + 1).min(home::MENU.len() - 1);
            Vec::new()
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.tui.home_cursor = app.tui.home_cursor.saturating_sub(1);
            Vec::new()
        }
        KeyCode::Enter => match app.tui.home_cursor {
            0 => goto(app, Screen::PatternSelect),
            1 => goto(app, Screen::Daily),
            2 => goto(app, Screen::Stats),
            3 => goto(app, Screen::Settings),
            _ => vec![UiEffect::Quit],
        },
        KeyCode::Char('q') => vec![UiEffect::Quit],
        _ => Vec::new(),
    }
}

fn patterns_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.tui.pattern_cursor = (app.tui.pattern_cursor + 1).min(patterns::row_count(app) - 1);
            Vec::new()
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.tui.pattern_cursor = app.tui.pattern_cursor.saturating_sub(1);
            Vec::new()
        }
        KeyCode::Enter => {
            app.tui.pattern_filter = patterns::filter_at(app, app.tui.pattern_cursor);
            app.tui.problem_cursor = 0;
            app.tui.rebuild_active_list();
            goto(app, Screen::ProblemList)
        }
        KeyCode::Esc | KeyCode::Backspace => go_back(app),
        KeyCode::Char('q') => vec![UiEffect::Quit],
        _ => Vec::new(),
    }
}

fn problems_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            let last = app.tui.active_list.len().saturating_sub(1);
            app.tui.problem_cursor = (app.tui.problem_cursor + 1).min(last);
            Vec::new()
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.tui.problem_cursor = app.tui.problem_cursor.saturating_sub(1);
            Vec::new()
        }
        KeyCode::Enter => {
            let Some(id) = app.tui.active_list.get(app.tui.problem_cursor).cloned() else {
                app.tui
                    .set_status(StatusMessage::info("No problem selected"));
                return Vec::new();
            };
            app.tui.detail_id = Some(id);
            goto(app, Screen::ProblemDetail)
        }
        KeyCode::Esc | KeyCode::Backspace => go_back(app),
        KeyCode::Char('q') => vec![UiEffect::Quit],
        _ => Vec::new(),
    }
}

fn detail_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Char('m') => {
            app.tui.mode = app.tui.mode.cycle();
            Vec::new()
        }
        KeyCode::Char('l') => {
            app.tui.language = app.tui.language.cycle();
            Vec::new()
        }
        KeyCode::Enter => {
            let Some(id) = app.tui.detail_id.clone() else {
                return Vec::new();
            };
            session_update::start_problem(app, &id)
        }
        KeyCode::Char('j') | KeyCode::Down => {
            scroll_body(app, 1);
            Vec::new()
        }
        KeyCode::Char('k') | KeyCode::Up => {
            scroll_body(app, -1);
            Vec::new()
        }
        KeyCode::Esc | KeyCode::Backspace => go_back(app),
        KeyCode::Char('q') => vec![UiEffect::Quit],
        _ => Vec::new(),
    }
}

fn daily_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Enter => {
            let Some(pattern) = daily::scheduled_pattern(app) else {
                app.tui.set_status(StatusMessage::info(
                    "Rotation done for today. Free practice awaits",
                ));
                return Vec::new();
            };
            app.tui.pattern_filter = Some(pattern);
            app.tui.problem_cursor = 0;
            app.tui.rebuild_active_list();
            goto(app, Screen::ProblemList)
        }
        KeyCode::Esc | KeyCode::Backspace => go_back(app),
        KeyCode::Char('q') => vec![UiEffect::Quit],
        _ => Vec::new(),
    }
}

/// Read-only screens: scroll and leave.
fn info_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            scroll_body(app, 1);
            Vec::new()
        }
        KeyCode::Char('k') | KeyCode::Up => {
            scroll_body(app, -1);
            Vec::new()
        }
        KeyCode::Esc | KeyCode::Backspace => go_back(app),
        KeyCode::Char('q') => vec![UiEffect::Quit],
        _ => Vec::new(),
    }
}

/// Navigates to `screen` and performs entry work for the target.
pub(crate) fn goto(app: &mut AppState, screen: Screen) -> Vec<UiEffect> {
    if app.tui.nav.current == screen {
        return Vec::new();
    }
    let kind = app.tui.nav.navigate(screen);
    after_navigation(app, kind)
}

/// Steps back one level; no-op on the home screen.
pub(crate) fn go_back(app: &mut AppState) -> Vec<UiEffect> {
    let Some(kind) = app.tui.nav.back() else {
        return Vec::new();
    };
    after_navigation(app, kind)
}

fn after_navigation(app: &mut AppState, kind: TransitionKind) -> Vec<UiEffect> {
    app.tui.transition = Some(Transition::new(kind, SLIDE_DURATION, Instant::now()));
    app.tui.body_scroll = 0;

    // A start command in flight is abandoned by navigating; its ready event
    // will arrive with no matching pending id and be dropped.
    app.tui.pending_session = None;

    // The session lives exactly as long as the session screen is shown.
    if app.tui.nav.current != Screen::Session {
        if let Some(session) = app.session.take() {
            if !session.phase.is_final() {
                tracing::info!(
                    session = session.id.0,
                    problem = %session.problem.id,
                    "session left without recording"
                );
            }
        }
    }

    match app.tui.nav.current {
        // Stats may have changed since the last visit; reload on entry.
        Screen::Stats | Screen::Daily => vec![UiEffect::LoadStats],
        _ => Vec::new(),
    }
}

/// Scrolls the body of the current screen, clamped so the last content
/// line stays reachable but never scrolls past the viewport.
pub(crate) fn scroll_body(app: &mut AppState, delta: i32) {
    let width = app.tui.frame_width.max(1);
    let content = render::body_lines(app, width).len();
    let viewport = usize::from(app.tui.frame_height.saturating_sub(2)).max(1);
    let max = u16::try_from(content.saturating_sub(viewport)).unwrap_or(u16::MAX);

    let next = if delta < 0 {
        app.tui.body_scroll.saturating_sub(delta.unsigned_abs() as u16)
    } else {
        app.tui.body_scroll.saturating_add(delta as u16)
    };
    app.tui.body_scroll = next.min(max);
}
