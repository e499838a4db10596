//! Session event handling.
//!
//! Every handler that reacts to an async result is gated on the session id
//! carried by the event. A result whose id does not match the live session
//! is dropped without touching state.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
use etude_core::runner::TestCaseResult;
use etude_core::stats::AttemptRecord;
use tempfile::TempDir;

use crate::animation::{FADE_DURATION, Transition, TransitionKind};
use crate::effects::UiEffect;
use crate::events::AppError;
use crate::navigation::Screen;
use crate::state::{AppState, StatusMessage};

use super::state::{ExitIntent, PendingSession, SessionPhase, SessionState};
use super::{SessionId, format_clock};

/// Allocates a session id, stashes the pending descriptor, and asks the
/// runtime to prepare scratch space. The session itself is not created
/// until `SessionReady` comes back.
pub fn start_problem(app: &mut AppState, problem_id: &str) -> Vec<UiEffect> {
    if app.tui.pending_session.is_some() {
        app.tui
            .set_status(StatusMessage::info("A session is already starting up"));
        return Vec::new();
    }
    let Some(problem) = app.tui.problem(problem_id).cloned() else {
        app.tui.report_error(&AppError::Navigation(format!(
            "Unknown problem '{problem_id}'"
        )));
        return Vec::new();
    };

    let language = app.tui.language;
    let Some(starter) = problem.starter_for(language) else {
        app.tui.report_error(&AppError::DataLoad(format!(
            "'{}' has no {} starter code",
            problem.title, language
        )));
        return Vec::new();
    };
    let starter = starter.to_string();

    let id = app.tui.session_seq.next_id();
    let mode = app.tui.mode;
    tracing::info!(
        session = id.0,
        problem = %problem.id,
        mode = mode.display_name(),
        "starting session"
    );
    app.tui.pending_session = Some(PendingSession {
        id,
        problem,
        mode,
        language,
    });
    vec![UiEffect::StartSession {
        session: id,
        language,
        starter,
    }]
}

/// Scratch space is ready: build the live session and enter the session
/// screen. A ready event whose id does not match the pending descriptor is
/// stale; dropping it drops the `TempDir` and cleans up the scratch space.
pub fn on_ready(
    app: &mut AppState,
    id: SessionId,
    scratch: TempDir,
    code: String,
    now: Instant,
) -> Vec<UiEffect> {
    if app.tui.pending_session.as_ref().is_none_or(|p| p.id != id) {
        tracing::debug!(session = id.0, "dropping stale session-ready event");
        return Vec::new();
    }
    let Some(pending) = app.tui.pending_session.take() else {
        return Vec::new();
    };

    let budget = pending.mode.budget(&app.tui.config.timers);
    app.session = Some(SessionState::new(
        id,
        pending.problem,
        pending.mode,
        pending.language,
        budget,
        scratch,
        code,
        now,
    ));

    let mut effects = Vec::new();
    if app.tui.nav.current == Screen::Session {
        // Replacing a finished session in place (cram advance): fade the new
        // problem in rather than sliding.
        app.tui.transition = Some(Transition::new(
            TransitionKind::FadeIn,
            FADE_DURATION,
            Instant::now(),
        ));
        app.tui.body_scroll = 0;
    } else {
        effects.extend(crate::update::goto(app, Screen::Session));
    }
    effects.push(UiEffect::ScheduleTick { session: id });
    effects
}

pub fn on_failed(app: &mut AppState, id: SessionId, error: String) -> Vec<UiEffect> {
    if app.tui.pending_session.as_ref().is_some_and(|p| p.id == id) {
        app.tui.pending_session = None;
        app.tui.report_error(&AppError::DataLoad(error));
    } else {
        tracing::debug!(session = id.0, "dropping stale session-failed event");
    }
    Vec::new()
}

/// One-second clock tick. Updates the displayed elapsed time, enforces the
/// time budget, and reschedules itself while the session is live. Ticks for
/// finished or replaced sessions are dropped, which ends their tick chain.
pub fn on_tick(app: &mut AppState, id: SessionId, now: Instant) -> Vec<UiEffect> {
    let Some(session) = app.session.as_mut().filter(|s| s.id == id) else {
        return Vec::new();
    };
    if session.phase.is_final() {
        return Vec::new();
    }

    session.shown_elapsed = session.elapsed(now);

    if session.phase == SessionPhase::Active && session.is_over_budget(now) {
        if session.mode.timeout_is_fatal() {
            return on_cram_timeout(app, now);
        }
        if !session.budget_warned {
            session.budget_warned = true;
            let budget = format_clock(session.budget);
            app.tui.set_status(StatusMessage::warning(format!(
                "Past the {budget} budget. Keep going, or press n to move on"
            )));
        }
    }

    vec![UiEffect::ScheduleTick { session: id }]
}

/// Cram ran out of time: the attempt is recorded as unsolved and the next
/// problem in the list starts automatically.
fn on_cram_timeout(app: &mut AppState, now: Instant) -> Vec<UiEffect> {
    let Some(session) = app.session.as_mut() else {
        return Vec::new();
    };
    session.finish(SessionPhase::Abandoned, now);
    tracing::info!(session = session.id.0, problem = %session.problem.id, "cram time expired");

    let record = AttemptRecord::new(
        session.problem.id.clone(),
        session.problem.primary_pattern(),
        session.mode,
        false,
        session.shown_elapsed.as_secs(),
    );
    app.tui.set_status(StatusMessage::warning(format!(
        "Time! '{}' recorded as unsolved",
        session.problem.title
    )));

    let mut effects = vec![UiEffect::RecordAttempt { record }];
    effects.extend(advance(app));
    effects
}

pub fn on_tests_finished(
    app: &mut AppState,
    id: SessionId,
    results: Vec<TestCaseResult>,
    now: Instant,
) -> Vec<UiEffect> {
    let Some(session) = app.session.as_mut().filter(|s| s.id == id) else {
        tracing::debug!(session = id.0, "dropping stale test results");
        return Vec::new();
    };
    session.run_in_flight = false;
    session.results = results;

    if session.phase.is_final() {
        // Results that raced a cram timeout still display, but the outcome
        // is already sealed.
        return Vec::new();
    }

    if session.all_passed() {
        session.finish(SessionPhase::Completed, now);
        let elapsed = format_clock(session.shown_elapsed);
        tracing::info!(session = id.0, problem = %session.problem.id, "solved");
        let record = AttemptRecord::new(
            session.problem.id.clone(),
            session.problem.primary_pattern(),
            session.mode,
            true,
            session.shown_elapsed.as_secs(),
        );
        app.tui.set_status(StatusMessage::success(format!(
            "Solved in {elapsed}. Press n for the next problem"
        )));
        return vec![UiEffect::RecordAttempt { record }];
    }

    let failed = session.failed_count();
    let total = session.results.len();
    app.tui.set_status(StatusMessage::warning(format!(
        "{failed} of {total} cases failing"
    )));
    Vec::new()
}

pub fn on_tests_failed(app: &mut AppState, id: SessionId, error: String) -> Vec<UiEffect> {
    let Some(session) = app.session.as_mut().filter(|s| s.id == id) else {
        return Vec::new();
    };
    session.run_in_flight = false;
    app.tui.report_error(&AppError::TestExecution(error));
    Vec::new()
}

/// Editor exited cleanly: the scratch file contents become the session's
/// code snapshot, which is what later test runs execute.
pub fn on_editor_closed(app: &mut AppState, id: SessionId, code: String) -> Vec<UiEffect> {
    let Some(session) = app.session.as_mut().filter(|s| s.id == id) else {
        return Vec::new();
    };
    session.code = code;
    app.tui
        .set_status(StatusMessage::info("Code updated from editor"));
    Vec::new()
}

pub fn on_editor_failed(app: &mut AppState, id: SessionId, error: String) -> Vec<UiEffect> {
    if app.session.as_ref().is_none_or(|s| s.id != id) {
        return Vec::new();
    }
    app.tui.report_error(&AppError::Editor(error));
    Vec::new()
}

/// Keys on the session screen. When an exit confirmation is pending, only
/// y / n / Esc are live.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if confirm_pending(app) {
        return match key.code {
            KeyCode::Char('y') => accept_exit(app),
            KeyCode::Char('n') | KeyCode::Esc => {
                cancel_exit(app);
                Vec::new()
            }
            _ => Vec::new(),
        };
    }

    match key.code {
        KeyCode::Char('p') => {
            toggle_pause(app);
            Vec::new()
        }
        KeyCode::Char('h') => {
            reveal_hint(app);
            Vec::new()
        }
        KeyCode::Char('s') => {
            reveal_solution(app);
            Vec::new()
        }
        KeyCode::Char('r') => run_tests(app),
        KeyCode::Char('e') => open_editor(app),
        KeyCode::Enter => submit(app),
        KeyCode::Char('n') => request_exit(app, ExitIntent::Skip),
        KeyCode::Char('q') | KeyCode::Esc => request_exit(app, ExitIntent::Quit),
        KeyCode::Char('j') | KeyCode::Down => {
            crate::update::scroll_body(app, 1);
            Vec::new()
        }
        KeyCode::Char('k') | KeyCode::Up => {
            crate::update::scroll_body(app, -1);
            Vec::new()
        }
        _ => Vec::new(),
    }
}

pub fn confirm_pending(app: &AppState) -> bool {
    app.session
        .as_ref()
        .is_some_and(|s| s.confirm_exit.is_some())
}

fn toggle_pause(app: &mut AppState) {
    if let Some(session) = app.session.as_mut() {
        session.toggle_pause(Instant::now());
    }
}

fn reveal_hint(app: &mut AppState) {
    let Some(session) = app.session.as_mut() else {
        return;
    };
    if session.problem.hints.is_empty() {
        app.tui
            .set_status(StatusMessage::info("No hints for this problem"));
        return;
    }
    session.hints.reveal();
}

fn reveal_solution(app: &mut AppState) {
    let Some(session) = app.session.as_mut() else {
        return;
    };
    if session.problem.solution_for(session.language).is_none() {
        app.tui.set_status(StatusMessage::info(format!(
            "No {} solution for this problem",
            session.language
        )));
        return;
    }
    session.solution.reveal();
}

/// Starts a test run over the current code snapshot. Rejected while a run
/// is already in flight and after the session has finished.
fn run_tests(app: &mut AppState) -> Vec<UiEffect> {
    let Some(session) = app.session.as_mut() else {
        return Vec::new();
    };
    if session.phase.is_final() {
        app.tui
            .set_status(StatusMessage::info("Session is over. Press n to move on"));
        return Vec::new();
    }
    if session.run_in_flight {
        app.tui
            .set_status(StatusMessage::warning("Tests are already running"));
        return Vec::new();
    }
    if session.problem.test_cases.is_empty() {
        app.tui
            .set_status(StatusMessage::info("This problem has no test cases"));
        return Vec::new();
    }

    session.run_in_flight = true;
    let effect = UiEffect::RunTests {
        session: session.id,
        language: session.language,
        code: session.code.clone(),
        cases: session.problem.test_cases.clone(),
    };
    app.tui.set_status(StatusMessage::info("Running tests..."));
    vec![effect]
}

fn open_editor(app: &mut AppState) -> Vec<UiEffect> {
    let Some(session) = app.session.as_ref() else {
        return Vec::new();
    };
    if session.phase.is_final() {
        app.tui
            .set_status(StatusMessage::info("Session is over. Press n to move on"));
        return Vec::new();
    }
    vec![UiEffect::OpenEditor {
        session: session.id,
        editor: app.tui.editor_cmd.clone(),
        path: session.scratch_path(),
    }]
}

/// Finalizes the outcome from the most recent results. Submitting after the
/// session already finished just redisplays the outcome.
fn submit(app: &mut AppState) -> Vec<UiEffect> {
    let Some(session) = app.session.as_ref() else {
        return Vec::new();
    };
    match session.phase {
        SessionPhase::Completed => {
            let elapsed = format_clock(session.shown_elapsed);
            app.tui
                .set_status(StatusMessage::success(format!("Solved in {elapsed}")));
        }
        SessionPhase::Abandoned => {
            app.tui
                .set_status(StatusMessage::info("This attempt is over. Press n to move on"));
        }
        SessionPhase::Active | SessionPhase::Paused => {
            if session.run_in_flight {
                app.tui
                    .set_status(StatusMessage::warning("Tests are still running"));
            } else if session.results.is_empty() {
                app.tui
                    .set_status(StatusMessage::info("Run the tests first (r)"));
            } else {
                let failed = session.failed_count();
                app.tui.set_status(StatusMessage::warning(format!(
                    "{failed} case(s) still failing. Fix and rerun (r)"
                )));
            }
        }
    }
    Vec::new()
}

/// Quit or skip. Cram asks for confirmation while the attempt is live;
/// everything else exits immediately. Neither path records an attempt.
fn request_exit(app: &mut AppState, intent: ExitIntent) -> Vec<UiEffect> {
    let Some(session) = app.session.as_mut() else {
        return Vec::new();
    };
    if session.mode.confirm_quit() && !session.phase.is_final() {
        session.confirm_exit = Some(intent);
        let verb = match intent {
            ExitIntent::Quit => "quit",
            ExitIntent::Skip => "skip",
        };
        app.tui.set_status(StatusMessage::warning(format!(
            "Really {verb}? The attempt is discarded. (y/n)"
        )));
        return Vec::new();
    }
    perform_exit(app, intent)
}

fn accept_exit(app: &mut AppState) -> Vec<UiEffect> {
    let Some(intent) = app.session.as_mut().and_then(|s| s.confirm_exit.take()) else {
        return Vec::new();
    };
    app.tui.clear_status();
    perform_exit(app, intent)
}

fn cancel_exit(app: &mut AppState) {
    if let Some(session) = app.session.as_mut() {
        session.confirm_exit = None;
    }
    app.tui.clear_status();
}

fn perform_exit(app: &mut AppState, intent: ExitIntent) -> Vec<UiEffect> {
    match intent {
        ExitIntent::Quit => crate::update::go_back(app),
        ExitIntent::Skip => advance(app),
    }
}

/// Moves to the next problem in the active list, or back to the list when
/// the current problem was the last one.
fn advance(app: &mut AppState) -> Vec<UiEffect> {
    let current = app.session.as_ref().map(|s| s.problem.id.clone());
    let next = current.and_then(|id| {
        let pos = app.tui.active_list.iter().position(|p| *p == id)?;
        app.tui.active_list.get(pos + 1).cloned()
    });
    match next {
        Some(next_id) => {
            app.tui.detail_id = Some(next_id.clone());
            start_problem(app, &next_id)
        }
        None => {
            app.tui
                .set_status(StatusMessage::info("End of the list. Pick another problem"));
            crate::update::goto(app, Screen::ProblemList)
        }
    }
}
