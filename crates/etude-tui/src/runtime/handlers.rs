//! Effect handlers for the TUI runtime.
//!
//! This module contains the implementation of side effects triggered by the
//! reducer. These functions perform I/O and async tasks. They do NOT mutate
//! state directly.
//!
//! ## Pure Async Pattern
//!
//! Handlers are pure async functions that return `UiEvent`. The runtime uses
//! `spawn_effect` to spawn them and send results to the inbox. This keeps
//! handlers focused on the work while the runtime handles spawning.

use std::time::{Duration, Instant};

use etude_core::config::paths;
use etude_core::language::Language;
use etude_core::problems::{ProblemRepository, TestCase};
use etude_core::runner;
use etude_core::stats::{AttemptRecord, StatsStore, achievements};
use tempfile::TempDir;

use crate::events::{AppError, UiEvent};
use crate::features::session::SessionId;

/// Seconds between session clock ticks.
const SESSION_TICK: Duration = Duration::from_secs(1);

/// Loads the problem repository (built-ins plus user problem files).
///
/// Pure async function - runtime spawns and sends result to inbox.
pub async fn load_problems() -> UiEvent {
    tokio::task::spawn_blocking(|| match ProblemRepository::load(&paths::problems_dir()) {
        Ok(repo) => UiEvent::ProblemsLoaded {
            problems: repo.list_all().to_vec(),
        },
        Err(e) => UiEvent::Error(AppError::DataLoad(format!("{e:#}"))),
    })
    .await
    .unwrap_or_else(|e| UiEvent::Error(AppError::DataLoad(format!("Task failed: {e}"))))
}

/// Loads the attempt history and derives the summary.
///
/// Pure async function - runtime spawns and sends result to inbox.
pub async fn load_stats() -> UiEvent {
    tokio::task::spawn_blocking(|| match StatsStore::load(&paths::stats_path()) {
        Ok(store) => UiEvent::StatsLoaded {
            summary: store.summary(),
            solved_today: store.patterns_solved_today(),
            solved_ids: store.solved_problem_ids(),
        },
        Err(e) => UiEvent::Error(AppError::DataLoad(format!("{e:#}"))),
    })
    .await
    .unwrap_or_else(|e| UiEvent::Error(AppError::DataLoad(format!("Task failed: {e}"))))
}

/// Prepares scratch space for a starting session: a private temp directory
/// holding the scratch file seeded with the starter code.
///
/// Pure async function - runtime spawns and sends result to inbox.
pub async fn session_start(session: SessionId, language: Language, starter: String) -> UiEvent {
    tokio::task::spawn_blocking(move || {
        let scratch = match TempDir::new() {
            Ok(dir) => dir,
            Err(e) => {
                return UiEvent::SessionFailed {
                    session,
                    error: format!("Failed to create scratch directory: {e}"),
                };
            }
        };
        if let Err(e) = etude_core::editor::write_scratch(scratch.path(), language, &starter) {
            return UiEvent::SessionFailed {
                session,
                error: format!("{e:#}"),
            };
        }
        UiEvent::SessionReady {
            session,
            scratch,
            code: starter,
            now: Instant::now(),
        }
    })
    .await
    .unwrap_or_else(|e| UiEvent::SessionFailed {
        session,
        error: format!("Task failed: {e}"),
    })
}

/// Sleeps one tick and stamps the wake-up time. The reducer reschedules
/// this while the session is live, forming the clock chain.
pub async fn schedule_tick(session: SessionId) -> UiEvent {
    tokio::time::sleep(SESSION_TICK).await;
    UiEvent::SessionTick {
        session,
        now: Instant::now(),
    }
}

/// Runs the code snapshot against the problem's test cases.
///
/// Pure async function - runtime spawns and sends result to inbox.
pub async fn run_tests(
    session: SessionId,
    language: Language,
    code: String,
    cases: Vec<TestCase>,
) -> UiEvent {
    match runner::run_tests(language, &code, &cases).await {
        Ok(results) => UiEvent::TestsFinished {
            session,
            results,
            now: Instant::now(),
        },
        Err(e) => UiEvent::TestsFailed {
            session,
            error: format!("{e:#}"),
        },
    }
}

/// Appends an attempt to the history and reports what changed: the fresh
/// summary, today's solved patterns, and any achievements crossed.
///
/// Pure async function - runtime spawns and sends result to inbox.
pub async fn record_attempt(record: AttemptRecord) -> UiEvent {
    tokio::task::spawn_blocking(move || {
        let mut store = match StatsStore::load(&paths::stats_path()) {
            Ok(store) => store,
            Err(e) => return UiEvent::Error(AppError::DataLoad(format!("{e:#}"))),
        };
        let before = store.summary();
        if let Err(e) = store.record_attempt(record) {
            return UiEvent::Error(AppError::DataLoad(format!("{e:#}")));
        }
        let after = store.summary();
        let unlocked = achievements(&before, &after);
        UiEvent::AttemptRecorded {
            summary: after,
            solved_today: store.patterns_solved_today(),
            solved_ids: store.solved_problem_ids(),
            unlocked,
        }
    })
    .await
    .unwrap_or_else(|e| UiEvent::Error(AppError::DataLoad(format!("Task failed: {e}"))))
}
