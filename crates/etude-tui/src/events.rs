//! Typed events processed by the reducer.
//!
//! Everything that can change state arrives here: terminal input, the frame
//! tick, and the results of background effects. Result events carry the id
//! of the session they belong to; the reducer drops any that arrive after
//! that session is gone (stale results are expected, not errors).

use std::collections::HashSet;
use std::time::Instant;

use etude_core::problems::Problem;
use etude_core::runner::TestCaseResult;
use etude_core::stats::{Achievement, StatsSummary};
use tempfile::TempDir;

use crate::features::session::SessionId;

/// Error classes surfaced through the reducer.
///
/// Every failure becomes a dismissible status line; none aborts the loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Problem or stats loading failed. Screen unchanged, retry with `r`.
    DataLoad(String),
    /// Editor failed to start or exited abnormally. Session preserved.
    Editor(String),
    /// Compile or runtime failure, distinct from a failing test case.
    /// Reported verbatim; the session is not marked complete.
    TestExecution(String),
    /// A requested transition made no sense. Current screen kept.
    Navigation(String),
}

impl AppError {
    /// Short class tag used in log fields.
    pub fn class(&self) -> &'static str {
        match self {
            AppError::DataLoad(_) => "data-load",
            AppError::Editor(_) => "editor",
            AppError::TestExecution(_) => "test-execution",
            AppError::Navigation(_) => "navigation",
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::DataLoad(msg)
            | AppError::Editor(msg)
            | AppError::TestExecution(msg)
            | AppError::Navigation(msg) => write!(f, "{msg}"),
        }
    }
}

/// Messages processed by the reducer.
///
/// The runtime delivers these one at a time, in FIFO order. Ticks, results,
/// and key presses originate from independent tasks and interleave
/// arbitrarily; the reducer tolerates any interleaving.
#[derive(Debug)]
pub enum UiEvent {
    /// Raw terminal input (keys, resize).
    Terminal(crossterm::event::Event),
    /// Terminal dimensions, prepended once per loop iteration.
    Frame { width: u16, height: u16 },
    /// Frame tick; advances animations and triggers a render.
    Tick { now: Instant },

    /// Problem repository finished loading.
    ProblemsLoaded { problems: Vec<Problem> },
    /// Stats summary finished loading.
    StatsLoaded {
        summary: StatsSummary,
        solved_today: HashSet<String>,
        solved_ids: HashSet<String>,
    },

    /// Scratch space for a starting session is ready.
    SessionReady {
        session: SessionId,
        scratch: TempDir,
        code: String,
        now: Instant,
    },
    /// Scratch preparation failed; the session never starts.
    SessionFailed { session: SessionId, error: String },
    /// One-second session timer fired.
    SessionTick { session: SessionId, now: Instant },

    /// Test run finished with per-case results.
    TestsFinished {
        session: SessionId,
        results: Vec<TestCaseResult>,
        now: Instant,
    },
    /// Test run could not execute (launch or compile failure).
    TestsFailed { session: SessionId, error: String },

    /// Editor exited cleanly; `code` is the re-read scratch file.
    EditorClosed { session: SessionId, code: String },
    /// Editor failed to start or exited non-zero.
    EditorFailed { session: SessionId, error: String },

    /// Attempt appended to the stats store.
    AttemptRecorded {
        summary: StatsSummary,
        solved_today: HashSet<String>,
        solved_ids: HashSet<String>,
        unlocked: Vec<Achievement>,
    },

    /// A background effect failed outside any session.
    Error(AppError),
}
