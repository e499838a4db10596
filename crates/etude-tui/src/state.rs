//! Application state for the TUI.
//!
//! State hierarchy:
//!
//! ```text
//! AppState
//! ├── tui: TuiState                  — navigation, cached data, view state
//! │   ├── nav: Navigator             — current/previous screen
//! │   ├── transition                 — in-flight screen animation
//! │   ├── problems / stats caches    — loaded by background effects
//! │   └── per-screen cursors
//! └── session: Option<SessionState>  — the active practice attempt
//! ```
//!
//! The reducer owns all mutation. It maintains one cross-field invariant:
//! a `SessionState` exists iff the current screen is `Session`.

use std::collections::HashSet;

use etude_core::config::{Config, Mode};
use etude_core::language::Language;
use etude_core::problems::Problem;
use etude_core::stats::StatsSummary;

use crate::animation::Transition;
use crate::events::AppError;
use crate::features::session::{PendingSession, SessionSeq, SessionState};
use crate::navigation::Navigator;
use crate::theme::Theme;

/// Severity of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Warning,
    Error,
}

/// Dismissible one-line message shown at the bottom of the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

/// Overrides from the command line, applied once at startup.
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub mode: Option<Mode>,
    pub language: Option<Language>,
    /// Jump straight to the problem list filtered to this pattern.
    pub pattern: Option<String>,
}

/// Everything outside the active session.
#[derive(Debug)]
pub struct TuiState {
    // ========================================================================
    // Startup-resolved values (immutable after construction)
    // ========================================================================
    pub config: Config,
    pub theme: Theme,
    /// Editor command resolved from config, $EDITOR, then vi.
    pub editor_cmd: String,

    // ========================================================================
    // Loop state
    // ========================================================================
    pub nav: Navigator,
    pub transition: Option<Transition>,
    pub should_quit: bool,
    pub status: Option<StatusMessage>,
    /// Terminal size from the most recent Frame event.
    pub frame_width: u16,
    pub frame_height: u16,

    // ========================================================================
    // Cached data (loaded by background effects)
    // ========================================================================
    pub problems: Vec<Problem>,
    pub problems_loaded: bool,
    /// Distinct pattern tags, ordered by first appearance.
    pub patterns: Vec<String>,
    pub stats: Option<StatsSummary>,
    /// Patterns with a solve recorded today (drives the daily screen).
    pub solved_today: HashSet<String>,
    /// Problems solved at least once (drives the list's solved markers).
    pub solved_ids: HashSet<String>,

    // ========================================================================
    // Session bookkeeping
    // ========================================================================
    pub session_seq: SessionSeq,
    /// Set while a start command is in flight; its id gates SessionReady.
    pub pending_session: Option<PendingSession>,

    // ========================================================================
    // Per-screen view state
    // ========================================================================
    pub home_cursor: usize,
    pub pattern_cursor: usize,
    pub problem_cursor: usize,
    /// Pattern the problem list is filtered to (None = all problems).
    pub pattern_filter: Option<String>,
    /// Problem ids currently listed; skip/advance walks this order.
    pub active_list: Vec<String>,
    /// Problem shown on the detail screen.
    pub detail_id: Option<String>,
    /// Mode picked on the detail screen for the next session.
    pub mode: Mode,
    /// Language picked for the next session.
    pub language: Language,
    /// Scroll offset for long detail/session bodies.
    pub body_scroll: u16,
}

impl TuiState {
    pub fn new(config: Config, launch: &LaunchOptions) -> Self {
        let theme = Theme::from_name(&config.theme);
        let editor_cmd = config.resolve_editor();
        let mode = launch.mode.unwrap_or_default();
        let language = launch.language.unwrap_or(config.language);
        Self {
            config,
            theme,
            editor_cmd,
            nav: Navigator::default(),
            transition: None,
            should_quit: false,
            status: None,
            frame_width: 0,
            frame_height: 0,
            problems: Vec::new(),
            problems_loaded: false,
            patterns: Vec::new(),
            stats: None,
            solved_today: HashSet::new(),
            solved_ids: HashSet::new(),
            session_seq: SessionSeq::default(),
            pending_session: None,
            home_cursor: 0,
            pattern_cursor: 0,
            problem_cursor: 0,
            pattern_filter: launch.pattern.clone(),
            active_list: Vec::new(),
            detail_id: None,
            mode,
            language,
            body_scroll: 0,
        }
    }

    pub fn set_status(&mut self, status: StatusMessage) {
        self.status = Some(status);
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Routes an error to the status line and the log. Errors never abort
    /// the loop; they render as a dismissible message.
    pub fn report_error(&mut self, error: &AppError) {
        tracing::warn!(class = error.class(), "{error}");
        self.set_status(StatusMessage::error(error.to_string()));
    }

    /// Rebuilds the listed problem ids from the current filter, clamping
    /// the cursor to the new length.
    pub fn rebuild_active_list(&mut self) {
        self.active_list = self
            .problems
            .iter()
            .filter(|p| match &self.pattern_filter {
                Some(pattern) => p.patterns.iter().any(|t| t == pattern),
                None => true,
            })
            .map(|p| p.id.clone())
            .collect();
        self.problem_cursor = self
            .problem_cursor
            .min(self.active_list.len().saturating_sub(1));
    }

    pub fn problem(&self, id: &str) -> Option<&Problem> {
        self.problems.iter().find(|p| p.id == id)
    }

    /// The problem the detail screen is showing.
    pub fn detail_problem(&self) -> Option<&Problem> {
        self.detail_id.as_deref().and_then(|id| self.problem(id))
    }
}

/// Root state: split between general TUI state and the active session.
#[derive(Debug)]
pub struct AppState {
    pub tui: TuiState,
    pub session: Option<SessionState>,
}

impl AppState {
    pub fn new(config: Config, launch: &LaunchOptions) -> Self {
        Self {
            tui: TuiState::new(config, launch),
            session: None,
        }
    }
}
