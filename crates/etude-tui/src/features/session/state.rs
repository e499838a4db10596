//! Practice-session state.
//!
//! One `SessionState` is the single timed attempt at one problem. It exists
//! iff the current screen is Session; dropping it removes the scratch
//! directory. All mutation happens in the reducer.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use etude_core::config::Mode;
use etude_core::language::Language;
use etude_core::problems::Problem;
use etude_core::runner::TestCaseResult;
use tempfile::TempDir;

/// Identifies one session. Background results carry this id so the reducer
/// can drop anything that outlived its session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub u64);

/// Monotonically increasing session id allocator.
#[derive(Debug, Default)]
pub struct SessionSeq {
    next: u64,
}

impl SessionSeq {
    pub fn next_id(&mut self) -> SessionId {
        let id = SessionId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// One-way reveal lattice: Hidden < Shown.
///
/// Once a hint or solution is shown it cannot be hidden again, keeping the
/// recorded statistics honest. Revealing twice is idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reveal {
    #[default]
    Hidden,
    Shown,
}

impl Reveal {
    pub fn reveal(&mut self) {
        *self = Reveal::Shown;
    }

    pub fn is_shown(self) -> bool {
        self == Reveal::Shown
    }
}

/// Session lifecycle.
///
/// Active ⇄ Paused, then one of the final phases. Final phases never
/// transition back; stale ticks and results against them are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Active,
    Paused,
    Completed,
    Abandoned,
}

impl SessionPhase {
    pub fn is_final(self) -> bool {
        matches!(self, SessionPhase::Completed | SessionPhase::Abandoned)
    }
}

/// What the user asked to do when a confirmation is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitIntent {
    /// Leave the session screen.
    Quit,
    /// Move on to the next problem in the active list.
    Skip,
}

/// A start command in flight: what the session will be once its scratch
/// space is ready. The id gates the ready event; anything else is stale.
#[derive(Debug)]
pub struct PendingSession {
    pub id: SessionId,
    pub problem: Problem,
    pub mode: Mode,
    pub language: Language,
}

/// The active practice attempt.
#[derive(Debug)]
pub struct SessionState {
    pub id: SessionId,
    pub problem: Problem,
    pub mode: Mode,
    pub language: Language,
    /// Timer budget for this mode.
    pub budget: Duration,
    pub phase: SessionPhase,
    /// Restamped on every resume.
    started_at: Instant,
    /// Elapsed time folded in by pauses.
    accumulated: Duration,
    /// Elapsed snapshot refreshed by session ticks; what render shows.
    pub shown_elapsed: Duration,
    pub hints: Reveal,
    pub solution: Reveal,
    /// Ordered per-case results from the most recent run.
    pub results: Vec<TestCaseResult>,
    /// A test run is in flight; further runs and submits are rejected.
    pub run_in_flight: bool,
    /// Pending quit/skip confirmation (cram mode only).
    pub confirm_exit: Option<ExitIntent>,
    /// The over-budget warning fired (learn/practice warn once).
    pub budget_warned: bool,
    /// Current code, kept in sync with the scratch file by the editor
    /// hand-off. Removed from disk when the session drops.
    pub code: String,
    scratch: TempDir,
}

impl SessionState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: SessionId,
        problem: Problem,
        mode: Mode,
        language: Language,
        budget: Duration,
        scratch: TempDir,
        code: String,
        now: Instant,
    ) -> Self {
        let reveal = if mode.reveals_up_front() {
            Reveal::Shown
        } else {
            Reveal::Hidden
        };
        Self {
            id,
            problem,
            mode,
            language,
            budget,
            phase: SessionPhase::Active,
            started_at: now,
            accumulated: Duration::ZERO,
            shown_elapsed: Duration::ZERO,
            hints: reveal,
            solution: reveal,
            results: Vec::new(),
            run_in_flight: false,
            confirm_exit: None,
            budget_warned: false,
            code,
            scratch,
        }
    }

    /// Path of the scratch `solution.<ext>` file inside the session's
    /// temporary directory.
    pub fn scratch_path(&self) -> PathBuf {
        etude_core::editor::scratch_path(self.scratch.path(), self.language)
    }

    /// Wall-clock practice time. Frozen while paused or after the session
    /// reaches a final phase.
    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.phase {
            SessionPhase::Active => {
                self.accumulated + now.saturating_duration_since(self.started_at)
            }
            SessionPhase::Paused | SessionPhase::Completed | SessionPhase::Abandoned => {
                self.accumulated
            }
        }
    }

    /// Countdown remainder shown in cram mode.
    pub fn remaining(&self) -> Duration {
        self.budget.saturating_sub(self.shown_elapsed)
    }

    pub fn is_over_budget(&self, now: Instant) -> bool {
        self.elapsed(now) >= self.budget
    }

    /// Active ⇄ Paused. Pausing folds the running segment into the
    /// accumulator; resuming restamps the start. No-op in final phases.
    pub fn toggle_pause(&mut self, now: Instant) {
        match self.phase {
            SessionPhase::Active => {
                self.accumulated += now.saturating_duration_since(self.started_at);
                self.shown_elapsed = self.accumulated;
                self.phase = SessionPhase::Paused;
            }
            SessionPhase::Paused => {
                self.started_at = now;
                self.phase = SessionPhase::Active;
            }
            SessionPhase::Completed | SessionPhase::Abandoned => {}
        }
    }

    /// Freezes the clock and moves to a final phase.
    pub fn finish(&mut self, phase: SessionPhase, now: Instant) {
        self.accumulated = self.elapsed(now);
        self.shown_elapsed = self.accumulated;
        self.phase = phase;
    }

    /// All cases passed on the most recent run.
    pub fn all_passed(&self) -> bool {
        !self.results.is_empty() && self.results.iter().all(|r| r.passed)
    }

    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| !r.passed).count()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use etude_core::problems::Difficulty;

    use super::*;

    fn fixture_problem() -> Problem {
        Problem {
            id: "test-problem".to_string(),
            title: "Test Problem".to_string(),
            difficulty: Difficulty::Easy,
            patterns: vec!["two-pointers".to_string()],
            description: "A problem used in tests.".to_string(),
            examples: Vec::new(),
            starter: HashMap::from([("python".to_string(), "print()\n".to_string())]),
            solutions: HashMap::new(),
            hints: vec!["Try two pointers.".to_string()],
            test_cases: Vec::new(),
        }
    }

    fn fixture_session(mode: Mode, now: Instant) -> SessionState {
        SessionState::new(
            SessionId(1),
            fixture_problem(),
            mode,
            Language::Python,
            Duration::from_secs(60),
            TempDir::new().unwrap(),
            "print()\n".to_string(),
            now,
        )
    }

    #[test]
    fn test_elapsed_accrues_while_active() {
        let now = Instant::now();
        let session = fixture_session(Mode::Practice, now);
        assert_eq!(
            session.elapsed(now + Duration::from_secs(5)),
            Duration::from_secs(5)
        );
    }

    #[test]
    fn test_paused_session_accrues_no_time() {
        let now = Instant::now();
        let mut session = fixture_session(Mode::Practice, now);
        session.toggle_pause(now + Duration::from_secs(10));

        let frozen = session.elapsed(now + Duration::from_secs(30));
        assert_eq!(frozen, Duration::from_secs(10));
        assert_eq!(session.elapsed(now + Duration::from_secs(300)), frozen);
    }

    #[test]
    fn test_resume_restamps_the_clock() {
        let now = Instant::now();
        let mut session = fixture_session(Mode::Practice, now);
        session.toggle_pause(now + Duration::from_secs(10));
        // A minute passes paused, then five more seconds active.
        session.toggle_pause(now + Duration::from_secs(70));
        assert_eq!(
            session.elapsed(now + Duration::from_secs(75)),
            Duration::from_secs(15)
        );
    }

    #[test]
    fn test_pause_is_a_no_op_after_completion() {
        let now = Instant::now();
        let mut session = fixture_session(Mode::Practice, now);
        session.finish(SessionPhase::Completed, now + Duration::from_secs(42));
        session.toggle_pause(now + Duration::from_secs(50));
        assert_eq!(session.phase, SessionPhase::Completed);
        assert_eq!(
            session.elapsed(now + Duration::from_secs(99)),
            Duration::from_secs(42)
        );
    }

    #[test]
    fn test_reveal_is_one_way() {
        let mut reveal = Reveal::Hidden;
        assert!(!reveal.is_shown());
        reveal.reveal();
        assert!(reveal.is_shown());
        // Idempotent; there is no way back down the lattice.
        reveal.reveal();
        assert!(reveal.is_shown());
    }

    #[test]
    fn test_learn_mode_starts_with_everything_revealed() {
        let session = fixture_session(Mode::Learn, Instant::now());
        assert!(session.hints.is_shown());
        assert!(session.solution.is_shown());
    }

    #[test]
    fn test_practice_mode_starts_hidden() {
        let session = fixture_session(Mode::Practice, Instant::now());
        assert!(!session.hints.is_shown());
        assert!(!session.solution.is_shown());
    }

    #[test]
    fn test_over_budget_detection() {
        let now = Instant::now();
        let session = fixture_session(Mode::Cram, now);
        assert!(!session.is_over_budget(now + Duration::from_secs(59)));
        assert!(session.is_over_budget(now + Duration::from_secs(60)));
    }

    #[test]
    fn test_all_passed_requires_results() {
        let session = fixture_session(Mode::Practice, Instant::now());
        assert!(!session.all_passed());
    }
}
