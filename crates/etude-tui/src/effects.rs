//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only; the reducer never performs
//! I/O or spawns tasks directly. Each effect carries exactly the inputs its
//! handler needs (ids, code snapshots, test cases), never live state.

use std::path::PathBuf;

use etude_core::language::Language;
use etude_core::problems::TestCase;
use etude_core::stats::AttemptRecord;

use crate::features::session::SessionId;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Load the problem repository (built-ins plus the user directory).
    LoadProblems,

    /// Load the stats summary and today's solved patterns.
    LoadStats,

    /// Prepare scratch space for a new session and write the starter code.
    StartSession {
        session: SessionId,
        language: Language,
        starter: String,
    },

    /// Sleep one second, then deliver a tick for the given session.
    ScheduleTick { session: SessionId },

    /// Run the test cases against a code snapshot.
    RunTests {
        session: SessionId,
        language: Language,
        code: String,
        cases: Vec<TestCase>,
    },

    /// Suspend the TUI and open the external editor over the scratch file.
    /// Blocks the loop for the duration (a cooperative yield).
    OpenEditor {
        session: SessionId,
        editor: String,
        path: PathBuf,
    },

    /// Append an attempt to the stats store and reload the summary.
    RecordAttempt { record: AttemptRecord },
}
