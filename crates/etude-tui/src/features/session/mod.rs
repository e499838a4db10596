//! Practice session feature slice.
//!
//! A session is one live attempt at one problem: a scratch file, a clock,
//! one-way hint/solution reveals, and test results. Sessions are created
//! asynchronously (scratch space setup runs off the UI thread) and every
//! async result is tagged with the session id so late arrivals from a
//! superseded session cannot corrupt the current one.
//!
//! - `state.rs`: session lifecycle and timing
//! - `update.rs`: key handling and async-result handlers
//! - `render.rs`: session screen view

mod render;
mod state;
pub mod update;

use std::time::Duration;

pub use render::lines;
pub use state::{
    ExitIntent, PendingSession, Reveal, SessionId, SessionPhase, SessionSeq, SessionState,
};

/// Formats a duration as a clock: `04:12`, or `1:04:12` past an hour.
pub fn format_clock(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock_minutes_and_seconds() {
        assert_eq!(format_clock(Duration::from_secs(252)), "04:12");
    }

    #[test]
    fn test_format_clock_zero() {
        assert_eq!(format_clock(Duration::ZERO), "00:00");
    }

    #[test]
    fn test_format_clock_past_an_hour() {
        assert_eq!(format_clock(Duration::from_secs(3852)), "1:04:12");
    }
}
