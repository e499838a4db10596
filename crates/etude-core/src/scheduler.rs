//! Daily practice scheduler.
//!
//! Picks the next pattern to drill from an ordered rotation, skipping the
//! ones already solved today. Patterns carry a musical scale label for the
//! daily screen, in keeping with the practice-piece theme.

use std::collections::HashSet;

/// Returns the first pattern in `patterns` not yet in `completed`.
///
/// `patterns` is the repository's ordered pattern list; `completed` is the
/// set of patterns with a solved attempt today. None means the rotation is
/// done for the day.
pub fn next_pattern<'a>(patterns: &'a [String], completed: &HashSet<String>) -> Option<&'a str> {
    patterns
        .iter()
        .map(String::as_str)
        .find(|p| !completed.contains(*p))
}

/// Musical scale label for a pattern.
pub fn scale_label(pattern: &str) -> &'static str {
    match pattern {
        "sliding-window" => "C major",
        "two-pointers" => "G major",
        "fast-slow-pointers" => "D minor",
        "binary-search" => "A minor",
        "hash-map" => "E minor",
        _ => "chromatic",
    }
}
