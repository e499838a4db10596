//! Attempt history and statistics.
//!
//! Attempts are stored as a JSONL file where each line is one attempt
//! record. The file is append-only; summaries (counts, per-pattern
//! breakdown, daily streak) are derived by folding over the records.
//!
//! ## Format
//!
//! ```jsonl
//! { "problem_id": "two-sum", "pattern": "hash-map", "mode": "practice", "solved": true, "duration_secs": 412, "ts": "2025-12-17T03:21:09Z" }
//! ```

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Mode;

/// One recorded practice attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub problem_id: String,
    /// Pattern the attempt counts toward (the problem's primary pattern).
    pub pattern: String,
    pub mode: Mode,
    pub solved: bool,
    /// Wall-clock time spent, in seconds.
    pub duration_secs: u64,
    pub ts: DateTime<Utc>,
}

impl AttemptRecord {
    /// Creates a record stamped with the current time.
    pub fn new(
        problem_id: impl Into<String>,
        pattern: impl Into<String>,
        mode: Mode,
        solved: bool,
        duration_secs: u64,
    ) -> Self {
        Self {
            problem_id: problem_id.into(),
            pattern: pattern.into(),
            mode,
            solved,
            duration_secs,
            ts: Utc::now(),
        }
    }
}

/// Attempt/solve counts for one pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatternCount {
    pub attempts: usize,
    pub solved: usize,
}

/// Derived statistics over the whole attempt history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsSummary {
    pub total_attempts: usize,
    pub solved: usize,
    /// Per-pattern counts, ordered by first appearance in the history.
    pub per_pattern: Vec<(String, PatternCount)>,
    /// Total practice time across all attempts, in seconds.
    pub total_practice_secs: u64,
    /// Consecutive practice days ending today or yesterday.
    pub streak_days: u32,
    pub last_practiced: Option<NaiveDate>,
}

/// Solve-count milestones that unlock a badge.
const SOLVE_MILESTONES: &[usize] = &[1, 10, 25, 50, 100];

/// Streak milestones (days) that unlock a badge.
const STREAK_MILESTONES: &[u32] = &[3, 7, 30];

/// A badge unlocked by crossing a milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Achievement {
    FirstSolve,
    SolveMilestone(usize),
    StreakMilestone(u32),
}

impl std::fmt::Display for Achievement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Achievement::FirstSolve => write!(f, "First solve!"),
            Achievement::SolveMilestone(n) => write!(f, "{n} problems solved"),
            Achievement::StreakMilestone(d) => write!(f, "{d}-day streak"),
        }
    }
}

/// Returns the badges newly unlocked between two summaries.
pub fn achievements(before: &StatsSummary, after: &StatsSummary) -> Vec<Achievement> {
    let mut unlocked = Vec::new();
    for &n in SOLVE_MILESTONES {
        if before.solved < n && after.solved >= n {
            if n == 1 {
                unlocked.push(Achievement::FirstSolve);
            } else {
                unlocked.push(Achievement::SolveMilestone(n));
            }
        }
    }
    for &d in STREAK_MILESTONES {
        if before.streak_days < d && after.streak_days >= d {
            unlocked.push(Achievement::StreakMilestone(d));
        }
    }
    unlocked
}

/// The attempt history, backed by a JSONL file.
#[derive(Debug)]
pub struct StatsStore {
    path: PathBuf,
    attempts: Vec<AttemptRecord>,
}

impl StatsStore {
    /// Loads the history from `path`. A missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        let mut attempts = Vec::new();
        if path.exists() {
            let file = fs::File::open(path)
                .with_context(|| format!("Failed to open stats file {}", path.display()))?;
            let reader = BufReader::new(file);
            for line in reader.lines() {
                let line = line.context("Failed to read stats line")?;
                if line.trim().is_empty() {
                    continue;
                }
                if let Ok(record) = serde_json::from_str::<AttemptRecord>(&line) {
                    attempts.push(record);
                }
                // Skip unparseable lines (best-effort)
            }
        }
        Ok(Self {
            path: path.to_path_buf(),
            attempts,
        })
    }

    pub fn attempts(&self) -> &[AttemptRecord] {
        &self.attempts
    }

    /// Appends a record to the file and the in-memory history.
    pub fn record_attempt(&mut self, record: AttemptRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open stats file {}", self.path.display()))?;
        let json = serde_json::to_string(&record).context("Failed to serialize attempt")?;
        writeln!(file, "{json}").context("Failed to write attempt")?;
        self.attempts.push(record);
        Ok(())
    }

    /// Derived summary relative to the current local date.
    pub fn summary(&self) -> StatsSummary {
        self.summary_at(Local::now().date_naive())
    }

    /// Derived summary as of `today` (streak and recency are relative to it).
    pub fn summary_at(&self, today: NaiveDate) -> StatsSummary {
        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, PatternCount> = HashMap::new();
        let mut days: BTreeSet<NaiveDate> = BTreeSet::new();
        let mut solved = 0;
        let mut total_practice_secs = 0;

        for attempt in &self.attempts {
            if !counts.contains_key(&attempt.pattern) {
                order.push(attempt.pattern.clone());
            }
            let count = counts.entry(attempt.pattern.clone()).or_default();
            count.attempts += 1;
            if attempt.solved {
                count.solved += 1;
                solved += 1;
            }
            total_practice_secs += attempt.duration_secs;
            days.insert(attempt.ts.with_timezone(&Local).date_naive());
        }

        let per_pattern = order
            .into_iter()
            .map(|pattern| {
                let count = counts.get(&pattern).copied().unwrap_or_default();
                (pattern, count)
            })
            .collect();

        StatsSummary {
            total_attempts: self.attempts.len(),
            solved,
            per_pattern,
            total_practice_secs,
            streak_days: streak(&days, today),
            last_practiced: days.iter().next_back().copied(),
        }
    }

    /// Patterns with at least one solved attempt on `day` (local time).
    pub fn patterns_solved_on(&self, day: NaiveDate) -> HashSet<String> {
        self.attempts
            .iter()
            .filter(|a| a.solved && a.ts.with_timezone(&Local).date_naive() == day)
            .map(|a| a.pattern.clone())
            .collect()
    }

    /// Patterns with at least one solved attempt today.
    pub fn patterns_solved_today(&self) -> HashSet<String> {
        self.patterns_solved_on(Local::now().date_naive())
    }

    /// Ids of problems with at least one solved attempt, ever.
    pub fn solved_problem_ids(&self) -> HashSet<String> {
        self.attempts
            .iter()
            .filter(|a| a.solved)
            .map(|a| a.problem_id.clone())
            .collect()
    }
}

/// Consecutive practice days ending at the most recent practice day.
///
/// The streak is zero when the most recent day is before yesterday.
fn streak(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let Some(&last) = days.iter().next_back() else {
        return 0;
    };
    if today.signed_duration_since(last).num_days() > 1 {
        return 0;
    }
    let mut streak = 1;
    let mut cursor = last;
    while let Some(prev) = cursor.pred_opt() {
        if !days.contains(&prev) {
            break;
        }
        streak += 1;
        cursor = prev;
    }
    streak
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use tempfile::tempdir;

    use super::*;

    fn record_on(day: &str, pattern: &str, solved: bool) -> AttemptRecord {
        // Noon local time keeps the record on the same local date.
        let local = Local
            .from_local_datetime(
                &day.parse::<NaiveDate>().unwrap().and_hms_opt(12, 0, 0).unwrap(),
            )
            .unwrap();
        AttemptRecord {
            problem_id: "two-sum".to_string(),
            pattern: pattern.to_string(),
            mode: Mode::Practice,
            solved,
            duration_secs: 300,
            ts: local.with_timezone(&Utc),
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = StatsStore::load(&dir.path().join("stats.jsonl")).unwrap();
        assert!(store.attempts().is_empty());
        assert_eq!(store.summary().total_attempts, 0);
    }

    #[test]
    fn test_record_appends_and_reloads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.jsonl");

        let mut store = StatsStore::load(&path).unwrap();
        store
            .record_attempt(AttemptRecord::new(
                "two-sum",
                "hash-map",
                Mode::Practice,
                true,
                412,
            ))
            .unwrap();
        store
            .record_attempt(AttemptRecord::new(
                "max-sum-subarray",
                "sliding-window",
                Mode::Learn,
                false,
                900,
            ))
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("\"problem_id\":\"two-sum\""));
        assert!(content.contains("\"mode\":\"learn\""));

        let reloaded = StatsStore::load(&path).unwrap();
        assert_eq!(reloaded.attempts().len(), 2);
        assert_eq!(reloaded.attempts()[0].problem_id, "two-sum");
        assert!(reloaded.attempts()[0].solved);
    }

    #[test]
    fn test_load_skips_unparseable_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.jsonl");
        let good = serde_json::to_string(&AttemptRecord::new(
            "two-sum",
            "hash-map",
            Mode::Cram,
            true,
            60,
        ))
        .unwrap();
        std::fs::write(&path, format!("not json\n{good}\n\n")).unwrap();

        let store = StatsStore::load(&path).unwrap();
        assert_eq!(store.attempts().len(), 1);
    }

    #[test]
    fn test_summary_counts_and_pattern_order() {
        let dir = tempdir().unwrap();
        let mut store = StatsStore::load(&dir.path().join("stats.jsonl")).unwrap();
        store
            .record_attempt(record_on("2026-08-20", "sliding-window", true))
            .unwrap();
        store
            .record_attempt(record_on("2026-08-20", "hash-map", false))
            .unwrap();
        store
            .record_attempt(record_on("2026-08-21", "sliding-window", false))
            .unwrap();

        let summary = store.summary_at("2026-08-21".parse().unwrap());
        assert_eq!(summary.total_attempts, 3);
        assert_eq!(summary.solved, 1);
        assert_eq!(summary.total_practice_secs, 900);
        assert_eq!(summary.per_pattern.len(), 2);
        assert_eq!(summary.per_pattern[0].0, "sliding-window");
        assert_eq!(
            summary.per_pattern[0].1,
            PatternCount {
                attempts: 2,
                solved: 1
            }
        );
        assert_eq!(summary.per_pattern[1].0, "hash-map");
        assert_eq!(summary.last_practiced, Some("2026-08-21".parse().unwrap()));
    }

    #[test]
    fn test_streak_counts_consecutive_days() {
        let dir = tempdir().unwrap();
        let mut store = StatsStore::load(&dir.path().join("stats.jsonl")).unwrap();
        for day in ["2026-08-19", "2026-08-20", "2026-08-21"] {
            store
                .record_attempt(record_on(day, "two-pointers", true))
                .unwrap();
        }

        let summary = store.summary_at("2026-08-21".parse().unwrap());
        assert_eq!(summary.streak_days, 3);

        // Still alive the day after the last practice.
        let summary = store.summary_at("2026-08-22".parse().unwrap());
        assert_eq!(summary.streak_days, 3);
    }

    #[test]
    fn test_streak_broken_by_gap() {
        let dir = tempdir().unwrap();
        let mut store = StatsStore::load(&dir.path().join("stats.jsonl")).unwrap();
        store
            .record_attempt(record_on("2026-08-18", "two-pointers", true))
            .unwrap();
        store
            .record_attempt(record_on("2026-08-19", "two-pointers", true))
            .unwrap();

        // Two days later the streak is gone.
        let summary = store.summary_at("2026-08-21".parse().unwrap());
        assert_eq!(summary.streak_days, 0);
    }

    #[test]
    fn test_patterns_solved_on_day() {
        let dir = tempdir().unwrap();
        let mut store = StatsStore::load(&dir.path().join("stats.jsonl")).unwrap();
        store
            .record_attempt(record_on("2026-08-21", "hash-map", true))
            .unwrap();
        store
            .record_attempt(record_on("2026-08-21", "binary-search", false))
            .unwrap();
        store
            .record_attempt(record_on("2026-08-20", "two-pointers", true))
            .unwrap();

        let solved = store.patterns_solved_on("2026-08-21".parse().unwrap());
        assert!(solved.contains("hash-map"));
        assert!(!solved.contains("binary-search"));
        assert!(!solved.contains("two-pointers"));
    }

    #[test]
    fn test_solved_problem_ids_ignore_failed_attempts() {
        let dir = tempdir().unwrap();
        let mut store = StatsStore::load(&dir.path().join("stats.jsonl")).unwrap();
        store
            .record_attempt(AttemptRecord::new("two-sum", "hash-map", Mode::Practice, true, 300))
            .unwrap();
        store
            .record_attempt(AttemptRecord::new(
                "linked-list-cycle",
                "fast-slow-pointers",
                Mode::Practice,
                false,
                500,
            ))
            .unwrap();

        let ids = store.solved_problem_ids();
        assert!(ids.contains("two-sum"));
        assert!(!ids.contains("linked-list-cycle"));
    }

    #[test]
    fn test_achievements_cross_milestones() {
        let before = StatsSummary {
            solved: 0,
            streak_days: 2,
            ..StatsSummary::default()
        };
        let after = StatsSummary {
            solved: 1,
            streak_days: 3,
            ..StatsSummary::default()
        };

        let unlocked = achievements(&before, &after);
        assert_eq!(
            unlocked,
            vec![Achievement::FirstSolve, Achievement::StreakMilestone(3)]
        );
    }

    #[test]
    fn test_achievements_not_reawarded() {
        let before = StatsSummary {
            solved: 10,
            streak_days: 7,
            ..StatsSummary::default()
        };
        let after = StatsSummary {
            solved: 11,
            streak_days: 8,
            ..StatsSummary::default()
        };

        assert!(achievements(&before, &after).is_empty());
    }

    #[test]
    fn test_achievement_display() {
        assert_eq!(Achievement::FirstSolve.to_string(), "First solve!");
        assert_eq!(
            Achievement::SolveMilestone(10).to_string(),
            "10 problems solved"
        );
        assert_eq!(
            Achievement::StreakMilestone(7).to_string(),
            "7-day streak"
        );
    }
}
