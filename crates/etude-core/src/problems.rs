//! Problem repository.
//!
//! Problems are JSON documents. A built-in set is embedded at compile time;
//! user problems from ${ETUDE_HOME}/problems/*.json are merged on top and
//! override built-ins with the same id.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::language::Language;

/// Built-in problem set, embedded at compile time.
const BUILTIN_PROBLEMS: &[&str] = &[
    include_str!("../problems/two_sum.json"),
    include_str!("../problems/max_sum_subarray.json"),
    include_str!("../problems/pair_with_target_sum.json"),
    include_str!("../problems/first_bad_version.json"),
    include_str!("../problems/linked_list_cycle.json"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        write!(f, "{s}")
    }
}

/// A worked example shown on the problem detail screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Example {
    pub input: String,
    pub output: String,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// One test case: input fed to the solution on stdin, expected trimmed stdout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    pub input: String,
    pub expected: String,
}

/// A practice problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    pub id: String,
    pub title: String,
    pub difficulty: Difficulty,
    /// Pattern tags, most specific first.
    pub patterns: Vec<String>,
    pub description: String,
    #[serde(default)]
    pub examples: Vec<Example>,
    /// Starter code per language key ("python", "javascript", "go").
    #[serde(default)]
    pub starter: HashMap<String, String>,
    /// Reference solution per language key.
    #[serde(default)]
    pub solutions: HashMap<String, String>,
    #[serde(default)]
    pub hints: Vec<String>,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
}

impl Problem {
    pub fn starter_for(&self, language: Language) -> Option<&str> {
        self.starter.get(language.key()).map(String::as_str)
    }

    pub fn solution_for(&self, language: Language) -> Option<&str> {
        self.solutions.get(language.key()).map(String::as_str)
    }

    /// The pattern used for stats attribution (first tag).
    pub fn primary_pattern(&self) -> &str {
        self.patterns.first().map_or("untagged", String::as_str)
    }
}

/// Ordered, in-memory problem collection.
pub struct ProblemRepository {
    problems: Vec<Problem>,
}

impl ProblemRepository {
    /// Loads built-in problems plus user problems from `dir`.
    ///
    /// A user problem with the same id as a built-in replaces it in place,
    /// keeping the original ordering. New user problems append in file-name
    /// order. A missing directory is not an error.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut repo = Self::builtin()?;
        if !dir.is_dir() {
            return Ok(repo);
        }

        let mut entries: Vec<_> = fs::read_dir(dir)
            .with_context(|| format!("Failed to read problem directory {}", dir.display()))?
            .filter_map(std::result::Result::ok)
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        entries.sort();

        for path in entries {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read problem file {}", path.display()))?;
            let problem: Problem = serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse problem file {}", path.display()))?;
            repo.upsert(problem);
        }

        Ok(repo)
    }

    /// Loads only the embedded built-in set.
    pub fn builtin() -> Result<Self> {
        let problems = BUILTIN_PROBLEMS
            .iter()
            .map(|raw| serde_json::from_str(raw).context("Failed to parse built-in problem"))
            .collect::<Result<Vec<Problem>>>()?;
        Ok(Self { problems })
    }

    fn upsert(&mut self, problem: Problem) {
        match self.problems.iter_mut().find(|p| p.id == problem.id) {
            Some(existing) => *existing = problem,
            None => self.problems.push(problem),
        }
    }

    /// All problems, in repository order.
    pub fn list_all(&self) -> &[Problem] {
        &self.problems
    }

    pub fn get(&self, id: &str) -> Option<&Problem> {
        self.problems.iter().find(|p| p.id == id)
    }

    /// Problems tagged with `pattern`, in repository order.
    pub fn by_pattern(&self, pattern: &str) -> Vec<&Problem> {
        self.problems
            .iter()
            .filter(|p| p.patterns.iter().any(|t| t == pattern))
            .collect()
    }

    /// Distinct pattern tags, ordered by first appearance.
    pub fn patterns(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for problem in &self.problems {
            for pattern in &problem.patterns {
                if !seen.contains(pattern) {
                    seen.push(pattern.clone());
                }
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_builtin_set_parses() {
        let repo = ProblemRepository::builtin().unwrap();
        assert!(!repo.list_all().is_empty());
        // Every built-in carries starter + solution + tests for each language.
        for problem in repo.list_all() {
            for language in Language::all() {
                assert!(
                    problem.starter_for(*language).is_some(),
                    "{} missing starter for {language}",
                    problem.id
                );
                assert!(
                    problem.solution_for(*language).is_some(),
                    "{} missing solution for {language}",
                    problem.id
                );
            }
            assert!(!problem.test_cases.is_empty(), "{} has no tests", problem.id);
            assert!(!problem.patterns.is_empty(), "{} has no patterns", problem.id);
        }
    }

    #[test]
    fn test_get_by_id() {
        let repo = ProblemRepository::builtin().unwrap();
        assert!(repo.get("two-sum").is_some());
        assert!(repo.get("no-such-problem").is_none());
    }

    #[test]
    fn test_user_problem_overrides_builtin() {
        let dir = tempdir().unwrap();
        let repo = ProblemRepository::builtin().unwrap();
        let original_len = repo.list_all().len();

        let mut patched = repo.get("two-sum").unwrap().clone();
        patched.title = "Two Sum (patched)".to_string();
        fs::write(
            dir.path().join("two_sum.json"),
            serde_json::to_string(&patched).unwrap(),
        )
        .unwrap();

        let merged = ProblemRepository::load(dir.path()).unwrap();
        assert_eq!(merged.list_all().len(), original_len);
        assert_eq!(merged.get("two-sum").unwrap().title, "Two Sum (patched)");
    }

    #[test]
    fn test_missing_user_dir_is_not_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let repo = ProblemRepository::load(&missing).unwrap();
        assert!(!repo.list_all().is_empty());
    }

    #[test]
    fn test_patterns_ordered_by_first_appearance() {
        let repo = ProblemRepository::builtin().unwrap();
        let patterns = repo.patterns();
        assert!(!patterns.is_empty());
        // No duplicates.
        let mut dedup = patterns.clone();
        dedup.dedup();
        assert_eq!(patterns.len(), dedup.len());
    }
}
