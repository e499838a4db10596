//! Test runner: executes a solution against its test cases.
//!
//! The source is written to a scratch file and each case runs as its own
//! interpreter process with the case input on stdin. Trimmed stdout is
//! compared against the expected output. A non-zero exit or a launch
//! failure is an execution error carrying the verbatim diagnostics,
//! distinct from a case that merely produces the wrong answer.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use tokio::io::AsyncWriteExt;

use crate::language::Language;
use crate::problems::TestCase;

/// Wall-clock limit per test case.
const CASE_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of one test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCaseResult {
    pub input: String,
    pub expected: String,
    pub actual: String,
    pub passed: bool,
}

/// Interpreter/launcher per language.
fn launcher(language: Language) -> (&'static str, &'static [&'static str]) {
    match language {
        Language::Python => ("python3", &[]),
        Language::JavaScript => ("node", &[]),
        Language::Go => ("go", &["run"]),
    }
}

/// Runs `source` against every case in order with the default timeout.
pub async fn run_tests(
    language: Language,
    source: &str,
    cases: &[TestCase],
) -> Result<Vec<TestCaseResult>> {
    run_tests_with_timeout(language, source, cases, CASE_TIMEOUT).await
}

/// Runs `source` against every case in order.
///
/// Returns Err only for execution failures (launch error, non-zero exit).
/// Wrong answers and per-case timeouts come back as failed results.
pub async fn run_tests_with_timeout(
    language: Language,
    source: &str,
    cases: &[TestCase],
    case_timeout: Duration,
) -> Result<Vec<TestCaseResult>> {
    let dir = tempfile::tempdir().context("Failed to create scratch directory")?;
    let source_path = dir.path().join(format!("solution.{}", language.ext()));
    std::fs::write(&source_path, source)
        .with_context(|| format!("Failed to write {}", source_path.display()))?;

    let mut results = Vec::with_capacity(cases.len());
    for case in cases {
        results.push(run_case(language, &source_path, case, case_timeout).await?);
    }
    Ok(results)
}

/// Runs a single case: feed stdin, collect stdout, compare trimmed.
async fn run_case(
    language: Language,
    source_path: &Path,
    case: &TestCase,
    case_timeout: Duration,
) -> Result<TestCaseResult> {
    let (program, args) = launcher(language);
    let mut child = tokio::process::Command::new(program)
        .args(args)
        .arg(source_path)
        // Signal to the interpreter that we are a non-interactive, dumb
        // terminal. Suppresses ANSI escapes and color in diagnostics.
        .env("TERM", "dumb")
        .env("NO_COLOR", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("Failed to launch {program} (is it installed?)"))?;

    let mut stdin = child.stdin.take().context("Child stdin unavailable")?;
    stdin
        .write_all(case.input.as_bytes())
        .await
        .context("Failed to write test input")?;
    // Close stdin so the solution sees EOF.
    drop(stdin);

    let output = match tokio::time::timeout(case_timeout, child.wait_with_output()).await {
        Ok(result) => result.context("Failed to collect test output")?,
        Err(_) => {
            // Dropping the wait future kills the child (kill_on_drop).
            return Ok(TestCaseResult {
                input: case.input.clone(),
                expected: case.expected.clone(),
                actual: format!("(timed out after {}s)", case_timeout.as_secs()),
                passed: false,
            });
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let diagnostics = if stderr.trim().is_empty() {
            stdout
        } else {
            stderr
        };
        bail!(
            "{program} exited with {}\n{}",
            output.status,
            diagnostics.trim()
        );
    }

    let actual = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let passed = actual == case.expected.trim();
    Ok(TestCaseResult {
        input: case.input.clone(),
        expected: case.expected.clone(),
        actual,
        passed,
    })
}
