//! Configuration management for Etude.
//!
//! Loads configuration from ${ETUDE_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::language::Language;

/// Practice mode for a session.
///
/// Controls the timer budget and how much help is visible up front.
/// Learn shows hints and solution immediately; Practice and Cram hide
/// them behind one-way reveals and shorten the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Learn,
    Practice,
    Cram,
}

impl Mode {
    /// Timer budget for this mode, from the configured per-mode minutes.
    pub fn budget(&self, timers: &TimersConfig) -> Duration {
        let mins = match self {
            Mode::Learn => timers.learn_mins,
            Mode::Practice => timers.practice_mins,
            Mode::Cram => timers.cram_mins,
        };
        Duration::from_secs(mins * 60)
    }

    /// Whether hints and the solution start revealed.
    pub fn reveals_up_front(&self) -> bool {
        matches!(self, Mode::Learn)
    }

    /// Whether the timer budget forces session abandonment on timeout.
    pub fn timeout_is_fatal(&self) -> bool {
        matches!(self, Mode::Cram)
    }

    /// Whether quitting an incomplete session requires confirmation.
    pub fn confirm_quit(&self) -> bool {
        matches!(self, Mode::Cram)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Mode::Learn => "learn",
            Mode::Practice => "practice",
            Mode::Cram => "cram",
        }
    }

    /// All modes, in picker order.
    pub fn all() -> &'static [Mode] {
        &[Mode::Learn, Mode::Practice, Mode::Cram]
    }

    /// The next mode in picker order, wrapping around.
    pub fn cycle(&self) -> Mode {
        match self {
            Mode::Learn => Mode::Practice,
            Mode::Practice => Mode::Cram,
            Mode::Cram => Mode::Learn,
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "learn" => Ok(Mode::Learn),
            "practice" => Ok(Mode::Practice),
            "cram" => Ok(Mode::Cram),
            other => Err(format!(
                "unknown mode '{other}' (expected learn, practice, or cram)"
            )),
        }
    }
}

/// Per-mode timer budgets, in minutes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimersConfig {
    pub learn_mins: u64,
    pub practice_mins: u64,
    pub cram_mins: u64,
}

impl Default for TimersConfig {
    fn default() -> Self {
        Self {
            learn_mins: 45,
            practice_mins: 30,
            cram_mins: 15,
        }
    }
}

pub mod paths {
    //! Path resolution for Etude configuration and data directories.
    //!
    //! ETUDE_HOME resolution order:
    //! 1. ETUDE_HOME environment variable (if set)
    //! 2. ~/.config/etude (default)

    use std::path::PathBuf;

    /// Returns the Etude home directory.
    ///
    /// Checks ETUDE_HOME env var first, falls back to ~/.config/etude
    pub fn etude_home() -> PathBuf {
        if let Ok(home) = std::env::var("ETUDE_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("etude"))
            .expect("Could not determine home directory")
    }

    /// Location of config.toml.
    pub fn config_path() -> PathBuf {
        etude_home().join("config.toml")
    }

    /// Returns the directory holding user-supplied problem files.
    pub fn problems_dir() -> PathBuf {
        etude_home().join("problems")
    }

    /// Returns the path to the attempt-history file.
    pub fn stats_path() -> PathBuf {
        etude_home().join("stats.jsonl")
    }

    /// Returns the directory for log files.
    pub fn logs_dir() -> PathBuf {
        etude_home().join("logs")
    }
}

/// Commented template written by `etude config init`. Embedded at compile
/// time; edit default_config.toml to change it.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// User configuration, all fields optional in the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Language to practice in.
    pub language: Language,

    /// Editor command for the hand-off (falls back to $EDITOR, then vi).
    pub editor: Option<String>,

    /// Color theme name ("default" or "plain").
    pub theme: String,

    /// Per-mode timer budgets.
    pub timers: TimersConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: Language::default(),
            editor: None,
            theme: "default".to_string(),
            timers: TimersConfig::default(),
        }
    }
}

impl Config {
    const DEFAULT_EDITOR: &str = "vi";

    /// Loads from the standard config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the commented default template to `path`.
    ///
    /// Creates parent directories. Fails if the file already exists
    /// (no silent overwrite).
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            bail!("config already exists at {}", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Resolves the editor command for the hand-off.
    ///
    /// Resolution order: config `editor`, $EDITOR, then vi.
    pub fn resolve_editor(&self) -> String {
        if let Some(cmd) = &self.editor
            && !cmd.trim().is_empty()
        {
            return cmd.clone();
        }
        match std::env::var("EDITOR") {
            Ok(cmd) if !cmd.trim().is_empty() => cmd,
            _ => Self::DEFAULT_EDITOR.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    /// Config loading: missing file returns defaults.
    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.language, Language::Python);
        assert_eq!(config.timers.practice_mins, 30);
    }

    /// Config loading: partial config merges with defaults.
    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "language = \"go\"\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.language, Language::Go);
        assert_eq!(config.timers.learn_mins, 45);
    }

    /// Config loading: timer overrides apply to mode budgets.
    #[test]
    fn test_timer_overrides_apply_to_budgets() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "[timers]\ncram_mins = 1\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(
            Mode::Cram.budget(&config.timers),
            Duration::from_secs(60)
        );
        assert_eq!(
            Mode::Practice.budget(&config.timers),
            Duration::from_secs(30 * 60)
        );
    }

    /// Config init: creates file with template, creates parent dirs.
    #[test]
    fn test_init_creates_config_with_template() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        assert!(config_path.exists());
        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("# language ="));
        assert!(contents.contains("[timers]"));
    }

    /// Config init: fails if file exists (no silent overwrite).
    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "").unwrap();

        let result = Config::init(&config_path);
        assert!(result.is_err());
    }

    /// Editor resolution: explicit config entry wins.
    #[test]
    fn test_resolve_editor_prefers_config() {
        let config = Config {
            editor: Some("hx".to_string()),
            ..Config::default()
        };
        assert_eq!(config.resolve_editor(), "hx");
    }
}
