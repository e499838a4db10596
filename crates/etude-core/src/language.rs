//! Practice languages supported by the runner and editor hand-off.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A language the user can practice in.
///
/// Drives the scratch-file extension, the starter/solution lookup in
/// problem files, and the test runner's launch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Python,
    JavaScript,
    Go,
}

impl Language {
    /// File extension for the scratch `solution.<ext>` file.
    pub fn ext(&self) -> &'static str {
        match self {
            Language::Python => "py",
            Language::JavaScript => "js",
            Language::Go => "go",
        }
    }

    /// Key used in problem JSON maps (starter/solution code).
    pub fn key(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::Go => "go",
        }
    }

    /// All languages, in picker order.
    pub fn all() -> &'static [Language] {
        &[Language::Python, Language::JavaScript, Language::Go]
    }

    /// The next language in picker order, wrapping around.
    pub fn cycle(&self) -> Language {
        match self {
            Language::Python => Language::JavaScript,
            Language::JavaScript => Language::Go,
            Language::Go => Language::Python,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
            Language::Go => "Go",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "python" | "py" => Ok(Language::Python),
            "javascript" | "js" | "node" => Ok(Language::JavaScript),
            "go" | "golang" => Ok(Language::Go),
            other => Err(format!(
                "unknown language '{other}' (expected python, javascript, or go)"
            )),
        }
    }
}
