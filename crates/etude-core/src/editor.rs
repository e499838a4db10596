//! External editor hand-off.
//!
//! The session's code buffer is written to a scratch file named
//! `solution.<ext>` inside the session's scratch directory. The configured
//! editor runs as a blocking subprocess with inherited stdio (the caller
//! must have restored the terminal first); a zero exit status means the
//! file was saved and is read back.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};

use crate::language::Language;

/// Scratch file path for a session directory.
pub fn scratch_path(dir: &Path, language: Language) -> PathBuf {
    dir.join(format!("solution.{}", language.ext()))
}

/// Writes `code` to the session's scratch file and returns its path.
pub fn write_scratch(dir: &Path, language: Language, code: &str) -> Result<PathBuf> {
    let path = scratch_path(dir, language);
    fs::write(&path, code).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

/// Launches `editor_cmd` on `path` and reads the file back on success.
///
/// The command string may carry arguments ("code --wait"); the scratch
/// path is appended last. Blocks until the editor exits. A non-zero exit
/// status leaves the previous code in place.
pub fn edit_file(editor_cmd: &str, path: &Path) -> Result<String> {
    let mut parts = editor_cmd.split_whitespace();
    let program = parts.next().context("Editor command is empty")?;

    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .with_context(|| format!("Failed to launch editor '{editor_cmd}'"))?;

    if !status.success() {
        bail!("Editor '{editor_cmd}' exited with {status}");
    }

    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
