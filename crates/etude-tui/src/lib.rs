//! Full-screen TUI implementation for etude.

pub mod animation;
pub mod effects;
pub mod events;
pub mod features;
pub mod navigation;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod text;
pub mod theme;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::Result;
use etude_core::config::Config;
pub use runtime::TuiRuntime;
pub use state::LaunchOptions;

/// Runs the interactive practice loop.
pub async fn run(config: &Config, launch: &LaunchOptions) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "Practice mode requires a terminal.\n\
             Use `etude list` or `etude stats` for non-interactive output."
        );
    }

    // Launch banner on stderr; the alternate screen covers it in a moment
    let mut err = stderr();
    writeln!(err, "etude")?;
    writeln!(
        err,
        "Language: {}",
        launch.language.unwrap_or(config.language)
    )?;
    if let Some(mode) = launch.mode {
        writeln!(err, "Mode: {}", mode.display_name())?;
    }
    if let Some(ref pattern) = launch.pattern {
        writeln!(err, "Pattern: {pattern}")?;
    }
    err.flush()?;

    let mut runtime = TuiRuntime::new(config.clone(), launch)?;
    runtime.run()?;

    // By now restore_terminal has run; this lands on the normal screen
    writeln!(stderr(), "Goodbye!")?;

    Ok(())
}
