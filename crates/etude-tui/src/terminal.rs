//! Terminal lifecycle: setup, restore, panic hook, and the suspend/resume
//! pair around the external editor hand-off.
//!
//! Every exit path ends in `restore_terminal`: normal exit through Drop,
//! panic through the hook, forced Ctrl+C through the interrupt restore
//! hook.

use std::io::{self, Stdout};
use std::panic;

use anyhow::{Context, Result};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Enters raw mode and the alternate screen, returning the terminal.
///
/// The panic hook must already be installed; a panic between raw mode and
/// hook installation would leave the terminal unusable.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Leaves the alternate screen and raw mode. Safe to call repeatedly;
/// every exit path funnels through here.
pub fn restore_terminal() -> Result<()> {
    execute!(io::stdout(), LeaveAlternateScreen).context("Failed to leave alternate screen")?;
    disable_raw_mode().context("Failed to disable raw mode")?;
    Ok(())
}

/// Hands the terminal to a child process (the editor).
///
/// Leaves the alternate screen and raw mode so the editor sees a normal
/// terminal. Pair with `resume_terminal()` once the child exits.
pub fn suspend_terminal() -> Result<()> {
    restore_terminal()
}

/// Takes the terminal back after a suspend.
///
/// Re-enters raw mode and the alternate screen, then clears so the next
/// draw repaints everything the editor may have left behind.
pub fn resume_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    enable_raw_mode().context("Failed to re-enable raw mode")?;
    execute!(io::stdout(), EnterAlternateScreen).context("Failed to re-enter alternate screen")?;
    terminal
        .clear()
        .context("Failed to clear terminal after resume")?;
    Ok(())
}

/// Chains a hook that restores the terminal before the default panic
/// output, so the message lands on a usable screen.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    // Needs a real TTY, so nothing runs automatically. Manual checklist:
    // - restore on normal exit (Drop), on panic, and on Ctrl+C
    // - the editor hand-off repaints cleanly on resume, including after
    //   an editor that crashed mid-session
}
