//! Ctrl+C handling for the TUI and CLI.
//!
//! The handler only sets a flag; the event loop decides what an interrupt
//! means (confirm-quit inside a cram session, quit elsewhere). A second
//! Ctrl+C force-exits after restoring the terminal.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);
static RESTORE_HOOK: OnceLock<Box<dyn Fn() + Send + Sync>> = OnceLock::new();

#[derive(Debug)]
pub struct InterruptedError;

impl std::fmt::Display for InterruptedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Interrupted")
    }
}

impl std::error::Error for InterruptedError {}

/// Installs the process-wide Ctrl+C handler.
///
/// # Panics
/// Panics if the handler cannot be registered.
pub fn init() {
    ctrlc::set_handler(move || {
        trigger_ctrl_c();
    })
    .expect("Error setting Ctrl+C handler");
}

/// Records an interrupt. The second one exits immediately with 130.
pub fn trigger_ctrl_c() {
    if INTERRUPTED.swap(true, Ordering::SeqCst) {
        // process::exit() skips Drop, so the terminal must be restored here
        if let Some(hook) = RESTORE_HOOK.get() {
            hook();
        }
        std::process::exit(130);
    }
}

/// Whether an interrupt is pending.
pub fn is_interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Clears a pending interrupt.
pub fn reset() {
    INTERRUPTED.store(false, Ordering::SeqCst);
}

/// Sets the cleanup run before a forced exit. First caller wins; the TUI
/// registers terminal restore here.
pub fn set_restore_hook<F>(hook: F)
where
    F: Fn() + Send + Sync + 'static,
{
    let _ = RESTORE_HOOK.set(Box::new(hook));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_clears_flag() {
        INTERRUPTED.store(true, Ordering::SeqCst);
        assert!(is_interrupted());
        reset();
        assert!(!is_interrupted());
    }
}
