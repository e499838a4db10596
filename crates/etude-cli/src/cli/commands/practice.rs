//! Interactive practice (the default command).

use anyhow::{Context, Result};
use etude_core::config::Config;
use etude_tui::LaunchOptions;

pub async fn run(config: &Config, launch: &LaunchOptions) -> Result<()> {
    // Logs go to a file; the terminal belongs to the TUI.
    // One-shot commands print to stdout and skip this on purpose.
    let _log_guard = etude_core::logging::init().context("init logging")?;

    etude_tui::run(config, launch)
        .await
        .context("interactive practice failed")?;

    Ok(())
}
