//! Practice statistics.

use anyhow::{Context, Result};
use comfy_table::{ContentArrangement, Table};
use etude_core::config::paths;
use etude_core::stats::StatsStore;

pub fn run() -> Result<()> {
    let store = StatsStore::load(&paths::stats_path()).context("load stats")?;
    let summary = store.summary();

    if summary.total_attempts == 0 {
        println!("No attempts recorded yet. Run `etude` to start practicing.");
        return Ok(());
    }

    let percent = summary.solved * 100 / summary.total_attempts;
    println!("Attempts:       {}", summary.total_attempts);
    println!("Solved:         {} ({percent}%)", summary.solved);
    println!(
        "Practice time:  {}",
        format_practice_time(summary.total_practice_secs)
    );
    println!("Streak:         {} day(s)", summary.streak_days);
    if let Some(last) = summary.last_practiced {
        println!("Last practiced: {last}");
    }

    if !summary.per_pattern.is_empty() {
        println!();
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["pattern", "solved", "attempts"]);
        for (pattern, count) in &summary.per_pattern {
            table.add_row(vec![
                pattern.clone(),
                count.solved.to_string(),
                count.attempts.to_string(),
            ]);
        }
        println!("{table}");
    }

    Ok(())
}

fn format_practice_time(secs: u64) -> String {
    let mins = secs / 60;
    if mins < 60 {
        format!("{mins}m")
    } else {
        format!("{}h {:02}m", mins / 60, mins % 60)
    }
}
