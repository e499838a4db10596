//! Problem listing.

use anyhow::{Context, Result};
use comfy_table::{ContentArrangement, Table};
use etude_core::config::paths;
use etude_core::problems::{Problem, ProblemRepository};

pub fn run(pattern: Option<&str>) -> Result<()> {
    let repo = ProblemRepository::load(&paths::problems_dir()).context("load problems")?;

    let problems: Vec<&Problem> = match pattern {
        Some(p) => repo.by_pattern(p),
        None => repo.list_all().iter().collect(),
    };

    if problems.is_empty() {
        match pattern {
            Some(p) => println!("No problems tagged '{p}'."),
            None => println!("No problems found."),
        }
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["id", "title", "difficulty", "patterns"]);
    for problem in problems {
        table.add_row(vec![
            problem.id.clone(),
            problem.title.clone(),
            problem.difficulty.to_string(),
            problem.patterns.join(", "),
        ]);
    }
    println!("{table}");

    Ok(())
}
