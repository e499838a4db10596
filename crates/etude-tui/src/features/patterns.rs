//! Pattern picker view.
//!
//! Row 0 is always "All problems"; rows 1.. are the repository's pattern
//! tags in first-appearance order. Update logic relies on that offset when
//! mapping the cursor to a filter.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::state::AppState;

/// Number of selectable rows, including the "All problems" row.
pub fn row_count(app: &AppState) -> usize {
    app.tui.patterns.len() + 1
}

/// The filter a cursor position selects: None is the unfiltered list.
pub fn filter_at(app: &AppState, cursor: usize) -> Option<String> {
    if cursor == 0 {
        None
    } else {
        app.tui.patterns.get(cursor - 1).cloned()
    }
}

pub fn lines(app: &AppState, _width: u16) -> Vec<Line<'static>> {
    let theme = &app.tui.theme;
    let mut lines = vec![
        Line::from(Span::styled(
            "Pick a pattern",
            theme.accent_style().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];

    if !app.tui.problems_loaded {
        lines.push(Line::from(Span::styled(
            "Loading problems...",
            theme.dim_style(),
        )));
        return lines;
    }

    for row in 0..row_count(app) {
        let selected = row == app.tui.pattern_cursor;
        let marker = if selected { "> " } else { "  " };
        let name_style = if selected {
            theme.selected_style()
        } else {
            Style::default()
        };

        let (name, count) = match filter_at(app, row) {
            None => ("All problems".to_string(), app.tui.problems.len()),
            Some(pattern) => {
                let count = app
                    .tui
                    .problems
                    .iter()
                    .filter(|p| p.patterns.iter().any(|t| *t == pattern))
                    .count();
                (pattern, count)
            }
        };
        let noun = if count == 1 { "problem" } else { "problems" };

        lines.push(Line::from(vec![
            Span::styled(marker.to_string(), theme.accent_style()),
            Span::styled(format!("{name:<24}"), name_style),
            Span::styled(format!("{count} {noun}"), theme.dim_style()),
        ]));
    }

    lines
}
