//! Problem list view.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::state::AppState;
use crate::text::truncate_with_ellipsis;

pub fn lines(app: &AppState, width: u16) -> Vec<Line<'static>> {
    let theme = &app.tui.theme;
    let heading = match &app.tui.pattern_filter {
        Some(pattern) => format!("Problems · {pattern}"),
        None => "Problems".to_string(),
    };
    let mut lines = vec![
        Line::from(Span::styled(
            heading,
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
    if app.tui.active_list.is_empty() {
        lines.push(Line::from(Span::styled(
            "No problems match this pattern",
            theme.dim_style(),
        )));
        return lines;
    }

    // marker(2) + solved(2) + difficulty(8): the title gets the rest.
    let title_width = usize::from(width).saturating_sub(14).max(16);

    for (row, id) in app.tui.active_list.iter().enumerate() {
        let Some(problem) = app.tui.problem(id) else {
            continue;
        };
        let selected = row == app.tui.problem_cursor;
        let marker = if selected { "> " } else { "  " };
        let title_style = if selected {
            theme.selected_style()
        } else {
            Style::default()
        };
        let solved = if app.tui.solved_ids.contains(id) {
            Span::styled("✓ ".to_string(), theme.success_style())
        } else {
            Span::raw("  ".to_string())
        };

        let title = truncate_with_ellipsis(&problem.title, title_width);
        lines.push(Line::from(vec![
            Span::styled(marker.to_string(), theme.accent_style()),
            solved,
            Span::styled(format!("{title:<title_width$}"), title_style),
            Span::styled(
                format!(" {}", problem.difficulty),
                theme.difficulty_style(problem.difficulty),
            ),
        ]));
    }

    lines
}
