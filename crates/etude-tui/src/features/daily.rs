//! Daily challenge view.
//!
//! Shows the pattern rotation with today's progress and the next pattern
//! to drill. Enter jumps straight to that pattern's problem list.

use etude_core::scheduler::{next_pattern, scale_label};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};

use crate::state::AppState;

/// The pattern Enter would open, if the rotation is not done yet.
pub fn scheduled_pattern(app: &AppState) -> Option<String> {
    next_pattern(&app.tui.patterns, &app.tui.solved_today).map(str::to_string)
}

pub fn lines(app: &AppState, _width: u16) -> Vec<Line<'static>> {
    let theme = &app.tui.theme;
    let mut lines = vec![
        Line::from(Span::styled(
            "Daily challenge",
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

    let next = scheduled_pattern(app);
    match &next {
        Some(pattern) => {
            lines.push(Line::from(vec![
                Span::raw("Today's pattern: ".to_string()),
                Span::styled(pattern.clone(), theme.selected_style()),
                Span::styled(
                    format!("  — play it in {}", scale_label(pattern)),
                    theme.dim_style(),
                ),
            ]));
            lines.push(Line::from(Span::styled(
                "Press Enter to open its problems",
                theme.dim_style(),
            )));
        }
        None => {
            lines.push(Line::from(Span::styled(
                "Every pattern covered today. Well practiced!",
                theme.success_style(),
            )));
        }
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "ROTATION",
        theme.accent_style().add_modifier(Modifier::BOLD),
    )));
    for pattern in &app.tui.patterns {
        let done = app.tui.solved_today.contains(pattern);
        let is_next = next.as_deref() == Some(pattern.as_str());
        let mark = if done {
            Span::styled("✓ ".to_string(), theme.success_style())
        } else {
            Span::styled("· ".to_string(), theme.dim_style())
        };
        let mut spans = vec![Span::raw("  "), mark, Span::raw(format!("{pattern:<24}"))];
        spans.push(Span::styled(
            scale_label(pattern).to_string(),
            theme.dim_style(),
        ));
        if is_next {
            spans.push(Span::styled("  ← next".to_string(), theme.warning_style()));
        }
        lines.push(Line::from(spans));
    }

    lines
}
