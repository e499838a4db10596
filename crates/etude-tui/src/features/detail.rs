//! Problem detail view: statement, examples, and session setup.

use ratatui::style::Modifier;
use ratatui::text::{Line, Span};

use crate::state::AppState;
use crate::text::wrap_block;
use crate::theme::Theme;

pub fn lines(app: &AppState, width: u16) -> Vec<Line<'static>> {
    let theme = &app.tui.theme;
    let Some(problem) = app.tui.detail_problem() else {
        return vec![Line::from(Span::styled(
            "Problem not found".to_string(),
            theme.dim_style(),
        ))];
    };
    let wrap_width = usize::from(width).saturating_sub(2).max(20);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                problem.title.clone(),
                theme.accent_style().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                problem.difficulty.to_string(),
                theme.difficulty_style(problem.difficulty),
            ),
            Span::raw("  "),
            Span::styled(problem.patterns.join(", "), theme.dim_style()),
        ]),
        setup_line(app, theme),
        Line::default(),
    ];

    for wrapped in wrap_block(&problem.description, wrap_width) {
        lines.push(Line::from(wrapped));
    }

    if !problem.examples.is_empty() {
        lines.push(Line::default());
        lines.push(section_header("EXAMPLES", theme));
        for (i, example) in problem.examples.iter().enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            lines.push(Line::from(vec![
                Span::styled("input:    ".to_string(), theme.dim_style()),
                Span::raw(example.input.clone()),
            ]));
            lines.push(Line::from(vec![
                Span::styled("output:   ".to_string(), theme.dim_style()),
                Span::raw(example.output.clone()),
            ]));
            if let Some(explanation) = &example.explanation {
                for (j, wrapped) in wrap_block(explanation, wrap_width.saturating_sub(10).max(12))
                    .into_iter()
                    .enumerate()
                {
                    let prefix = if j == 0 { "because:  " } else { "          " };
                    lines.push(Line::from(vec![
                        Span::styled(prefix.to_string(), theme.dim_style()),
                        Span::raw(wrapped),
                    ]));
                }
            }
        }
    }

    lines.push(Line::default());
    let hints = problem.hints.len();
    let cases = problem.test_cases.len();
    lines.push(Line::from(Span::styled(
        format!(
            "{hints} hint{} · {cases} test case{}",
            plural(hints),
            plural(cases)
        ),
        theme.dim_style(),
    )));
    if problem.starter_for(app.tui.language).is_none() {
        lines.push(Line::from(Span::styled(
            format!("No {} starter for this problem", app.tui.language),
            theme.warning_style(),
        )));
    }

    lines
}

/// The mode/language row. Enter starts a session with exactly this setup.
fn setup_line(app: &AppState, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled("mode ".to_string(), theme.dim_style()),
        Span::styled(
            app.tui.mode.display_name().to_string(),
            theme.accent_style(),
        ),
        Span::styled(" (m)".to_string(), theme.dim_style()),
        Span::raw("   "),
        Span::styled("language ".to_string(), theme.dim_style()),
        Span::styled(app.tui.language.to_string(), theme.accent_style()),
        Span::styled(" (l)".to_string(), theme.dim_style()),
    ])
}

fn section_header(title: &'static str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        title,
        theme.accent_style().add_modifier(Modifier::BOLD),
    ))
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
