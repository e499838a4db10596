//! Session screen view.
//!
//! Produces pre-shaped display lines; the outer renderer applies the
//! screen transition and scroll offset before drawing.

use ratatui::style::Modifier;
use ratatui::text::{Line, Span};

use crate::state::AppState;
use crate::text::{truncate_with_ellipsis, wrap_text};
use crate::theme::Theme;

use super::format_clock;
use super::state::{SessionPhase, SessionState};

pub fn lines(app: &AppState, width: u16) -> Vec<Line<'static>> {
    let theme = &app.tui.theme;
    let Some(session) = app.session.as_ref() else {
        return vec![Line::from(Span::styled(
            "No active session".to_string(),
            theme.dim_style(),
        ))];
    };
    let wrap_width = usize::from(width).saturating_sub(2).max(20);

    let mut lines = vec![header_line(session, theme), clock_line(session, theme)];
    lines.push(Line::default());

    push_tests(&mut lines, session, theme, wrap_width);

    if session.hints.is_shown() && !session.problem.hints.is_empty() {
        lines.push(Line::default());
        push_hints(&mut lines, session, theme, wrap_width);
    }

    if session.solution.is_shown() {
        if let Some(solution) = session.problem.solution_for(session.language) {
            lines.push(Line::default());
            lines.push(section_header("SOLUTION", theme));
            for code_line in solution.lines() {
                lines.push(Line::from(Span::styled(
                    code_line.to_string(),
                    theme.success_style(),
                )));
            }
        }
    }

    lines.push(Line::default());
    lines.push(section_header("CODE", theme));
    for code_line in session.code.lines() {
        lines.push(Line::from(code_line.to_string()));
    }

    lines
}

fn header_line(session: &SessionState, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            session.problem.title.clone(),
            theme.accent_style().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            session.problem.difficulty.to_string(),
            theme.difficulty_style(session.problem.difficulty),
        ),
        Span::raw("  "),
        Span::styled(
            session.problem.primary_pattern().to_string(),
            theme.dim_style(),
        ),
    ])
}

fn clock_line(session: &SessionState, theme: &Theme) -> Line<'static> {
    let over_budget = session.shown_elapsed > session.budget;
    let clock_style = match session.phase {
        SessionPhase::Completed => theme.success_style(),
        _ if over_budget => theme.warning_style(),
        _ => theme.accent_style(),
    };

    let mut spans = vec![
        Span::styled(session.mode.display_name().to_string(), theme.dim_style()),
        Span::styled(" · ".to_string(), theme.dim_style()),
        Span::styled(session.language.to_string(), theme.dim_style()),
        Span::styled(" · ".to_string(), theme.dim_style()),
        Span::styled(format_clock(session.shown_elapsed), clock_style),
    ];
    if session.mode.timeout_is_fatal() && !session.phase.is_final() {
        spans.push(Span::styled(
            format!("  {} left", format_clock(session.remaining())),
            theme.warning_style(),
        ));
    }
    match session.phase {
        SessionPhase::Paused => spans.push(Span::styled(
            "  [paused]".to_string(),
            theme.warning_style(),
        )),
        SessionPhase::Completed => spans.push(Span::styled(
            "  [solved]".to_string(),
            theme.success_style(),
        )),
        SessionPhase::Abandoned => spans.push(Span::styled(
            "  [abandoned]".to_string(),
            theme.dim_style(),
        )),
        SessionPhase::Active => {}
    }
    Line::from(spans)
}

fn push_tests(lines: &mut Vec<Line<'static>>, session: &SessionState, theme: &Theme, width: usize) {
    lines.push(section_header("TESTS", theme));

    if session.run_in_flight {
        lines.push(Line::from(Span::styled(
            "Running...".to_string(),
            theme.dim_style(),
        )));
        return;
    }
    if session.results.is_empty() {
        lines.push(Line::from(Span::styled(
            "Not run yet. Press r to run the tests".to_string(),
            theme.dim_style(),
        )));
        return;
    }

    for (i, result) in session.results.iter().enumerate() {
        let (verdict, style) = if result.passed {
            ("PASS", theme.success_style())
        } else {
            ("FAIL", theme.error_style())
        };
        lines.push(Line::from(vec![
            Span::styled(verdict.to_string(), style.add_modifier(Modifier::BOLD)),
            Span::raw(format!("  case {}", i + 1)),
        ]));
        if !result.passed {
            let detail_width = width.saturating_sub(8).max(12);
            lines.push(detail_line("expected", &result.expected, detail_width, theme));
            lines.push(detail_line("got", &result.actual, detail_width, theme));
        }
    }
}

fn detail_line(label: &str, value: &str, width: usize, theme: &Theme) -> Line<'static> {
    // Multi-line outputs collapse to one display line each.
    let value = value.replace('\n', " ⏎ ");
    Line::from(vec![
        Span::raw("      "),
        Span::styled(format!("{label}: "), theme.dim_style()),
        Span::raw(truncate_with_ellipsis(&value, width)),
    ])
}

fn push_hints(lines: &mut Vec<Line<'static>>, session: &SessionState, theme: &Theme, width: usize) {
    lines.push(section_header("HINTS", theme));
    for (i, hint) in session.problem.hints.iter().enumerate() {
        let body_width = width.saturating_sub(3).max(12);
        for (j, wrapped) in wrap_text(hint, body_width).into_iter().enumerate() {
            let prefix = if j == 0 {
                format!("{}. ", i + 1)
            } else {
                "   ".to_string()
            };
            lines.push(Line::from(vec![
                Span::styled(prefix, theme.dim_style()),
                Span::raw(wrapped),
            ]));
        }
    }
}

fn section_header(title: &'static str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        title,
        theme.accent_style().add_modifier(Modifier::BOLD),
    ))
}
