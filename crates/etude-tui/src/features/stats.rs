//! Statistics view.

use ratatui::style::Modifier;
use ratatui::text::{Line, Span};

use crate::state::AppState;

pub fn lines(app: &AppState, _width: u16) -> Vec<Line<'static>> {
    let theme = &app.tui.theme;
    let mut lines = vec![
        Line::from(Span::styled(
            "Statistics",
            theme.accent_style().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];

    let Some(stats) = &app.tui.stats else {
        lines.push(Line::from(Span::styled(
            "Loading statistics...",
            theme.dim_style(),
        )));
        return lines;
    };

    if stats.total_attempts == 0 {
        lines.push(Line::from(Span::styled(
            "Nothing recorded yet. Solve a problem to start the history",
            theme.dim_style(),
        )));
        return lines;
    }

    let rate = (stats.solved as f64 / stats.total_attempts as f64) * 100.0;
    lines.push(stat_row(
        "attempts",
        stats.total_attempts.to_string(),
        theme,
    ));
    lines.push(stat_row(
        "solved",
        format!("{} ({rate:.0}%)", stats.solved),
        theme,
    ));
    lines.push(stat_row(
        "practice time",
        format_practice_time(stats.total_practice_secs),
        theme,
    ));
    lines.push(stat_row(
        "streak",
        format!(
            "{} day{}",
            stats.streak_days,
            if stats.streak_days == 1 { "" } else { "s" }
        ),
        theme,
    ));
    if let Some(last) = stats.last_practiced {
        lines.push(stat_row("last practiced", last.to_string(), theme));
    }

    if !stats.per_pattern.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "BY PATTERN",
            theme.accent_style().add_modifier(Modifier::BOLD),
        )));
        for (pattern, count) in &stats.per_pattern {
            let style = if count.solved > 0 {
                theme.success_style()
            } else {
                theme.dim_style()
            };
            lines.push(Line::from(vec![
                Span::raw(format!("  {pattern:<24}")),
                Span::styled(format!("{}/{}", count.solved, count.attempts), style),
            ]));
        }
    }

    lines
}

fn stat_row(label: &str, value: String, theme: &crate::theme::Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label:<16}"), theme.dim_style()),
        Span::raw(value),
    ])
}

fn format_practice_time(secs: u64) -> String {
    let minutes = secs / 60;
    if minutes >= 60 {
        format!("{}h {:02}m", minutes / 60, minutes % 60)
    } else {
        format!("{minutes}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_practice_time_minutes() {
        assert_eq!(format_practice_time(59 * 60), "59m");
    }

    #[test]
    fn test_format_practice_time_hours() {
        assert_eq!(format_practice_time(2 * 3600 + 5 * 60), "2h 05m");
    }
}
