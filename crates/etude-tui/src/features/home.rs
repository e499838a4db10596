//! Home screen view: the main menu.

use ratatui::style::Modifier;
use ratatui::text::{Line, Span};

use crate::state::AppState;

/// Menu rows in cursor order. Update logic maps the cursor index onto the
/// same slice, so order changes here change navigation too.
pub const MENU: &[(&str, &str)] = &[
    ("Practice", "Pick a pattern and work through its problems"),
    ("Daily challenge", "Today's scheduled pattern"),
    ("Statistics", "Attempts, solves, and streaks"),
    ("Settings", "Current configuration"),
    ("Quit", "Leave etude"),
];

pub fn lines(app: &AppState, _width: u16) -> Vec<Line<'static>> {
    let theme = &app.tui.theme;
    let mut lines = vec![
        Line::from(Span::styled(
            "etude",
            theme.accent_style().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Algorithm practice, one pattern at a time",
            theme.dim_style(),
        )),
        Line::default(),
    ];

    for (i, (name, blurb)) in MENU.iter().enumerate() {
        let selected = i == app.tui.home_cursor;
        let marker = if selected { "> " } else { "  " };
        let name_style = if selected {
            theme.selected_style()
        } else {
            ratatui::style::Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(marker.to_string(), theme.accent_style()),
            Span::styled(format!("{name:<16}"), name_style),
            Span::styled((*blurb).to_string(), theme.dim_style()),
        ]));
    }

    if let Some(stats) = &app.tui.stats {
        lines.push(Line::default());
        let streak = match stats.streak_days {
            0 => String::new(),
            1 => " · 1-day streak".to_string(),
            days => format!(" · {days}-day streak"),
        };
        lines.push(Line::from(Span::styled(
            format!(
                "{} solved of {} attempts{streak}",
                stats.solved, stats.total_attempts
            ),
            theme.dim_style(),
        )));
    }

    lines
}
