//! Settings view: the effective configuration, read-only.

use etude_core::config::paths;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};

use crate::state::AppState;

pub fn lines(app: &AppState, _width: u16) -> Vec<Line<'static>> {
    let theme = &app.tui.theme;
    let config = &app.tui.config;
    let timers = &config.timers;

    let mut lines = vec![
        Line::from(Span::styled(
            "Settings",
            theme.accent_style().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        row("language", config.language.to_string(), theme),
        row("editor", app.tui.editor_cmd.clone(), theme),
        row("theme", config.theme.clone(), theme),
        Line::default(),
        Line::from(Span::styled(
            "TIMERS",
            theme.accent_style().add_modifier(Modifier::BOLD),
        )),
        row("learn", format!("{} min", timers.learn_mins), theme),
        row("practice", format!("{} min", timers.practice_mins), theme),
        row("cram", format!("{} min", timers.cram_mins), theme),
        Line::default(),
        Line::from(Span::styled(
            "PATHS",
            theme.accent_style().add_modifier(Modifier::BOLD),
        )),
        row("config", paths::config_path().display().to_string(), theme),
        row(
            "problems",
            paths::problems_dir().display().to_string(),
            theme,
        ),
        row("stats", paths::stats_path().display().to_string(), theme),
    ];

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Edit the config file and restart to change these",
        theme.dim_style(),
    )));
    lines
}

fn row(label: &str, value: String, theme: &crate::theme::Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label:<12}"), theme.dim_style()),
        Span::raw(value),
    ])
}
