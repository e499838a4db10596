//! Color themes.
//!
//! A theme is an immutable value built once at startup from the config and
//! injected into state. Render code reads colors from it; nothing mutates
//! it afterwards, so alternate themes can be substituted freely in tests.

use etude_core::problems::Difficulty;
use ratatui::style::{Color, Modifier, Style};

/// Immutable color palette for the TUI.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Titles, selected items, key labels.
    pub accent: Color,
    /// Secondary text, separators, inactive hints.
    pub dim: Color,
    /// Passing tests, solved markers, unlocked badges.
    pub success: Color,
    /// Failing tests and error status lines.
    pub error: Color,
    /// Timer warnings and confirmation prompts.
    pub warning: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Cyan,
            dim: Color::DarkGray,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
        }
    }
}

impl Theme {
    /// Resolves a theme by config name. Unknown names fall back to the
    /// default palette.
    pub fn from_name(name: &str) -> Self {
        match name {
            "default" => Self::default(),
            // For terminals where ANSI colors are unreadable.
            "plain" => Self {
                accent: Color::Reset,
                dim: Color::Reset,
                success: Color::Reset,
                error: Color::Reset,
                warning: Color::Reset,
            },
            other => {
                tracing::warn!(theme = other, "unknown theme name, using default");
                Self::default()
            }
        }
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    /// Style for the selected row in list screens.
    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn difficulty_style(&self, difficulty: Difficulty) -> Style {
        match difficulty {
            Difficulty::Easy => self.success_style(),
            Difficulty::Medium => self.warning_style(),
            Difficulty::Hard => self.error_style(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_name_falls_back_to_default() {
        let theme = Theme::from_name("solarized-disco");
        assert_eq!(theme.accent, Theme::default().accent);
    }

    #[test]
    fn test_plain_theme_uses_reset_colors() {
        let theme = Theme::from_name("plain");
        assert_eq!(theme.accent, Color::Reset);
        assert_eq!(theme.error, Color::Reset);
    }
}
