//! Screen navigation.
//!
//! The navigator tracks the current screen plus one level of "previous" for
//! back-navigation. Forward navigation picks the slide direction from the
//! screens' depth in the practice hierarchy; back always slides left and
//! falls through a fixed default-parent table when no previous is available.

use crate::animation::TransitionKind;

/// Top-level screens. Exactly one is current at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    PatternSelect,
    ProblemList,
    ProblemDetail,
    Session,
    Stats,
    Daily,
    Settings,
}

impl Screen {
    /// Depth in the Home → PatternSelect → ProblemList → ProblemDetail →
    /// Session hierarchy. Side screens (Stats, Daily, Settings) sit one
    /// level below Home.
    fn depth(self) -> u8 {
        match self {
            Screen::Home => 0,
            Screen::PatternSelect | Screen::Stats | Screen::Daily | Screen::Settings => 1,
            Screen::ProblemList => 2,
            Screen::ProblemDetail => 3,
            Screen::Session => 4,
        }
    }

    /// Default back target when no usable "previous" exists.
    ///
    /// The table is acyclic: every chain ends at Home within the hierarchy
    /// depth, so repeated back presses always terminate.
    fn default_parent(self) -> Screen {
        match self {
            Screen::Home | Screen::PatternSelect | Screen::Stats | Screen::Daily
            | Screen::Settings => Screen::Home,
            Screen::ProblemList => Screen::PatternSelect,
            Screen::ProblemDetail => Screen::ProblemList,
            Screen::Session => Screen::ProblemDetail,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::PatternSelect => "Patterns",
            Screen::ProblemList => "Problems",
            Screen::ProblemDetail => "Problem",
            Screen::Session => "Session",
            Screen::Stats => "Stats",
            Screen::Daily => "Daily",
            Screen::Settings => "Settings",
        }
    }
}

/// Current and previous screen.
///
/// "previous" is consumed by one back-navigation and overwritten on the next
/// forward navigation.
#[derive(Debug, Clone, Copy)]
pub struct Navigator {
    pub current: Screen,
    pub previous: Screen,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            current: Screen::Home,
            previous: Screen::Home,
        }
    }
}

impl Navigator {
    /// Moves forward to `screen` and returns the slide direction: right when
    /// descending the hierarchy, left otherwise.
    pub fn navigate(&mut self, screen: Screen) -> TransitionKind {
        let kind = if screen.depth() > self.current.depth() {
            TransitionKind::SlideRight
        } else {
            TransitionKind::SlideLeft
        };
        self.previous = self.current;
        self.current = screen;
        kind
    }

    /// Moves back: to the stored previous screen when one is usable, else to
    /// the current screen's default parent. Returns the transition, or None
    /// when already at Home with nowhere to go.
    pub fn back(&mut self) -> Option<TransitionKind> {
        let target = if self.previous != self.current {
            self.previous
        } else {
            self.current.default_parent()
        };
        if target == self.current {
            return None;
        }
        // The consumed previous goes stale: a second back from here falls
        // through the default-parent table.
        self.previous = target;
        self.current = target;
        Some(TransitionKind::SlideLeft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigate_always_leaves_previous_distinct() {
        let mut nav = Navigator::default();
        for screen in [
            Screen::PatternSelect,
            Screen::ProblemList,
            Screen::ProblemDetail,
            Screen::Session,
            Screen::Stats,
            Screen::Home,
        ] {
            nav.navigate(screen);
            assert_ne!(nav.previous, nav.current);
        }
    }

    #[test]
    fn test_forward_descent_slides_right() {
        let mut nav = Navigator::default();
        assert_eq!(
            nav.navigate(Screen::PatternSelect),
            TransitionKind::SlideRight
        );
        assert_eq!(nav.navigate(Screen::ProblemList), TransitionKind::SlideRight);
        assert_eq!(nav.navigate(Screen::Home), TransitionKind::SlideLeft);
    }

    #[test]
    fn test_back_prefers_stored_previous() {
        let mut nav = Navigator::default();
        nav.navigate(Screen::Stats);
        assert_eq!(nav.back(), Some(TransitionKind::SlideLeft));
        assert_eq!(nav.current, Screen::Home);
    }

    #[test]
    fn test_back_from_deep_session_walks_default_parents() {
        let mut nav = Navigator {
            current: Screen::Session,
            previous: Screen::Session,
        };
        let mut steps = 0;
        while nav.back().is_some() {
            steps += 1;
            assert!(steps <= 4, "back chain did not terminate");
        }
        assert_eq!(nav.current, Screen::Home);
        assert_eq!(steps, 4);
    }

    #[test]
    fn test_back_terminates_at_home_from_every_screen() {
        for screen in [
            Screen::Home,
            Screen::PatternSelect,
            Screen::ProblemList,
            Screen::ProblemDetail,
            Screen::Session,
            Screen::Stats,
            Screen::Daily,
            Screen::Settings,
        ] {
            let mut nav = Navigator {
                current: screen,
                previous: screen,
            };
            let mut steps = 0;
            while nav.back().is_some() {
                steps += 1;
                assert!(steps <= 4, "back chain from {screen:?} did not terminate");
            }
            assert_eq!(nav.current, Screen::Home);
        }
    }

    #[test]
    fn test_previous_is_consumed_by_one_back() {
        let mut nav = Navigator::default();
        nav.navigate(Screen::PatternSelect);
        nav.navigate(Screen::ProblemList);
        nav.navigate(Screen::Stats);

        // First back uses the recorded previous (ProblemList)...
        nav.back();
        assert_eq!(nav.current, Screen::ProblemList);
        // ...the second falls through the default-parent table.
        nav.back();
        assert_eq!(nav.current, Screen::PatternSelect);
        nav.back();
        assert_eq!(nav.current, Screen::Home);
    }

    #[test]
    fn test_back_at_home_is_a_no_op() {
        let mut nav = Navigator::default();
        assert_eq!(nav.back(), None);
        assert_eq!(nav.current, Screen::Home);
    }
}
