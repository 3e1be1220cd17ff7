//! Intents and types used throughout deskshift.
//!
//! This module defines the vocabulary that all components share:
//! [`NavigationIntent`] describes every action the navigator can perform,
//! and [`Direction`] / [`WindowHandle`] provide the supporting data types.

use std::fmt;

/// Direction for relative navigation along the desktop switcher.
///
/// `Left` is bounded at the first desktop; `Right` is unbounded because the
/// navigator creates a new desktop when moving past the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// Every action the navigator can perform.
///
/// Intents are produced by the [classifier](crate::classifier) on the input
/// callback context and consumed exactly once by the
/// [`Dispatcher`](crate::dispatcher::Dispatcher).  Indices are 0-based and
/// unbounded upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationIntent {
    /// Make the desktop at `index` current, creating desktops up to it.
    SwitchTo(usize),

    /// Move the focused window to the desktop at `index` and follow it.
    MoveTo(usize),

    /// Move the focused window one desktop in the given direction and
    /// follow it.  Moving right from the last desktop creates a new one.
    MoveRelative(Direction),
}

impl fmt::Display for NavigationIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationIntent::SwitchTo(i) => write!(f, "switch to desktop {}", i.saturating_add(1)),
            NavigationIntent::MoveTo(i) => write!(f, "move window to desktop {}", i.saturating_add(1)),
            NavigationIntent::MoveRelative(dir) => write!(f, "move window {}", dir),
        }
    }
}

/// Opaque identity of a top-level window.
///
/// Resolved fresh for every intent; never cached across intents because the
/// foreground window is a point-in-time fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub isize);

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_display() {
        assert_eq!(Direction::Left.to_string(), "left");
        assert_eq!(Direction::Right.to_string(), "right");
    }

    #[test]
    fn intent_display_is_one_based() {
        assert_eq!(
            NavigationIntent::SwitchTo(0).to_string(),
            "switch to desktop 1"
        );
        assert_eq!(
            NavigationIntent::MoveTo(4).to_string(),
            "move window to desktop 5"
        );
        assert_eq!(
            NavigationIntent::MoveRelative(Direction::Right).to_string(),
            "move window right"
        );
    }

    #[test]
    fn intent_display_saturates_at_the_largest_index() {
        assert_eq!(
            NavigationIntent::SwitchTo(usize::MAX).to_string(),
            format!("switch to desktop {}", usize::MAX)
        );
        assert_eq!(
            NavigationIntent::MoveTo(usize::MAX).to_string(),
            format!("move window to desktop {}", usize::MAX)
        );
    }

    #[test]
    fn intent_equality() {
        assert_eq!(NavigationIntent::SwitchTo(2), NavigationIntent::SwitchTo(2));
        assert_ne!(NavigationIntent::SwitchTo(2), NavigationIntent::MoveTo(2));
        assert_ne!(
            NavigationIntent::MoveRelative(Direction::Left),
            NavigationIntent::MoveRelative(Direction::Right)
        );
    }

    #[test]
    fn window_handle_display_is_hex() {
        assert_eq!(WindowHandle(0xbeef).to_string(), "0xbeef");
    }
}
