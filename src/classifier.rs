//! Maps raw key-down events onto [`NavigationIntent`]s.
//!
//! Runs on the input callback context, so it is a pure function of the key
//! and a modifier snapshot taken at call time.  It keeps no memory of
//! earlier keys.
//!
//! | Keys (with the primary modifier held) | Intent                     |
//! |---------------------------------------|----------------------------|
//! | `Shift` + `Left` / `Right`            | `MoveRelative(Left/Right)` |
//! | `1` … `9`                             | `SwitchTo(digit - 1)`      |
//! | `Alt` + `1` … `9`                     | `MoveTo(digit - 1)`        |
//!
//! Anything else is not handled and passes through untouched.

use crate::intent::{Direction, NavigationIntent};

/// Virtual-key codes the classifier recognises.
pub mod vk {
    pub const LEFT: u32 = 0x25;
    pub const RIGHT: u32 = 0x27;
    pub const DIGIT_1: u32 = 0x31;
    pub const DIGIT_9: u32 = 0x39;
}

/// A key as far as navigation is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    /// Top-row digit `1..=9`.
    Digit(u8),
    Other,
}

impl Key {
    /// Decode a platform virtual-key code.
    pub fn from_virtual_key(code: u32) -> Self {
        match code {
            vk::LEFT => Key::Left,
            vk::RIGHT => Key::Right,
            vk::DIGIT_1..=vk::DIGIT_9 => Key::Digit((code - vk::DIGIT_1 + 1) as u8),
            _ => Key::Other,
        }
    }
}

/// Snapshot of the modifier keys at classification time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// The platform's "system" modifier (either Windows key).
    pub primary: bool,
    pub shift: bool,
    pub alt: bool,
}

/// One keystroke as delivered by the input tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key_code: u32,
    pub is_key_down: bool,
    /// Milliseconds, as stamped by the OS.
    pub timestamp: u32,
}

/// Classify a key under the given modifiers.  First matching rule wins.
pub fn classify(key: Key, mods: Modifiers) -> Option<NavigationIntent> {
    if !mods.primary {
        return None;
    }
    match (mods.shift, mods.alt, key) {
        (true, false, Key::Left) => Some(NavigationIntent::MoveRelative(Direction::Left)),
        (true, false, Key::Right) => Some(NavigationIntent::MoveRelative(Direction::Right)),
        (false, false, Key::Digit(d)) => Some(NavigationIntent::SwitchTo(usize::from(d) - 1)),
        (false, true, Key::Digit(d)) => Some(NavigationIntent::MoveTo(usize::from(d) - 1)),
        _ => None,
    }
}

/// Classify a raw event.  Key-up events are never handled.
pub fn classify_event(event: &KeyEvent, mods: Modifiers) -> Option<NavigationIntent> {
    if !event.is_key_down {
        return None;
    }
    classify(Key::from_virtual_key(event.key_code), mods)
}
