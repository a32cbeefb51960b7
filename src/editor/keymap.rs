//! Keyboard shortcuts recognised while the editor has focus.
//!
//! | Keys | Shortcut |
//! |---|---|
//! | `Mod+B` | bold |
//! | `Mod+I` | italic |
//! | `Mod+K` | link |
//! | `Mod+Z` | undo |
//! | `Mod+Shift+Z` | redo |
//! | `Mod+Shift+Enter` | literal line break |
//!
//! `Mod` is Ctrl, Super or Meta. A recognised combination is consumed:
//! the host must not apply its own handling (typing, submit-on-enter).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Bold,
    Italic,
    Link,
    Undo,
    Redo,
    LineBreak,
}

/// Whether the editor consumed a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The key was a shortcut; default handling must be suppressed.
    Handled,
    /// Not a shortcut; the host may handle it.
    Ignored,
}

/// Map a key event to a shortcut.
pub fn dispatch(key: &KeyEvent) -> Option<Shortcut> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let modifier = key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER | KeyModifiers::META);
    if !modifier {
        return None;
    }
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    match key.code {
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            // Terminals report Shift+letter as either uppercase or SHIFT.
            'z' if shift || c.is_ascii_uppercase() => Some(Shortcut::Redo),
            'z' => Some(Shortcut::Undo),
            'b' if !shift => Some(Shortcut::Bold),
            'i' if !shift => Some(Shortcut::Italic),
            'k' if !shift => Some(Shortcut::Link),
            _ => None,
        },
        KeyCode::Enter if shift => Some(Shortcut::LineBreak),
        _ => None,
    }
}
