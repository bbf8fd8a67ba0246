// Brutalmode Input Layer - Windows-style Shortcuts
// Convenience bindings offered by the lenient tier

use std::fmt;

use crate::{Key, Mode};

/// Editor action a Windows-style shortcut stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutAction {
    Undo,
    Copy,
    Cut,
    Paste,
}

impl fmt::Display for ShortcutAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShortcutAction::Undo => write!(f, "undo"),
            ShortcutAction::Copy => write!(f, "copy"),
            ShortcutAction::Cut => write!(f, "cut"),
            ShortcutAction::Paste => write!(f, "paste"),
        }
    }
}

/// Check if Windows-style keybindings are active (lenient tier only)
pub fn windows_keys_active(mode: Mode) -> bool {
    mode == Mode::Lenient
}

/// Report which action a physical key should trigger.
///
/// Copy, cut and paste are carried out by the host's command layer; only
/// undo is rewritten here (see `apply_shortcut`).
pub fn shortcut_action(mode: Mode, key: Key) -> Option<ShortcutAction> {
    if !windows_keys_active(mode) {
        return None;
    }

    match key {
        Key::CTRL_Z => Some(ShortcutAction::Undo),
        Key::CTRL_C => Some(ShortcutAction::Copy),
        Key::CTRL_X => Some(ShortcutAction::Cut),
        Key::CTRL_V => Some(ShortcutAction::Paste),
        _ => None,
    }
}

/// Rewrite Ctrl+Z into the editor's undo command in the lenient tier.
pub fn apply_shortcut(mode: Mode, key: Key) -> Key {
    match shortcut_action(mode, key) {
        Some(ShortcutAction::Undo) => Key::from('u'),
        _ => key,
    }
}
