// Brutalmode Input Layer - Key Filtering
// Per-keystroke block, remap and quit-refusal decisions

use crate::host::HostFlags;
use crate::keymap::Keymap;
use crate::{Key, Mode};

/// Directional and paging keys, plain and shifted
const CURSOR_KEYS: [Key; 14] = [
    Key::UP,
    Key::DOWN,
    Key::LEFT,
    Key::RIGHT,
    Key::PAGE_UP,
    Key::PAGE_DOWN,
    Key::HOME,
    Key::END,
    Key::SHIFT_UP,
    Key::SHIFT_DOWN,
    Key::SHIFT_LEFT,
    Key::SHIFT_RIGHT,
    Key::SHIFT_HOME,
    Key::SHIFT_END,
];

/// Check if a key moves the cursor or pages the view.
pub fn is_cursor_key(key: Key) -> bool {
    CURSOR_KEYS.contains(&key)
}

/// Check if a keystroke must be dropped before dispatch.
///
/// Only the cursor-restricting tiers drop anything, and only cursor keys.
/// The lenient tier keeps the arrows on purpose. Nothing is dropped when no
/// human is at the keyboard.
///
/// # Arguments
/// * `mode` - The active tier
/// * `key` - The decoded key
/// * `flags` - Headless/embedded state of the host
pub fn should_block(mode: Mode, key: Key, flags: HostFlags) -> bool {
    if flags.is_non_interactive() {
        return false;
    }

    mode.restricts_cursor() && is_cursor_key(key)
}

/// Translate a key through the randomized keymap.
///
/// Identity in every tier but `Randomized`, and for keys outside 0-255.
pub fn remap(mode: Mode, keymap: &Keymap, key: Key) -> Key {
    if mode != Mode::Randomized {
        return key;
    }

    keymap.apply(key)
}

/// Check if a quit command (`:q`, `:q!`, `ZZ`, ...) must be refused.
///
/// `Stricter` and `Randomized` refuse every quit, forced or not. Quit requests
/// raised by the escape gestures do not go through this check.
pub fn quit_should_be_blocked(mode: Mode, force: bool, flags: HostFlags) -> bool {
    if flags.is_non_interactive() {
        return false;
    }

    let blocked = mode.refuses_quit();
    if blocked {
        log::debug!("Refusing quit in {} mode (force={})", mode, force);
    }
    blocked
}
