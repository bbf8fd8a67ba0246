// Brutalmode Input Layer
// Stateless per-keystroke decisions

mod filter;
mod shortcut;

pub use filter::{is_cursor_key, quit_should_be_blocked, remap, should_block};
pub use shortcut::{apply_shortcut, shortcut_action, windows_keys_active, ShortcutAction};
