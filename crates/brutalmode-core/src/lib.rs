// Brutalmode Core Library
// Difficulty-mode overlay for an editor's keystroke pipeline

pub mod banner;
pub mod easter_egg;
pub mod host;
pub mod input;
pub mod key;
pub mod keymap;
pub mod mode;
pub mod quit;
pub mod settings;
pub mod state;

pub use banner::banner;
pub use easter_egg::{levenshtein, normalize, EasterEggMatcher, PhrasePolicy};
pub use host::{EditorHost, HostError, HostFlags};
pub use input::{
    apply_shortcut, quit_should_be_blocked, remap, shortcut_action, should_block,
    windows_keys_active, ShortcutAction,
};
pub use key::Key;
pub use keymap::{generate, shuffle_within_groups, KeyGroupId, KeyGroups, Keymap, KeymapSeed};
pub use mode::Mode;
pub use quit::{CtrlQuitCounter, EscapeDetector, EscapePolicy, QuitReason, QuitSequenceDetector};
pub use settings::{Settings, SettingsError};
pub use state::{KeyOutcome, ModeState};
