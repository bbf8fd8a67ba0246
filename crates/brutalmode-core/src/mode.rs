use strum_macros::{Display, EnumIter, EnumString};

/// The active difficulty tier.
///
/// Tiers are ordered: every tier from `Strict` upward restricts the cursor
/// keys, and every tier from `Stricter` upward refuses quit commands.
/// Parsing accepts both the tier names and the legacy difficulty names
/// (`none`, `easy`, `hard`, `harder`, `hardest`), case-insensitively.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
#[repr(i32)]
pub enum Mode {
    /// Plain editor behavior
    #[default]
    #[strum(to_string = "disabled", serialize = "none")]
    Disabled = 0,
    /// Arrow keys allowed, Windows-style shortcuts and escape hatches added
    #[strum(to_string = "lenient", serialize = "easy")]
    Lenient = 1,
    /// Cursor and paging keys disabled
    #[strum(to_string = "strict", serialize = "hard")]
    Strict = 2,
    /// Cursor keys disabled and every quit command refused
    #[strum(to_string = "stricter", serialize = "harder")]
    Stricter = 3,
    /// Everything in `Stricter`, plus keys shuffled within their groups
    #[strum(to_string = "randomized", serialize = "hardest")]
    Randomized = 4,
}

impl Mode {
    /// Returns true for every mode except `Disabled`
    pub fn is_enabled(self) -> bool {
        self != Mode::Disabled
    }

    /// Returns true when directional and paging keys are dropped
    pub fn restricts_cursor(self) -> bool {
        self >= Mode::Strict
    }

    /// Returns true when quit commands are refused
    pub fn refuses_quit(self) -> bool {
        self >= Mode::Stricter
    }
}
