// Brutalmode Settings Module
// Tunable thresholds for the quit gestures, the escape phrase and the keymap seed

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::easter_egg::{
    PhrasePolicy, DEFAULT_CAPACITY, DEFAULT_PHRASE, DEFAULT_TOLERANCE, MAX_EDIT_LEN,
};
use crate::keymap::KeymapSeed;
use crate::quit::{
    EscapePolicy, DEFAULT_CTRL_THRESHOLD, DEFAULT_ESCAPE_HOLD, DEFAULT_ESCAPE_PRESSES,
    DEFAULT_ESCAPE_WINDOW, DEFAULT_HOLD_REPEAT_GAP,
};

/// Settings for the detectors and the keymap generator.
///
/// These are loaded from a TOML file (default: ~/.config/brutalmode/settings.toml).
/// The mode itself is never read from here; it comes from the command line.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    quit: QuitSettings,
    easter_egg: EasterEggSettings,
    keymap: KeymapSettings,

    /// Path to the settings file, reported by the host
    source_path: Option<PathBuf>,
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid setting value: {0}")]
    InvalidValue(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum EscapePolicyKind {
    #[default]
    Window,
    Hold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum PhrasePolicyKind {
    Contains,
    #[default]
    EditDistance,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct QuitSettings {
    ctrl_threshold: u32,
    escape_policy: EscapePolicyKind,
    escape_presses: usize,
    escape_window_ms: u64,
    escape_hold_ms: u64,
    escape_repeat_gap_ms: u64,
}

impl Default for QuitSettings {
    fn default() -> Self {
        Self {
            ctrl_threshold: DEFAULT_CTRL_THRESHOLD,
            escape_policy: EscapePolicyKind::default(),
            escape_presses: DEFAULT_ESCAPE_PRESSES,
            escape_window_ms: DEFAULT_ESCAPE_WINDOW.as_millis() as u64,
            escape_hold_ms: DEFAULT_ESCAPE_HOLD.as_millis() as u64,
            escape_repeat_gap_ms: DEFAULT_HOLD_REPEAT_GAP.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct EasterEggSettings {
    phrase: String,
    policy: PhrasePolicyKind,
    tolerance: usize,
    capacity: usize,
}

impl Default for EasterEggSettings {
    fn default() -> Self {
        Self {
            phrase: DEFAULT_PHRASE.to_string(),
            policy: PhrasePolicyKind::default(),
            tolerance: DEFAULT_TOLERANCE,
            capacity: DEFAULT_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct KeymapSettings {
    seed: Option<u64>,
}

/// TOML representation for deserializing settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsToml {
    #[serde(default)]
    quit: Option<QuitSettings>,

    #[serde(default)]
    easter_egg: Option<EasterEggSettings>,

    #[serde(default)]
    keymap: Option<KeymapSettings>,
}

impl Settings {
    /// Create settings with every default
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(&path)?;
        let mut settings = Self::from_toml(&content)?;
        settings.source_path = Some(path.as_ref().to_path_buf());
        Ok(settings)
    }

    /// Load settings from TOML string
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let toml_settings: SettingsToml =
            toml::from_str(content).map_err(|e| SettingsError::TomlParse(e.to_string()))?;

        let settings = Self {
            quit: toml_settings.quit.unwrap_or_default(),
            easter_egg: toml_settings.easter_egg.unwrap_or_default(),
            keymap: toml_settings.keymap.unwrap_or_default(),
            source_path: None,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Get the default settings path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("brutalmode").join("settings.toml"))
    }

    /// Load from default location (~/.config/brutalmode/settings.toml)
    pub fn load_default() -> Result<Self, SettingsError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_file(path);
            }
        }
        // Return default settings if file doesn't exist
        Ok(Self::new())
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.quit.ctrl_threshold == 0 {
            return Err(SettingsError::InvalidValue(
                "quit.ctrl_threshold must be at least 1".to_string(),
            ));
        }
        if self.quit.escape_presses == 0 {
            return Err(SettingsError::InvalidValue(
                "quit.escape_presses must be at least 1".to_string(),
            ));
        }
        if self.quit.escape_repeat_gap_ms == 0 {
            return Err(SettingsError::InvalidValue(
                "quit.escape_repeat_gap_ms must be at least 1".to_string(),
            ));
        }
        if self.easter_egg.capacity == 0 {
            return Err(SettingsError::InvalidValue(
                "easter_egg.capacity must be at least 1".to_string(),
            ));
        }
        if self.easter_egg.tolerance > MAX_EDIT_LEN {
            return Err(SettingsError::InvalidValue(format!(
                "easter_egg.tolerance must not exceed {}",
                MAX_EDIT_LEN
            )));
        }
        if !self.easter_egg.phrase.chars().any(|c| c.is_ascii_alphabetic()) {
            return Err(SettingsError::InvalidValue(format!(
                "easter_egg.phrase '{}' has no letters",
                self.easter_egg.phrase
            )));
        }
        Ok(())
    }

    /// Consecutive control combos that request a quit
    pub fn ctrl_threshold(&self) -> u32 {
        self.quit.ctrl_threshold
    }

    /// Escape gesture policy
    pub fn escape_policy(&self) -> EscapePolicy {
        match self.quit.escape_policy {
            EscapePolicyKind::Window => EscapePolicy::Window {
                presses: self.quit.escape_presses,
                window: Duration::from_millis(self.quit.escape_window_ms),
            },
            EscapePolicyKind::Hold => EscapePolicy::Hold {
                threshold: Duration::from_millis(self.quit.escape_hold_ms),
                repeat_gap: Duration::from_millis(self.quit.escape_repeat_gap_ms),
            },
        }
    }

    /// Escape phrase as written in the settings
    pub fn phrase(&self) -> &str {
        &self.easter_egg.phrase
    }

    /// Phrase acceptance policy
    pub fn phrase_policy(&self) -> PhrasePolicy {
        match self.easter_egg.policy {
            PhrasePolicyKind::Contains => PhrasePolicy::Contains,
            PhrasePolicyKind::EditDistance => PhrasePolicy::EditDistance {
                tolerance: self.easter_egg.tolerance,
            },
        }
    }

    /// Size of the rolling character buffer
    pub fn phrase_capacity(&self) -> usize {
        self.easter_egg.capacity
    }

    /// Seed source for the randomized keymap
    pub fn keymap_seed(&self) -> KeymapSeed {
        match self.keymap.seed {
            Some(seed) => KeymapSeed::Fixed(seed),
            None => KeymapSeed::Entropy,
        }
    }

    /// Pin the keymap seed (e.g. from a command-line flag)
    pub fn set_keymap_seed(&mut self, seed: Option<u64>) {
        self.keymap.seed = seed;
    }

    /// Path the settings were loaded from, if any
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }
}

/// Create default settings content for a new installation
pub fn default_settings_content() -> &'static str {
    r#"# Brutalmode Settings
# Place this file at: ~/.config/brutalmode/settings.toml
# The mode itself is chosen on the command line (--mode).

[quit]
# Consecutive Ctrl+X / Ctrl+C / Ctrl+Q presses that quit (lenient mode)
ctrl_threshold = 3
# "window": escape_presses presses within escape_window_ms
# "hold":   escape held for longer than escape_hold_ms; presses more than
#           escape_repeat_gap_ms apart mean the key was released
escape_policy = "window"
escape_presses = 3
escape_window_ms = 5000
escape_hold_ms = 5000
escape_repeat_gap_ms = 750

[easter_egg]
phrase = "fuck you let me out"
# "contains" or "edit_distance"
policy = "edit_distance"
tolerance = 5
capacity = 30

[keymap]
# Fixed seed for the randomized layout (omit for a fresh layout every run)
# seed = 42
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = Settings::new();
        assert_eq!(settings.ctrl_threshold(), 3);
        assert_eq!(
            settings.escape_policy(),
            EscapePolicy::Window {
                presses: 3,
                window: Duration::from_secs(5)
            }
        );
        assert_eq!(settings.phrase(), "fuck you let me out");
        assert_eq!(settings.phrase_policy(), PhrasePolicy::EditDistance { tolerance: 5 });
        assert_eq!(settings.phrase_capacity(), 30);
        assert_eq!(settings.keymap_seed(), KeymapSeed::Entropy);
    }

    #[test]
    fn test_default_content_matches_defaults() {
        let settings = Settings::from_toml(default_settings_content()).unwrap();
        let defaults = Settings::new();
        assert_eq!(settings.ctrl_threshold(), defaults.ctrl_threshold());
        assert_eq!(settings.escape_policy(), defaults.escape_policy());
        assert_eq!(settings.phrase(), defaults.phrase());
        assert_eq!(settings.phrase_policy(), defaults.phrase_policy());
        assert_eq!(settings.phrase_capacity(), defaults.phrase_capacity());
        assert_eq!(settings.keymap_seed(), defaults.keymap_seed());
    }

    #[test]
    fn test_settings_from_toml() {
        let toml = r#"
[quit]
escape_policy = "hold"
escape_hold_ms = 2500

[easter_egg]
policy = "contains"

[keymap]
seed = 1234
"#;

        let settings = Settings::from_toml(toml).unwrap();
        assert_eq!(
            settings.escape_policy(),
            EscapePolicy::Hold {
                threshold: Duration::from_millis(2500),
                repeat_gap: Duration::from_millis(750),
            }
        );
        assert_eq!(settings.phrase_policy(), PhrasePolicy::Contains);
        assert_eq!(settings.keymap_seed(), KeymapSeed::Fixed(1234));
        // Untouched values keep their defaults
        assert_eq!(settings.ctrl_threshold(), 3);
        assert_eq!(settings.phrase_capacity(), 30);
    }

    #[test]
    fn test_five_press_window() {
        let toml = r#"
[quit]
escape_presses = 5
escape_window_ms = 10000
"#;
        let settings = Settings::from_toml(toml).unwrap();
        assert_eq!(
            settings.escape_policy(),
            EscapePolicy::Window {
                presses: 5,
                window: Duration::from_secs(10)
            }
        );
    }

    #[test]
    fn test_invalid_values_rejected() {
        for toml in [
            "[quit]\nctrl_threshold = 0\n",
            "[quit]\nescape_presses = 0\n",
            "[quit]\nescape_repeat_gap_ms = 0\n",
            "[easter_egg]\ncapacity = 0\n",
            "[easter_egg]\ntolerance = 64\n",
            "[easter_egg]\nphrase = \"123 !!\"\n",
        ] {
            assert!(
                matches!(Settings::from_toml(toml), Err(SettingsError::InvalidValue(_))),
                "accepted: {toml}"
            );
        }
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Settings::from_toml("[quit]\nescape_policy = \"sometimes\"\n"),
            Err(SettingsError::TomlParse(_))
        ));
        assert!(matches!(
            Settings::from_toml("[quit]\nunknown_knob = 1\n"),
            Err(SettingsError::TomlParse(_))
        ));
        assert!(matches!(
            Settings::from_toml("mode = \"hardest\"\n"),
            Err(SettingsError::TomlParse(_))
        ));
    }

    #[test]
    fn test_set_keymap_seed() {
        let mut settings = Settings::new();
        settings.set_keymap_seed(Some(7));
        assert_eq!(settings.keymap_seed(), KeymapSeed::Fixed(7));
        settings.set_keymap_seed(None);
        assert_eq!(settings.keymap_seed(), KeymapSeed::Entropy);
    }

    #[test]
    fn test_source_path_recorded() {
        assert!(Settings::new().source_path().is_none());

        let path = std::env::temp_dir().join(format!("brutalmode-{}.toml", std::process::id()));
        std::fs::write(&path, "[quit]\nctrl_threshold = 4\n").unwrap();
        let settings = Settings::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.ctrl_threshold(), 4);
        assert_eq!(settings.source_path(), Some(path.as_path()));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            Settings::from_file("/nonexistent/brutalmode/settings.toml"),
            Err(SettingsError::Io(_))
        ));
    }
}
