// Brutalmode Mode State
// Per-session context: active mode, generated keymap and detector state

use std::time::Instant;

use crate::banner::banner;
use crate::easter_egg::EasterEggMatcher;
use crate::host::{EditorHost, HostError, HostFlags};
use crate::input;
use crate::keymap::{generate, KeyGroups, Keymap};
use crate::quit::{QuitReason, QuitSequenceDetector};
use crate::settings::Settings;
use crate::{Key, Mode};

/// Editor commands run when the lenient mode starts (shift-selection)
pub const LENIENT_ENTRY_COMMANDS: [&str; 2] =
    ["set keymodel=startsel,stopsel", "set selectmode=key"];

/// What the host should do with one keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Drop the key
    Blocked,
    /// Dispatch this key (possibly rewritten)
    Forward(Key),
    /// Terminate unconditionally, bypassing quit refusal
    QuitRequested(QuitReason),
}

/// Session context for the difficulty overlay.
///
/// Created once at startup and owned by the input loop. All mutation happens
/// through `&mut self` on that single thread; independent instances never
/// share state.
#[derive(Debug, Clone)]
pub struct ModeState {
    mode: Mode,
    groups: KeyGroups,
    keymap: Keymap,
    keymap_seed: Option<u64>,
    quit: QuitSequenceDetector,
    phrase: EasterEggMatcher,
    /// `phrase.recorded()` when the phrase was last reported
    phrase_reported_at: Option<u64>,
}

impl ModeState {
    /// Create the context with the standard key groups
    pub fn new(mode: Mode, settings: &Settings) -> Self {
        Self::with_groups(mode, settings, KeyGroups::standard())
    }

    /// Create the context with a custom group table
    pub fn with_groups(mode: Mode, settings: &Settings, groups: KeyGroups) -> Self {
        let (keymap, keymap_seed) = if mode == Mode::Randomized {
            let seed = settings.keymap_seed().resolve();
            (generate(&groups, seed), Some(seed))
        } else {
            (Keymap::identity(), None)
        };

        Self {
            mode,
            groups,
            keymap,
            keymap_seed,
            quit: QuitSequenceDetector::new(settings.ctrl_threshold(), settings.escape_policy()),
            phrase: EasterEggMatcher::new(
                settings.phrase(),
                settings.phrase_capacity(),
                settings.phrase_policy(),
            ),
            phrase_reported_at: None,
        }
    }

    /// Run the mode's entry side effects on the host
    pub fn activate(&self, host: &mut dyn EditorHost) -> Result<(), HostError> {
        if self.mode == Mode::Lenient {
            for command in LENIENT_ENTRY_COMMANDS {
                log::debug!("Running mode entry command: {}", command);
                host.run_command(command)?;
            }
        }
        Ok(())
    }

    /// Print the startup banner (nothing when disabled)
    pub fn show_banner(&self, host: &mut dyn EditorHost) {
        if let Some(text) = banner(self.mode, &self.quit, self.phrase.phrase()) {
            host.show_message(&text);
        }
    }

    /// Run one keystroke through the overlay.
    ///
    /// In the lenient mode the raw key first feeds the quit gestures and the
    /// escape phrase; then the key is blocked, or rewritten (shortcut, then
    /// keymap) and forwarded.
    pub fn process_key(&mut self, key: Key, now: Instant, flags: HostFlags) -> KeyOutcome {
        if !self.mode.is_enabled() {
            return KeyOutcome::Forward(key);
        }

        if self.mode == Mode::Lenient {
            if let Some(reason) = self.quit.on_key(key, now) {
                return KeyOutcome::QuitRequested(reason);
            }

            if let Some(c) = key.printable() {
                self.phrase.record(c);
                if self.take_phrase_match() {
                    return KeyOutcome::QuitRequested(QuitReason::EasterEgg);
                }
            }
        }

        if input::should_block(self.mode, key, flags) {
            log::trace!("Blocked {} in {} mode", key, self.mode);
            return KeyOutcome::Blocked;
        }

        let shortcut = input::apply_shortcut(self.mode, key);
        let remapped = input::remap(self.mode, &self.keymap, shortcut);
        if remapped != key {
            log::trace!("Rewrote {} -> {}", key, remapped);
        }
        KeyOutcome::Forward(remapped)
    }

    /// Re-check time-based gestures while the keyboard is idle
    pub fn poll_idle(&mut self, now: Instant) -> Option<QuitReason> {
        if self.mode != Mode::Lenient {
            return None;
        }
        self.quit.poll(now)
    }

    /// Check if a quit command must be refused
    pub fn quit_should_be_blocked(&self, force: bool, flags: HostFlags) -> bool {
        input::quit_should_be_blocked(self.mode, force, flags)
    }

    /// Report a phrase match once; the same occurrence is not reported again
    /// until the buffer has been refilled with new characters.
    fn take_phrase_match(&mut self) -> bool {
        if !self.phrase.check() {
            return false;
        }

        let recorded = self.phrase.recorded();
        if let Some(at) = self.phrase_reported_at {
            if recorded < at + self.phrase.capacity() as u64 {
                return false;
            }
        }

        log::debug!("Escape phrase typed ({:?}); requesting quit", self.phrase.contents());
        self.phrase_reported_at = Some(recorded);
        true
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// Seed used for the randomized keymap, if one was generated
    pub fn keymap_seed(&self) -> Option<u64> {
        self.keymap_seed
    }

    pub fn groups(&self) -> &KeyGroups {
        &self.groups
    }

    pub fn phrase_matcher(&self) -> &EasterEggMatcher {
        &self.phrase
    }
}
