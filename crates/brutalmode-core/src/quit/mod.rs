// Brutalmode Quit Gestures
// Keystroke patterns that request an unconditional exit

mod ctrl_count;
mod escape;

pub use ctrl_count::{is_quit_combo, CtrlQuitCounter, DEFAULT_CTRL_THRESHOLD};
pub use escape::{
    EscapeDetector, EscapePolicy, DEFAULT_ESCAPE_HOLD, DEFAULT_ESCAPE_PRESSES,
    DEFAULT_ESCAPE_WINDOW, DEFAULT_HOLD_REPEAT_GAP,
};

use std::fmt;
use std::time::Instant;

use crate::Key;

/// Why a quit was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuitReason {
    /// Repeated Ctrl+X / Ctrl+C / Ctrl+Q
    CtrlSequence,
    /// Several escape presses inside the window
    EscapeRepeat,
    /// Escape held past the threshold
    EscapeHold,
    /// The escape phrase was typed
    EasterEgg,
}

impl fmt::Display for QuitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuitReason::CtrlSequence => write!(f, "repeated control-key quit sequence"),
            QuitReason::EscapeRepeat => write!(f, "repeated escape"),
            QuitReason::EscapeHold => write!(f, "escape held down"),
            QuitReason::EasterEgg => write!(f, "escape phrase typed"),
        }
    }
}

/// Both quit gestures side by side. They share no state.
#[derive(Debug, Clone, Default)]
pub struct QuitSequenceDetector {
    ctrl: CtrlQuitCounter,
    escape: EscapeDetector,
}

impl QuitSequenceDetector {
    pub fn new(ctrl_threshold: u32, escape_policy: EscapePolicy) -> Self {
        Self {
            ctrl: CtrlQuitCounter::new(ctrl_threshold),
            escape: EscapeDetector::new(escape_policy),
        }
    }

    /// Feed one raw keystroke to both gestures.
    pub fn on_key(&mut self, key: Key, now: Instant) -> Option<QuitReason> {
        let ctrl_fired = self.ctrl.on_key(key);
        let escape_fired = self.escape.on_key(key, now);

        if ctrl_fired {
            self.ctrl.reset();
            log::debug!("Quit gesture: {}", QuitReason::CtrlSequence);
            return Some(QuitReason::CtrlSequence);
        }
        if escape_fired {
            let reason = self.escape_reason();
            log::debug!("Quit gesture: {}", reason);
            return Some(reason);
        }
        None
    }

    /// Re-evaluate time-based gestures while no key arrives.
    pub fn poll(&mut self, now: Instant) -> Option<QuitReason> {
        self.escape.poll(now).then(|| self.escape_reason())
    }

    pub fn ctrl(&self) -> &CtrlQuitCounter {
        &self.ctrl
    }

    pub fn escape(&self) -> &EscapeDetector {
        &self.escape
    }

    fn escape_reason(&self) -> QuitReason {
        match self.escape.policy() {
            EscapePolicy::Window { .. } => QuitReason::EscapeRepeat,
            EscapePolicy::Hold { .. } => QuitReason::EscapeHold,
        }
    }
}
