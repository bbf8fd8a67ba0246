use crate::Key;

/// Consecutive presses needed by default
pub const DEFAULT_CTRL_THRESHOLD: u32 = 3;

/// Check if a key is one of the "get me out" control combos (Ctrl+X, Ctrl+C, Ctrl+Q).
pub fn is_quit_combo(key: Key) -> bool {
    matches!(key, Key::CTRL_X | Key::CTRL_C | Key::CTRL_Q)
}

/// Counts consecutive quit combos. Any other key starts the count over.
#[derive(Debug, Clone)]
pub struct CtrlQuitCounter {
    count: u32,
    threshold: u32,
}

impl Default for CtrlQuitCounter {
    fn default() -> Self {
        Self::new(DEFAULT_CTRL_THRESHOLD)
    }
}

impl CtrlQuitCounter {
    pub fn new(threshold: u32) -> Self {
        Self {
            count: 0,
            threshold: threshold.max(1),
        }
    }

    /// Feed one keystroke; returns true once the threshold is reached.
    ///
    /// The counter keeps its value after firing; the caller resets it.
    pub fn on_key(&mut self, key: Key) -> bool {
        if !is_quit_combo(key) {
            self.count = 0;
            return false;
        }

        self.count = self.count.saturating_add(1);
        self.count >= self.threshold
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }
}
