use std::time::{Duration, Instant};

use smallvec::SmallVec;

use crate::Key;

/// Escape presses the window policy needs by default
pub const DEFAULT_ESCAPE_PRESSES: usize = 3;

/// Window the presses must fall into by default
pub const DEFAULT_ESCAPE_WINDOW: Duration = Duration::from_secs(5);

/// Hold time the hold policy needs by default
pub const DEFAULT_ESCAPE_HOLD: Duration = Duration::from_secs(5);

/// Longest pause between auto-repeated escapes that still counts as one hold.
/// Covers the keyboard's initial repeat delay; a longer gap means the key was released.
pub const DEFAULT_HOLD_REPEAT_GAP: Duration = Duration::from_millis(750);

/// How repeated escape presses turn into a quit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapePolicy {
    /// `presses` escape presses with the oldest no more than `window` ago
    Window { presses: usize, window: Duration },
    /// Escape kept down (auto-repeating) for longer than `threshold`.
    /// Presses further apart than `repeat_gap` are separate taps, not a hold.
    Hold {
        threshold: Duration,
        repeat_gap: Duration,
    },
}

impl Default for EscapePolicy {
    fn default() -> Self {
        EscapePolicy::Window {
            presses: DEFAULT_ESCAPE_PRESSES,
            window: DEFAULT_ESCAPE_WINDOW,
        }
    }
}

/// Escape-key timing detector.
///
/// Time is passed in by the caller; nothing here reads the clock or runs in
/// the background, so a hold is only noticed on the next keystroke or
/// `poll`.
#[derive(Debug, Clone)]
pub struct EscapeDetector {
    policy: EscapePolicy,
    /// Ring of press timestamps; once full, `oldest` indexes the next slot to overwrite
    presses: SmallVec<[Instant; 8]>,
    oldest: usize,
    /// First press of the current unbroken escape run
    hold_start: Option<Instant>,
    /// Latest press of that run
    last_press: Option<Instant>,
}

impl Default for EscapeDetector {
    fn default() -> Self {
        Self::new(EscapePolicy::default())
    }
}

impl EscapeDetector {
    pub fn new(policy: EscapePolicy) -> Self {
        let policy = match policy {
            EscapePolicy::Window { presses, window } => EscapePolicy::Window {
                presses: presses.max(1),
                window,
            },
            hold => hold,
        };
        Self {
            policy,
            presses: SmallVec::new(),
            oldest: 0,
            hold_start: None,
            last_press: None,
        }
    }

    pub fn policy(&self) -> EscapePolicy {
        self.policy
    }

    /// Feed one keystroke. Any key but escape ends a hold run.
    pub fn on_key(&mut self, key: Key, now: Instant) -> bool {
        if key == Key::ESC {
            self.on_escape(now)
        } else {
            self.end_hold();
            false
        }
    }

    /// Record an escape press and report whether the gesture completed.
    pub fn on_escape(&mut self, now: Instant) -> bool {
        let fired = match self.policy {
            EscapePolicy::Window { presses, window } => {
                self.record_press(now, presses);
                self.window_satisfied(now, presses, window)
            }
            EscapePolicy::Hold {
                threshold,
                repeat_gap,
            } => {
                if !self.hold_active(now, repeat_gap) {
                    self.hold_start = Some(now);
                }
                self.last_press = Some(now);
                self.held_longer_than(now, threshold)
            }
        };

        if fired {
            self.clear();
        }
        fired
    }

    /// Re-evaluate a hold in progress without a new keystroke.
    ///
    /// Fires only while repeats are still arriving; once the gap since the
    /// last press exceeds the repeat gap the key was released and the run ends.
    pub fn poll(&mut self, now: Instant) -> bool {
        let EscapePolicy::Hold {
            threshold,
            repeat_gap,
        } = self.policy
        else {
            return false;
        };

        if !self.hold_active(now, repeat_gap) {
            self.end_hold();
            return false;
        }
        let fired = self.held_longer_than(now, threshold);

        if fired {
            self.clear();
        }
        fired
    }

    /// Forget every recorded press
    pub fn clear(&mut self) {
        self.presses.clear();
        self.oldest = 0;
        self.end_hold();
    }

    /// Number of presses currently held in the ring
    pub fn recorded(&self) -> usize {
        self.presses.len()
    }

    fn end_hold(&mut self) {
        self.hold_start = None;
        self.last_press = None;
    }

    /// True when a run is in progress and its last press is within `repeat_gap`
    fn hold_active(&self, now: Instant, repeat_gap: Duration) -> bool {
        self.last_press
            .is_some_and(|last| now.saturating_duration_since(last) <= repeat_gap)
    }

    fn held_longer_than(&self, now: Instant, threshold: Duration) -> bool {
        self.hold_start
            .is_some_and(|start| now.saturating_duration_since(start) > threshold)
    }

    fn record_press(&mut self, now: Instant, capacity: usize) {
        if self.presses.len() < capacity {
            self.presses.push(now);
        } else {
            self.presses[self.oldest] = now;
            self.oldest = (self.oldest + 1) % capacity;
        }
    }

    fn window_satisfied(&self, now: Instant, capacity: usize, window: Duration) -> bool {
        if self.presses.len() < capacity {
            return false;
        }
        let oldest = self.presses[self.oldest];
        now.saturating_duration_since(oldest) <= window
    }
}
