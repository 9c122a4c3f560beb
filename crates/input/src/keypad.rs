//! Debounce and hold-to-repeat policy for a single-key keypad.
//!
//! The keypad is sampled once per tick with whatever key is currently down. A key
//! must be seen for a number of consecutive samples before it counts; the first
//! accepted sample fires immediately, then a held key repeats after a wait that
//! shrinks with every repeat:
//!
//! | Repeat | Wait before it (default config) |
//! |--------|---------------------------------|
//! | 1st    | 300 ms                          |
//! | 2nd    | 230 ms                          |
//! | 3rd    | 160 ms                          |
//! | 4th    | 90 ms                           |
//! | 5th+   | 20 ms                           |
//!
//! Releasing the key (or [`Keypad::reset`]) restores the defaults.

use crate::types::{InputEvent, DEBOUNCE_SAMPLES, MAX_REPEAT_WAIT_MS, REPEAT_WAIT_STEP_MS};

/// Debounce and repeat parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeypadConfig {
    /// Consecutive samples a key must be seen before it fires
    pub debounce_samples: u32,
    /// Wait before the first repeat
    pub max_repeat_wait_ms: u32,
    /// How much the wait shrinks per repeat (while the wait is at least this big)
    pub repeat_wait_step_ms: u32,
}

impl Default for KeypadConfig {
    fn default() -> Self {
        Self {
            debounce_samples: DEBOUNCE_SAMPLES,
            max_repeat_wait_ms: MAX_REPEAT_WAIT_MS,
            repeat_wait_step_ms: REPEAT_WAIT_STEP_MS,
        }
    }
}

/// Turns raw key-down samples into discrete input events
#[derive(Debug, Clone)]
pub struct Keypad {
    config: KeypadConfig,
    held: InputEvent,
    samples: u32,
    /// Time the last event for `held` fired, once it has fired at all
    fired_at_ms: Option<u64>,
    wait_ms: u32,
}

impl Keypad {
    pub fn new() -> Self {
        Self::with_config(KeypadConfig::default())
    }

    pub fn with_config(config: KeypadConfig) -> Self {
        Self {
            config,
            held: InputEvent::None,
            samples: 0,
            fired_at_ms: None,
            wait_ms: config.max_repeat_wait_ms,
        }
    }

    /// Current wait before the next repeat of a held key
    pub fn repeat_wait_ms(&self) -> u32 {
        self.wait_ms
    }

    /// Feed one sample of the key currently down
    pub fn sample(&mut self, down: InputEvent, now_ms: u64) -> InputEvent {
        if down == InputEvent::None {
            self.reset();
            return InputEvent::None;
        }
        if down != self.held {
            // A different key counts as release + press.
            self.reset();
            self.held = down;
        }

        self.samples = self.samples.saturating_add(1);
        if self.samples < self.config.debounce_samples {
            return InputEvent::None;
        }

        let Some(fired_at) = self.fired_at_ms else {
            self.fired_at_ms = Some(now_ms);
            return down;
        };

        if now_ms > fired_at + u64::from(self.wait_ms) {
            self.fired_at_ms = Some(now_ms);
            if self.wait_ms >= self.config.repeat_wait_step_ms {
                self.wait_ms -= self.config.repeat_wait_step_ms;
            }
            return down;
        }

        InputEvent::None
    }

    /// Forget the held key and restore the repeat defaults
    pub fn reset(&mut self) {
        self.held = InputEvent::None;
        self.samples = 0;
        self.fired_at_ms = None;
        self.wait_ms = self.config.max_repeat_wait_ms;
    }
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}
