//! Terminal-backed [`InputSource`].
//!
//! Terminals report key presses (and OS auto-repeat) but usually no releases, so a
//! key counts as held until either a release event arrives or no event for it was
//! seen for the key release timeout. The held key is then fed through a [`Keypad`]
//! once per poll, exactly like a sampled hardware keypad.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::keypad::{Keypad, KeypadConfig};
use crate::map::{handle_key_event, should_quit, should_restart};
use crate::types::{InputEvent, InputSource};

// In terminals without key-release events, a short timeout prevents a single tap
// from turning into a sustained "held" state that triggers repeats.
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

pub struct TerminalKeypad {
    keypad: Keypad,
    down: InputEvent,
    last_key_time: Instant,
    epoch: Instant,
    key_release_timeout_ms: u32,
    quit: bool,
    restart: bool,
}

impl TerminalKeypad {
    pub fn new() -> Self {
        Self::with_config(KeypadConfig::default())
    }

    pub fn with_config(config: KeypadConfig) -> Self {
        let now = Instant::now();
        Self {
            keypad: Keypad::with_config(config),
            down: InputEvent::None,
            last_key_time: now,
            epoch: now,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            quit: false,
            restart: false,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// Drain every pending terminal event without blocking
    pub fn pump(&mut self) -> Result<()> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key, Instant::now());
            }
        }
        Ok(())
    }

    /// Record one key event observed at `at`
    pub fn handle_key(&mut self, key: KeyEvent, at: Instant) {
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if should_quit(key) {
                    self.quit = true;
                    return;
                }
                if should_restart(key) {
                    self.restart = true;
                    return;
                }
                let event = handle_key_event(key);
                if event != InputEvent::None {
                    self.down = event;
                    self.last_key_time = at;
                }
            }
            KeyEventKind::Release => {
                if handle_key_event(key) == self.down {
                    self.down = InputEvent::None;
                }
            }
        }
    }

    /// Key considered held at `now`, applying the release timeout
    pub fn key_down(&mut self, now: Instant) -> InputEvent {
        let held_for = now.saturating_duration_since(self.last_key_time);
        if held_for > Duration::from_millis(u64::from(self.key_release_timeout_ms)) {
            self.down = InputEvent::None;
        }
        self.down
    }

    /// Sample the keypad at `now`
    pub fn poll_at(&mut self, now: Instant) -> InputEvent {
        let down = self.key_down(now);
        let now_ms = now.saturating_duration_since(self.epoch).as_millis() as u64;
        self.keypad.sample(down, now_ms)
    }

    /// Whether a quit key was pressed since the last call
    pub fn take_quit(&mut self) -> bool {
        std::mem::take(&mut self.quit)
    }

    /// Whether a restart key was pressed since the last call
    pub fn take_restart(&mut self) -> bool {
        std::mem::take(&mut self.restart)
    }
}

impl Default for TerminalKeypad {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for TerminalKeypad {
    fn poll(&mut self) -> InputEvent {
        self.poll_at(Instant::now())
    }

    fn reset_repeat(&mut self) {
        self.keypad.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        }
    }

    fn instant_keypad() -> TerminalKeypad {
        TerminalKeypad::with_config(KeypadConfig {
            debounce_samples: 1,
            ..KeypadConfig::default()
        })
    }

    #[test]
    fn test_press_fires_on_next_poll() {
        let mut keys = instant_keypad();
        let t0 = Instant::now();
        keys.handle_key(press(KeyCode::Left), t0);
        assert_eq!(keys.poll_at(t0), InputEvent::MoveLeft);
        // Held, but the repeat wait has not elapsed.
        assert_eq!(keys.poll_at(t0 + Duration::from_millis(10)), InputEvent::None);
    }

    #[test]
    fn test_auto_release_after_timeout() {
        let mut keys = instant_keypad().with_key_release_timeout_ms(50);
        let t0 = Instant::now();
        keys.handle_key(press(KeyCode::Down), t0);
        assert_eq!(keys.key_down(t0 + Duration::from_millis(50)), InputEvent::SoftDrop);
        assert_eq!(keys.key_down(t0 + Duration::from_millis(51)), InputEvent::None);
    }

    #[test]
    fn test_release_event_clears_held_key() {
        let mut keys = instant_keypad();
        let t0 = Instant::now();
        keys.handle_key(press(KeyCode::Right), t0);
        keys.handle_key(release(KeyCode::Left), t0);
        assert_eq!(keys.key_down(t0), InputEvent::MoveRight);
        keys.handle_key(release(KeyCode::Right), t0);
        assert_eq!(keys.key_down(t0), InputEvent::None);
    }

    #[test]
    fn test_quit_and_restart_flags() {
        let mut keys = instant_keypad();
        let t0 = Instant::now();
        keys.handle_key(press(KeyCode::Char('q')), t0);
        keys.handle_key(press(KeyCode::Char('r')), t0);
        assert!(keys.take_quit());
        assert!(!keys.take_quit());
        assert!(keys.take_restart());
        assert_eq!(keys.key_down(t0), InputEvent::None);
    }

    #[test]
    fn test_default_key_release_timeout_is_non_zero() {
        let keys = TerminalKeypad::new();
        assert!(keys.key_release_timeout_ms() > 0);
    }

    #[test]
    fn test_reset_repeat_rearms_keypad() {
        let mut keys = instant_keypad();
        let t0 = Instant::now();
        keys.handle_key(press(KeyCode::Up), t0);
        assert_eq!(keys.poll_at(t0), InputEvent::Rotate);
        keys.reset_repeat();
        assert_eq!(keys.poll_at(t0 + Duration::from_millis(1)), InputEvent::Rotate);
    }
}
