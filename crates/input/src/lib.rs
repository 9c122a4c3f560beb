//! Input module (engine-facing).
//!
//! Independent of any UI framework. Maps `crossterm` key events and analog keypad
//! readings into [`crate::types::InputEvent`], and provides the debounce and
//! hold-to-repeat policy behind every [`crate::types::InputSource`] in the
//! workspace, including terminals without key-release events.

pub mod keypad;
pub mod map;
pub mod terminal;

pub use mini_tetris_types as types;

pub use keypad::{Keypad, KeypadConfig};
pub use map::{classify_adc, handle_key_event, should_quit, should_restart};
pub use terminal::TerminalKeypad;
