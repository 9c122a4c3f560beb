//! Key mapping from terminal events and analog readings to input events.

use crate::types::InputEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Inclusive ADC reading ranges of the resistor-ladder keypad, per event
pub const ADC_KEY_RANGES: [(InputEvent, u16, u16); 4] = [
    (InputEvent::MoveLeft, 0, 5),
    (InputEvent::MoveRight, 500, 510),
    (InputEvent::SoftDrop, 324, 330),
    (InputEvent::Rotate, 735, 745),
];

/// Map keyboard input to input events.
///
/// Arrows, vi keys (hjkl) and WASD all work; rotation doubles as menu confirm.
pub fn handle_key_event(key: KeyEvent) -> InputEvent {
    match key.code {
        KeyCode::Left => InputEvent::MoveLeft,
        KeyCode::Right => InputEvent::MoveRight,
        KeyCode::Down => InputEvent::SoftDrop,
        KeyCode::Up | KeyCode::Enter => InputEvent::Rotate,
        KeyCode::Char(c) => char_event(c),
        _ => InputEvent::None,
    }
}

fn char_event(c: char) -> InputEvent {
    match c.to_ascii_lowercase() {
        'h' | 'a' => InputEvent::MoveLeft,
        'l' | 'd' => InputEvent::MoveRight,
        'j' | 's' => InputEvent::SoftDrop,
        'k' | 'w' | ' ' => InputEvent::Rotate,
        _ => InputEvent::None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Check if key should return to the menu.
pub fn should_restart(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R'))
}

/// Classify a 10-bit ADC reading from the analog keypad
pub fn classify_adc(reading: u16) -> InputEvent {
    ADC_KEY_RANGES
        .iter()
        .find(|&&(_, low, high)| (low..=high).contains(&reading))
        .map(|&(event, _, _)| event)
        .unwrap_or(InputEvent::None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> InputEvent {
        handle_key_event(KeyEvent::from(code))
    }

    #[test]
    fn test_every_layout_maps_the_same() {
        let layouts = [
            (KeyCode::Left, KeyCode::Char('h'), KeyCode::Char('A'), InputEvent::MoveLeft),
            (KeyCode::Right, KeyCode::Char('L'), KeyCode::Char('d'), InputEvent::MoveRight),
            (KeyCode::Down, KeyCode::Char('j'), KeyCode::Char('S'), InputEvent::SoftDrop),
            (KeyCode::Up, KeyCode::Char('K'), KeyCode::Char('w'), InputEvent::Rotate),
        ];
        for (arrow, vi, wasd, expected) in layouts {
            assert_eq!(key(arrow), expected);
            assert_eq!(key(vi), expected);
            assert_eq!(key(wasd), expected);
        }
    }

    #[test]
    fn test_confirm_keys_rotate() {
        assert_eq!(key(KeyCode::Enter), InputEvent::Rotate);
        assert_eq!(key(KeyCode::Char(' ')), InputEvent::Rotate);
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(key(KeyCode::Char('x')), InputEvent::None);
        assert_eq!(key(KeyCode::Tab), InputEvent::None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }

    #[test]
    fn test_restart_keys() {
        assert!(should_restart(KeyEvent::from(KeyCode::Char('r'))));
        assert!(!should_restart(KeyEvent::from(KeyCode::Char('q'))));
    }

    #[test]
    fn test_classify_adc() {
        assert_eq!(classify_adc(0), InputEvent::MoveLeft);
        assert_eq!(classify_adc(5), InputEvent::MoveLeft);
        assert_eq!(classify_adc(6), InputEvent::None);
        assert_eq!(classify_adc(505), InputEvent::MoveRight);
        assert_eq!(classify_adc(324), InputEvent::SoftDrop);
        assert_eq!(classify_adc(330), InputEvent::SoftDrop);
        assert_eq!(classify_adc(740), InputEvent::Rotate);
        assert_eq!(classify_adc(746), InputEvent::None);
        assert_eq!(classify_adc(1023), InputEvent::None);
    }
}
