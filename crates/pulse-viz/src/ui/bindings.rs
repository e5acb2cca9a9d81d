//! Keyboard bindings and input handling.
//!
//! Centralizes all keyboard shortcuts and key mapping logic.

use nannou::prelude::*;

use crate::engine::Command;

/// Actions that can be triggered by key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Open audio and leave the idle screen
    Start,
    Engine(Command),
}

/// Mode number bound to a digit key
fn mode_number(key: Key) -> Option<usize> {
    match key {
        Key::Key1 | Key::Numpad1 => Some(1),
        Key::Key2 | Key::Numpad2 => Some(2),
        Key::Key3 | Key::Numpad3 => Some(3),
        Key::Key4 | Key::Numpad4 => Some(4),
        Key::Key5 | Key::Numpad5 => Some(5),
        Key::Key6 | Key::Numpad6 => Some(6),
        _ => None,
    }
}

/// Parse a key into an action; `Return` only starts while idle
pub fn parse_key(key: Key, running: bool) -> Option<Action> {
    // Global quit key
    if key == Key::Q {
        return Some(Action::Quit);
    }

    if !running {
        return match key {
            Key::Return | Key::NumpadEnter => Some(Action::Start),
            _ => None,
        };
    }

    match key {
        Key::Space => Some(Action::Engine(Command::NextMode)),
        Key::C => Some(Action::Engine(Command::NextScheme)),
        _ => mode_number(key).map(|n| Action::Engine(Command::SelectMode(n))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_always_available() {
        assert_eq!(parse_key(Key::Q, false), Some(Action::Quit));
        assert_eq!(parse_key(Key::Q, true), Some(Action::Quit));
    }

    #[test]
    fn test_idle_only_starts() {
        assert_eq!(parse_key(Key::Return, false), Some(Action::Start));
        assert_eq!(parse_key(Key::Space, false), None);
        assert_eq!(parse_key(Key::Key3, false), None);
    }

    #[test]
    fn test_running_commands() {
        assert_eq!(
            parse_key(Key::Space, true),
            Some(Action::Engine(Command::NextMode))
        );
        assert_eq!(
            parse_key(Key::C, true),
            Some(Action::Engine(Command::NextScheme))
        );
        assert_eq!(
            parse_key(Key::Key4, true),
            Some(Action::Engine(Command::SelectMode(4)))
        );
        assert_eq!(parse_key(Key::Key7, true), None);
        assert_eq!(parse_key(Key::Return, true), None);
    }
}
