//! Keyboard bindings.

use crossterm::event::KeyCode;
use game_core::Orientation;

/// Command bound to a key outside of chat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum KeyBinding {
    Direction(Orientation),
    ToggleChat,
    OpenWarp,
}

pub(crate) fn binding(code: KeyCode) -> Option<KeyBinding> {
    match code {
        KeyCode::Char(ch) => char_binding(ch),
        KeyCode::Left => Some(KeyBinding::Direction(Orientation::Left)),
        KeyCode::Right => Some(KeyBinding::Direction(Orientation::Right)),
        KeyCode::Up => Some(KeyBinding::Direction(Orientation::Up)),
        KeyCode::Down => Some(KeyBinding::Direction(Orientation::Down)),
        KeyCode::Enter => Some(KeyBinding::ToggleChat),
        _ => None,
    }
}

fn char_binding(raw: char) -> Option<KeyBinding> {
    match raw.to_ascii_lowercase() {
        'a' => Some(KeyBinding::Direction(Orientation::Left)),
        'd' => Some(KeyBinding::Direction(Orientation::Right)),
        'w' => Some(KeyBinding::Direction(Orientation::Up)),
        's' => Some(KeyBinding::Direction(Orientation::Down)),
        '1' => Some(KeyBinding::OpenWarp),
        _ => None,
    }
}

pub(crate) fn direction(code: KeyCode) -> Option<Orientation> {
    match binding(code)? {
        KeyBinding::Direction(orientation) => Some(orientation),
        KeyBinding::ToggleChat | KeyBinding::OpenWarp => None,
    }
}
