use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

/// Keyboard key identifier.
///
/// Covers the keys overlay shortcuts bind to. Everything else maps to
/// `Unknown` with the platform key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Space,
    Minus,
    Equal,
    BracketLeft,
    BracketRight,

    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digits
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    /// Platform-dependent key not represented here.
    Unknown(u32),
}

impl Key {
    /// Numeric value of a digit key.
    pub fn digit(self) -> Option<u8> {
        Some(match self {
            Key::Digit0 => 0,
            Key::Digit1 => 1,
            Key::Digit2 => 2,
            Key::Digit3 => 3,
            Key::Digit4 => 4,
            Key::Digit5 => 5,
            Key::Digit6 => 6,
            Key::Digit7 => 7,
            Key::Digit8 => 8,
            Key::Digit9 => 9,
            _ => return None,
        })
    }
}

/// Modifier keys state.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        if cfg!(target_os = "macos") { self.meta } else { self.ctrl }
    }
}

impl From<ModifiersState> for Modifiers {
    fn from(m: ModifiersState) -> Self {
        Self {
            shift: m.shift_key(),
            ctrl: m.control_key(),
            alt: m.alt_key(),
            meta: m.super_key(),
        }
    }
}

/// Maps a physical key to [`Key`].
pub fn map_key(pk: PhysicalKey) -> Key {
    let PhysicalKey::Code(code) = pk else {
        return Key::Unknown(0);
    };
    match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Space => Key::Space,
        KeyCode::Minus => Key::Minus,
        KeyCode::Equal => Key::Equal,
        KeyCode::BracketLeft => Key::BracketLeft,
        KeyCode::BracketRight => Key::BracketRight,

        KeyCode::KeyA => Key::A,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyH => Key::H,
        KeyCode::KeyI => Key::I,
        KeyCode::KeyJ => Key::J,
        KeyCode::KeyK => Key::K,
        KeyCode::KeyL => Key::L,
        KeyCode::KeyM => Key::M,
        KeyCode::KeyN => Key::N,
        KeyCode::KeyO => Key::O,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyU => Key::U,
        KeyCode::KeyV => Key::V,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,

        KeyCode::Digit0 | KeyCode::Numpad0 => Key::Digit0,
        KeyCode::Digit1 | KeyCode::Numpad1 => Key::Digit1,
        KeyCode::Digit2 | KeyCode::Numpad2 => Key::Digit2,
        KeyCode::Digit3 | KeyCode::Numpad3 => Key::Digit3,
        KeyCode::Digit4 | KeyCode::Numpad4 => Key::Digit4,
        KeyCode::Digit5 | KeyCode::Numpad5 => Key::Digit5,
        KeyCode::Digit6 | KeyCode::Numpad6 => Key::Digit6,
        KeyCode::Digit7 | KeyCode::Numpad7 => Key::Digit7,
        KeyCode::Digit8 | KeyCode::Numpad8 => Key::Digit8,
        KeyCode::Digit9 | KeyCode::Numpad9 => Key::Digit9,

        other => Key::Unknown(other as u32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_shortcut_keys() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyU)), Key::U);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::BracketLeft)), Key::BracketLeft);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Numpad3)), Key::Digit3);
        assert!(matches!(map_key(PhysicalKey::Code(KeyCode::F5)), Key::Unknown(_)));
    }

    #[test]
    fn digit_values() {
        assert_eq!(Key::Digit4.digit(), Some(4));
        assert_eq!(Key::A.digit(), None);
    }

    #[test]
    fn modifiers_from_winit_state() {
        let m = Modifiers::from(ModifiersState::CONTROL | ModifiersState::SHIFT);
        assert!(m.ctrl && m.shift && !m.alt && !m.meta);
        assert!(m.any());
        assert!(!Modifiers::default().any());
    }
}
