use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Logical key token consumed by the session state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum Key {
    Backspace,
    Space,
    Char(char),
    /// Modifiers, function keys, named keys like Enter. Always ignored.
    Other,
}

impl Key {
    /// Decode a logical key name such as `"Backspace"`, `" "` or `"a"`.
    pub fn from_token(token: &str) -> Self {
        if token == "Backspace" {
            return Key::Backspace;
        }

        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(' '), None) => Key::Space,
            (Some(c), None) if !c.is_control() => Key::Char(c),
            _ => Key::Other,
        }
    }
}

impl From<KeyEvent> for Key {
    fn from(key: KeyEvent) -> Self {
        if key.kind == KeyEventKind::Release {
            return Key::Other;
        }

        match key.code {
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Char(' ') => Key::Space,
            KeyCode::Char(_)
                if key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Key::Other
            }
            KeyCode::Char(c) if !c.is_control() => Key::Char(c),
            _ => Key::Other,
        }
    }
}
