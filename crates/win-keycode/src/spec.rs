//! Key spec strings: the textual key names accepted in hotkey descriptors.

use crate::Key;

/// Keys whose canonical spec is a symbol rather than a name. Matched exactly.
const SYMBOLS: &[(Key, &str)] = &[
    (Key::Digit0, "0"),
    (Key::Digit1, "1"),
    (Key::Digit2, "2"),
    (Key::Digit3, "3"),
    (Key::Digit4, "4"),
    (Key::Digit5, "5"),
    (Key::Digit6, "6"),
    (Key::Digit7, "7"),
    (Key::Digit8, "8"),
    (Key::Digit9, "9"),
    (Key::Minus, "-"),
    (Key::Equal, "="),
    (Key::LeftBracket, "["),
    (Key::RightBracket, "]"),
    (Key::Backslash, "\\"),
    (Key::Semicolon, ";"),
    (Key::Quote, "'"),
    (Key::Comma, ","),
    (Key::Period, "."),
    (Key::Slash, "/"),
    (Key::Grave, "`"),
];

/// Extra words accepted when parsing, never emitted. Matched case-insensitively.
/// Mostly the Win32 `VK_*` suffixes and the usual abbreviations.
const ALIASES: &[(Key, &str)] = &[
    (Key::Control, "ctrl"),
    (Key::Control, "lctrl"),
    (Key::RightControl, "rctrl"),
    (Key::Alt, "menu"),
    (Key::Alt, "lalt"),
    (Key::RightAlt, "ralt"),
    (Key::Shift, "lshift"),
    (Key::RightShift, "rshift"),
    (Key::LeftWindows, "win"),
    (Key::LeftWindows, "lwin"),
    (Key::RightWindows, "rwin"),
    (Key::CapsLock, "caps"),
    (Key::CapsLock, "capital"),
    (Key::Return, "enter"),
    (Key::Return, "ret"),
    (Key::Backspace, "back"),
    (Key::Delete, "del"),
    (Key::Insert, "ins"),
    (Key::Escape, "esc"),
    (Key::Grave, "tilde"),
    (Key::LeftArrow, "left"),
    (Key::RightArrow, "right"),
    (Key::UpArrow, "up"),
    (Key::DownArrow, "down"),
    (Key::PageUp, "pgup"),
    (Key::PageUp, "prior"),
    (Key::PageDown, "pgdn"),
    (Key::PageDown, "next"),
    (Key::PrintScreen, "prtsc"),
    (Key::PrintScreen, "snapshot"),
    (Key::ScrollLock, "scroll"),
    (Key::KeypadEnter, "kpenter"),
    (Key::KeypadPlus, "add"),
    (Key::KeypadMinus, "subtract"),
    (Key::KeypadMultiply, "multiply"),
    (Key::KeypadDivide, "divide"),
    (Key::KeypadDecimal, "decimal"),
];

impl Key {
    /// Parses a key spec.
    ///
    /// Accepted, in order of precedence:
    /// - the variant name, case-insensitively ("LeftArrow", "f12")
    /// - a literal space, or the symbol for a digit or punctuation key
    /// - `D0`-`D9` and `numpad0`-`numpad9`, the .NET and `VK_*` spellings
    /// - an alias word such as "ctrl", "esc", "pgdn" or "kpenter"
    pub fn from_spec(s: &str) -> Option<Self> {
        if let Some(k) = Self::from_name(s) {
            return Some(k);
        }
        if s == " " {
            return Some(Self::Space);
        }
        if let Some((k, _)) = SYMBOLS.iter().find(|(_, sym)| *sym == s) {
            return Some(*k);
        }
        let lowered = s.to_ascii_lowercase();
        if let Some(k) = numbered(&lowered) {
            return Some(k);
        }
        ALIASES
            .iter()
            .find(|(_, word)| *word == lowered)
            .map(|(k, _)| *k)
    }

    /// The canonical spec: the symbol for digits and punctuation, otherwise
    /// the lowercased variant name.
    pub fn to_spec(self) -> String {
        match SYMBOLS.iter().find(|(k, _)| *k == self) {
            Some((_, sym)) => (*sym).to_string(),
            None => self.name().to_ascii_lowercase(),
        }
    }
}

/// `d0`-`d9` and `numpad0`-`numpad9`.
fn numbered(lowered: &str) -> Option<Key> {
    const DIGITS: [Key; 10] = [
        Key::Digit0,
        Key::Digit1,
        Key::Digit2,
        Key::Digit3,
        Key::Digit4,
        Key::Digit5,
        Key::Digit6,
        Key::Digit7,
        Key::Digit8,
        Key::Digit9,
    ];
    const KEYPAD: [Key; 10] = [
        Key::Keypad0,
        Key::Keypad1,
        Key::Keypad2,
        Key::Keypad3,
        Key::Keypad4,
        Key::Keypad5,
        Key::Keypad6,
        Key::Keypad7,
        Key::Keypad8,
        Key::Keypad9,
    ];
    let (table, rest) = if let Some(rest) = lowered.strip_prefix("numpad") {
        (&KEYPAD, rest)
    } else if let Some(rest) = lowered.strip_prefix('d') {
        (&DIGITS, rest)
    } else {
        return None;
    };
    match rest.as_bytes() {
        [b @ b'0'..=b'9'] => Some(table[usize::from(b - b'0')]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_roundtrips() {
        for k in Key::ALL {
            let spec = k.to_spec();
            assert_eq!(Key::from_spec(&spec), Some(*k), "{} -> {spec}", k.name());
        }
    }

    #[test]
    fn symbols_are_canonical() {
        assert_eq!(Key::Digit1.to_spec(), "1");
        assert_eq!(Key::Comma.to_spec(), ",");
        assert_eq!(Key::Backslash.to_spec(), "\\");
        assert_eq!(Key::from_spec("digit1"), Some(Key::Digit1));
        assert_eq!(Key::from_spec("backslash"), Some(Key::Backslash));
    }

    #[test]
    fn numbered_spellings() {
        assert_eq!(Key::from_spec("D1"), Some(Key::Digit1));
        assert_eq!(Key::from_spec("NumPad7"), Some(Key::Keypad7));
        assert_eq!(Key::from_spec("d"), Some(Key::D));
        assert_eq!(Key::from_spec("d12"), None);
        assert_eq!(Key::from_spec("numpad"), None);
    }

    #[test]
    fn aliases() {
        assert_eq!(Key::Space.to_spec(), "space");
        assert_eq!(Key::from_spec(" "), Some(Key::Space));
        assert_eq!(Key::from_spec("enter"), Some(Key::Return));
        assert_eq!(Key::from_spec("ESC"), Some(Key::Escape));
        assert_eq!(Key::from_spec("ctrl"), Some(Key::Control));
        assert_eq!(Key::from_spec("menu"), Some(Key::Alt));
        assert_eq!(Key::from_spec("PgDn"), Some(Key::PageDown));
        assert_eq!(Key::from_spec("kpenter"), Some(Key::KeypadEnter));
        assert_eq!(Key::from_spec("Capital"), Some(Key::CapsLock));
        assert_eq!(Key::from_spec("nope"), None);
    }
}
