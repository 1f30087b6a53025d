//! The `Key` table.
//!
//! Each entry is `Variant = (virtual_key, scan_code)`. Scan codes are set-1
//! (DirectInput `DIK_*`) values; keys that need the `0xE0` prefix on the wire
//! are written as `0xE0xx`.

use crate::Scancode;

macro_rules! key_table {
    ( $( $name:ident = ($vk:expr, $sc:expr) ),* $(,)? ) => {
        /// A named key on a Windows keyboard.
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
        #[allow(missing_docs)]
        pub enum Key {
            $( $name, )*
        }

        impl Key {
            /// Every key in table order.
            pub const ALL: &'static [Self] = &[ $( Self::$name, )* ];

            /// Returns the enum variant name, e.g. "LeftArrow".
            pub const fn name(self) -> &'static str {
                match self {
                    $( Self::$name => stringify!($name), )*
                }
            }

            /// Win32 virtual-key code (`VK_*`).
            pub const fn vk(self) -> u16 {
                match self {
                    $( Self::$name => $vk, )*
                }
            }

            /// Set-1 scan code, `0xE0xx` for extended keys.
            pub const fn scancode(self) -> Scancode {
                match self {
                    $( Self::$name => $sc, )*
                }
            }

            /// Case-insensitive lookup by variant name.
            pub fn from_name(s: &str) -> Option<Self> {
                $(
                    if s.eq_ignore_ascii_case(stringify!($name)) {
                        return Some(Self::$name);
                    }
                )*
                None
            }
        }
    };
}

key_table! {
    A = (0x41, 0x1E),
    B = (0x42, 0x30),
    C = (0x43, 0x2E),
    D = (0x44, 0x20),
    E = (0x45, 0x12),
    F = (0x46, 0x21),
    G = (0x47, 0x22),
    H = (0x48, 0x23),
    I = (0x49, 0x17),
    J = (0x4A, 0x24),
    K = (0x4B, 0x25),
    L = (0x4C, 0x26),
    M = (0x4D, 0x32),
    N = (0x4E, 0x31),
    O = (0x4F, 0x18),
    P = (0x50, 0x19),
    Q = (0x51, 0x10),
    R = (0x52, 0x13),
    S = (0x53, 0x1F),
    T = (0x54, 0x14),
    U = (0x55, 0x16),
    V = (0x56, 0x2F),
    W = (0x57, 0x11),
    X = (0x58, 0x2D),
    Y = (0x59, 0x15),
    Z = (0x5A, 0x2C),

    Digit0 = (0x30, 0x0B),
    Digit1 = (0x31, 0x02),
    Digit2 = (0x32, 0x03),
    Digit3 = (0x33, 0x04),
    Digit4 = (0x34, 0x05),
    Digit5 = (0x35, 0x06),
    Digit6 = (0x36, 0x07),
    Digit7 = (0x37, 0x08),
    Digit8 = (0x38, 0x09),
    Digit9 = (0x39, 0x0A),

    F1 = (0x70, 0x3B),
    F2 = (0x71, 0x3C),
    F3 = (0x72, 0x3D),
    F4 = (0x73, 0x3E),
    F5 = (0x74, 0x3F),
    F6 = (0x75, 0x40),
    F7 = (0x76, 0x41),
    F8 = (0x77, 0x42),
    F9 = (0x78, 0x43),
    F10 = (0x79, 0x44),
    F11 = (0x7A, 0x57),
    F12 = (0x7B, 0x58),

    Escape = (0x1B, 0x01),
    Tab = (0x09, 0x0F),
    CapsLock = (0x14, 0x3A),
    Space = (0x20, 0x39),
    Return = (0x0D, 0x1C),
    Backspace = (0x08, 0x0E),
    Insert = (0x2D, 0xE052),
    Delete = (0x2E, 0xE053),
    Home = (0x24, 0xE047),
    End = (0x23, 0xE04F),
    PageUp = (0x21, 0xE049),
    PageDown = (0x22, 0xE051),
    LeftArrow = (0x25, 0xE04B),
    RightArrow = (0x27, 0xE04D),
    UpArrow = (0x26, 0xE048),
    DownArrow = (0x28, 0xE050),
    PrintScreen = (0x2C, 0xE037),
    ScrollLock = (0x91, 0x46),
    NumLock = (0x90, 0x45),
    Apps = (0x5D, 0xE05D),

    Minus = (0xBD, 0x0C),
    Equal = (0xBB, 0x0D),
    LeftBracket = (0xDB, 0x1A),
    RightBracket = (0xDD, 0x1B),
    Backslash = (0xDC, 0x2B),
    Semicolon = (0xBA, 0x27),
    Quote = (0xDE, 0x28),
    Grave = (0xC0, 0x29),
    Comma = (0xBC, 0x33),
    Period = (0xBE, 0x34),
    Slash = (0xBF, 0x35),

    Keypad0 = (0x60, 0x52),
    Keypad1 = (0x61, 0x4F),
    Keypad2 = (0x62, 0x50),
    Keypad3 = (0x63, 0x51),
    Keypad4 = (0x64, 0x4B),
    Keypad5 = (0x65, 0x4C),
    Keypad6 = (0x66, 0x4D),
    Keypad7 = (0x67, 0x47),
    Keypad8 = (0x68, 0x48),
    Keypad9 = (0x69, 0x49),
    KeypadMultiply = (0x6A, 0x37),
    KeypadPlus = (0x6B, 0x4E),
    KeypadMinus = (0x6D, 0x4A),
    KeypadDecimal = (0x6E, 0x53),
    KeypadDivide = (0x6F, 0xE035),
    KeypadEnter = (0x0D, 0xE01C),

    Shift = (0x10, 0x2A),
    RightShift = (0xA1, 0x36),
    Control = (0x11, 0x1D),
    RightControl = (0xA3, 0xE01D),
    Alt = (0x12, 0x38),
    RightAlt = (0xA5, 0xE038),
    LeftWindows = (0x5B, 0xE05B),
    RightWindows = (0x5C, 0xE05C),
}

impl Key {
    /// True for keys that act as modifiers and cannot be a hotkey's primary key.
    pub const fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::Shift
                | Self::RightShift
                | Self::Control
                | Self::RightControl
                | Self::Alt
                | Self::RightAlt
                | Self::LeftWindows
                | Self::RightWindows
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn scancodes_are_unique() {
        let mut seen = HashSet::new();
        for k in Key::ALL {
            assert!(seen.insert(k.scancode()), "duplicate scancode for {}", k.name());
        }
    }

    #[test]
    fn paste_combo_codes() {
        // The chat paste combo and confirm key injected by the plugins.
        assert_eq!(Key::Control.scancode(), 0x1D);
        assert_eq!(Key::V.scancode(), 0x2F);
        assert_eq!(Key::Return.scancode(), 0x1C);
    }

    #[test]
    fn from_name_is_case_insensitive() {
        assert_eq!(Key::from_name("leftarrow"), Some(Key::LeftArrow));
        assert_eq!(Key::from_name("F12"), Some(Key::F12));
        assert_eq!(Key::from_name("f12"), Some(Key::F12));
        assert_eq!(Key::from_name("nope"), None);
    }
}
