//! Tagged input records.
//!
//! The OS injection call takes an array of `INPUT` structs whose payload is an
//! overlapping union of keyboard, mouse and hardware layouts. Here the payload
//! is a plain enum; the union layout only exists inside the Win32 sink.

use bitflags::bitflags;

bitflags! {
    /// `KEYEVENTF_*` flags.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct KeyFlags: u32 {
        /// `KEYEVENTF_EXTENDEDKEY`: the scan code is preceded by `0xE0`.
        const EXTENDED_KEY = 0x0001;
        /// `KEYEVENTF_KEYUP`
        const KEY_UP = 0x0002;
        /// `KEYEVENTF_UNICODE`
        const UNICODE = 0x0004;
        /// `KEYEVENTF_SCANCODE`: `scan` identifies the key, `vk` is ignored.
        const SCANCODE = 0x0008;
    }
}

bitflags! {
    /// `MOUSEEVENTF_*` flags.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct MouseFlags: u32 {
        /// `MOUSEEVENTF_MOVE`
        const MOVE = 0x0001;
        /// `MOUSEEVENTF_LEFTDOWN`
        const LEFT_DOWN = 0x0002;
        /// `MOUSEEVENTF_LEFTUP`
        const LEFT_UP = 0x0004;
        /// `MOUSEEVENTF_RIGHTDOWN`
        const RIGHT_DOWN = 0x0008;
        /// `MOUSEEVENTF_RIGHTUP`
        const RIGHT_UP = 0x0010;
        /// `MOUSEEVENTF_MIDDLEDOWN`
        const MIDDLE_DOWN = 0x0020;
        /// `MOUSEEVENTF_MIDDLEUP`
        const MIDDLE_UP = 0x0040;
        /// `MOUSEEVENTF_XDOWN`
        const X_DOWN = 0x0080;
        /// `MOUSEEVENTF_XUP`
        const X_UP = 0x0100;
        /// `MOUSEEVENTF_WHEEL`
        const WHEEL = 0x0800;
        /// `MOUSEEVENTF_HWHEEL`
        const HWHEEL = 0x1000;
        /// `MOUSEEVENTF_MOVE_NOCOALESCE`
        const MOVE_NO_COALESCE = 0x2000;
        /// `MOUSEEVENTF_VIRTUALDESK`
        const VIRTUAL_DESK = 0x4000;
        /// `MOUSEEVENTF_ABSOLUTE`
        const ABSOLUTE = 0x8000;
    }
}

/// Keyboard payload (`KEYBDINPUT`).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct KeyboardInput {
    /// Virtual-key code; zero when `flags` contains `SCANCODE`.
    pub vk: u16,
    /// Scan code wire byte.
    pub scan: u16,
    /// Event flags.
    pub flags: KeyFlags,
    /// Timestamp in ms; zero lets the OS supply one.
    pub time: u32,
    /// Value downstream hooks read to recognise synthetic input.
    pub extra_info: usize,
}

/// Mouse payload (`MOUSEINPUT`).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MouseInput {
    /// Horizontal position or delta.
    pub dx: i32,
    /// Vertical position or delta.
    pub dy: i32,
    /// Wheel delta or X-button selector.
    pub mouse_data: u32,
    /// Event flags.
    pub flags: MouseFlags,
    /// Timestamp in ms; zero lets the OS supply one.
    pub time: u32,
    /// Value downstream hooks read to recognise synthetic input.
    pub extra_info: usize,
}

/// Hardware payload (`HARDWAREINPUT`).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct HardwareInput {
    /// Message generated by the input hardware.
    pub msg: u32,
    /// Low word of the message's lParam.
    pub wparam_l: u16,
    /// High word of the message's lParam.
    pub wparam_h: u16,
}

/// One record of an injection batch.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InputRecord {
    /// `INPUT_MOUSE`
    Mouse(MouseInput),
    /// `INPUT_KEYBOARD`
    Keyboard(KeyboardInput),
    /// `INPUT_HARDWARE`
    Hardware(HardwareInput),
}

impl InputRecord {
    /// The `INPUT::type` tag for this record.
    pub const fn type_tag(&self) -> u32 {
        match self {
            Self::Mouse(_) => 0,
            Self::Keyboard(_) => 1,
            Self::Hardware(_) => 2,
        }
    }

    /// Keyboard payload, if this is a keyboard record.
    pub fn as_keyboard(&self) -> Option<&KeyboardInput> {
        match self {
            Self::Keyboard(k) => Some(k),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_tags_follow_input_type() {
        let k = InputRecord::Keyboard(KeyboardInput {
            vk: 0,
            scan: 0x1C,
            flags: KeyFlags::SCANCODE,
            time: 0,
            extra_info: 0,
        });
        let h = InputRecord::Hardware(HardwareInput {
            msg: 0,
            wparam_l: 0,
            wparam_h: 0,
        });
        assert_eq!(k.type_tag(), 1);
        assert_eq!(h.type_tag(), 2);
        assert!(k.as_keyboard().is_some());
        assert!(h.as_keyboard().is_none());
    }

    #[test]
    fn flag_values_match_win32() {
        assert_eq!((KeyFlags::KEY_UP | KeyFlags::SCANCODE).bits(), 0x000A);
        assert_eq!(MouseFlags::LEFT_DOWN.bits(), 0x0002);
        assert_eq!(MouseFlags::ABSOLUTE.bits(), 0x8000);
    }
}
