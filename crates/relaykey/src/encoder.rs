//! Raw input encoding: abstract key codes to injection steps.
//!
//! Encoding is pure. Codes are not validated; out-of-table values are passed
//! through to the OS exactly as given.

use std::time::Duration;

use win_keycode::{Scancode, split_extended};

use crate::record::{InputRecord, KeyFlags, KeyboardInput, MouseFlags, MouseInput};

/// Key transition direction.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    /// Key pressed.
    Down,
    /// Key released.
    Up,
}

/// A single key transition addressed by scan code.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct KeyEvent {
    /// Scan code; `0xE0xx` for extended keys.
    pub code: Scancode,
    /// Press or release.
    pub direction: Direction,
}

impl KeyEvent {
    /// A key-down event.
    pub const fn down(code: Scancode) -> Self {
        Self {
            code,
            direction: Direction::Down,
        }
    }

    /// A key-up event.
    pub const fn up(code: Scancode) -> Self {
        Self {
            code,
            direction: Direction::Up,
        }
    }

    /// Lower to a keyboard record in scan-code addressing mode.
    pub fn record(&self, extra_info: usize) -> InputRecord {
        let (scan, extended) = split_extended(self.code);
        let mut flags = KeyFlags::SCANCODE;
        if extended {
            flags |= KeyFlags::EXTENDED_KEY;
        }
        if self.direction == Direction::Up {
            flags |= KeyFlags::KEY_UP;
        }
        InputRecord::Keyboard(KeyboardInput {
            vk: 0,
            scan,
            flags,
            time: 0,
            extra_info,
        })
    }
}

/// Mouse buttons that `encode_click` can press.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
    /// Wheel button.
    Middle,
}

impl MouseButton {
    /// The (down, up) flag pair for this button.
    const fn flags(self) -> (MouseFlags, MouseFlags) {
        match self {
            Self::Left => (MouseFlags::LEFT_DOWN, MouseFlags::LEFT_UP),
            Self::Right => (MouseFlags::RIGHT_DOWN, MouseFlags::RIGHT_UP),
            Self::Middle => (MouseFlags::MIDDLE_DOWN, MouseFlags::MIDDLE_UP),
        }
    }
}

/// Payload of an injection step.
#[derive(Clone, Debug, Eq, PartialEq)]
enum Batch {
    /// Key transitions, lowered at submission time.
    Keys(Vec<KeyEvent>),
    /// A mouse click at the current pointer position.
    Click(MouseButton),
}

/// An ordered batch submitted in one OS call, plus an optional post-delay.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InjectionStep {
    /// What to submit.
    batch: Batch,
    /// How long to wait after submitting before the next step.
    pub delay: Option<Duration>,
}

impl InjectionStep {
    /// Set the post-delay for this step.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Key events in this step, empty for mouse steps.
    pub fn events(&self) -> &[KeyEvent] {
        match &self.batch {
            Batch::Keys(events) => events.as_slice(),
            Batch::Click(_) => &[],
        }
    }

    /// Number of records this step submits.
    pub fn len(&self) -> usize {
        match &self.batch {
            Batch::Keys(events) => events.len(),
            Batch::Click(_) => 2,
        }
    }

    /// True if the step submits nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lower this step to OS input records, tagging each with `extra_info`.
    pub fn records(&self, extra_info: usize) -> Vec<InputRecord> {
        match &self.batch {
            Batch::Keys(events) => events.iter().map(|e| e.record(extra_info)).collect(),
            Batch::Click(button) => {
                let (down, up) = button.flags();
                [down, up]
                    .into_iter()
                    .map(|flags| {
                        InputRecord::Mouse(MouseInput {
                            dx: 0,
                            dy: 0,
                            mouse_data: 0,
                            flags,
                            time: 0,
                            extra_info,
                        })
                    })
                    .collect()
            }
        }
    }
}

/// Press and release a single key.
pub fn encode_tap(code: Scancode) -> InjectionStep {
    InjectionStep {
        batch: Batch::Keys(vec![KeyEvent::down(code), KeyEvent::up(code)]),
        delay: None,
    }
}

/// Press all `codes` in order, then release them in the same order.
///
/// Release order is deliberately not reversed: `[A, B]` yields
/// `Down A, Down B, Up A, Up B`.
pub fn encode_chord(codes: &[Scancode]) -> InjectionStep {
    let downs = codes.iter().copied().map(KeyEvent::down);
    let ups = codes.iter().copied().map(KeyEvent::up);
    InjectionStep {
        batch: Batch::Keys(downs.chain(ups).collect()),
        delay: None,
    }
}

/// Click a mouse button at the current pointer position.
pub fn encode_click(button: MouseButton) -> InjectionStep {
    InjectionStep {
        batch: Batch::Click(button),
        delay: None,
    }
}

#[cfg(test)]
mod tests {
    use win_keycode::Key;

    use super::*;

    #[test]
    fn tap_is_down_then_up() {
        let step = encode_tap(0x1C);
        assert_eq!(step.events(), &[KeyEvent::down(0x1C), KeyEvent::up(0x1C)]);
        assert_eq!(step.delay, None);
    }

    #[test]
    fn chord_releases_in_press_order() {
        let a = Key::Control.scancode();
        let b = Key::V.scancode();
        let step = encode_chord(&[a, b]);
        assert_eq!(
            step.events(),
            &[
                KeyEvent::down(a),
                KeyEvent::down(b),
                KeyEvent::up(a),
                KeyEvent::up(b)
            ]
        );
    }

    #[test]
    fn empty_chord_is_empty() {
        let step = encode_chord(&[]);
        assert!(step.is_empty());
        assert!(step.records(0).is_empty());
    }

    #[test]
    fn records_use_scancode_mode_and_tag() {
        let recs = encode_tap(0x1C).records(0xABCD);
        assert_eq!(recs.len(), 2);
        let down = recs[0].as_keyboard().expect("keyboard");
        let up = recs[1].as_keyboard().expect("keyboard");
        assert_eq!(down.vk, 0);
        assert_eq!(down.scan, 0x1C);
        assert_eq!(down.flags, KeyFlags::SCANCODE);
        assert_eq!(up.flags, KeyFlags::SCANCODE | KeyFlags::KEY_UP);
        assert_eq!(down.extra_info, 0xABCD);
        assert_eq!(up.extra_info, 0xABCD);
    }

    #[test]
    fn extended_codes_set_extended_flag() {
        let recs = encode_tap(Key::UpArrow.scancode()).records(0);
        let down = recs[0].as_keyboard().expect("keyboard");
        assert_eq!(down.scan, 0x48);
        assert!(down.flags.contains(KeyFlags::EXTENDED_KEY));
    }

    #[test]
    fn raw_codes_pass_through() {
        let recs = encode_tap(0x0123).records(0);
        let down = recs[0].as_keyboard().expect("keyboard");
        assert_eq!(down.scan, 0x0123);
        assert!(!down.flags.contains(KeyFlags::EXTENDED_KEY));
    }

    #[test]
    fn click_is_mouse_down_up() {
        let step = encode_click(MouseButton::Right).with_delay(Duration::from_millis(5));
        assert_eq!(step.len(), 2);
        assert!(step.events().is_empty());
        let recs = step.records(7);
        match (&recs[0], &recs[1]) {
            (InputRecord::Mouse(d), InputRecord::Mouse(u)) => {
                assert_eq!(d.flags, MouseFlags::RIGHT_DOWN);
                assert_eq!(u.flags, MouseFlags::RIGHT_UP);
                assert_eq!(d.extra_info, 7);
            }
            other => panic!("unexpected records {:?}", other),
        }
        assert_eq!(step.delay, Some(Duration::from_millis(5)));
    }
}
