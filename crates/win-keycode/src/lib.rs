//! win-keycode: Windows key identifiers and hotkey descriptors.
//!
//! - `Key`: Enum of named keys. Each key carries both its Win32 virtual-key
//!   code (used by `RegisterHotKey`) and its set-1 scan code (used when
//!   injecting with `KEYEVENTF_SCANCODE`).
//! - `Modifier` / `Modifiers`: the hotkey modifier set (Alt, Ctrl, Shift),
//!   with bit values matching the Win32 `MOD_*` constants.
//! - `Hotkey`: a modifier set plus a primary key, parsed from strings like
//!   "Shift+Ctrl+P" and rendered canonically as "ctrl+shift+p".

mod key;
pub use key::Key;

mod spec;

mod modifiers;
pub use modifiers::{Modifier, Modifiers};

mod hotkey;
pub use hotkey::{Hotkey, ParseError};

mod scancode;
pub use scancode::{Scancode, is_extended, split_extended};
