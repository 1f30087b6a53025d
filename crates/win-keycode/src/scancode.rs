//! Scan codes and the extended-key form.
//!
//! A "scancode" in this crate is a set-1 keyboard scan code, the value
//! `SendInput` expects in `KEYBDINPUT::wScan` when `KEYEVENTF_SCANCODE` is set.
//! It is the same numbering DirectInput uses for its `DIK_*` constants, which
//! is what games polling raw input observe. Keys that are sent with the `0xE0`
//! prefix are written here as `0xE0xx`.

/// Set-1 scan code. `0xE0xx` marks an extended key.
pub type Scancode = u16;

/// True if `sc` is written in the `0xE0xx` extended form.
pub const fn is_extended(sc: Scancode) -> bool {
    sc & 0xFF00 == 0xE000
}

/// Split a scancode into its wire byte and the extended flag.
///
/// Codes that are not in the `0xE0xx` form are returned unchanged so callers
/// can pass raw values straight through.
pub const fn split_extended(sc: Scancode) -> (u16, bool) {
    if is_extended(sc) {
        (sc & 0x00FF, true)
    } else {
        (sc, false)
    }
}
