//! Shared event tagging helpers used across crates.
//!
//! Every injected keyboard or mouse event carries an "extra info" value in
//! `dwExtraInfo`. On Windows this is whatever `GetMessageExtraInfo` reports for
//! the calling thread, which is what low-level hooks downstream inspect to tell
//! synthetic input from real input. Elsewhere a fixed marker is used so the
//! portable code paths and tests see a stable value.

/// 'dmgc' in ASCII bytes: 0x64 0x6d 0x67 0x63 -> 1684891491
pub const DAMAGECHAT_TAG: usize = 1_684_891_491;

/// The extra-info value to attach to events injected from this thread.
#[cfg(windows)]
pub fn extra_info() -> usize {
    use windows::Win32::UI::WindowsAndMessaging::GetMessageExtraInfo;
    // SAFETY: GetMessageExtraInfo only reads per-thread message state.
    let v = unsafe { GetMessageExtraInfo() };
    v.0 as usize
}

/// The extra-info value to attach to events injected from this thread.
#[cfg(not(windows))]
pub fn extra_info() -> usize {
    DAMAGECHAT_TAG
}
