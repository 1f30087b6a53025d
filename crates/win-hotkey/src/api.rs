//! The OS hotkey API seam.

use win_keycode::Hotkey;

use crate::Result;

/// `MOD_NOREPEAT`: suppress `WM_HOTKEY` for keyboard auto-repeat.
pub const MOD_NOREPEAT: u32 = 0x4000;

/// Per-registration options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterOptions {
    /// Fire once per physical press rather than on every auto-repeat.
    pub no_repeat: bool,
}

impl Default for RegisterOptions {
    fn default() -> Self {
        Self { no_repeat: true }
    }
}

impl RegisterOptions {
    /// The `fsModifiers` value for registering `hotkey` with these options.
    pub fn os_modifiers(&self, hotkey: &Hotkey) -> u32 {
        let mut bits = hotkey.modifiers.bits();
        if self.no_repeat {
            bits |= MOD_NOREPEAT;
        }
        bits
    }
}

/// Minimal OS hotkey API used by the registry.
///
/// Implementations make exactly one OS call per method.
pub trait HotkeyApi: Send + Sync {
    /// Bind `os_id` to `hotkey`.
    fn register(&self, os_id: i32, hotkey: &Hotkey, options: RegisterOptions) -> Result<()>;
    /// Release the binding for `os_id`.
    fn unregister(&self, os_id: i32) -> Result<()>;
}

#[cfg(any(test, feature = "test-utils"))]
mod mock {
    use std::collections::{BTreeMap, HashSet};

    use parking_lot::Mutex;
    use win_keycode::Hotkey;

    use super::{HotkeyApi, RegisterOptions};
    use crate::{Error, Result};

    /// A call observed by `MockHotkeyApi`.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum ApiCall {
        /// `register(os_id, hotkey, options)`
        Register(i32, Hotkey, RegisterOptions),
        /// `unregister(os_id)`
        Unregister(i32),
    }

    /// Mutable mock state.
    #[derive(Default)]
    struct State {
        /// Every call, in order.
        calls: Vec<ApiCall>,
        /// Currently bound ids.
        bound: BTreeMap<i32, Hotkey>,
        /// Hotkeys some other process "owns".
        refused: HashSet<Hotkey>,
        /// When true, unregister calls report failure.
        fail_unregister: bool,
    }

    /// In-memory hotkey API that mimics OS bookkeeping.
    #[derive(Default)]
    pub struct MockHotkeyApi {
        /// Shared state.
        state: Mutex<State>,
    }

    impl MockHotkeyApi {
        /// A mock with nothing bound.
        pub fn new() -> Self {
            Self::default()
        }

        /// Refuse future registrations of `hotkey`.
        pub fn refuse(&self, hotkey: Hotkey) {
            self.state.lock().refused.insert(hotkey);
        }

        /// Make unregister calls fail (the binding is still dropped).
        pub fn set_fail_unregister(&self, fail: bool) {
            self.state.lock().fail_unregister = fail;
        }

        /// All calls so far.
        pub fn calls(&self) -> Vec<ApiCall> {
            self.state.lock().calls.clone()
        }

        /// Bound OS ids and their hotkeys, ascending by id.
        pub fn bound(&self) -> Vec<(i32, Hotkey)> {
            self.state
                .lock()
                .bound
                .iter()
                .map(|(id, hk)| (*id, *hk))
                .collect()
        }
    }

    impl HotkeyApi for MockHotkeyApi {
        fn register(&self, os_id: i32, hotkey: &Hotkey, options: RegisterOptions) -> Result<()> {
            let mut st = self.state.lock();
            st.calls.push(ApiCall::Register(os_id, *hotkey, options));
            if st.refused.contains(hotkey) || st.bound.values().any(|h| h == hotkey) {
                return Err(Error::Os("hot key is already registered".into()));
            }
            if st.bound.contains_key(&os_id) {
                return Err(Error::Os(format!("id {os_id} already bound")));
            }
            st.bound.insert(os_id, *hotkey);
            Ok(())
        }

        fn unregister(&self, os_id: i32) -> Result<()> {
            let mut st = self.state.lock();
            st.calls.push(ApiCall::Unregister(os_id));
            let was_bound = st.bound.remove(&os_id).is_some();
            if st.fail_unregister {
                return Err(Error::Os("unregister failed".into()));
            }
            if !was_bound {
                return Err(Error::Os(format!("id {os_id} not bound")));
            }
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use mock::{ApiCall, MockHotkeyApi};

#[cfg(test)]
mod tests {
    use win_keycode::{Key, Modifiers};

    use super::*;

    #[test]
    fn no_repeat_is_default_and_sets_flag() {
        let hk = Hotkey::new(Modifiers::CONTROL | Modifiers::SHIFT, Key::P);
        let opts = RegisterOptions::default();
        assert!(opts.no_repeat);
        assert_eq!(opts.os_modifiers(&hk), 0x2 | 0x4 | MOD_NOREPEAT);
        let repeat = RegisterOptions { no_repeat: false };
        assert_eq!(repeat.os_modifiers(&hk), 0x6);
    }

    #[test]
    fn mock_tracks_bindings() {
        let api = MockHotkeyApi::new();
        let hk = Hotkey::new(Modifiers::ALT, Key::F1);
        api.register(1, &hk, RegisterOptions::default()).expect("register");
        assert!(api.register(2, &hk, RegisterOptions::default()).is_err());
        assert_eq!(api.bound(), vec![(1, hk)]);
        api.unregister(1).expect("unregister");
        assert!(api.unregister(1).is_err());
        assert!(api.bound().is_empty());
        assert_eq!(api.calls().len(), 4);
    }
}
