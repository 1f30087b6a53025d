//! The hotkey registry: descriptor → callback bindings and their OS ids.

use std::{collections::HashMap, fmt, sync::Arc};

use parking_lot::Mutex;
use tracing::{debug, info, trace, warn};
use win_keycode::Hotkey;

use crate::{Error, HotkeyApi, RegisterOptions, Result};

/// Lowest OS-level hotkey id an application may use.
pub const OS_ID_MIN: i32 = 1;
/// Highest OS-level hotkey id an application may use; ids above this are
/// reserved for shared DLLs.
pub const OS_ID_MAX: i32 = 0xBFFF;

/// Action bound to a hotkey.
pub type Callback = Arc<dyn Fn() + Send + Sync>;

/// Opaque id of a live registration. Never reused within a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HotkeyId(u64);

impl HotkeyId {
    /// The raw id value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for HotkeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A live registration.
struct Entry {
    /// Normalized descriptor.
    hotkey: Hotkey,
    /// Id handed to the OS.
    os_id: i32,
    /// Bound action.
    callback: Callback,
}

/// State guarded by the registry mutex.
struct Inner {
    /// Next local id to hand out.
    next_id: u64,
    /// Where the cyclic OS id search starts.
    next_os_id: i32,
    /// Live registrations by local id.
    entries: HashMap<HotkeyId, Entry>,
    /// OS id → local id.
    by_os: HashMap<i32, HotkeyId>,
    /// Descriptor → local id; at most one live registration per descriptor.
    by_hotkey: HashMap<Hotkey, HotkeyId>,
}

impl Inner {
    /// First free OS id at or after `next_os_id`, wrapping. Does not commit.
    fn peek_os_id(&self) -> Option<i32> {
        let span = OS_ID_MAX - OS_ID_MIN + 1;
        (0..span)
            .map(|off| OS_ID_MIN + (self.next_os_id - OS_ID_MIN + off) % span)
            .find(|id| !self.by_os.contains_key(id))
    }

    /// Remove `id` from every index.
    fn take(&mut self, id: HotkeyId) -> Option<Entry> {
        let entry = self.entries.remove(&id)?;
        self.by_os.remove(&entry.os_id);
        self.by_hotkey.remove(&entry.hotkey);
        Some(entry)
    }
}

/// Process-wide table of registered hotkeys.
///
/// Mutation and lookup serialize on one mutex, and each register or
/// unregister makes exactly one OS call while holding it. Callbacks are
/// never run under the lock, so a callback may itself register or unregister.
///
/// Dropping the registry releases every live hotkey.
pub struct Registry {
    /// OS hotkey API.
    api: Arc<dyn HotkeyApi>,
    /// Bindings.
    inner: Mutex<Inner>,
}

impl Registry {
    /// Create an empty registry over `api`.
    pub fn new(api: Arc<dyn HotkeyApi>) -> Self {
        Self {
            api,
            inner: Mutex::new(Inner {
                next_id: 1,
                next_os_id: OS_ID_MIN,
                entries: HashMap::new(),
                by_os: HashMap::new(),
                by_hotkey: HashMap::new(),
            }),
        }
    }

    /// Parse `descriptor` and bind it to `callback` with default options.
    pub fn register<F>(&self, descriptor: &str, callback: F) -> Result<HotkeyId>
    where
        F: Fn() + Send + Sync + 'static,
    {
        let hotkey = Hotkey::parse(descriptor)?;
        self.register_hotkey(hotkey, RegisterOptions::default(), callback)
    }

    /// Bind an already-parsed hotkey to `callback`.
    ///
    /// Fails without side effects if the descriptor is already live or the OS
    /// refuses the binding.
    pub fn register_hotkey<F>(
        &self,
        hotkey: Hotkey,
        options: RegisterOptions,
        callback: F,
    ) -> Result<HotkeyId>
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock();
        if inner.by_hotkey.contains_key(&hotkey) {
            debug!(hotkey = %hotkey, "hotkey_already_registered");
            return Err(Error::AlreadyRegistered(hotkey.to_string()));
        }
        let os_id = inner.peek_os_id().ok_or(Error::IdsExhausted)?;
        if let Err(e) = self.api.register(os_id, &hotkey, options) {
            warn!(hotkey = %hotkey, os_id, error = %e, "os_refused_hotkey");
            return Err(Error::OsRegistration {
                hotkey: hotkey.to_string(),
                reason: e.to_string(),
            });
        }

        let id = HotkeyId(inner.next_id);
        inner.next_id += 1;
        inner.next_os_id = if os_id >= OS_ID_MAX {
            OS_ID_MIN
        } else {
            os_id + 1
        };
        inner.entries.insert(
            id,
            Entry {
                hotkey,
                os_id,
                callback: Arc::new(callback),
            },
        );
        inner.by_os.insert(os_id, id);
        inner.by_hotkey.insert(hotkey, id);
        info!(id = %id, os_id, hotkey = %hotkey, "registered_hotkey");
        Ok(id)
    }

    /// Release the registration `id`.
    ///
    /// The local entry is always dropped; an OS failure is only logged.
    pub fn unregister(&self, id: HotkeyId) -> Result<()> {
        let mut inner = self.inner.lock();
        let Some(entry) = inner.take(id) else {
            debug!(id = %id, "unregister_unknown_id");
            return Err(Error::NotFound(id));
        };
        match self.api.unregister(entry.os_id) {
            Ok(()) => info!(id = %id, hotkey = %entry.hotkey, "unregistered_hotkey"),
            Err(e) => warn!(
                id = %id,
                os_id = entry.os_id,
                error = %e,
                "os_unregister_failed"
            ),
        }
        Ok(())
    }

    /// Release every registration. Idempotent and infallible.
    pub fn unregister_all(&self) {
        let mut inner = self.inner.lock();
        let mut ids: Vec<HotkeyId> = inner.entries.keys().copied().collect();
        ids.sort();
        for id in ids {
            if let Some(entry) = inner.take(id)
                && let Err(e) = self.api.unregister(entry.os_id)
            {
                warn!(id = %id, os_id = entry.os_id, error = %e, "os_unregister_failed");
            }
        }
        trace!("unregistered_all_hotkeys");
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if `id` is live.
    pub fn contains(&self, id: HotkeyId) -> bool {
        self.inner.lock().entries.contains_key(&id)
    }

    /// Snapshot of live registrations, ascending by id.
    pub fn registrations(&self) -> Vec<(HotkeyId, Hotkey)> {
        let inner = self.inner.lock();
        let mut out: Vec<(HotkeyId, Hotkey)> =
            inner.entries.iter().map(|(id, e)| (*id, e.hotkey)).collect();
        out.sort_by_key(|(id, _)| *id);
        out
    }

    /// Local id currently bound to `os_id`.
    pub fn resolve(&self, os_id: i32) -> Option<HotkeyId> {
        self.inner.lock().by_os.get(&os_id).copied()
    }

    /// Resolve `os_id` and clone its callback under the lock.
    pub fn lookup(&self, os_id: i32) -> Option<(HotkeyId, Callback)> {
        let inner = self.inner.lock();
        let id = inner.by_os.get(&os_id).copied()?;
        let entry = inner.entries.get(&id)?;
        Some((id, entry.callback.clone()))
    }
}

impl Drop for Registry {
    fn drop(&mut self) {
        self.unregister_all();
    }
}
