//! Game-side collaborators: party snapshots and change notifications.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
    sync::{Arc, Weak},
    time::{Duration, Instant},
};

use parking_lot::Mutex;
use serde::Deserialize;
use tracing::{debug, trace, warn};

use crate::{Error, Result, ranking::PartyMember};

/// Pull access to the current party.
pub trait GameState: Send + Sync {
    /// A snapshot of every party slot, in party order.
    fn party(&self) -> Vec<PartyMember>;
}

/// On-disk party snapshot: `{"members": [...]}`.
#[derive(Debug, Deserialize)]
struct PartySnapshot {
    /// Party slots.
    #[serde(default)]
    members: Vec<PartyMember>,
}

/// A party snapshot file, re-read on every `party()` call.
#[derive(Debug, Clone)]
pub struct PartyFile {
    /// Snapshot location.
    path: PathBuf,
}

impl PartyFile {
    /// Watch the snapshot at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The snapshot location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the snapshot.
    pub fn load(&self) -> Result<Vec<PartyMember>> {
        let failed = |message: String| Error::PartyFile {
            path: self.path.clone(),
            message,
        };
        let source = fs::read_to_string(&self.path).map_err(|e| failed(e.to_string()))?;
        let snapshot: PartySnapshot =
            serde_json::from_str(&source).map_err(|e| failed(e.to_string()))?;
        trace!(path = %self.path.display(), members = snapshot.members.len(), "read_party_file");
        Ok(snapshot.members)
    }
}

impl GameState for PartyFile {
    fn party(&self) -> Vec<PartyMember> {
        self.load().unwrap_or_else(|e| {
            warn!(error = %e, "party_snapshot_unavailable");
            Vec::new()
        })
    }
}

/// Notifications the game raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEventKind {
    /// A character finished loading.
    CharacterLogin,
    /// The online session changed.
    SessionChange,
    /// The player switched weapons.
    WeaponChange,
    /// The player entered a safe zone.
    PeaceZoneEnter,
    /// The player left a safe zone.
    PeaceZoneLeave,
}

impl fmt::Display for GameEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CharacterLogin => "character_login",
            Self::SessionChange => "session_change",
            Self::WeaponChange => "weapon_change",
            Self::PeaceZoneEnter => "peace_zone_enter",
            Self::PeaceZoneLeave => "peace_zone_leave",
        };
        f.write_str(name)
    }
}

/// Event handler.
type Handler = Arc<dyn Fn(GameEventKind) + Send + Sync>;

/// Subscriber table shared with outstanding `Subscription`s.
#[derive(Default)]
struct Handlers {
    /// Next subscription id.
    next_id: u64,
    /// Live subscriptions in subscription order.
    entries: Vec<(u64, GameEventKind, Handler)>,
}

/// Publish/subscribe hub for game notifications.
#[derive(Clone, Default)]
pub struct GameEvents {
    /// Subscriber table.
    inner: Arc<Mutex<Handlers>>,
}

impl GameEvents {
    /// An empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `handler` for every `kind` notification until the returned
    /// `Subscription` is dropped.
    pub fn subscribe<F>(&self, kind: GameEventKind, handler: F) -> Subscription
    where
        F: Fn(GameEventKind) + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.entries.push((id, kind, Arc::new(handler)));
        debug!(kind = %kind, id, "subscribed_game_event");
        Subscription {
            hub: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Deliver `kind` to its subscribers. Returns how many were called.
    ///
    /// Handlers run outside the hub lock and may subscribe or unsubscribe.
    pub fn emit(&self, kind: GameEventKind) -> usize {
        let matching: Vec<Handler> = self
            .inner
            .lock()
            .entries
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .map(|(_, _, h)| h.clone())
            .collect();
        trace!(kind = %kind, handlers = matching.len(), "emit_game_event");
        for handler in &matching {
            handler(kind);
        }
        matching.len()
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().entries.len()
    }
}

/// A live subscription. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    /// Hub the handler lives in.
    hub: Weak<Mutex<Handlers>>,
    /// Entry id within the hub.
    id: u64,
}

impl Subscription {
    /// Unsubscribe now.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.lock().entries.retain(|(id, _, _)| *id != self.id);
            trace!(id = self.id, "unsubscribed_game_event");
        }
    }
}

/// Start and stop marks for the current hunt.
#[derive(Debug, Default)]
struct Marks {
    /// When the player last left a safe zone.
    started: Option<Instant>,
    /// Length of the last finished hunt.
    finished: Option<Duration>,
}

/// Time spent outside safe zones, driven by zone events.
///
/// Starts on `PeaceZoneLeave` and stops on `PeaceZoneEnter`.
pub struct QuestTimer {
    /// Shared with the zone handlers.
    marks: Arc<Mutex<Marks>>,
    /// Zone event subscriptions.
    _subscriptions: [Subscription; 2],
}

impl QuestTimer {
    /// Subscribe a timer to `events`.
    pub fn attach(events: &GameEvents) -> Self {
        let marks = Arc::new(Mutex::new(Marks::default()));
        let on_leave = {
            let marks = marks.clone();
            events.subscribe(GameEventKind::PeaceZoneLeave, move |_| {
                let mut m = marks.lock();
                m.started = Some(Instant::now());
                m.finished = None;
            })
        };
        let on_enter = {
            let marks = marks.clone();
            events.subscribe(GameEventKind::PeaceZoneEnter, move |_| {
                let mut m = marks.lock();
                if let Some(start) = m.started.take() {
                    m.finished = Some(start.elapsed());
                }
            })
        };
        Self {
            marks,
            _subscriptions: [on_leave, on_enter],
        }
    }

    /// True while the player is outside a safe zone.
    pub fn is_running(&self) -> bool {
        self.marks.lock().started.is_some()
    }

    /// Time since leaving the safe zone, the length of the last hunt once
    /// back, or zero if no hunt has started.
    pub fn elapsed(&self) -> Duration {
        let m = self.marks.lock();
        match (m.started, m.finished) {
            (Some(start), _) => start.elapsed(),
            (None, Some(done)) => done,
            (None, None) => Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io::Write,
        sync::atomic::{AtomicUsize, Ordering},
        thread,
    };

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn party_file_is_reread_each_time() {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(br#"{"members": [{"name": "Alice", "damage": 5}]}"#)
            .unwrap();
        let party = PartyFile::new(f.path());
        assert_eq!(party.party(), [PartyMember::new("Alice", 5)]);

        fs::write(
            f.path(),
            r#"{"members": [{"name": "Alice", "damage": 9}, {"name": ""}]}"#,
        )
        .unwrap();
        let again = party.party();
        assert_eq!(again.len(), 2);
        assert_eq!(again[0].damage, 9);
    }

    #[test]
    fn unreadable_party_file_yields_empty_party() {
        let dir = tempfile::tempdir().unwrap();
        let party = PartyFile::new(dir.path().join("party.json"));
        assert!(matches!(party.load(), Err(Error::PartyFile { .. })));
        assert!(party.party().is_empty());

        fs::write(party.path(), "{ not json").unwrap();
        assert!(party.party().is_empty());
    }

    #[test]
    fn emit_reaches_matching_subscribers_only() {
        let events = GameEvents::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let _sub = events.subscribe(GameEventKind::WeaponChange, move |kind| {
            assert_eq!(kind, GameEventKind::WeaponChange);
            h.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(events.emit(GameEventKind::SessionChange), 0);
        assert_eq!(events.emit(GameEventKind::WeaponChange), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dropping_or_cancelling_unsubscribes() {
        let events = GameEvents::new();
        let a = events.subscribe(GameEventKind::CharacterLogin, |_| {});
        let b = events.subscribe(GameEventKind::CharacterLogin, |_| {});
        assert_eq!(events.subscriber_count(), 2);
        drop(a);
        assert_eq!(events.emit(GameEventKind::CharacterLogin), 1);
        b.cancel();
        assert_eq!(events.subscriber_count(), 0);
    }

    #[test]
    fn subscription_outliving_hub_is_harmless() {
        let events = GameEvents::new();
        let sub = events.subscribe(GameEventKind::SessionChange, |_| {});
        drop(events);
        drop(sub);
    }

    #[test]
    fn handler_may_subscribe_during_emit() {
        let events = GameEvents::new();
        let hub = events.clone();
        let late = Arc::new(Mutex::new(Vec::new()));
        let sink = late.clone();
        let _sub = events.subscribe(GameEventKind::SessionChange, move |_| {
            sink.lock()
                .push(hub.subscribe(GameEventKind::WeaponChange, |_| {}));
        });
        events.emit(GameEventKind::SessionChange);
        assert_eq!(events.subscriber_count(), 2);
        late.lock().clear();
        assert_eq!(events.subscriber_count(), 1);
    }

    #[test]
    fn quest_timer_follows_zone_events() {
        let events = GameEvents::new();
        let timer = QuestTimer::attach(&events);
        assert_eq!(timer.elapsed(), Duration::ZERO);

        events.emit(GameEventKind::PeaceZoneLeave);
        assert!(timer.is_running());
        thread::sleep(Duration::from_millis(20));
        events.emit(GameEventKind::PeaceZoneEnter);
        assert!(!timer.is_running());

        let frozen = timer.elapsed();
        assert!(frozen >= Duration::from_millis(20));
        thread::sleep(Duration::from_millis(10));
        assert_eq!(timer.elapsed(), frozen);

        drop(timer);
        assert_eq!(events.subscriber_count(), 0);
    }
}
