//! The DamageChat plugin: post the party's damage ranking to chat on a hotkey.

use std::sync::Arc;

use config::PluginConfig;
use parking_lot::Mutex;
use relaykey::{Clipboard, InjectionWorker, Sequencer};
use tracing::{debug, info, warn};
use win_hotkey::{Hotkey, HotkeyId, RegisterOptions, Registry};

use crate::{
    Result,
    game::{GameEvents, GameState, QuestTimer},
    meter::{self, MonsterStatus},
    ranking,
};

/// Collaborators the plugin is built from.
pub struct Deps {
    /// Party snapshots.
    pub game: Arc<dyn GameState>,
    /// Where each line is staged before pasting.
    pub clipboard: Arc<dyn Clipboard>,
    /// Thread that runs the paste sequences.
    pub worker: Arc<InjectionWorker>,
    /// Injection path. Its step delay is replaced by the configured one.
    pub sequencer: Sequencer,
    /// Game notifications.
    pub events: GameEvents,
}

/// Builds and queues one chat post per trigger.
struct Poster {
    /// Party snapshots.
    game: Arc<dyn GameState>,
    /// Line staging.
    clipboard: Arc<dyn Clipboard>,
    /// Runs the paste sequences.
    worker: Arc<InjectionWorker>,
    /// Injection path with the configured step delay.
    sequencer: Sequencer,
}

impl Poster {
    /// Rank the party and queue its lines. Returns the number of lines queued.
    fn post(&self) -> usize {
        let party = self.game.party();
        let lines = ranking::chat_lines(&party);
        if lines.is_empty() {
            debug!(slots = party.len(), "no_named_members");
            return 0;
        }
        let count = lines.len();
        let clipboard = self.clipboard.clone();
        let sequencer = self.sequencer.clone();
        let queued = self.worker.submit(move || {
            for (idx, line) in lines.iter().enumerate() {
                if sequencer.paste_line(clipboard.as_ref(), line).is_none() {
                    debug!(line = idx, "chat_line_skipped");
                }
            }
        });
        if !queued {
            warn!(lines = count, "injection_worker_stopped");
            return 0;
        }
        debug!(lines = count, "queued_chat_post");
        count
    }
}

/// An installed DamageChat plugin.
///
/// Dropping it unloads it.
pub struct DamageChat {
    /// Registry holding the trigger hotkey.
    registry: Arc<Registry>,
    /// The trigger registration, until unloaded.
    hotkey: Mutex<Option<HotkeyId>>,
    /// Shared with the hotkey callback.
    poster: Arc<Poster>,
    /// Hunt timer feeding the meter, until unloaded.
    timer: Mutex<Option<QuestTimer>>,
}

impl DamageChat {
    /// Register the configured hotkey and subscribe to game events.
    pub fn install(registry: Arc<Registry>, config: &PluginConfig, deps: Deps) -> Result<Self> {
        let hotkey = Hotkey::parse(config.descriptor()).map_err(win_hotkey::Error::from)?;
        let options = RegisterOptions {
            no_repeat: config.no_repeat(),
        };
        let poster = Arc::new(Poster {
            game: deps.game,
            clipboard: deps.clipboard,
            worker: deps.worker,
            sequencer: deps.sequencer.with_step_delay(config.step_delay()),
        });
        let callback = {
            let poster = poster.clone();
            move || {
                poster.post();
            }
        };
        let id = registry.register_hotkey(hotkey, options, callback)?;
        let timer = QuestTimer::attach(&deps.events);
        info!(id = %id, hotkey = %hotkey, "damagechat_installed");
        Ok(Self {
            registry,
            hotkey: Mutex::new(Some(id)),
            poster,
            timer: Mutex::new(Some(timer)),
        })
    }

    /// The trigger registration, if still installed.
    pub fn hotkey_id(&self) -> Option<HotkeyId> {
        *self.hotkey.lock()
    }

    /// Post the current ranking now, as the hotkey would. Returns the number
    /// of lines queued for injection.
    pub fn trigger(&self) -> usize {
        self.poster.post()
    }

    /// The damage meter for `monster`, timed by the current hunt.
    pub fn meter(&self, monster: &MonsterStatus) -> String {
        let elapsed = self
            .timer
            .lock()
            .as_ref()
            .map(QuestTimer::elapsed)
            .unwrap_or_default();
        meter::summary(monster, &self.poster.game.party(), elapsed)
    }

    /// Release the hotkey and drop the event subscriptions. Idempotent.
    ///
    /// A post already running on the worker finishes.
    pub fn unload(&self) -> Result<()> {
        drop(self.timer.lock().take());
        let Some(id) = self.hotkey.lock().take() else {
            return Ok(());
        };
        self.registry.unregister(id)?;
        info!(id = %id, "damagechat_unloaded");
        Ok(())
    }
}

impl Drop for DamageChat {
    fn drop(&mut self) {
        if let Err(e) = self.unload() {
            warn!(error = %e, "damagechat_unload_failed");
        }
    }
}
