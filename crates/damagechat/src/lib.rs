//! Posts the party's damage ranking to in-game chat on a global hotkey.
//!
//! Pressing the configured hotkey snapshots the party, ranks the named
//! members by damage and pastes one line per member into chat: clipboard,
//! Ctrl+V, Enter. Injection runs on the `InjectionWorker` so the message loop
//! keeps delivering hotkeys while a post is in progress.
//!
//! A text damage meter for the current monster is available alongside,
//! timed by the zone events the game raises.
#![warn(unsafe_op_in_unsafe_fn)]

mod clipboard;
mod error;
mod game;
mod meter;
mod plugin;
mod ranking;

pub use clipboard::SystemClipboard;
pub use error::{Error, Result};
pub use game::{GameEventKind, GameEvents, GameState, PartyFile, QuestTimer, Subscription};
pub use meter::{MonsterStatus, dps, summary};
pub use plugin::{DamageChat, Deps};
pub use ranking::{DamageRankingEntry, PartyMember, chat_lines, entries, format_line, rank};
