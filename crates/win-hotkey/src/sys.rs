//! Win32 thread-bound hotkeys and message loop.
//!
//! Hotkeys are registered with a NULL window, so `WM_HOTKEY` is posted to
//! the registering thread's queue. All registration and the message pump
//! therefore live on one thread; `Win32Hotkeys` refuses calls from any other.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crossbeam_channel::{Receiver, Sender, unbounded};
use relaykey::{UiJob, UiThread};
use tracing::{debug, trace, warn};
use win_keycode::Hotkey;
use windows::{
    Win32::{
        Foundation::{LPARAM, WPARAM},
        System::Threading::GetCurrentThreadId,
        UI::{
            Input::KeyboardAndMouse::{HOT_KEY_MODIFIERS, RegisterHotKey, UnregisterHotKey},
            WindowsAndMessaging::{
                DispatchMessageW, GetMessageW, MSG, PM_NOREMOVE, PeekMessageW,
                PostThreadMessageW, TranslateMessage, WM_APP, WM_QUIT,
            },
        },
    },
    core::Error as WinError,
};

use crate::{Dispatcher, Error, HotkeyApi, RegisterOptions, Result};

/// Thread message that asks the loop to drain its job queue.
const WM_INVOKE: u32 = WM_APP + 0x11;

/// Id of the calling thread.
fn current_thread_id() -> u32 {
    // SAFETY: GetCurrentThreadId has no preconditions.
    unsafe { GetCurrentThreadId() }
}

/// `HotkeyApi` over `RegisterHotKey`/`UnregisterHotKey` for one thread.
pub struct Win32Hotkeys {
    /// Thread whose queue receives `WM_HOTKEY`.
    owner: u32,
}

impl Win32Hotkeys {
    /// Bind hotkeys to the calling thread.
    pub fn for_current_thread() -> Self {
        Self {
            owner: current_thread_id(),
        }
    }

    /// Fail unless called on the owning thread.
    fn check_thread(&self) -> Result<()> {
        let here = current_thread_id();
        if here != self.owner {
            return Err(Error::Os(format!(
                "hotkey call from thread {here}, owner is {}",
                self.owner
            )));
        }
        Ok(())
    }
}

impl HotkeyApi for Win32Hotkeys {
    fn register(&self, os_id: i32, hotkey: &Hotkey, options: RegisterOptions) -> Result<()> {
        self.check_thread()?;
        let mods = HOT_KEY_MODIFIERS(options.os_modifiers(hotkey));
        // SAFETY: a None window binds the hotkey to this thread's queue.
        unsafe { RegisterHotKey(None, os_id, mods, u32::from(hotkey.key.vk())) }
            .map_err(|e| Error::Os(e.message()))
    }

    fn unregister(&self, os_id: i32) -> Result<()> {
        self.check_thread()?;
        // SAFETY: releases a binding made by this thread with a None window.
        unsafe { UnregisterHotKey(None, os_id) }.map_err(|e| Error::Os(e.message()))
    }
}

/// Cross-thread handle to a running `MessageLoop`.
#[derive(Clone)]
pub struct LoopHandle {
    /// Loop thread id.
    thread_id: u32,
    /// Jobs for the loop thread.
    tx: Sender<UiJob>,
    /// Cleared when the loop exits.
    alive: Arc<AtomicBool>,
}

impl LoopHandle {
    /// Post a thread message to the loop.
    fn post(&self, msg: u32) -> Result<()> {
        // SAFETY: posting to a thread id has no memory-safety preconditions.
        unsafe { PostThreadMessageW(self.thread_id, msg, WPARAM(0), LPARAM(0)) }
            .map_err(|e| Error::Os(e.message()))
    }

    /// Ask the loop to exit.
    pub fn quit(&self) -> Result<()> {
        self.post(WM_QUIT)
    }

    /// True while the loop is running.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }
}

impl UiThread for LoopHandle {
    fn invoke(&self, job: UiJob) -> bool {
        if !self.is_alive() || self.tx.send(job).is_err() {
            return false;
        }
        match self.post(WM_INVOKE) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "post_invoke_failed");
                false
            }
        }
    }
}

/// The calling thread's message pump.
pub struct MessageLoop {
    /// Handle shared with other threads.
    handle: LoopHandle,
    /// Jobs posted through `LoopHandle::invoke`.
    rx: Receiver<UiJob>,
}

impl MessageLoop {
    /// Create a loop for the calling thread, forcing its message queue into
    /// existence so thread messages posted from elsewhere are not lost.
    pub fn for_current_thread() -> Self {
        let mut msg = MSG::default();
        // SAFETY: `msg` is a valid out-pointer; PM_NOREMOVE leaves the queue
        // untouched.
        let _peeked = unsafe { PeekMessageW(&mut msg, None, WM_APP, WM_APP, PM_NOREMOVE) };
        let (tx, rx) = unbounded();
        Self {
            handle: LoopHandle {
                thread_id: current_thread_id(),
                tx,
                alive: Arc::new(AtomicBool::new(true)),
            },
            rx,
        }
    }

    /// A handle for posting work or quitting from other threads.
    pub fn handle(&self) -> LoopHandle {
        self.handle.clone()
    }

    /// Run queued jobs.
    fn drain(&self) {
        while let Ok(job) = self.rx.try_recv() {
            job();
        }
    }

    /// Pump messages until `WM_QUIT`, routing hotkeys to `dispatcher`.
    pub fn run(&self, dispatcher: &Dispatcher) -> Result<()> {
        debug!(thread = self.handle.thread_id, "message_loop_start");
        let mut msg = MSG::default();
        let result = loop {
            // SAFETY: `msg` is a valid out-pointer for the duration of the call.
            let got = unsafe { GetMessageW(&mut msg, None, 0, 0) };
            match got.0 {
                0 => break Ok(()),
                -1 => break Err(Error::Os(WinError::from_win32().message())),
                _ => {}
            }
            if msg.hwnd.is_invalid() && msg.message == WM_INVOKE {
                self.drain();
                continue;
            }
            if dispatcher.on_message(msg.message, msg.wParam.0) {
                continue;
            }
            trace!(message = msg.message, "message_forwarded");
            // SAFETY: `msg` was filled by GetMessageW.
            unsafe {
                let _translated = TranslateMessage(&msg);
                let _result = DispatchMessageW(&msg);
            }
        };
        self.handle.alive.store(false, Ordering::SeqCst);
        // Pending jobs are dropped unrun; their callers observe a closed reply.
        while self.rx.try_recv().is_ok() {}
        debug!("message_loop_exit");
        result
    }
}
