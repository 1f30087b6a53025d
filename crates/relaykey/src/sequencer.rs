//! Timed execution of injection steps.

use std::{sync::Arc, thread, time::Duration};

use tracing::{debug, trace, warn};
use win_keycode::Key;

use crate::{
    Error, Result,
    encoder::{InjectionStep, encode_chord, encode_tap},
    sink::InputSink,
};

/// Delay after each step of the paste-confirm sequence.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(100);

/// Write-only text clipboard.
pub trait Clipboard: Send + Sync {
    /// Replace the clipboard contents with `text`.
    fn set_text(&self, text: &str) -> Result<()>;
}

/// Totals for one `Sequencer::run`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RunReport {
    /// Steps executed.
    pub steps: usize,
    /// Records handed to the sink.
    pub submitted: usize,
    /// Records the sink reported as queued.
    pub accepted: usize,
}

impl RunReport {
    /// True if every submitted record was accepted.
    pub fn is_complete(&self) -> bool {
        self.submitted == self.accepted
    }
}

/// Submits injection steps to an `InputSink`, sleeping between them.
#[derive(Clone)]
pub struct Sequencer {
    /// Injection call.
    sink: Arc<dyn InputSink>,
    /// Post-delay used by the canned sequences.
    step_delay: Duration,
}

impl Sequencer {
    /// A sequencer with `DEFAULT_STEP_DELAY`.
    pub fn new(sink: Arc<dyn InputSink>) -> Self {
        Self {
            sink,
            step_delay: DEFAULT_STEP_DELAY,
        }
    }

    /// Override the step delay used by `paste_confirm_steps`.
    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    /// A sequencer that injects through `SendInput`.
    #[cfg(windows)]
    pub fn system() -> Self {
        Self::new(Arc::new(crate::SendInputSink))
    }

    /// The configured step delay.
    pub fn step_delay(&self) -> Duration {
        self.step_delay
    }

    /// Run `steps` in order. Each step is one sink call; partial failures are
    /// logged and the sequence carries on.
    pub fn run(&self, steps: &[InjectionStep]) -> RunReport {
        let extra_info = eventtag::extra_info();
        let mut report = RunReport::default();
        for (idx, step) in steps.iter().enumerate() {
            let records = step.records(extra_info);
            let accepted = if records.is_empty() {
                0
            } else {
                self.sink.send(&records) as usize
            };
            trace!(step = idx, events = records.len(), accepted, "injected_step");
            if accepted < records.len() {
                let err = Error::InjectionPartialFailure {
                    submitted: records.len(),
                    accepted,
                };
                warn!(step = idx, error = %err, "injection_partial_failure");
            }
            report.steps += 1;
            report.submitted += records.len();
            report.accepted += accepted;
            if let Some(delay) = step.delay {
                thread::sleep(delay);
            }
        }
        report
    }

    /// Ctrl+V then Enter, each followed by the step delay.
    pub fn paste_confirm_steps(&self) -> Vec<InjectionStep> {
        vec![
            encode_chord(&[Key::Control.scancode(), Key::V.scancode()])
                .with_delay(self.step_delay),
            encode_tap(Key::Return.scancode()).with_delay(self.step_delay),
        ]
    }

    /// Put `text` on the clipboard and paste-confirm it.
    ///
    /// Returns `None` without injecting anything if the clipboard write fails.
    pub fn paste_line(&self, clipboard: &dyn Clipboard, text: &str) -> Option<RunReport> {
        if let Err(e) = clipboard.set_text(text) {
            warn!(error = %e, "clipboard_write_failed_skipping_line");
            return None;
        }
        let report = self.run(&self.paste_confirm_steps());
        debug!(chars = text.len(), accepted = report.accepted, "pasted_line");
        Some(report)
    }
}

#[cfg(any(test, feature = "test-utils"))]
mod memory {
    use parking_lot::Mutex;

    use super::Clipboard;
    use crate::{Error, Result};

    /// In-memory clipboard recording every write.
    #[derive(Default)]
    pub struct MemoryClipboard {
        /// Texts written, oldest first.
        writes: Mutex<Vec<String>>,
        /// When true, writes fail.
        failing: Mutex<bool>,
        /// Every `set_text` call, failed or not.
        attempts: Mutex<usize>,
    }

    impl MemoryClipboard {
        /// An empty clipboard that accepts writes.
        pub fn new() -> Self {
            Self::default()
        }

        /// Make subsequent writes fail (or succeed again).
        pub fn set_failing(&self, failing: bool) {
            *self.failing.lock() = failing;
        }

        /// All successful writes.
        pub fn writes(&self) -> Vec<String> {
            self.writes.lock().clone()
        }

        /// Number of writes tried, including failed ones.
        pub fn attempts(&self) -> usize {
            *self.attempts.lock()
        }

        /// The current contents.
        pub fn contents(&self) -> Option<String> {
            self.writes.lock().last().cloned()
        }
    }

    impl Clipboard for MemoryClipboard {
        fn set_text(&self, text: &str) -> Result<()> {
            *self.attempts.lock() += 1;
            if *self.failing.lock() {
                return Err(Error::Clipboard("clipboard unavailable".into()));
            }
            self.writes.lock().push(text.to_string());
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryClipboard;

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::{
        encoder::KeyEvent,
        record::{InputRecord, KeyFlags},
        sink::RecordingSink,
    };

    fn scans(records: &[InputRecord]) -> Vec<(u16, bool)> {
        records
            .iter()
            .filter_map(|r| r.as_keyboard())
            .map(|k| (k.scan, k.flags.contains(KeyFlags::KEY_UP)))
            .collect()
    }

    #[test]
    fn paste_confirm_is_ctrl_v_then_enter() {
        let sink = Arc::new(RecordingSink::new());
        let seq = Sequencer::new(sink.clone()).with_step_delay(Duration::ZERO);
        let steps = seq.paste_confirm_steps();
        assert_eq!(steps.len(), 2);
        assert_eq!(
            steps[0].events(),
            &[
                KeyEvent::down(0x1D),
                KeyEvent::down(0x2F),
                KeyEvent::up(0x1D),
                KeyEvent::up(0x2F)
            ]
        );
        assert_eq!(steps[1].events(), &[KeyEvent::down(0x1C), KeyEvent::up(0x1C)]);

        let report = seq.run(&steps);
        assert_eq!(
            report,
            RunReport {
                steps: 2,
                submitted: 6,
                accepted: 6
            }
        );
        let batches = sink.batches();
        assert_eq!(batches.len(), 2);
        assert_eq!(
            scans(&batches[0].records),
            vec![(0x1D, false), (0x2F, false), (0x1D, true), (0x2F, true)]
        );
        assert_eq!(scans(&batches[1].records), vec![(0x1C, false), (0x1C, true)]);
    }

    #[test]
    fn default_delay_is_100ms() {
        let seq = Sequencer::new(Arc::new(RecordingSink::new()));
        assert_eq!(seq.step_delay(), Duration::from_millis(100));
        for step in seq.paste_confirm_steps() {
            assert_eq!(step.delay, Some(DEFAULT_STEP_DELAY));
        }
    }

    #[test]
    fn delays_separate_steps() {
        let sink = Arc::new(RecordingSink::new());
        let seq = Sequencer::new(sink.clone()).with_step_delay(Duration::from_millis(20));
        let start = Instant::now();
        seq.run(&seq.paste_confirm_steps());
        assert!(start.elapsed() >= Duration::from_millis(40));
        let batches = sink.batches();
        assert!(batches[1].at.duration_since(batches[0].at) >= Duration::from_millis(20));
    }

    #[test]
    fn partial_failure_continues() {
        let sink = Arc::new(RecordingSink::new());
        sink.set_accept_limit(Some(1));
        let seq = Sequencer::new(sink.clone()).with_step_delay(Duration::ZERO);
        let report = seq.run(&seq.paste_confirm_steps());
        assert_eq!(report.steps, 2);
        assert_eq!(report.submitted, 6);
        assert_eq!(report.accepted, 2);
        assert!(!report.is_complete());
        assert_eq!(sink.batches().len(), 2);
    }

    #[test]
    fn records_carry_event_tag() {
        let sink = Arc::new(RecordingSink::new());
        let seq = Sequencer::new(sink.clone()).with_step_delay(Duration::ZERO);
        seq.run(&[encode_tap(0x1C)]);
        for rec in sink.records() {
            let k = rec.as_keyboard().expect("keyboard");
            assert_eq!(k.extra_info, eventtag::extra_info());
        }
    }

    #[test]
    fn paste_line_writes_then_injects() {
        let sink = Arc::new(RecordingSink::new());
        let clip = MemoryClipboard::new();
        let seq = Sequencer::new(sink.clone()).with_step_delay(Duration::ZERO);
        let report = seq.paste_line(&clip, "Alice dealt 10 (50%) damage");
        assert_eq!(report.map(|r| r.steps), Some(2));
        assert_eq!(clip.contents().as_deref(), Some("Alice dealt 10 (50%) damage"));
        assert_eq!(sink.batches().len(), 2);
    }

    #[test]
    fn clipboard_failure_skips_injection() {
        let sink = Arc::new(RecordingSink::new());
        let clip = MemoryClipboard::new();
        clip.set_failing(true);
        let seq = Sequencer::new(sink.clone()).with_step_delay(Duration::ZERO);
        assert!(seq.paste_line(&clip, "nope").is_none());
        assert!(sink.batches().is_empty());
        assert!(clip.writes().is_empty());
    }
}
