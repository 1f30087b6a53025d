//! Seams between the sequencer and the OS injection call.

use std::sync::Arc;

use crossbeam_channel::bounded;
use tracing::warn;

use crate::{Error, record::InputRecord};

/// The OS injection call: queue `batch` atomically and report how many
/// records were accepted.
pub trait InputSink: Send + Sync {
    /// Submit one batch. A return below `batch.len()` is a partial failure.
    fn send(&self, batch: &[InputRecord]) -> u32;
}

/// A unit of work to run on the UI thread.
pub type UiJob = Box<dyn FnOnce() + Send>;

/// Executes jobs on a UI/message-loop thread owned by someone else.
pub trait UiThread: Send + Sync {
    /// Queue `job` for the UI thread. Returns false if the thread is gone and
    /// the job was dropped.
    fn invoke(&self, job: UiJob) -> bool;
}

/// Forwards each batch to an inner sink on the UI thread.
///
/// The caller blocks until the UI thread has made the injection call, so the
/// accepted count is still reported back. Only the injection call itself is
/// marshalled; sequencing delays stay on the calling thread.
pub struct MarshalledSink {
    /// Sink invoked on the UI thread.
    inner: Arc<dyn InputSink>,
    /// Where injection calls are sent.
    ui: Arc<dyn UiThread>,
}

impl MarshalledSink {
    /// Wrap `inner` so that every `send` runs on `ui`.
    pub fn new(inner: Arc<dyn InputSink>, ui: Arc<dyn UiThread>) -> Self {
        Self { inner, ui }
    }
}

impl InputSink for MarshalledSink {
    fn send(&self, batch: &[InputRecord]) -> u32 {
        let (tx, rx) = bounded::<u32>(1);
        let inner = self.inner.clone();
        let owned: Vec<InputRecord> = batch.to_vec();
        let queued = self.ui.invoke(Box::new(move || {
            let n = inner.send(&owned);
            let _ignored = tx.send(n);
        }));
        if !queued {
            warn!(events = batch.len(), error = %Error::UiThreadGone, "dropping_batch");
            return 0;
        }
        match rx.recv() {
            Ok(n) => n,
            Err(_) => {
                warn!(events = batch.len(), error = %Error::UiThreadGone, "batch_dropped_unrun");
                0
            }
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
mod recording {
    use std::time::Instant;

    use parking_lot::Mutex;

    use super::InputSink;
    use crate::record::InputRecord;

    /// A batch observed by `RecordingSink`.
    #[derive(Clone, Debug)]
    pub struct RecordedBatch {
        /// Records in submission order.
        pub records: Vec<InputRecord>,
        /// When the batch arrived.
        pub at: Instant,
    }

    /// Sink that records every batch instead of injecting it.
    #[derive(Default)]
    pub struct RecordingSink {
        /// Observed batches.
        batches: Mutex<Vec<RecordedBatch>>,
        /// When set, at most this many records per batch are accepted.
        accept_limit: Mutex<Option<u32>>,
    }

    impl RecordingSink {
        /// A sink that accepts everything.
        pub fn new() -> Self {
            Self::default()
        }

        /// Accept at most `limit` records per batch from now on.
        pub fn set_accept_limit(&self, limit: Option<u32>) {
            *self.accept_limit.lock() = limit;
        }

        /// Snapshot of recorded batches.
        pub fn batches(&self) -> Vec<RecordedBatch> {
            self.batches.lock().clone()
        }

        /// All recorded records, flattened in order.
        pub fn records(&self) -> Vec<InputRecord> {
            self.batches
                .lock()
                .iter()
                .flat_map(|b| b.records.iter().copied())
                .collect()
        }
    }

    impl InputSink for RecordingSink {
        fn send(&self, batch: &[InputRecord]) -> u32 {
            self.batches.lock().push(RecordedBatch {
                records: batch.to_vec(),
                at: Instant::now(),
            });
            let n = batch.len() as u32;
            match *self.accept_limit.lock() {
                Some(limit) => n.min(limit),
                None => n,
            }
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use recording::{RecordedBatch, RecordingSink};

#[cfg(test)]
mod tests {
    use std::thread;

    use crossbeam_channel::{Sender, unbounded};
    use parking_lot::Mutex;

    use super::*;
    use crate::encoder::encode_tap;

    /// Sink that records which thread each call ran on.
    struct ThreadCheck(Mutex<Vec<thread::ThreadId>>);

    impl InputSink for ThreadCheck {
        fn send(&self, batch: &[InputRecord]) -> u32 {
            self.0.lock().push(thread::current().id());
            batch.len() as u32
        }
    }

    /// UI thread stand-in that forwards jobs to a channel.
    struct FakeUi {
        tx: Option<Sender<UiJob>>,
    }

    impl UiThread for FakeUi {
        fn invoke(&self, job: UiJob) -> bool {
            match &self.tx {
                Some(tx) => tx.send(job).is_ok(),
                None => false,
            }
        }
    }

    #[test]
    fn marshalled_sink_runs_on_ui_thread() {
        let (tx, rx) = unbounded::<UiJob>();
        let ui_thread = thread::spawn(move || {
            for job in rx {
                job();
            }
        });
        let ui_id = ui_thread.thread().id();

        let check = Arc::new(ThreadCheck(Mutex::new(Vec::new())));
        let sink = MarshalledSink::new(check.clone(), Arc::new(FakeUi { tx: Some(tx) }));
        let n = sink.send(&encode_tap(0x1C).records(0));
        assert_eq!(n, 2);
        assert_eq!(check.0.lock().as_slice(), &[ui_id]);

        drop(sink);
        ui_thread.join().expect("ui thread");
    }

    #[test]
    fn marshalled_sink_reports_zero_when_ui_gone() {
        let inner = Arc::new(RecordingSink::new());
        let sink = MarshalledSink::new(inner.clone(), Arc::new(FakeUi { tx: None }));
        assert_eq!(sink.send(&encode_tap(0x1C).records(0)), 0);
        assert!(inner.batches().is_empty());
    }

    #[test]
    fn recording_sink_honours_accept_limit() {
        let sink = RecordingSink::new();
        sink.set_accept_limit(Some(1));
        assert_eq!(sink.send(&encode_tap(0x1C).records(0)), 1);
        sink.set_accept_limit(None);
        assert_eq!(sink.send(&encode_tap(0x1C).records(0)), 2);
        assert_eq!(sink.records().len(), 4);
    }
}
