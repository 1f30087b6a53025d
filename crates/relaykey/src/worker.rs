//! Dedicated thread that runs injection jobs off the message loop.

use std::{
    io,
    panic::{AssertUnwindSafe, catch_unwind},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread::{self, JoinHandle},
};

use crossbeam_channel::{Sender, unbounded};
use parking_lot::Mutex;
use tracing::{debug, error, trace};

/// A queued injection job.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// FIFO job runner on its own thread.
///
/// Jobs run one at a time in submission order. `shutdown` lets the running
/// job finish, discards anything still queued and joins the thread.
pub struct InjectionWorker {
    /// Job queue. `None` once shut down.
    tx: Mutex<Option<Sender<Job>>>,
    /// Set on shutdown; queued jobs observe it before starting.
    cancelled: Arc<AtomicBool>,
    /// The worker thread.
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl InjectionWorker {
    /// Spawn the worker thread.
    pub fn spawn() -> io::Result<Self> {
        let (tx, rx) = unbounded::<Job>();
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = cancelled.clone();
        let handle = thread::Builder::new()
            .name("injection-worker".into())
            .spawn(move || {
                for job in rx {
                    if flag.load(Ordering::SeqCst) {
                        trace!("skipping_queued_job");
                        continue;
                    }
                    if catch_unwind(AssertUnwindSafe(job)).is_err() {
                        error!("injection_job_panicked");
                    }
                }
                debug!("injection_worker_exit");
            })?;
        Ok(Self {
            tx: Mutex::new(Some(tx)),
            cancelled,
            handle: Mutex::new(Some(handle)),
        })
    }

    /// Queue a job. Returns false if the worker has been shut down.
    pub fn submit<F>(&self, job: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        match self.tx.lock().as_ref() {
            Some(tx) => tx.send(Box::new(job)).is_ok(),
            None => false,
        }
    }

    /// True until `shutdown` has been called.
    pub fn is_running(&self) -> bool {
        self.tx.lock().is_some()
    }

    /// Stop the worker. Idempotent.
    pub fn shutdown(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        drop(self.tx.lock().take());
        let handle = self.handle.lock().take();
        if let Some(h) = handle {
            if h.thread().id() == thread::current().id() {
                return;
            }
            if h.join().is_err() {
                error!("injection_worker_join_failed");
            }
        }
    }
}

impl Drop for InjectionWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::atomic::AtomicUsize, time::Duration};

    use crossbeam_channel::bounded;

    use super::*;

    #[test]
    fn runs_jobs_in_order() {
        let worker = InjectionWorker::spawn().expect("spawn");
        let seen = Arc::new(Mutex::new(Vec::new()));
        for i in 0..5 {
            let seen = seen.clone();
            assert!(worker.submit(move || seen.lock().push(i)));
        }
        let (done_tx, done_rx) = bounded(1);
        assert!(worker.submit(move || {
            let _sent = done_tx.send(());
        }));
        done_rx.recv_timeout(Duration::from_secs(10)).unwrap();
        assert_eq!(*seen.lock(), [0, 1, 2, 3, 4]);
    }

    #[test]
    fn shutdown_skips_queued_jobs() {
        let worker = InjectionWorker::spawn().expect("spawn");
        let (started_tx, started_rx) = bounded::<()>(1);
        let (release_tx, release_rx) = bounded::<()>(1);
        let ran = Arc::new(AtomicUsize::new(0));

        let r = ran.clone();
        worker.submit(move || {
            let _ = started_tx.send(());
            let _ = release_rx.recv();
            r.fetch_add(1, Ordering::SeqCst);
        });
        for _ in 0..3 {
            let r = ran.clone();
            worker.submit(move || {
                r.fetch_add(100, Ordering::SeqCst);
            });
        }
        started_rx.recv().expect("first job started");

        let releaser = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            let _ = release_tx.send(());
        });
        worker.shutdown();
        releaser.join().expect("releaser");

        assert_eq!(ran.load(Ordering::SeqCst), 1);
        assert!(!worker.is_running());
        assert!(!worker.submit(|| {}));
    }

    #[test]
    fn panicking_job_does_not_kill_worker() {
        let worker = InjectionWorker::spawn().expect("spawn");
        let (tx, rx) = bounded::<u32>(1);
        worker.submit(|| panic!("boom"));
        worker.submit(move || {
            let _ = tx.send(7);
        });
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok(7));
    }

    #[test]
    fn shutdown_is_idempotent() {
        let worker = InjectionWorker::spawn().expect("spawn");
        worker.shutdown();
        worker.shutdown();
        assert!(!worker.is_running());
    }
}
