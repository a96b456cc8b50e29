//! One-shot background workers with results marshalled to the UI thread.
//!
//! # Responsibility
//! - Run blocking AI calls off the UI thread.
//! - Deliver completions through a single UI-thread-affine queue.
//!
//! # Invariants
//! - UI state is only touched inside `UiQueue::drain`, on the thread that
//!   created the queue.
//! - Workers cannot be cancelled once started, and there is no cap on
//!   in-flight workers; the last completion to be drained wins.

use log::{debug, error, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle, ThreadId};
use std::time::Duration;

type UiCallback<S> = Box<dyn FnOnce(&mut S) + Send + 'static>;

/// Deferred-callback queue owned by the UI thread.
pub struct UiQueue<S> {
    sender: Sender<UiCallback<S>>,
    receiver: Receiver<UiCallback<S>>,
    owner: ThreadId,
}

/// Cloneable, thread-safe posting end of a `UiQueue`.
pub struct UiHandle<S> {
    sender: Sender<UiCallback<S>>,
}

impl<S> Clone for UiHandle<S> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<S> UiHandle<S> {
    /// Enqueues `callback` for the UI thread.
    ///
    /// Returns `false` when the queue has been dropped.
    pub fn post<F>(&self, callback: F) -> bool
    where
        F: FnOnce(&mut S) + Send + 'static,
    {
        if self.sender.send(Box::new(callback)).is_err() {
            warn!("event=ui_post module=runner status=dropped reason=queue_closed");
            return false;
        }
        true
    }
}

impl<S> Default for UiQueue<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> UiQueue<S> {
    /// Creates a queue bound to the calling thread.
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            sender,
            receiver,
            owner: thread::current().id(),
        }
    }

    pub fn handle(&self) -> UiHandle<S> {
        UiHandle {
            sender: self.sender.clone(),
        }
    }

    /// Runs every pending callback against `state`; returns how many ran.
    ///
    /// Refuses to run anything off the owning thread.
    pub fn drain(&self, state: &mut S) -> usize {
        if !self.on_owner_thread() {
            return 0;
        }
        let mut ran = 0;
        while let Ok(callback) = self.receiver.try_recv() {
            callback(state);
            ran += 1;
        }
        ran
    }

    /// Blocks up to `timeout` for the first callback, then drains the rest.
    pub fn wait_and_drain(&self, state: &mut S, timeout: Duration) -> usize {
        if !self.on_owner_thread() {
            return 0;
        }
        match self.receiver.recv_timeout(timeout) {
            Ok(callback) => {
                callback(state);
                1 + self.drain(state)
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => 0,
        }
    }

    fn on_owner_thread(&self) -> bool {
        if thread::current().id() != self.owner {
            error!("event=ui_drain module=runner status=rejected reason=foreign_thread");
            return false;
        }
        true
    }
}

/// Spawns one short-lived worker per request.
pub struct BackgroundRunner<S> {
    handle: UiHandle<S>,
    next_job: Arc<AtomicU64>,
}

impl<S> Clone for BackgroundRunner<S> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle.clone(),
            next_job: Arc::clone(&self.next_job),
        }
    }
}

impl<S: 'static> BackgroundRunner<S> {
    pub fn new(handle: UiHandle<S>) -> Self {
        Self {
            handle,
            next_job: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Runs `work` on a new thread and posts `on_done(state, result)` to the
    /// UI queue when it returns.
    pub fn spawn<T, W, C>(
        &self,
        label: &'static str,
        work: W,
        on_done: C,
    ) -> std::io::Result<JoinHandle<()>>
    where
        T: Send + 'static,
        W: FnOnce() -> T + Send + 'static,
        C: FnOnce(&mut S, T) + Send + 'static,
    {
        let job_id = self.next_job.fetch_add(1, Ordering::Relaxed);
        let handle = self.handle.clone();

        let spawned = thread::Builder::new()
            .name(format!("taskpilot-{label}-{job_id}"))
            .spawn(move || {
                debug!("event=worker_run module=runner status=start job={label} job_id={job_id}");
                let result = work();
                let delivered = handle.post(move |state| on_done(state, result));
                debug!(
                    "event=worker_run module=runner status=done job={label} job_id={job_id} delivered={delivered}"
                );
            });

        if let Err(err) = &spawned {
            error!(
                "event=worker_spawn module=runner status=error job={label} job_id={job_id} error={err}"
            );
        }
        spawned
    }
}

#[cfg(test)]
mod tests {
    use super::{BackgroundRunner, UiQueue};
    use std::thread;
    use std::time::Duration;

    #[derive(Default)]
    struct Label {
        text: String,
        updates: usize,
    }

    #[test]
    fn callbacks_run_only_when_drained() {
        let queue = UiQueue::<Label>::new();
        let mut state = Label::default();
        let runner = BackgroundRunner::new(queue.handle());

        let worker = runner
            .spawn("topic", || "Rust macros".to_string(), |label: &mut Label, topic| {
                label.text = topic;
                label.updates += 1;
            })
            .unwrap();
        worker.join().unwrap();

        assert!(state.text.is_empty());
        assert_eq!(queue.drain(&mut state), 1);
        assert_eq!(state.text, "Rust macros");
        assert_eq!(queue.drain(&mut state), 0);
    }

    #[test]
    fn overlapping_requests_all_complete_and_last_drained_wins() {
        let queue = UiQueue::<Label>::new();
        let mut state = Label::default();
        let runner = BackgroundRunner::new(queue.handle());

        let workers: Vec<_> = (0..3)
            .map(|n| {
                runner
                    .spawn("analysis", move || n, |label: &mut Label, n: i32| {
                        label.text = format!("result-{n}");
                        label.updates += 1;
                    })
                    .unwrap()
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(queue.drain(&mut state), 3);
        assert_eq!(state.updates, 3);
        assert!(state.text.starts_with("result-"));
    }

    #[test]
    fn wait_and_drain_blocks_for_slow_worker() {
        let queue = UiQueue::<Label>::new();
        let mut state = Label::default();
        let runner = BackgroundRunner::new(queue.handle());

        runner
            .spawn(
                "slow",
                || {
                    thread::sleep(Duration::from_millis(50));
                    "done".to_string()
                },
                |label: &mut Label, text| label.text = text,
            )
            .unwrap();

        assert_eq!(queue.wait_and_drain(&mut state, Duration::from_secs(5)), 1);
        assert_eq!(state.text, "done");
    }

    #[test]
    fn drain_from_foreign_thread_is_refused() {
        let queue = UiQueue::<Label>::new();
        queue.handle().post(|label: &mut Label| label.updates += 1);

        let (ran, queue) = thread::spawn(move || {
            let mut state = Label::default();
            (queue.drain(&mut state), queue)
        })
        .join()
        .unwrap();

        assert_eq!(ran, 0);
        let mut state = Label::default();
        assert_eq!(queue.drain(&mut state), 1);
        assert_eq!(state.updates, 1);
    }

    #[test]
    fn post_after_queue_drop_reports_false() {
        let queue = UiQueue::<Label>::new();
        let handle = queue.handle();
        drop(queue);
        assert!(!handle.post(|label: &mut Label| label.updates += 1));
    }
}
