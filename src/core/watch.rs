//! Push-style delivery of store snapshots.
//!
//! A [`Subscription`] polls a loader on its own thread and emits a new
//! [`Snapshot`] whenever the loaded value changes. The reconciliation
//! functions never see the subscription; callers hand them the snapshot
//! data as a plain argument.

use crate::errors::AppResult;
use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// One delivered value with its delivery sequence number (1-based).
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    pub seq: u64,
    pub data: T,
}

/// Cancelable stream of snapshots. Dropping the handle cancels it.
pub struct Subscription<T> {
    rx: Receiver<Snapshot<T>>,
    cancel: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl<T> Subscription<T>
where
    T: PartialEq + Clone + Send + 'static,
{
    /// Start polling `load` every `interval`. The first snapshot is
    /// delivered right away. Load failures are logged and the previous
    /// snapshot stays current.
    pub fn spawn<F>(interval: Duration, mut load: F) -> Self
    where
        F: FnMut() -> AppResult<T> + Send + 'static,
    {
        let (tx, rx) = channel::unbounded::<Snapshot<T>>();
        let (cancel_tx, cancel_rx) = channel::bounded::<()>(1);

        let handle = thread::spawn(move || {
            let mut last: Option<T> = None;
            let mut seq = 0u64;

            loop {
                match load() {
                    Ok(data) if last.as_ref() != Some(&data) => {
                        seq += 1;
                        last = Some(data.clone());
                        if tx.send(Snapshot { seq, data }).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => tracing::warn!(error = %e, "snapshot load failed"),
                }

                match cancel_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    // explicit cancel or handle dropped
                    _ => break,
                }
            }
        });

        Self {
            rx,
            cancel: Some(cancel_tx),
            handle: Some(handle),
        }
    }

    /// Block until the next snapshot; `None` once the stream has ended.
    pub fn recv(&self) -> Option<Snapshot<T>> {
        self.rx.recv().ok()
    }

    /// Raw channel, for use with `select!` over several subscriptions.
    pub fn receiver(&self) -> &Receiver<Snapshot<T>> {
        &self.rx
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<Snapshot<T>> {
        self.rx.recv_timeout(timeout).ok()
    }

    /// Stop polling and wait for the poller to exit.
    pub fn cancel(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.try_send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        // dropping the sender disconnects the poller's cancel channel
        self.cancel.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Monotonic token attached to a query when it is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// Last-request-wins guard: a response is applied only when its token is
/// still the most recently issued one, so a slow stale query cannot
/// overwrite a fresher result.
#[derive(Debug, Clone, Default)]
pub struct RequestTokens {
    latest: Arc<AtomicU64>,
}

impl RequestTokens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }

    /// Pass `value` through only for the current token.
    pub fn accept<T>(&self, token: RequestToken, value: T) -> Option<T> {
        if self.is_current(token) {
            Some(value)
        } else {
            tracing::debug!(token = token.0, "stale response discarded");
            None
        }
    }
}
