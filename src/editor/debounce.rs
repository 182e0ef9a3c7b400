//! # Debouncer
//!
//! Collapses a burst of triggers into one delayed fire. Each `trigger()`
//! restarts the timer; only the trigger that stays quiet for the whole
//! delay fires.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Duration;

pub struct Debouncer {
    delay: Duration,
    generation: u64,
    pending: Option<JoinHandle<()>>,
    sender: mpsc::UnboundedSender<u64>,
    receiver: mpsc::UnboundedReceiver<u64>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            delay,
            generation: 0,
            pending: None,
            sender,
            receiver,
        }
    }

    /// Restart the timer. Must be called inside a tokio runtime.
    pub fn trigger(&mut self) {
        self.cancel();

        let generation = self.generation;
        let sender = self.sender.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = sender.send(generation);
        }));
    }

    /// Drop the pending fire, if any
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Resolve once the latest trigger fires. Stale fires from cancelled
    /// timers are skipped; without a trigger this never resolves.
    pub async fn fired(&mut self) {
        while let Some(generation) = self.receiver.recv().await {
            if generation == self.generation {
                self.pending = None;
                return;
            }
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
