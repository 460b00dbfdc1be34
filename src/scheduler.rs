//! Periodic redraw scheduling.
//!
//! A single cancellable tick chain on the tokio runtime. Each tick fires
//! the bound callback and only then arms the next delay, so a slow callback
//! pushes the following tick out instead of letting ticks pile up. `start`
//! is stop-then-start: calling it on a running scheduler resets the chain,
//! and the first tick of the new chain lands a full interval later.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Cancellable repeating task driving indicator redraws
pub struct RedrawScheduler {
    interval: Duration,
    callback: Arc<dyn Fn() + Send + Sync>,
    task: Option<JoinHandle<()>>,
}

impl RedrawScheduler {
    pub fn new(interval: Duration, callback: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            interval,
            callback: Arc::new(callback),
            task: None,
        }
    }

    /// Begin (or restart) the tick chain. The first tick fires one full
    /// interval from now; there is never more than one live chain.
    pub fn start(&mut self) {
        self.stop();

        let interval = self.interval;
        let callback = self.callback.clone();
        self.task = Some(tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                callback();
            }
        }));
    }

    /// Cancel the pending tick. A callback that has already begun finishes;
    /// no further ticks fire. No-op when already stopped.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Whether a tick chain is currently live
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for RedrawScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
