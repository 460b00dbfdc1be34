//! Battery monitor orchestration.
//!
//! One mailbox, one consumer. Samples, display visibility changes, status
//! requests and redraw ticks all arrive as [`Signal`]s on a bounded mpsc
//! channel and are handled strictly in order by the run loop, so tracked
//! state needs no locking. The redraw scheduler posts `RedrawTick` back
//! into the same mailbox with a non-blocking send; when the loop is busy
//! the tick is dropped rather than queued.

use anyhow::Result;
use chrono::Local;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::events::EventBus;
use crate::indicator::{IndicatorError, IndicatorSurface};
use crate::render::{self, Glyph};
use crate::sample::RawSample;
use crate::scheduler::RedrawScheduler;
use crate::store::LogStore;
use crate::tracker::StateTracker;

/// Mailbox depth. Sources await their sends; only ticks are droppable.
const MAILBOX_CAPACITY: usize = 64;

/// Indicator subtitle shown before the first sample arrives
const INIT_STATUS: &str = "Init...";

/// Inbound signal for the monitor loop
#[derive(Debug, Clone)]
pub enum Signal {
    /// A raw power sample from the platform source
    Sample(RawSample),
    /// Display became visible again
    DisplayOn,
    /// Display went dark
    DisplayOff,
    /// Re-publish the current snapshot without re-sampling
    StatusRequest,
    /// Scheduler tick: redraw the indicator from cached state
    RedrawTick,
    /// Stop the loop and tear down
    Shutdown,
}

/// Cloneable handle used by sources and platform adapters to reach the loop
#[derive(Clone)]
pub struct SignalSender {
    tx: mpsc::Sender<Signal>,
}

impl SignalSender {
    /// Deliver a signal, waiting for mailbox space. Returns false once the
    /// monitor has shut down; producers should stop when they see it.
    pub async fn send(&self, signal: Signal) -> bool {
        self.tx.send(signal).await.is_ok()
    }
}

/// The monitor service: tracker, scheduler, store, bus and surface
pub struct BatteryMonitor {
    tracker: StateTracker,
    scheduler: RedrawScheduler,
    store: LogStore,
    bus: EventBus,
    surface: Box<dyn IndicatorSurface>,
    rx: mpsc::Receiver<Signal>,
    tx: mpsc::Sender<Signal>,
}

impl BatteryMonitor {
    pub fn new(
        redraw_interval: Duration,
        store: LogStore,
        surface: Box<dyn IndicatorSurface>,
    ) -> Self {
        let (tx, rx) = mpsc::channel(MAILBOX_CAPACITY);

        // The tick callback must never block the scheduler task; a full
        // mailbox just coalesces the tick away.
        let tick_tx = tx.clone();
        let scheduler = RedrawScheduler::new(redraw_interval, move || {
            let _ = tick_tx.try_send(Signal::RedrawTick);
        });

        Self {
            tracker: StateTracker::new(),
            scheduler,
            store,
            bus: EventBus::new(),
            surface,
            rx,
            tx,
        }
    }

    /// Handle for pushing signals into the mailbox
    pub fn handle(&self) -> SignalSender {
        SignalSender {
            tx: self.tx.clone(),
        }
    }

    /// The in-process event bus. Subscribe before calling [`Self::run`].
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Read access to the underlying log store
    pub fn store(&self) -> &LogStore {
        &self.store
    }

    /// Drive the monitor until shutdown. The redraw chain is released on
    /// every exit path (the scheduler also stops itself on drop).
    pub async fn run(mut self) -> Result<()> {
        info!("Battery monitor started");
        self.redraw(0, INIT_STATUS);
        self.scheduler.start();

        while let Some(signal) = self.rx.recv().await {
            if !self.handle_signal(signal) {
                break;
            }
        }

        self.scheduler.stop();
        info!("Battery monitor stopped");
        Ok(())
    }

    /// Process one signal. Returns false when the loop should exit.
    pub fn handle_signal(&mut self, signal: Signal) -> bool {
        match signal {
            Signal::Sample(raw) => self.handle_sample(raw),
            Signal::DisplayOn => {
                debug!("Display on: resuming redraw cadence");
                self.redraw_current();
                self.scheduler.start();
            }
            Signal::DisplayOff => {
                debug!("Display off: suspending redraw cadence");
                self.scheduler.stop();
            }
            Signal::StatusRequest => {
                self.bus.publish_status_changed(self.tracker.snapshot());
            }
            Signal::RedrawTick => self.redraw_current(),
            Signal::Shutdown => {
                info!("Shutdown requested");
                return false;
            }
        }
        true
    }

    fn handle_sample(&mut self, raw: RawSample) {
        let Some(sample) = raw.resolve() else {
            debug!("Discarding malformed sample (scale {})", raw.scale);
            return;
        };

        let outcome = self.tracker.apply(&sample, Local::now());
        let Some(snapshot) = outcome.snapshot else {
            return;
        };

        self.redraw_current();

        for event in &outcome.events {
            let line = event.to_string();
            if let Err(e) = self.store.append(&line) {
                // The loop must stay alive; the next sample still flows.
                error!("Failed to append log line: {:#}", e);
            }
            self.bus.publish_log_appended(&line);
        }

        self.bus.publish_status_changed(snapshot);
    }

    /// Redraw the indicator from the tracked values
    fn redraw_current(&mut self) {
        let (percent, label) = {
            let state = self.tracker.state();
            if state.seen_first_sample {
                (state.last_percent, state.last_charging.as_str())
            } else {
                (0, INIT_STATUS)
            }
        };
        self.redraw(percent, label);
    }

    fn redraw(&mut self, percent: i32, status_label: &str) {
        let mut update = render::compose(percent, status_label);
        if let Err(e) = self.surface.apply(&update) {
            match e {
                IndicatorError::GlyphUnsupported => {
                    debug!("Dynamic glyph unavailable, using the default glyph");
                    update.glyph = Glyph::Default;
                    if let Err(e) = self.surface.apply(&update) {
                        error!("Indicator update failed: {}", e);
                    }
                }
                other => error!("Indicator update failed: {}", other),
            }
        }
    }
}
