//! The monitor service command

use anyhow::Result;
use clap::Args;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::events::BusEvent;
use crate::indicator::TextIndicator;
use crate::platform;
use crate::service::BatteryMonitor;
use crate::source::SysfsSource;
use crate::store::LogStore;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Override the indicator redraw interval (milliseconds)
    #[arg(long)]
    pub redraw_interval_ms: Option<u64>,

    /// Override the battery poll interval (milliseconds)
    #[arg(long)]
    pub poll_ms: Option<u64>,

    /// Override the log database path
    #[arg(long)]
    pub db: Option<String>,
}

pub async fn run(args: RunArgs) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(ms) = args.redraw_interval_ms {
        config.monitor.redraw_interval_ms = ms;
    }
    if let Some(ms) = args.poll_ms {
        config.monitor.sample_poll_ms = ms;
    }
    if let Some(db) = args.db {
        config.store.db_path = Some(db);
    }

    let store = LogStore::open(&config.db_path()?)?;
    let monitor = BatteryMonitor::new(
        Duration::from_millis(config.monitor.redraw_interval_ms),
        store,
        Box::new(TextIndicator::new()),
    );
    let handle = monitor.handle();

    // Echo bus traffic so transitions are visible in the service log
    let mut events = monitor.bus().subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                BusEvent::LogAppended(line) => info!("{}", line),
                BusEvent::StatusChanged(status) => debug!(
                    "Status: {}% {} {:.1}°C {} mV",
                    status.percent, status.charging, status.temperature_c, status.millivolts
                ),
            }
        }
    });

    platform::spawn_signal_listeners(handle.clone());

    match SysfsSource::discover() {
        Some(source) => {
            let poll_interval = Duration::from_millis(config.monitor.sample_poll_ms);
            tokio::spawn(source.run(poll_interval, handle));
        }
        None => warn!("No battery found; running without a sample source"),
    }

    monitor.run().await
}
