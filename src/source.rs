//! Platform battery sample source.
//!
//! Reads `/sys/class/power_supply` and pushes raw samples into the monitor
//! mailbox on a fixed cadence. The reader is deliberately dumb: values are
//! forwarded as-is, and anything malformed becomes a rejected sample
//! downstream rather than an error here. On hosts without a sysfs battery
//! entry, discovery simply returns `None`.

use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::sample::{
    RawSample, STATUS_CHARGING, STATUS_DISCHARGING, STATUS_FULL, STATUS_NOT_CHARGING,
    STATUS_UNKNOWN,
};
use crate::service::{Signal, SignalSender};

/// Default sysfs root scanned for a battery entry
const POWER_SUPPLY_ROOT: &str = "/sys/class/power_supply";

/// Battery reader bound to one power-supply directory
pub struct SysfsSource {
    battery_dir: PathBuf,
}

impl SysfsSource {
    /// Locate the first battery-type supply on this host
    pub fn discover() -> Option<Self> {
        Self::discover_under(Path::new(POWER_SUPPLY_ROOT))
    }

    fn discover_under(root: &Path) -> Option<Self> {
        let entries = std::fs::read_dir(root).ok()?;
        for entry in entries.flatten() {
            let dir = entry.path();
            let supply_type = std::fs::read_to_string(dir.join("type")).unwrap_or_default();
            if supply_type.trim() == "Battery" {
                return Some(Self { battery_dir: dir });
            }
        }
        None
    }

    /// Read one raw sample from sysfs.
    ///
    /// Charge counters are preferred over energy counters; hosts exposing
    /// neither fall back to the precomputed capacity percentage with a
    /// scale of 100. Missing attributes read as zero, which the sample
    /// boundary rejects when it matters (a zero scale).
    pub fn read_sample(&self) -> RawSample {
        let (level, scale) = if self.battery_dir.join("charge_full").exists() {
            (self.read_i32("charge_now"), self.read_i32("charge_full"))
        } else if self.battery_dir.join("energy_full").exists() {
            (self.read_i32("energy_now"), self.read_i32("energy_full"))
        } else {
            (self.read_i32("capacity"), 100)
        };

        let status = std::fs::read_to_string(self.battery_dir.join("status")).unwrap_or_default();

        RawSample {
            level,
            scale,
            status: status_code_for(status.trim()),
            temperature_deci_c: self.read_i32("temp"),
            millivolts: self.read_i32("voltage_now") / 1000,
        }
    }

    fn read_i32(&self, name: &str) -> i32 {
        std::fs::read_to_string(self.battery_dir.join(name))
            .ok()
            .and_then(|content| content.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Poll sysfs until the monitor goes away
    pub async fn run(self, poll_interval: Duration, handle: SignalSender) {
        debug!("Sampling battery at {:?}", self.battery_dir);
        loop {
            let sample = self.read_sample();
            if !handle.send(Signal::Sample(sample)).await {
                debug!("Monitor mailbox closed, stopping sample source");
                return;
            }
            tokio::time::sleep(poll_interval).await;
        }
    }
}

/// Kernel status strings mapped onto the platform status codes
fn status_code_for(label: &str) -> i32 {
    match label {
        "Charging" => STATUS_CHARGING,
        "Discharging" => STATUS_DISCHARGING,
        "Full" => STATUS_FULL,
        "Not charging" => STATUS_NOT_CHARGING,
        _ => STATUS_UNKNOWN,
    }
}
