//! One-shot battery status read.
//!
//! Reads the platform battery directly rather than through a running
//! monitor, so it works whether or not the service is up.

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{OutputFormat, print_formatted};
use crate::source::SysfsSource;

#[derive(Serialize)]
struct StatusResult {
    percent: i32,
    status: String,
    temperature_c: f64,
    millivolts: i32,
}

pub async fn run(format: OutputFormat) -> Result<()> {
    let source = SysfsSource::discover()
        .ok_or_else(|| anyhow::anyhow!("No battery found on this system"))?;

    let sample = source
        .read_sample()
        .resolve()
        .ok_or_else(|| anyhow::anyhow!("Battery reported a malformed sample"))?;

    let result = StatusResult {
        percent: sample.percent,
        status: sample.charging.to_string(),
        temperature_c: sample.temperature_deci_c as f64 / 10.0,
        millivolts: sample.millivolts,
    };

    print_formatted(&result, format, |r| {
        format!(
            "Battery Level: {}%\nStatus: {}\nTemperature: {:.1} °C\nVoltage: {} mV",
            r.percent, r.status, r.temperature_c, r.millivolts
        )
    });

    Ok(())
}
