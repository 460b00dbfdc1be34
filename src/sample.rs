//! Raw power sample resolution.
//!
//! The platform delivers battery readings as plain integers: a charge level,
//! the scale that level is measured against, a numeric charging status code,
//! temperature in tenths of a degree Celsius and voltage in millivolts. This
//! module normalizes those readings into [`PowerSample`] values and rejects
//! malformed ones before they can reach state tracking.

use serde::Serialize;
use std::fmt;

/// Platform status code: charging state could not be determined.
pub const STATUS_UNKNOWN: i32 = 1;
/// Platform status code: battery is charging.
pub const STATUS_CHARGING: i32 = 2;
/// Platform status code: battery is discharging.
pub const STATUS_DISCHARGING: i32 = 3;
/// Platform status code: on external power but not charging.
pub const STATUS_NOT_CHARGING: i32 = 4;
/// Platform status code: battery is full.
pub const STATUS_FULL: i32 = 5;

/// Charging state reported by the power source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChargingState {
    Charging,
    Discharging,
    Full,
    NotCharging,
    Unknown,
}

impl ChargingState {
    /// Map a platform status code onto the enum. Unrecognized codes are
    /// treated as `Unknown` rather than rejected.
    pub fn from_status_code(code: i32) -> Self {
        match code {
            STATUS_CHARGING => ChargingState::Charging,
            STATUS_DISCHARGING => ChargingState::Discharging,
            STATUS_FULL => ChargingState::Full,
            STATUS_NOT_CHARGING => ChargingState::NotCharging,
            _ => ChargingState::Unknown,
        }
    }

    /// Human-readable state name, as shown in log lines and the indicator
    pub fn as_str(&self) -> &'static str {
        match self {
            ChargingState::Charging => "Charging",
            ChargingState::Discharging => "Discharging",
            ChargingState::Full => "Full",
            ChargingState::NotCharging => "Not Charging",
            ChargingState::Unknown => "Unknown",
        }
    }

    /// Glyph used on level-change log lines
    pub(crate) fn level_glyph(&self) -> &'static str {
        match self {
            ChargingState::Charging => "⚡",
            ChargingState::Full => "✅",
            ChargingState::Discharging => "🔻",
            _ => "•",
        }
    }
}

impl fmt::Display for ChargingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One raw reading exactly as the platform delivered it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSample {
    /// Battery charge level, in platform units
    pub level: i32,
    /// Scale the level is measured against (level == scale means full)
    pub scale: i32,
    /// Numeric charging status code (see the STATUS_* constants)
    pub status: i32,
    /// Battery temperature in tenths of a degree Celsius
    pub temperature_deci_c: i32,
    /// Battery voltage in millivolts
    pub millivolts: i32,
}

impl RawSample {
    /// Resolve the raw reading into a normalized sample.
    ///
    /// Returns `None` when the scale is zero or negative; such readings are
    /// malformed and must be discarded without touching tracked state. The
    /// percentage is exact integer division, so 41.9% reads as 41.
    pub fn resolve(&self) -> Option<PowerSample> {
        if self.scale <= 0 {
            return None;
        }

        // Wide intermediate: sysfs charge counters run into the millions.
        let percent = (self.level as i64 * 100 / self.scale as i64) as i32;

        Some(PowerSample {
            percent,
            charging: ChargingState::from_status_code(self.status),
            temperature_deci_c: self.temperature_deci_c,
            millivolts: self.millivolts,
        })
    }
}

/// Normalized, immutable power sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerSample {
    /// Charge percentage in [0, 100], or -1 when the platform reports an
    /// unknown level
    pub percent: i32,
    pub charging: ChargingState,
    pub temperature_deci_c: i32,
    pub millivolts: i32,
}
