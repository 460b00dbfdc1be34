//! Power state tracking and transition detection.
//!
//! Every accepted sample is compared against the last committed percentage
//! and charging state. Only genuine transitions produce log events and a
//! status broadcast; repeated identical readings are absorbed here so the
//! rest of the pipeline stays quiet. Temperature and voltage are recorded
//! from every sample but never participate in change detection.
//!
//! The tracker performs no I/O. Appending events, publishing snapshots and
//! redrawing the indicator are the orchestrator's job, which keeps this
//! logic directly testable.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;

use crate::sample::{ChargingState, PowerSample};

/// Last values the monitor has committed to, plus the first-sample latch
#[derive(Debug, Clone)]
pub struct TrackedState {
    pub last_percent: i32,
    pub last_charging: ChargingState,
    pub last_temperature_deci_c: i32,
    pub last_millivolts: i32,
    /// Flips false -> true on the first accepted sample and never back
    pub seen_first_sample: bool,
}

impl Default for TrackedState {
    fn default() -> Self {
        Self {
            last_percent: -1,
            last_charging: ChargingState::Unknown,
            last_temperature_deci_c: 0,
            last_millivolts: 0,
            seen_first_sample: false,
        }
    }
}

impl TrackedState {
    /// Point-in-time view of the tracked values
    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            percent: self.last_percent,
            charging: self.last_charging,
            temperature_c: self.last_temperature_deci_c as f64 / 10.0,
            millivolts: self.last_millivolts,
        }
    }
}

/// Point-in-time status published to in-process listeners
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusSnapshot {
    pub percent: i32,
    pub charging: ChargingState,
    pub temperature_c: f64,
    pub millivolts: i32,
}

/// Kind of transition a log event records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// First sample after service start
    ServiceStart,
    /// External power attached
    Connected,
    /// External power detached, or charging otherwise ended
    Disconnected,
    /// Charge percentage moved
    LevelChanged(ChargingState),
}

impl TransitionKind {
    fn glyph(&self) -> &'static str {
        match self {
            TransitionKind::ServiceStart => "🚀",
            TransitionKind::Connected => "🔌",
            TransitionKind::Disconnected => "🔋",
            TransitionKind::LevelChanged(state) => state.level_glyph(),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            TransitionKind::ServiceStart => "Service Start",
            TransitionKind::Connected => "Connected",
            TransitionKind::Disconnected => "Disconnected",
            TransitionKind::LevelChanged(state) => state.as_str(),
        }
    }
}

/// One transition event; `Display` renders the stored log line
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionEvent {
    /// Local time of day, "HH:MM:SS"
    pub timestamp: String,
    pub percent: i32,
    pub temperature_deci_c: i32,
    pub kind: TransitionKind,
}

impl fmt::Display for TransitionEvent {
    /// `14:30:05 |  50% | 25.3°C | ⚡ Charging` (percent right-aligned to 3)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {:>3}% | {:.1}°C | {} {}",
            self.timestamp,
            self.percent,
            self.temperature_deci_c as f64 / 10.0,
            self.kind.glyph(),
            self.kind.label()
        )
    }
}

/// Everything one accepted sample produced
#[derive(Debug, Clone, Default)]
pub struct TransitionOutcome {
    /// Zero, one or two events; on a simultaneous change the state-change
    /// event comes first
    pub events: Vec<TransitionEvent>,
    /// Present whenever anything changed (always on the first sample),
    /// reflecting post-update values
    pub snapshot: Option<StatusSnapshot>,
}

/// Change detector over [`TrackedState`]
#[derive(Debug, Default)]
pub struct StateTracker {
    state: TrackedState,
}

impl StateTracker {
    pub fn new() -> Self {
        Self {
            state: TrackedState::default(),
        }
    }

    /// Current tracked values
    pub fn state(&self) -> &TrackedState {
        &self.state
    }

    /// Snapshot of the tracked values; valid before the first sample too,
    /// where it carries the -1/Unknown sentinels
    pub fn snapshot(&self) -> StatusSnapshot {
        self.state.snapshot()
    }

    /// Fold one accepted sample into the tracked state.
    ///
    /// The first sample always produces a single service-start event.
    /// Afterwards, a charging-state change produces a connect or disconnect
    /// event and a percentage change produces a level event; both can fire
    /// from one sample. Identical readings produce nothing, though
    /// temperature and voltage are still refreshed.
    pub fn apply(&mut self, sample: &PowerSample, now: DateTime<Local>) -> TransitionOutcome {
        let timestamp = now.format("%H:%M:%S").to_string();

        // Not part of the change key; recorded from every sample.
        self.state.last_temperature_deci_c = sample.temperature_deci_c;
        self.state.last_millivolts = sample.millivolts;

        let event = |kind| TransitionEvent {
            timestamp: timestamp.clone(),
            percent: sample.percent,
            temperature_deci_c: sample.temperature_deci_c,
            kind,
        };

        if !self.state.seen_first_sample {
            self.state.seen_first_sample = true;
            self.state.last_percent = sample.percent;
            self.state.last_charging = sample.charging;

            return TransitionOutcome {
                events: vec![event(TransitionKind::ServiceStart)],
                snapshot: Some(self.state.snapshot()),
            };
        }

        let state_changed = sample.charging != self.state.last_charging;
        let percent_changed = sample.percent != self.state.last_percent;

        if !state_changed && !percent_changed {
            return TransitionOutcome::default();
        }

        self.state.last_percent = sample.percent;
        self.state.last_charging = sample.charging;

        let mut events = Vec::with_capacity(2);
        if state_changed {
            let kind = if sample.charging == ChargingState::Charging {
                TransitionKind::Connected
            } else {
                TransitionKind::Disconnected
            };
            events.push(event(kind));
        }
        if percent_changed {
            events.push(event(TransitionKind::LevelChanged(sample.charging)));
        }

        TransitionOutcome {
            events,
            snapshot: Some(self.state.snapshot()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 7, h, m, s).unwrap()
    }

    fn sample(percent: i32, charging: ChargingState) -> PowerSample {
        PowerSample {
            percent,
            charging,
            temperature_deci_c: 253,
            millivolts: 4100,
        }
    }

    #[test]
    fn test_first_sample_emits_service_start() {
        let mut tracker = StateTracker::new();

        let outcome = tracker.apply(&sample(50, ChargingState::Charging), at(14, 30, 5));

        assert_eq!(outcome.events.len(), 1);
        assert_eq!(outcome.events[0].kind, TransitionKind::ServiceStart);
        assert_eq!(
            outcome.events[0].to_string(),
            "14:30:05 |  50% | 25.3°C | 🚀 Service Start"
        );

        let snapshot = outcome.snapshot.unwrap();
        assert_eq!(snapshot.percent, 50);
        assert_eq!(snapshot.charging, ChargingState::Charging);
        assert_eq!(snapshot.temperature_c, 25.3);
        assert_eq!(snapshot.millivolts, 4100);
    }

    #[test]
    fn test_first_sample_is_unconditional() {
        // Even a sample matching the sentinels must produce the start event
        let mut tracker = StateTracker::new();

        let outcome = tracker.apply(&sample(-1, ChargingState::Unknown), at(9, 0, 0));

        assert_eq!(outcome.events.len(), 1);
        assert_eq!(outcome.events[0].kind, TransitionKind::ServiceStart);
        assert!(outcome.snapshot.is_some());
        assert!(tracker.state().seen_first_sample);
    }

    #[test]
    fn test_identical_sample_is_absorbed() {
        let mut tracker = StateTracker::new();
        tracker.apply(&sample(50, ChargingState::Charging), at(10, 0, 0));

        let outcome = tracker.apply(&sample(50, ChargingState::Charging), at(10, 0, 2));

        assert!(outcome.events.is_empty());
        assert!(outcome.snapshot.is_none());
    }

    #[test]
    fn test_temperature_and_voltage_refresh_without_events() {
        let mut tracker = StateTracker::new();
        tracker.apply(&sample(50, ChargingState::Charging), at(10, 0, 0));

        let warmer = PowerSample {
            percent: 50,
            charging: ChargingState::Charging,
            temperature_deci_c: 312,
            millivolts: 4050,
        };
        let outcome = tracker.apply(&warmer, at(10, 0, 2));

        assert!(outcome.events.is_empty());
        assert!(outcome.snapshot.is_none());
        assert_eq!(tracker.state().last_temperature_deci_c, 312);
        assert_eq!(tracker.state().last_millivolts, 4050);
        assert_eq!(tracker.snapshot().temperature_c, 31.2);
    }

    #[test]
    fn test_connect_emits_state_event() {
        let mut tracker = StateTracker::new();
        tracker.apply(&sample(50, ChargingState::Discharging), at(11, 0, 0));

        let outcome = tracker.apply(&sample(50, ChargingState::Charging), at(11, 0, 5));

        assert_eq!(outcome.events.len(), 1);
        assert_eq!(outcome.events[0].kind, TransitionKind::Connected);
        assert_eq!(
            outcome.events[0].to_string(),
            "11:00:05 |  50% | 25.3°C | 🔌 Connected"
        );
        assert_eq!(
            outcome.snapshot.unwrap().charging,
            ChargingState::Charging
        );
    }

    #[test]
    fn test_any_state_other_than_charging_is_a_disconnect() {
        for new_state in [
            ChargingState::Discharging,
            ChargingState::Full,
            ChargingState::NotCharging,
            ChargingState::Unknown,
        ] {
            let mut tracker = StateTracker::new();
            tracker.apply(&sample(80, ChargingState::Charging), at(12, 0, 0));

            let outcome = tracker.apply(&sample(80, new_state), at(12, 0, 5));

            assert_eq!(outcome.events.len(), 1);
            assert_eq!(outcome.events[0].kind, TransitionKind::Disconnected);
        }
    }

    #[test]
    fn test_percent_change_emits_level_event() {
        let mut tracker = StateTracker::new();
        tracker.apply(&sample(50, ChargingState::Discharging), at(13, 45, 0));

        let outcome = tracker.apply(&sample(49, ChargingState::Discharging), at(13, 45, 30));

        assert_eq!(outcome.events.len(), 1);
        assert_eq!(
            outcome.events[0].kind,
            TransitionKind::LevelChanged(ChargingState::Discharging)
        );
        assert_eq!(
            outcome.events[0].to_string(),
            "13:45:30 |  49% | 25.3°C | 🔻 Discharging"
        );
        assert_eq!(outcome.snapshot.unwrap().percent, 49);
    }

    #[test]
    fn test_level_event_glyph_follows_charging_state() {
        let cases = [
            (ChargingState::Charging, "⚡ Charging"),
            (ChargingState::Full, "✅ Full"),
            (ChargingState::Discharging, "🔻 Discharging"),
            (ChargingState::NotCharging, "• Not Charging"),
            (ChargingState::Unknown, "• Unknown"),
        ];

        for (state, suffix) in cases {
            let mut tracker = StateTracker::new();
            tracker.apply(&sample(50, state), at(8, 0, 0));

            let outcome = tracker.apply(&sample(51, state), at(8, 0, 10));
            assert_eq!(outcome.events.len(), 1);
            assert!(
                outcome.events[0].to_string().ends_with(suffix),
                "got {}",
                outcome.events[0]
            );
        }
    }

    #[test]
    fn test_simultaneous_change_orders_state_event_first() {
        let mut tracker = StateTracker::new();
        tracker.apply(&sample(50, ChargingState::Discharging), at(16, 20, 0));

        let outcome = tracker.apply(&sample(52, ChargingState::Charging), at(16, 20, 3));

        assert_eq!(outcome.events.len(), 2);
        assert_eq!(outcome.events[0].kind, TransitionKind::Connected);
        assert_eq!(
            outcome.events[1].kind,
            TransitionKind::LevelChanged(ChargingState::Charging)
        );

        // One snapshot regardless of event count, with final values
        let snapshot = outcome.snapshot.unwrap();
        assert_eq!(snapshot.percent, 52);
        assert_eq!(snapshot.charging, ChargingState::Charging);
    }

    #[test]
    fn test_snapshot_before_first_sample_carries_sentinels() {
        let tracker = StateTracker::new();

        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.percent, -1);
        assert_eq!(snapshot.charging, ChargingState::Unknown);
        assert_eq!(snapshot.temperature_c, 0.0);
        assert_eq!(snapshot.millivolts, 0);
    }

    #[test]
    fn test_log_line_pads_percent_to_three() {
        let mut tracker = StateTracker::new();

        let narrow = PowerSample {
            percent: 5,
            charging: ChargingState::Discharging,
            temperature_deci_c: 200,
            millivolts: 3700,
        };
        let outcome = tracker.apply(&narrow, at(7, 5, 9));
        assert_eq!(
            outcome.events[0].to_string(),
            "07:05:09 |   5% | 20.0°C | 🚀 Service Start"
        );

        let wide = PowerSample {
            percent: 100,
            charging: ChargingState::Full,
            temperature_deci_c: 200,
            millivolts: 3700,
        };
        let outcome = tracker.apply(&wide, at(7, 6, 0));
        assert_eq!(
            outcome.events[1].to_string(),
            "07:06:00 | 100% | 20.0°C | ✅ Full"
        );
    }
}
