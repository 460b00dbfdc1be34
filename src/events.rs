//! In-process event fan-out.
//!
//! A thin wrapper over a tokio broadcast channel. The monitor publishes two
//! kinds of events: a log line was appended, and the status snapshot
//! changed. Publishing never fails; with no subscribers the event is simply
//! dropped, and a lagged or dropped subscriber cannot stall the publisher
//! or its peers. Events never leave the process.

use tokio::sync::broadcast;

use crate::tracker::StatusSnapshot;

/// Event published on the bus
#[derive(Debug, Clone)]
pub enum BusEvent {
    /// A rendered line was appended to the transition log
    LogAppended(String),
    /// Tracked status changed, or a re-publish was requested
    StatusChanged(StatusSnapshot),
}

/// Broadcast bus scoped to this process
pub struct EventBus {
    tx: broadcast::Sender<BusEvent>,
}

impl EventBus {
    /// Events buffered per subscriber before the slowest one starts lagging
    const CAPACITY: usize = 64;

    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(Self::CAPACITY);
        Self { tx }
    }

    /// Subscribe to all events published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<BusEvent> {
        self.tx.subscribe()
    }

    pub fn publish_log_appended(&self, message: &str) {
        let _ = self.tx.send(BusEvent::LogAppended(message.to_string()));
    }

    pub fn publish_status_changed(&self, snapshot: StatusSnapshot) {
        let _ = self.tx.send(BusEvent::StatusChanged(snapshot));
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::ChargingState;

    fn snapshot() -> StatusSnapshot {
        StatusSnapshot {
            percent: 42,
            charging: ChargingState::Discharging,
            temperature_c: 21.5,
            millivolts: 3900,
        }
    }

    #[test]
    fn test_every_subscriber_receives_each_event() {
        let bus = EventBus::new();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        bus.publish_log_appended("line");

        for rx in [&mut first, &mut second] {
            match rx.try_recv().unwrap() {
                BusEvent::LogAppended(message) => assert_eq!(message, "line"),
                other => panic!("unexpected event: {:?}", other),
            }
        }
    }

    #[test]
    fn test_publish_with_no_subscribers_is_a_noop() {
        let bus = EventBus::new();
        bus.publish_log_appended("nobody listening");
        bus.publish_status_changed(snapshot());
    }

    #[test]
    fn test_dropped_subscriber_does_not_disturb_the_rest() {
        let bus = EventBus::new();
        let dropped = bus.subscribe();
        let mut kept = bus.subscribe();

        drop(dropped);
        bus.publish_status_changed(snapshot());

        match kept.try_recv().unwrap() {
            BusEvent::StatusChanged(status) => assert_eq!(status.percent, 42),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_events_arrive_in_publish_order() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.publish_log_appended("first");
        bus.publish_status_changed(snapshot());

        assert!(matches!(rx.try_recv().unwrap(), BusEvent::LogAppended(_)));
        assert!(matches!(
            rx.try_recv().unwrap(),
            BusEvent::StatusChanged(_)
        ));
    }
}
