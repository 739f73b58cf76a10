//! Organ notifications and the log they are recorded in
//!
//! Events are plain data. Every emitted event is appended to the log before
//! its listeners run, so the log reflects emission order even when a
//! listener re-enters the engine.

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, Fixed2};
use crate::ecs::World;
use crate::organ::OrganSeverity;

/// External listener, called after the built-in consequences for every event
///
/// Listeners may call back into the engine, including for the same organ.
pub type OrganListener = fn(&mut World, &OrganEvent);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrganEvent {
    /// Addressed to the organ itself
    IntegrityChanged { organ: EntityId, old: Fixed2, new: Fixed2 },
    /// Addressed to the part containing the organ
    IntegrityChangedOnPart { part: EntityId, organ: EntityId, old: Fixed2, new: Fixed2 },
    SeverityChanged { organ: EntityId, old: OrganSeverity, new: OrganSeverity },
    SeverityChangedOnPart { part: EntityId, organ: EntityId, old: OrganSeverity, new: OrganSeverity },
}

impl OrganEvent {
    /// The organ the event is about
    pub fn organ(&self) -> EntityId {
        match *self {
            OrganEvent::IntegrityChanged { organ, .. }
            | OrganEvent::IntegrityChangedOnPart { organ, .. }
            | OrganEvent::SeverityChanged { organ, .. }
            | OrganEvent::SeverityChangedOnPart { organ, .. } => organ,
        }
    }

    pub fn is_integrity(&self) -> bool {
        matches!(
            self,
            OrganEvent::IntegrityChanged { .. } | OrganEvent::IntegrityChangedOnPart { .. }
        )
    }

    pub fn is_on_part(&self) -> bool {
        matches!(
            self,
            OrganEvent::IntegrityChangedOnPart { .. } | OrganEvent::SeverityChangedOnPart { .. }
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggedEvent {
    pub seq: u64,
    pub event: OrganEvent,
}

/// Append-only record of emitted organ events
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    pub events: Vec<LoggedEvent>,
    next_seq: u64,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: OrganEvent) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.events.push(LoggedEvent { seq, event });
        seq
    }

    /// Sequence number the next event will get
    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events emitted at or after `seq`
    pub fn since(&self, seq: u64) -> impl Iterator<Item = &OrganEvent> {
        self.events.iter().filter(move |e| e.seq >= seq).map(|e| &e.event)
    }

    /// Take every logged event; sequence numbers keep counting
    pub fn drain(&mut self) -> Vec<LoggedEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_numbers_survive_draining() {
        let mut log = EventLog::new();
        let organ = EntityId::new();
        for _ in 0..3 {
            log.record(OrganEvent::SeverityChanged {
                organ,
                old: OrganSeverity::Normal,
                new: OrganSeverity::Light,
            });
        }
        let drained = log.drain();
        assert_eq!(drained.len(), 3);
        assert_eq!(drained[2].seq, 2);
        assert!(log.is_empty());

        assert_eq!(log.record(OrganEvent::SeverityChanged {
            organ,
            old: OrganSeverity::Light,
            new: OrganSeverity::Moderate,
        }), 3);
        assert_eq!(log.since(3).count(), 1);
    }

    #[test]
    fn test_event_classification() {
        let organ = EntityId::new();
        let part = EntityId::new();
        let e = OrganEvent::IntegrityChangedOnPart {
            part,
            organ,
            old: Fixed2::new(10),
            new: Fixed2::new(5),
        };
        assert!(e.is_integrity());
        assert!(e.is_on_part());
        assert_eq!(e.organ(), organ);
    }
}
