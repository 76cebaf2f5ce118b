//! Court-wide event log and subscriber fan-out.

use quill_appeals::AppealEvent;
use quill_disputes::DisputeEvent;
use quill_evidence::EvidenceEvent;
use quill_stake::StakeEvent;
use quill_types::Timestamp;
use quill_voting::VotingEvent;
use serde::{Deserialize, Serialize};

/// An event from any component.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourtEvent {
    Stake(StakeEvent),
    Dispute(DisputeEvent),
    Voting(VotingEvent),
    Appeal(AppealEvent),
    Evidence(EvidenceEvent),
}

macro_rules! court_event_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for CourtEvent {
                fn from(event: $ty) -> Self {
                    CourtEvent::$variant(event)
                }
            }
        )*
    };
}

court_event_from!(
    Stake(StakeEvent),
    Dispute(DisputeEvent),
    Voting(VotingEvent),
    Appeal(AppealEvent),
    Evidence(EvidenceEvent),
);

/// An event with its position in the court's total order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Starts at 1, no gaps.
    pub seq: u64,
    /// Clock reading of the operation that produced the event.
    pub at: Timestamp,
    pub event: CourtEvent,
}

/// Append-only, sequenced log of everything the court has done.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, at: Timestamp, event: CourtEvent) -> &EventRecord {
        let seq = self.records.len() as u64 + 1;
        self.records.push(EventRecord { seq, at, event });
        &self.records[self.records.len() - 1]
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    /// Records with a sequence number greater than `seq`.
    pub fn since(&self, seq: u64) -> &[EventRecord] {
        let start = (seq as usize).min(self.records.len());
        &self.records[start..]
    }

    pub fn last_seq(&self) -> u64 {
        self.records.len() as u64
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Synchronous fan-out event bus for court events.
///
/// Listeners are invoked inline while the court is held; keep handlers fast.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&EventRecord) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&EventRecord) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, record: &EventRecord) {
        for listener in &self.listeners {
            listener(record);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
