//! In-memory ledger of domain events raised by an entity.

use std::fmt;
use std::sync::Arc;

/// A domain event that can be recorded on an entity.
///
/// Events are compared structurally when removed from a ledger.
pub trait LocalEvent: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {}

impl<T> LocalEvent for T where T: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {}

/// Receives notifications about ledger changes.
///
/// A sink is injected when the entity (or its ledger) is constructed; the
/// ledger never publishes anywhere else. All hooks default to no-ops.
pub trait LedgerSink<E>: Send + Sync {
    /// Called after an event was appended.
    fn added(&self, _event: &E) {}

    /// Called after a removal attempt, whether or not the event was present.
    fn removed(&self, _event: &E) {}

    /// Called after the ledger was emptied, with the events it held.
    fn cleared(&self, _snapshot: &[E]) {}
}

/// Ordered, append-oriented list of domain events.
///
/// The ledger is transient: entities skip it during serialization and it
/// starts empty after every load.
pub struct EventLedger<E> {
    events: Vec<E>,
    allow_tracking: bool,
    sink: Option<Arc<dyn LedgerSink<E>>>,
}

impl<E> EventLedger<E> {
    /// Creates an empty ledger with tracking enabled and no sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            allow_tracking: true,
            sink: None,
        }
    }

    /// Creates an empty ledger reporting to `sink`.
    #[must_use]
    pub fn with_sink(sink: Arc<dyn LedgerSink<E>>) -> Self {
        Self {
            sink: Some(sink),
            ..Self::new()
        }
    }

    /// Replaces the notification sink.
    pub fn set_sink(&mut self, sink: Option<Arc<dyn LedgerSink<E>>>) {
        self.sink = sink;
    }

    /// Returns the recorded events in insertion order.
    #[must_use]
    pub fn events(&self) -> &[E] {
        &self.events
    }

    /// Returns an iterator over the recorded events.
    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.events.iter()
    }

    /// Returns the number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if no events are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns the tracking flag.
    #[must_use]
    pub fn allow_tracking(&self) -> bool {
        self.allow_tracking
    }

    /// Sets the tracking flag.
    ///
    /// The flag is informational: [`add`](Self::add) records events
    /// regardless of its value.
    pub fn set_allow_tracking(&mut self, value: bool) {
        self.allow_tracking = value;
    }
}

impl<E: PartialEq> EventLedger<E> {
    /// Appends an event and notifies the sink.
    pub fn add(&mut self, event: E) {
        self.events.push(event);
        if let (Some(sink), Some(last)) = (&self.sink, self.events.last()) {
            sink.added(last);
        }
    }

    /// Removes the first structurally equal event.
    ///
    /// The sink is notified even when nothing was removed. Returns whether
    /// an event was removed.
    pub fn remove(&mut self, event: &E) -> bool {
        let removed = match self.events.iter().position(|e| e == event) {
            Some(index) => {
                self.events.remove(index);
                true
            }
            None => false,
        };
        if let Some(sink) = &self.sink {
            sink.removed(event);
        }
        removed
    }

    /// Empties the ledger, notifies the sink with the removed events and
    /// returns them.
    pub fn clear(&mut self) -> Vec<E> {
        let snapshot = std::mem::take(&mut self.events);
        if let Some(sink) = &self.sink {
            sink.cleared(&snapshot);
        }
        snapshot
    }
}

impl<E> Default for EventLedger<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone> Clone for EventLedger<E> {
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
            allow_tracking: self.allow_tracking,
            sink: self.sink.clone(),
        }
    }
}

impl<E: PartialEq> PartialEq for EventLedger<E> {
    fn eq(&self, other: &Self) -> bool {
        self.events == other.events && self.allow_tracking == other.allow_tracking
    }
}

impl<E: fmt::Debug> fmt::Debug for EventLedger<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventLedger")
            .field("events", &self.events)
            .field("allow_tracking", &self.allow_tracking)
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}

impl<'a, E> IntoIterator for &'a EventLedger<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Created(u32),
        Renamed(String),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
    }

    impl LedgerSink<Event> for Recorder {
        fn added(&self, event: &Event) {
            self.calls.lock().push(format!("added {event:?}"));
        }

        fn removed(&self, event: &Event) {
            self.calls.lock().push(format!("removed {event:?}"));
        }

        fn cleared(&self, snapshot: &[Event]) {
            self.calls.lock().push(format!("cleared {}", snapshot.len()));
        }
    }

    fn recorded() -> (EventLedger<Event>, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let ledger = EventLedger::with_sink(recorder.clone());
        (ledger, recorder)
    }

    #[test]
    fn new_ledger_is_empty_and_tracking() {
        let ledger: EventLedger<Event> = EventLedger::new();
        assert!(ledger.is_empty());
        assert!(ledger.allow_tracking());
    }

    #[test]
    fn add_then_clear_notifies_in_order() {
        let (mut ledger, recorder) = recorded();
        ledger.add(Event::Created(1));
        let snapshot = ledger.clear();

        assert!(ledger.is_empty());
        assert_eq!(snapshot, vec![Event::Created(1)]);
        assert_eq!(
            *recorder.calls.lock(),
            vec!["added Created(1)".to_string(), "cleared 1".to_string()]
        );
    }

    #[test]
    fn remove_absent_still_notifies() {
        let (mut ledger, recorder) = recorded();
        ledger.add(Event::Created(1));

        assert!(!ledger.remove(&Event::Created(2)));
        assert_eq!(ledger.events(), &[Event::Created(1)]);
        assert_eq!(recorder.calls.lock().last().unwrap(), "removed Created(2)");
    }

    #[test]
    fn remove_takes_first_equal_occurrence() {
        let mut ledger = EventLedger::new();
        ledger.add(Event::Renamed("a".into()));
        ledger.add(Event::Created(7));
        ledger.add(Event::Renamed("a".into()));

        assert!(ledger.remove(&Event::Renamed("a".into())));
        assert_eq!(
            ledger.events(),
            &[Event::Created(7), Event::Renamed("a".into())]
        );
    }

    #[test]
    fn tracking_flag_does_not_gate_add() {
        let mut ledger = EventLedger::new();
        ledger.set_allow_tracking(false);
        ledger.add(Event::Created(3));
        assert_eq!(ledger.len(), 1);
        assert!(!ledger.allow_tracking());
    }

    #[test]
    fn equality_ignores_sink() {
        let (mut with_sink, _) = recorded();
        let mut without = EventLedger::new();
        with_sink.add(Event::Created(1));
        without.add(Event::Created(1));
        assert_eq!(with_sink, without);
    }

    proptest! {
        #[test]
        fn preserves_insertion_order(values in proptest::collection::vec(any::<u32>(), 0..32)) {
            let mut ledger = EventLedger::new();
            for v in &values {
                ledger.add(Event::Created(*v));
            }
            let recorded: Vec<u32> = ledger
                .iter()
                .map(|e| match e {
                    Event::Created(v) => *v,
                    Event::Renamed(_) => unreachable!(),
                })
                .collect();
            prop_assert_eq!(recorded, values);
        }
    }
}
