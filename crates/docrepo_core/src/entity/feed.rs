//! Ledger notifications fanned out to subscribers.
//!
//! A [`LedgerFeed`] is a ready-made [`LedgerSink`]: attach it to any number
//! of entities and observers receive every ledger change, in order, over a
//! channel. Recent notifications are kept for cursor-based polling.
//!
//! ```rust,ignore
//! let feed = Arc::new(LedgerFeed::<OrderEvent>::new());
//! let rx = feed.subscribe();
//!
//! let mut order = Order::with_sink(id, feed.clone());
//! order.add_local_event(OrderEvent::Placed);
//!
//! assert!(matches!(rx.recv()?.change, LedgerChange::Added(_)));
//! ```

use super::ledger::{LedgerSink, LocalEvent};
use parking_lot::{Mutex, RwLock};
use std::sync::mpsc::{self, Receiver, Sender};

/// What happened to a ledger.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerChange<E> {
    /// An event was appended.
    Added(E),
    /// A removal was attempted for this event.
    Removed(E),
    /// The ledger was emptied; carries the events it held.
    Cleared(Vec<E>),
}

/// A ledger change stamped with its position in the feed.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerNotification<E> {
    /// Monotonic sequence number, starting at 1.
    pub sequence: u64,
    /// The change.
    pub change: LedgerChange<E>,
}

/// Distributes ledger changes to subscribers.
pub struct LedgerFeed<E> {
    subscribers: RwLock<Vec<Sender<LedgerNotification<E>>>>,
    history: RwLock<Vec<LedgerNotification<E>>>,
    next_sequence: Mutex<u64>,
    max_history: usize,
}

impl<E: LocalEvent> LedgerFeed<E> {
    /// Creates a feed keeping up to 1024 notifications of history.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_history(1024)
    }

    /// Creates a feed with a specific history limit.
    #[must_use]
    pub fn with_max_history(max_history: usize) -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
            history: RwLock::new(Vec::new()),
            next_sequence: Mutex::new(1),
            max_history,
        }
    }

    /// Returns a receiver for all future notifications.
    pub fn subscribe(&self) -> Receiver<LedgerNotification<E>> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.write().push(tx);
        rx
    }

    fn emit(&self, change: LedgerChange<E>) {
        // Held for the whole emission so subscribers and history observe the
        // same order when entities on several threads share one feed.
        let mut next = self.next_sequence.lock();
        let notification = LedgerNotification {
            sequence: *next,
            change,
        };
        *next += 1;

        {
            let mut history = self.history.write();
            history.push(notification.clone());
            if history.len() > self.max_history {
                let excess = history.len() - self.max_history;
                history.drain(0..excess);
            }
        }

        self.subscribers
            .write()
            .retain(|tx| tx.send(notification.clone()).is_ok());
    }

    /// Returns notifications with sequence greater than `cursor`, up to `limit`.
    pub fn poll(&self, cursor: u64, limit: usize) -> Vec<LedgerNotification<E>> {
        self.history
            .read()
            .iter()
            .filter(|n| n.sequence > cursor)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Returns the sequence of the newest notification, or 0.
    pub fn latest_sequence(&self) -> u64 {
        self.history.read().last().map_or(0, |n| n.sequence)
    }

    /// Returns the number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }

    /// Returns the number of retained notifications.
    pub fn history_len(&self) -> usize {
        self.history.read().len()
    }
}

impl<E: LocalEvent> Default for LedgerFeed<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: LocalEvent> LedgerSink<E> for LedgerFeed<E> {
    fn added(&self, event: &E) {
        self.emit(LedgerChange::Added(event.clone()));
    }

    fn removed(&self, event: &E) {
        self.emit(LedgerChange::Removed(event.clone()));
    }

    fn cleared(&self, snapshot: &[E]) {
        self.emit(LedgerChange::Cleared(snapshot.to_vec()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::ledger::EventLedger;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    struct Ping(u8);

    #[test]
    fn subscriber_sees_ledger_changes() {
        let feed = Arc::new(LedgerFeed::<Ping>::new());
        let rx = feed.subscribe();
        let mut ledger = EventLedger::with_sink(feed.clone());

        ledger.add(Ping(1));
        ledger.remove(&Ping(9));
        ledger.clear();

        let changes: Vec<_> = rx.try_iter().map(|n| n.change).collect();
        assert_eq!(
            changes,
            vec![
                LedgerChange::Added(Ping(1)),
                LedgerChange::Removed(Ping(9)),
                LedgerChange::Cleared(vec![Ping(1)]),
            ]
        );
    }

    #[test]
    fn sequences_are_monotonic() {
        let feed = LedgerFeed::new();
        for i in 0..5 {
            feed.added(&Ping(i));
        }
        let sequences: Vec<u64> = feed.poll(0, 10).iter().map(|n| n.sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3, 4, 5]);
        assert_eq!(feed.latest_sequence(), 5);
    }

    #[test]
    fn poll_from_cursor_with_limit() {
        let feed = LedgerFeed::new();
        for i in 0..10 {
            feed.added(&Ping(i));
        }
        let page = feed.poll(3, 2);
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].sequence, 4);
        assert_eq!(page[0].change, LedgerChange::Added(Ping(3)));
    }

    #[test]
    fn history_is_bounded() {
        let feed = LedgerFeed::with_max_history(3);
        for i in 0..10 {
            feed.added(&Ping(i));
        }
        assert_eq!(feed.history_len(), 3);
        assert_eq!(feed.poll(0, 10)[0].sequence, 8);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let feed = LedgerFeed::<Ping>::new();
        let rx = feed.subscribe();
        assert_eq!(feed.subscriber_count(), 1);
        drop(rx);
        feed.cleared(&[]);
        assert_eq!(feed.subscriber_count(), 0);
    }

    #[test]
    fn shared_across_threads() {
        let feed = Arc::new(LedgerFeed::<Ping>::new());
        let rx = feed.subscribe();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let feed = Arc::clone(&feed);
                thread::spawn(move || {
                    let mut ledger = EventLedger::with_sink(feed);
                    ledger.add(Ping(i));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(rx.recv_timeout(Duration::from_millis(500)).unwrap().sequence);
        }
        assert_eq!(seen, vec![1, 2, 3, 4]);
    }
}
