//! Business entity contract and the reusable keyed entity core.

use super::ledger::{EventLedger, LedgerSink, LocalEvent};
use crate::document::short_type_name;
use crate::key::{DocumentKey, KeyComponent, KeyGenerator};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::Arc;

/// An entity with an identity and a ledger of local domain events.
///
/// Implementors supply key extraction and access to their ledger; the
/// event operations are provided on top of those.
pub trait BusinessEntity {
    /// Domain event type recorded by this entity.
    type Event: LocalEvent;

    /// Returns the entity's key components in order.
    ///
    /// Single-key entities return exactly one component: their id.
    fn keys(&self) -> Vec<KeyComponent>;

    /// Returns the event ledger.
    fn ledger(&self) -> &EventLedger<Self::Event>;

    /// Returns the event ledger mutably.
    fn ledger_mut(&mut self) -> &mut EventLedger<Self::Event>;

    /// Returns the recorded events in insertion order.
    fn local_events(&self) -> &[Self::Event] {
        self.ledger().events()
    }

    /// Returns whether event tracking is enabled.
    fn allow_event_tracking(&self) -> bool {
        self.ledger().allow_tracking()
    }

    /// Enables or disables event tracking.
    fn set_allow_event_tracking(&mut self, value: bool) {
        self.ledger_mut().set_allow_tracking(value);
    }

    /// Records an event and notifies the ledger's sink.
    ///
    /// Events are recorded even when tracking is disabled; dispatchers read
    /// [`allow_event_tracking`](Self::allow_event_tracking) to decide.
    fn add_local_event(&mut self, event: Self::Event) {
        self.ledger_mut().add(event);
    }

    /// Removes the first equal event. The sink is notified either way.
    fn remove_local_event(&mut self, event: &Self::Event) -> bool {
        self.ledger_mut().remove(event)
    }

    /// Removes every event and returns them.
    fn clear_local_events(&mut self) -> Vec<Self::Event> {
        self.ledger_mut().clear()
    }

    /// Identity comparison hook.
    ///
    /// The base implementation reports every pair as equal; override it for
    /// a meaningful comparison.
    fn entity_equals(&self, _other: &Self) -> bool
    where
        Self: Sized,
    {
        true
    }
}

/// Keyed entity core: an id plus a transient event ledger.
///
/// Embed it with `#[serde(flatten)]` so the id is stored as `_id` and the
/// ledger never reaches the store.
///
/// ```rust,ignore
/// #[derive(Serialize, Deserialize)]
/// struct Order {
///     #[serde(flatten)]
///     base: EntityBase<Uuid, OrderEvent>,
///     total: i64,
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "K: Serialize", deserialize = "K: Deserialize<'de>"))]
pub struct EntityBase<K, E> {
    #[serde(rename = "_id")]
    id: K,
    #[serde(skip)]
    events: EventLedger<E>,
}

impl<K: DocumentKey, E: LocalEvent> EntityBase<K, E> {
    /// Creates an entity core with the given id and an empty ledger.
    pub fn new(id: K) -> Self {
        Self {
            id,
            events: EventLedger::new(),
        }
    }

    /// Creates an entity core whose ledger reports to `sink`.
    pub fn with_sink(id: K, sink: Arc<dyn LedgerSink<E>>) -> Self {
        Self {
            id,
            events: EventLedger::with_sink(sink),
        }
    }

    /// Creates an entity core with a freshly generated id.
    #[must_use]
    pub fn generate() -> Self
    where
        K: KeyGenerator,
    {
        Self::new(K::generate())
    }

    /// Returns the id.
    pub fn id(&self) -> &K {
        &self.id
    }

    /// Attaches a sink, typically after loading from the store.
    pub fn attach_sink(&mut self, sink: Arc<dyn LedgerSink<E>>) {
        self.events.set_sink(Some(sink));
    }

    /// Renders `[ENTITY: T] Id = <id>` for the embedding type `T`.
    pub fn label<T: ?Sized>(&self) -> String
    where
        K: Display,
    {
        format!("[ENTITY: {}] Id = {}", short_type_name::<T>(), self.id)
    }
}

impl<K: DocumentKey, E: LocalEvent> BusinessEntity for EntityBase<K, E> {
    type Event = E;

    fn keys(&self) -> Vec<KeyComponent> {
        vec![KeyComponent::new(self.id.clone())]
    }

    fn ledger(&self) -> &EventLedger<E> {
        &self.events
    }

    fn ledger_mut(&mut self) -> &mut EventLedger<E> {
        &mut self.events
    }
}
