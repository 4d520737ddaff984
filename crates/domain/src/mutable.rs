//! Mutable aggregate roots.
//!
//! A mutable aggregate keeps a [`MutableRoot`] in a private field. The root
//! owns the fields and the pending [`EventBasket`]; the only way to change
//! either is [`MutableRoot::emit`], which records the event and folds it in
//! one step. Code outside the aggregate sees the root read-only through
//! [`MutableAggregateRoot::root`], so it can neither emit events that skip the
//! aggregate's preconditions nor append events that are never applied.

use event_log::{DomainEvent, EventBasket, QualifiedDomainEvent};

/// Folds one event into the fields of a mutable aggregate.
pub type Mutator<S, E> = fn(&mut S, &E);

/// Trait for aggregates that change in place while recording every change as
/// an event.
///
/// Business operations validate their preconditions against
/// [`MutableRoot::state`] and call [`MutableRoot::emit`] on their own root.
pub trait MutableAggregateRoot {
    /// The fields changed by events.
    type State;

    /// The type of events this aggregate produces and consumes.
    type Event: DomainEvent;

    /// The aggregate type name.
    const AGGREGATE_NAME: &'static str;

    /// Returns the root carrying fields and pending events.
    fn root(&self) -> &MutableRoot<Self::State, Self::Event>;
}

/// Fields and pending events of one mutable aggregate instance.
#[derive(Clone)]
pub struct MutableRoot<S, E> {
    name: &'static str,
    state: S,
    events: EventBasket<E>,
    mutate: Mutator<S, E>,
}

impl<S, E: DomainEvent> MutableRoot<S, E> {
    /// Creates a root with `state` and no pending events.
    pub fn new(name: &'static str, state: S, mutate: Mutator<S, E>) -> Self {
        Self {
            name,
            state,
            events: EventBasket::new(),
            mutate,
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Returns the events emitted since this instance was created or replayed.
    pub fn pending(&self) -> &EventBasket<E> {
        &self.events
    }

    pub fn aggregate_name(&self) -> &'static str {
        self.name
    }

    /// Records `event` and folds it into the fields.
    pub fn emit(&mut self, event: E) {
        tracing::trace!(
            aggregate = self.name,
            event_type = event.event_type(),
            pending = self.events.len() + 1,
            "emitted event"
        );
        metrics::counter!("aggregate_changes_recorded_total").increment(1);

        (self.mutate)(&mut self.state, &event);
        self.events.add(event);
    }

    /// Folds a committed event into the fields without recording it.
    pub fn replay(&mut self, event: &QualifiedDomainEvent<E>) {
        metrics::counter!("aggregate_events_replayed_total").increment(1);
        (self.mutate)(&mut self.state, &event.event);
    }
}

impl<S: std::fmt::Debug, E: std::fmt::Debug> std::fmt::Debug for MutableRoot<S, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MutableRoot")
            .field("aggregate", &self.name)
            .field("state", &self.state)
            .field("pending", &self.events)
            .finish()
    }
}
