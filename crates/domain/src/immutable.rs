//! Immutable aggregate roots.
//!
//! An immutable aggregate never changes after creation. Every business
//! operation returns a new instance whose [`ImmutableRoot`] carries the folded
//! state and a pending [`EventList`] one event longer than its parent's. The
//! parent keeps its own state and shares the older part of the list.
//!
//! Aggregates are defined up front through an [`AggregateFactory`]: the
//! reducer and constructor are resolved before any instance exists, so an
//! instance can never record a change while it is still being built.

use std::sync::Arc;

use event_log::{DomainEvent, EventList, QualifiedDomainEvent};

use crate::aggregate::AggregateRoot;
use crate::error::DomainError;

/// Pure function folding one event into a new state value.
pub type Reducer<S, E> = fn(&S, &E) -> S;

/// Wraps a root into the concrete aggregate type exposing business operations.
pub type Constructor<A> = fn(ImmutableRoot<A>) -> A;

/// Trait for immutable, event-sourced aggregates.
///
/// Implementors are thin wrappers around an [`ImmutableRoot`]; their business
/// methods take `&self` and return a new `Self` built by
/// [`ImmutableRoot::change`].
pub trait ImmutableAggregate: Sized {
    /// The state folded from events.
    type State: Clone;

    /// The type of events this aggregate produces and consumes.
    type Event: DomainEvent;

    /// Returns the root carrying state and pending events.
    fn root(&self) -> &ImmutableRoot<Self>;
}

struct Definition<A: ImmutableAggregate> {
    name: &'static str,
    reducer: Reducer<A::State, A::Event>,
    constructor: Constructor<A>,
}

/// State and pending events of one immutable aggregate instance.
pub struct ImmutableRoot<A: ImmutableAggregate> {
    definition: Arc<Definition<A>>,
    state: A::State,
    events: EventList<A::Event>,
}

impl<A: ImmutableAggregate> ImmutableRoot<A> {
    /// Returns the current state.
    pub fn state(&self) -> &A::State {
        &self.state
    }

    /// Returns the events recorded since this instance was created or replayed.
    pub fn pending(&self) -> &EventList<A::Event> {
        &self.events
    }

    pub fn aggregate_name(&self) -> &'static str {
        self.definition.name
    }

    /// Records `event` and returns the aggregate with the event folded in.
    ///
    /// `self` is left unchanged.
    pub fn change(&self, event: A::Event) -> A {
        let state = (self.definition.reducer)(&self.state, &event);

        tracing::trace!(
            aggregate = self.definition.name,
            event_type = event.event_type(),
            pending = self.events.len() + 1,
            "recorded change"
        );
        metrics::counter!("aggregate_changes_recorded_total").increment(1);

        self.derive(state, self.events.push(event))
    }

    /// Folds an already committed event into the state without recording it.
    ///
    /// The returned aggregate starts with an empty pending list.
    pub fn apply(&self, event: &A::Event) -> A {
        let state = (self.definition.reducer)(&self.state, event);
        metrics::counter!("aggregate_events_replayed_total").increment(1);
        self.derive(state, EventList::new())
    }

    fn derive(&self, state: A::State, events: EventList<A::Event>) -> A {
        (self.definition.constructor)(ImmutableRoot {
            definition: Arc::clone(&self.definition),
            state,
            events,
        })
    }
}

impl<A: ImmutableAggregate> Clone for ImmutableRoot<A> {
    fn clone(&self) -> Self {
        Self {
            definition: Arc::clone(&self.definition),
            state: self.state.clone(),
            events: self.events.clone(),
        }
    }
}

impl<A> std::fmt::Debug for ImmutableRoot<A>
where
    A: ImmutableAggregate,
    A::State: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImmutableRoot")
            .field("aggregate", &self.definition.name)
            .field("state", &self.state)
            .field("pending", &self.events)
            .finish()
    }
}

impl<A: ImmutableAggregate> AggregateRoot for A {
    type Event = A::Event;
    type Pending = EventList<A::Event>;

    fn aggregate_name(&self) -> &'static str {
        self.root().aggregate_name()
    }

    fn pending(&self) -> &EventList<A::Event> {
        self.root().pending()
    }

    fn apply(self, event: &QualifiedDomainEvent<A::Event>) -> A {
        self.root().apply(&event.event)
    }
}

/// Produces fresh instances of an immutable aggregate.
pub struct AggregateFactory<A: ImmutableAggregate> {
    definition: Arc<Definition<A>>,
    initial_state: A::State,
}

impl<A: ImmutableAggregate> AggregateFactory<A> {
    /// Creates a factory from a fully resolved definition.
    pub fn new(
        name: &'static str,
        reducer: Reducer<A::State, A::Event>,
        constructor: Constructor<A>,
        initial_state: A::State,
    ) -> Self {
        Self {
            definition: Arc::new(Definition {
                name,
                reducer,
                constructor,
            }),
            initial_state,
        }
    }

    /// Starts a step-by-step definition of the aggregate `name`.
    pub fn builder(name: &'static str) -> AggregateFactoryBuilder<A> {
        AggregateFactoryBuilder {
            name,
            reducer: None,
            constructor: None,
            initial_state: None,
        }
    }

    /// Returns a fresh aggregate in its initial state with no pending events.
    pub fn create(&self) -> A {
        (self.definition.constructor)(ImmutableRoot {
            definition: Arc::clone(&self.definition),
            state: self.initial_state.clone(),
            events: EventList::new(),
        })
    }

    pub fn aggregate_name(&self) -> &'static str {
        self.definition.name
    }

    pub fn initial_state(&self) -> &A::State {
        &self.initial_state
    }
}

impl<A: ImmutableAggregate> Clone for AggregateFactory<A> {
    fn clone(&self) -> Self {
        Self {
            definition: Arc::clone(&self.definition),
            initial_state: self.initial_state.clone(),
        }
    }
}

/// Builder for [`AggregateFactory`].
pub struct AggregateFactoryBuilder<A: ImmutableAggregate> {
    name: &'static str,
    reducer: Option<Reducer<A::State, A::Event>>,
    constructor: Option<Constructor<A>>,
    initial_state: Option<A::State>,
}

impl<A: ImmutableAggregate> AggregateFactoryBuilder<A> {
    /// Sets the reducer folding events into state.
    pub fn reducer(mut self, reducer: Reducer<A::State, A::Event>) -> Self {
        self.reducer = Some(reducer);
        self
    }

    /// Sets the constructor wrapping a root into the aggregate type.
    pub fn constructor(mut self, constructor: Constructor<A>) -> Self {
        self.constructor = Some(constructor);
        self
    }

    /// Sets the state of freshly created instances.
    pub fn initial_state(mut self, state: A::State) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Builds the factory.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::IncompleteDefinition`] naming the first missing
    /// part.
    pub fn build(self) -> Result<AggregateFactory<A>, DomainError> {
        let missing = |part| DomainError::IncompleteDefinition {
            aggregate: self.name,
            missing: part,
        };
        let reducer = self.reducer.ok_or_else(|| missing("reducer"))?;
        let constructor = self.constructor.ok_or_else(|| missing("constructor"))?;
        let initial_state = self
            .initial_state
            .ok_or_else(|| missing("initial state"))?;

        Ok(AggregateFactory::new(
            self.name,
            reducer,
            constructor,
            initial_state,
        ))
    }
}
