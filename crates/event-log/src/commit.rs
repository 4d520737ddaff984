use serde::{Deserialize, Serialize};

use crate::{
    CommitLocation, DomainEvent, EventLocation, IdGenerator, QualifiedDomainEvent,
    UuidV4Generator, next_event, to_qualified_with,
};

/// An ordered, located batch of qualified events, ready for durable storage.
///
/// Events keep their emission order and their indices strictly increase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit<E> {
    pub location: CommitLocation,
    pub events: Vec<QualifiedDomainEvent<E>>,
}

impl<E> Commit<E> {
    /// Creates a commit carrying no events.
    pub fn empty(location: CommitLocation) -> Self {
        Self {
            location,
            events: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Location of the newest event, if any.
    pub fn last_event_location(&self) -> Option<&EventLocation> {
        self.events.last().map(|event| &event.location)
    }
}

impl<E: DomainEvent> Commit<E> {
    /// Qualifies `event` directly after the newest event of this commit, or at
    /// `start` when the commit is still empty.
    fn append(&mut self, event: E, start: &EventLocation, ids: &dyn IdGenerator) {
        let location = match self.last_event_location() {
            Some(last) => next_event(last),
            None => start.clone(),
        };
        self.events.push(to_qualified_with(event, location, ids));
    }
}

/// Written by `Display` in place of a payload that fails to serialize.
pub const UNSERIALIZABLE_PAYLOAD: &str = "<unserializable>";

impl<E: DomainEvent> std::fmt::Display for Commit<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}/{} {{", self.location.sequence, self.location.slot)?;
        for event in &self.events {
            let payload = match event.event.payload() {
                Ok(value) => value.to_string(),
                Err(_) => UNSERIALIZABLE_PAYLOAD.to_string(),
            };
            writeln!(
                f,
                "  {}: {} {}",
                event.location.index,
                event.event_type(),
                payload
            )?;
        }
        write!(f, "}}")
    }
}

/// A container of pending events that can be materialized into a [`Commit`].
///
/// Materializing never consumes or clears the container.
pub trait CommitBuilder {
    /// The event type held by this container.
    type Event: DomainEvent;

    /// Materializes the pending events, drawing ids from `ids` for events that
    /// do not supply their own.
    ///
    /// The first event is placed at `start`, each following one at
    /// [`next_event`] of its predecessor.
    fn build_commit_with(
        &self,
        commit_location: CommitLocation,
        start: EventLocation,
        ids: &dyn IdGenerator,
    ) -> Commit<Self::Event>;

    /// Materializes the pending events with random UUIDv4 ids.
    fn build_commit(
        &self,
        commit_location: CommitLocation,
        start: EventLocation,
    ) -> Commit<Self::Event> {
        self.build_commit_with(commit_location, start, &UuidV4Generator)
    }
}

/// Qualifies `events` (oldest first) into a commit at `location`.
pub(crate) fn materialize<'a, E, I>(
    location: CommitLocation,
    start: &EventLocation,
    events: I,
    ids: &dyn IdGenerator,
) -> Commit<E>
where
    E: DomainEvent + 'a,
    I: IntoIterator<Item = &'a E>,
{
    let mut commit = Commit::empty(location);
    for event in events {
        commit.append(event.clone(), start, ids);
    }

    tracing::debug!(
        sequence = %commit.location.sequence,
        slot = commit.location.slot,
        events = commit.len(),
        "materialized commit"
    );
    metrics::counter!("event_log_commits_materialized_total").increment(1);
    metrics::histogram!("event_log_commit_events").record(commit.len() as f64);

    commit
}
