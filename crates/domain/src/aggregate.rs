//! Variant-agnostic aggregate root contract.

use event_log::{
    Commit, CommitBuilder, CommitLocation, DomainEvent, EventLocation, IdGenerator,
    QualifiedDomainEvent, RawDomainEvent, UuidV4Generator,
};

use crate::error::DomainError;

/// Capabilities every aggregate exposes to the persistence layer.
///
/// Both the immutable and the mutable variants implement this trait, so
/// infrastructure can load and commit aggregates without knowing which one it
/// holds. Replay always goes through an owned `self -> Self` step:
///
/// ```ignore
/// let mut item = factory.create();
/// for event in &commit.events {
///     item = item.apply(event);
/// }
/// ```
pub trait AggregateRoot: Sized {
    /// The type of events this aggregate produces and consumes.
    type Event: DomainEvent;

    /// The container holding events not yet committed.
    type Pending: CommitBuilder<Event = Self::Event>;

    /// Returns the aggregate type name.
    fn aggregate_name(&self) -> &'static str;

    /// Returns the pending, not yet committed events.
    fn pending(&self) -> &Self::Pending;

    /// Folds one previously committed event into the aggregate.
    ///
    /// The event is not recorded as pending: it has already been committed.
    fn apply(self, event: &QualifiedDomainEvent<Self::Event>) -> Self;

    /// Applies committed events in order.
    fn replay<'a, I>(self, events: I) -> Self
    where
        I: IntoIterator<Item = &'a QualifiedDomainEvent<Self::Event>>,
        Self::Event: 'a,
    {
        events.into_iter().fold(self, |aggregate, event| aggregate.apply(event))
    }

    /// Decodes a stored event and applies it.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Event`] when the event type has no handler in
    /// `Self::Event` or its payload does not decode. The aggregate is
    /// consumed: a replay that hits an unknown event cannot continue.
    fn try_apply(self, event: &QualifiedDomainEvent<RawDomainEvent>) -> Result<Self, DomainError> {
        let decoded = event.decode::<Self::Event>().map_err(|err| {
            tracing::debug!(
                aggregate = self.aggregate_name(),
                location = %event.location,
                error = %err,
                "failed to decode stored event"
            );
            err
        })?;
        Ok(self.apply(&decoded))
    }

    /// Materializes pending events, stamping the aggregate name on the commit
    /// and event locations when the caller left it out.
    fn build_commit_with(
        &self,
        commit_location: CommitLocation,
        start: EventLocation,
        ids: &dyn IdGenerator,
    ) -> Commit<Self::Event> {
        let name = self.aggregate_name();
        let commit_location = match commit_location.aggregate_name {
            Some(_) => commit_location,
            None => commit_location.with_aggregate_name(name),
        };
        let start = match start.aggregate_name {
            Some(_) => start,
            None => start.with_aggregate_name(name),
        };
        self.pending().build_commit_with(commit_location, start, ids)
    }

    /// Same as [`AggregateRoot::build_commit_with`] with random UUIDv4 ids.
    fn build_commit(&self, commit_location: CommitLocation, start: EventLocation) -> Commit<Self::Event> {
        self.build_commit_with(commit_location, start, &UuidV4Generator)
    }
}
