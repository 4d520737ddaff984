use crate::commit::materialize;
use crate::{Commit, CommitBuilder, CommitLocation, DomainEvent, EventLocation, IdGenerator};

/// Pending events of one mutable aggregate instance.
///
/// Append-only: events are never reordered or removed while the owning
/// instance lives.
#[derive(Debug, Clone)]
pub struct EventBasket<E> {
    events: Vec<E>,
}

impl<E> EventBasket<E> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Appends an event.
    pub fn add(&mut self, event: E) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.events.iter()
    }

    pub fn as_slice(&self) -> &[E] {
        &self.events
    }
}

impl<E> Default for EventBasket<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: DomainEvent> CommitBuilder for EventBasket<E> {
    type Event = E;

    /// The event at offset `n` in the basket lands at `start.index + n`.
    fn build_commit_with(
        &self,
        commit_location: CommitLocation,
        start: EventLocation,
        ids: &dyn IdGenerator,
    ) -> Commit<E> {
        materialize(commit_location, &start, &self.events, ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(tag = "type", content = "payload")]
    enum TestEvent {
        Counted { n: u32 },
    }

    impl DomainEvent for TestEvent {
        const EVENT_TYPES: &'static [&'static str] = &["Counted"];

        fn event_type(&self) -> &'static str {
            "Counted"
        }
    }

    #[test]
    fn add_appends_in_order() {
        let mut basket = EventBasket::new();
        basket.add(TestEvent::Counted { n: 1 });
        basket.add(TestEvent::Counted { n: 2 });

        assert_eq!(basket.len(), 2);
        assert_eq!(
            basket.as_slice(),
            &[TestEvent::Counted { n: 1 }, TestEvent::Counted { n: 2 }]
        );
    }

    #[test]
    fn build_commit_offsets_from_start() {
        let mut basket = EventBasket::new();
        for n in 0..3 {
            basket.add(TestEvent::Counted { n });
        }

        let commit = basket.build_commit(CommitLocation::new("S", 2), EventLocation::new("S", 20));

        let indices: Vec<u64> = commit.events.iter().map(|e| e.location.index).collect();
        assert_eq!(indices, vec![20, 21, 22]);
        assert_eq!(commit.location.slot, 2);
        assert_eq!(basket.len(), 3);
    }

    #[test]
    fn empty_basket_builds_empty_commit() {
        let basket: EventBasket<TestEvent> = EventBasket::default();
        let commit = basket.build_commit(CommitLocation::first("S"), EventLocation::first("S"));
        assert!(commit.is_empty());
    }
}
