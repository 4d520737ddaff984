//! Property tests for commit materialization.
//!
//! Both pending-event containers must produce the same commit for the same
//! events, with indices running contiguously from the supplied start.

use std::cell::Cell;

use event_log::{
    CommitBuilder, CommitLocation, DomainEvent, EventBasket, EventId, EventList, EventLocation,
};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
enum CounterEvent {
    Incremented { by: u32 },
    Reset,
}

impl DomainEvent for CounterEvent {
    const EVENT_TYPES: &'static [&'static str] = &["Incremented", "Reset"];

    fn event_type(&self) -> &'static str {
        match self {
            CounterEvent::Incremented { .. } => "Incremented",
            CounterEvent::Reset => "Reset",
        }
    }
}

fn counter_event() -> impl Strategy<Value = CounterEvent> {
    prop_oneof![
        any::<u32>().prop_map(|by| CounterEvent::Incremented { by }),
        Just(CounterEvent::Reset),
    ]
}

/// Deterministic ids: 1, 2, 3, ...
fn sequential_ids() -> impl Fn() -> EventId {
    let next = Cell::new(0u128);
    move || {
        next.set(next.get() + 1);
        EventId::from_uuid(Uuid::from_u128(next.get()))
    }
}

proptest! {
    #[test]
    fn commit_indices_run_contiguously_from_start(
        events in prop::collection::vec(counter_event(), 0..64),
        start in 0u64..1_000_000,
        slot in 0u64..1_000,
    ) {
        let list = events
            .iter()
            .cloned()
            .fold(EventList::new(), |list, event| list.push(event));

        let commit = list.build_commit(
            CommitLocation::new("S", slot),
            EventLocation::new("S", start),
        );

        prop_assert_eq!(commit.len(), events.len());
        prop_assert_eq!(commit.location.slot, slot);
        for (offset, qualified) in commit.events.iter().enumerate() {
            prop_assert_eq!(qualified.location.index, start + offset as u64);
            prop_assert_eq!(&qualified.event, &events[offset]);
        }
        for pair in commit.events.windows(2) {
            prop_assert!(pair[1].location.index > pair[0].location.index);
        }
    }

    #[test]
    fn list_and_basket_converge(
        events in prop::collection::vec(counter_event(), 0..64),
        start in 1u64..1_000,
    ) {
        let mut basket = EventBasket::new();
        let mut list = EventList::new();
        for event in &events {
            basket.add(event.clone());
            list = list.push(event.clone());
        }

        let from_basket = basket.build_commit_with(
            CommitLocation::first("S"),
            EventLocation::new("S", start),
            &sequential_ids(),
        );
        let from_list = list.build_commit_with(
            CommitLocation::first("S"),
            EventLocation::new("S", start),
            &sequential_ids(),
        );

        prop_assert_eq!(from_basket, from_list);
    }
}

#[test]
fn identity_is_assigned_at_materialization() {
    let list = EventList::new()
        .push(CounterEvent::Incremented { by: 1 })
        .push(CounterEvent::Reset);

    let first = list.build_commit(CommitLocation::first("S"), EventLocation::first("S"));
    let second = list.build_commit(CommitLocation::first("S"), EventLocation::first("S"));

    assert_ne!(first.events[0].id, second.events[0].id);
    assert_eq!(first.events[0].location, second.events[0].location);
}

#[test]
fn commit_can_be_rebased_on_a_later_start() {
    let list = EventList::new()
        .push(CounterEvent::Incremented { by: 1 })
        .push(CounterEvent::Incremented { by: 2 });

    let original = list.build_commit(CommitLocation::first("S"), EventLocation::first("S"));
    let last = original.last_event_location().unwrap();
    let rebased = list.build_commit(CommitLocation::first("S").next(), last.next());

    assert_eq!(rebased.location.slot, 2);
    assert_eq!(rebased.events[0].location.index, 3);
    assert_eq!(rebased.events[1].location.index, 4);
}

#[test]
fn stored_events_round_trip_through_raw_form() {
    let commit = EventList::new()
        .push(CounterEvent::Incremented { by: 3 })
        .build_commit(CommitLocation::first("S"), EventLocation::first("S"));

    let raw = commit.events[0].to_raw().unwrap();
    let json = serde_json::to_string(&raw).unwrap();
    let stored: event_log::QualifiedDomainEvent<event_log::RawDomainEvent> =
        serde_json::from_str(&json).unwrap();

    assert_eq!(stored.decode::<CounterEvent>().unwrap(), commit.events[0]);
}
