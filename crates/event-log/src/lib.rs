//! Pending event logs and commit materialization.
//!
//! Events emitted by an aggregate stay bare until a commit is materialized.
//! Only then are they qualified: given a unique [`EventId`] and an
//! [`EventLocation`] derived from the caller-supplied start position.

pub mod basket;
pub mod commit;
pub mod error;
pub mod event;
pub mod list;

pub use basket::EventBasket;
pub use commit::{Commit, CommitBuilder, UNSERIALIZABLE_PAYLOAD};
pub use common::{CommitLocation, EventLocation, SequenceId, next_commit, next_event};
pub use error::{EventError, Result};
pub use event::{
    DomainEvent, EventId, IdGenerator, QualifiedDomainEvent, RawDomainEvent, UuidV4Generator,
    to_qualified, to_qualified_with,
};
pub use list::EventList;
