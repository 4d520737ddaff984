//! Shared value types for the event-sourced aggregate core.

pub mod location;
mod types;

pub use location::{
    CommitLocation, CommitSlot, EventIndex, EventLocation, next_commit, next_event,
};
pub use types::SequenceId;
