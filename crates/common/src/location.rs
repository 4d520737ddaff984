//! Positions of commits and events within a sequence.
//!
//! Positions only ever move forward through [`next_event`] and
//! [`next_commit`]. Callers are expected to start from the last durably stored
//! position of a sequence; contiguity is a precondition and is not checked.

use serde::{Deserialize, Serialize};

use crate::SequenceId;

/// Ordinal number of an event within all events of a sequence.
pub type EventIndex = u64;

/// Ordinal number of a commit within a sequence.
pub type CommitSlot = u64;

/// Position of one event within its owning sequence.
///
/// For any two events of the same sequence, `a.index > b.index` holds iff `a`
/// was qualified after `b`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventLocation {
    pub sequence: SequenceId,
    pub index: EventIndex,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate_name: Option<String>,
}

impl EventLocation {
    pub fn new(sequence: impl Into<SequenceId>, index: EventIndex) -> Self {
        Self {
            sequence: sequence.into(),
            index,
            aggregate_name: None,
        }
    }

    /// Location of the first event of a fresh sequence (index 1).
    pub fn first(sequence: impl Into<SequenceId>) -> Self {
        Self::new(sequence, 1)
    }

    /// Returns this location tagged with an aggregate name.
    pub fn with_aggregate_name(mut self, name: impl Into<String>) -> Self {
        self.aggregate_name = Some(name.into());
        self
    }

    /// Returns the following event location. See [`next_event`].
    pub fn next(&self) -> Self {
        next_event(self)
    }
}

impl std::fmt::Display for EventLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.sequence, self.index)
    }
}

/// Position of one commit within its owning sequence.
///
/// `slot` strictly increases with every successful commit of a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitLocation {
    pub sequence: SequenceId,
    pub slot: CommitSlot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate_name: Option<String>,
}

impl CommitLocation {
    pub fn new(sequence: impl Into<SequenceId>, slot: CommitSlot) -> Self {
        Self {
            sequence: sequence.into(),
            slot,
            aggregate_name: None,
        }
    }

    /// Location of the first commit of a fresh sequence (slot 1).
    pub fn first(sequence: impl Into<SequenceId>) -> Self {
        Self::new(sequence, 1)
    }

    /// Returns this location tagged with an aggregate name.
    pub fn with_aggregate_name(mut self, name: impl Into<String>) -> Self {
        self.aggregate_name = Some(name.into());
        self
    }

    /// Returns the following commit location. See [`next_commit`].
    pub fn next(&self) -> Self {
        next_commit(self)
    }
}

impl std::fmt::Display for CommitLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.sequence, self.slot)
    }
}

/// Returns the location directly after `location` in the same sequence.
pub fn next_event(location: &EventLocation) -> EventLocation {
    EventLocation {
        sequence: location.sequence.clone(),
        index: location.index + 1,
        aggregate_name: location.aggregate_name.clone(),
    }
}

/// Returns the commit location directly after `location` in the same sequence.
pub fn next_commit(location: &CommitLocation) -> CommitLocation {
    CommitLocation {
        sequence: location.sequence.clone(),
        slot: location.slot + 1,
        aggregate_name: location.aggregate_name.clone(),
    }
}
