use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a sequence: the whole timeline of commits and events of one
/// aggregate instance.
///
/// Sequence identifiers are opaque strings so that the persistence layer can
/// address streams however it likes. New sequences default to a random UUID.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SequenceId(String);

impl SequenceId {
    /// Creates a new sequence ID backed by a random UUID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Creates a sequence ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SequenceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SequenceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SequenceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SequenceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<Uuid> for SequenceId {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

impl From<SequenceId> for String {
    fn from(id: SequenceId) -> Self {
        id.0
    }
}
