use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::{EventError, EventLocation, Result};

/// Unique identifier for a qualified event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    /// Creates a new random event ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an event ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Derives a stable event ID from a namespace and a name (UUIDv5).
    ///
    /// The same inputs always give the same ID, which keeps re-materialized
    /// commits idempotent.
    pub fn derived(namespace: &Uuid, name: &[u8]) -> Self {
        Self(Uuid::new_v5(namespace, name))
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for EventId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<EventId> for Uuid {
    fn from(id: EventId) -> Self {
        id.0
    }
}

/// Source of identifiers for events that do not provide their own.
pub trait IdGenerator {
    fn generate(&self) -> EventId;
}

/// Default generator: a random UUIDv4 per event.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV4Generator;

impl IdGenerator for UuidV4Generator {
    fn generate(&self) -> EventId {
        EventId::new()
    }
}

impl<F> IdGenerator for F
where
    F: Fn() -> EventId,
{
    fn generate(&self) -> EventId {
        self()
    }
}

/// Trait for domain events.
///
/// Domain events represent facts that have happened in the domain. They are
/// immutable, named in past tense, and modelled as a closed enum serialized
/// with `#[serde(tag = "type", content = "payload")]`.
pub trait DomainEvent: Serialize + DeserializeOwned + Clone + std::fmt::Debug {
    /// Every event type name this enum handles.
    const EVENT_TYPES: &'static [&'static str];

    /// Returns the event type name.
    fn event_type(&self) -> &'static str;

    /// Returns the event payload as JSON, without the type discriminator.
    fn payload(&self) -> Result<serde_json::Value> {
        match serde_json::to_value(self)? {
            serde_json::Value::Object(mut fields) => {
                Ok(fields.remove("payload").unwrap_or(serde_json::Value::Null))
            }
            other => Ok(other),
        }
    }

    /// Returns an identifier chosen by the event itself.
    ///
    /// Events that return `None` receive one from the [`IdGenerator`] in use
    /// when they are qualified.
    fn generate_id(&self) -> Option<EventId> {
        None
    }

    /// Converts this event into its stored form.
    fn to_raw(&self) -> Result<RawDomainEvent> {
        Ok(RawDomainEvent {
            event_type: self.event_type().to_string(),
            payload: self.payload()?,
        })
    }

    /// Decodes a stored event, rejecting types this enum has no handler for.
    fn from_raw(raw: &RawDomainEvent) -> Result<Self> {
        if !Self::EVENT_TYPES.contains(&raw.event_type.as_str()) {
            return Err(EventError::UnknownEventType {
                event_type: raw.event_type.clone(),
            });
        }

        let tagged = serde_json::json!({
            "type": raw.event_type,
            "payload": raw.payload,
        });
        serde_json::from_value(tagged).map_err(|source| EventError::InvalidPayload {
            event_type: raw.event_type.clone(),
            source,
        })
    }
}

/// An event as handed over by the persistence layer: a type name and an
/// opaque JSON payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDomainEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub payload: serde_json::Value,
}

impl RawDomainEvent {
    pub fn new(event_type: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            payload,
        }
    }
}

/// A domain event that has been given identity and position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualifiedDomainEvent<E> {
    /// Unique identifier, assigned once at qualification.
    pub id: EventId,

    /// Position of the event within its sequence.
    pub location: EventLocation,

    /// The bare event.
    #[serde(flatten)]
    pub event: E,
}

impl<E> QualifiedDomainEvent<E> {
    pub fn event(&self) -> &E {
        &self.event
    }

    pub fn into_event(self) -> E {
        self.event
    }
}

impl<E: DomainEvent> QualifiedDomainEvent<E> {
    pub fn event_type(&self) -> &'static str {
        self.event.event_type()
    }

    /// Converts the event into its stored form, keeping id and location.
    pub fn to_raw(&self) -> Result<QualifiedDomainEvent<RawDomainEvent>> {
        Ok(QualifiedDomainEvent {
            id: self.id,
            location: self.location.clone(),
            event: self.event.to_raw()?,
        })
    }
}

impl QualifiedDomainEvent<RawDomainEvent> {
    /// Decodes a stored event into the typed event enum `E`.
    pub fn decode<E: DomainEvent>(&self) -> Result<QualifiedDomainEvent<E>> {
        Ok(QualifiedDomainEvent {
            id: self.id,
            location: self.location.clone(),
            event: E::from_raw(&self.event)?,
        })
    }
}

/// Qualifies `event` at `location` using the default UUIDv4 generator.
pub fn to_qualified<E: DomainEvent>(event: E, location: EventLocation) -> QualifiedDomainEvent<E> {
    to_qualified_with(event, location, &UuidV4Generator)
}

/// Qualifies `event` at `location`; `ids` is used unless the event supplies
/// its own identifier.
pub fn to_qualified_with<E: DomainEvent>(
    event: E,
    location: EventLocation,
    ids: &dyn IdGenerator,
) -> QualifiedDomainEvent<E> {
    let id = event.generate_id().unwrap_or_else(|| ids.generate());
    QualifiedDomainEvent {
        id,
        location,
        event,
    }
}
