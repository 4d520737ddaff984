//! Stock item domain events.

use event_log::DomainEvent;
use serde::{Deserialize, Serialize};

/// Events that can occur on a stock item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum StockItemEvent {
    /// The item was given its EAN.
    Defined {
        #[serde(rename = "EAN")]
        ean: String,
    },

    /// Units were added to stock.
    Deposited { quantity: u64 },

    /// Units left stock.
    Dispatched { quantity: u64 },
}

impl DomainEvent for StockItemEvent {
    const EVENT_TYPES: &'static [&'static str] = &["Defined", "Deposited", "Dispatched"];

    fn event_type(&self) -> &'static str {
        match self {
            StockItemEvent::Defined { .. } => "Defined",
            StockItemEvent::Deposited { .. } => "Deposited",
            StockItemEvent::Dispatched { .. } => "Dispatched",
        }
    }
}

// Convenience constructors for events
impl StockItemEvent {
    pub fn defined(ean: impl Into<String>) -> Self {
        StockItemEvent::Defined { ean: ean.into() }
    }

    pub fn deposited(quantity: u64) -> Self {
        StockItemEvent::Deposited { quantity }
    }

    pub fn dispatched(quantity: u64) -> Self {
        StockItemEvent::Dispatched { quantity }
    }
}
