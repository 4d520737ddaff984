//! Domain error types.

use event_log::EventError;
use thiserror::Error;

use crate::stock::StockItemError;

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A stored event could not be turned into a typed event.
    #[error("Event error: {0}")]
    Event(#[from] EventError),

    /// An error occurred in the stock item aggregate.
    #[error("Stock item error: {0}")]
    StockItem(#[from] StockItemError),

    /// An aggregate factory was built without one of its parts.
    #[error("Incomplete definition of aggregate {aggregate}: missing {missing}")]
    IncompleteDefinition {
        aggregate: &'static str,
        missing: &'static str,
    },
}
