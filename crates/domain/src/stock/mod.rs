//! Stock item aggregate, in both immutable and mutable form.

mod aggregate;
mod events;
mod mutable;
mod state;

pub use aggregate::StockItem;
pub use events::StockItemEvent;
pub use mutable::MutableStockItem;
pub use state::{Lifecycle, StockItemState, mutate, reduce};

use thiserror::Error;

/// Errors that can occur during stock item operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StockItemError {
    /// The item has no EAN yet.
    #[error("Need to define the EAN first")]
    NotDefined,

    /// Not enough stock to dispatch.
    #[error("Out of stock: requested {requested}, available {available}")]
    OutOfStock { requested: u64, available: u64 },

    /// The deposit would push the stock past what can be counted.
    #[error("Quantity overflow: depositing {requested} onto {available}")]
    QuantityOverflow { requested: u64, available: u64 },

    /// Invalid quantity.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: u64 },
}
