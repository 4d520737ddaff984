//! Immutable stock item aggregate.

use crate::immutable::{AggregateFactory, ImmutableAggregate, ImmutableRoot};

use super::state::{check_deposit, check_dispatch};
use super::{StockItemError, StockItemEvent, StockItemState, reduce};

/// Immutable stock item.
///
/// Every successful business operation returns a new `StockItem`; the
/// instance it was called on stays exactly as it was.
#[derive(Debug, Clone)]
pub struct StockItem {
    root: ImmutableRoot<StockItem>,
}

impl ImmutableAggregate for StockItem {
    type State = StockItemState;
    type Event = StockItemEvent;

    fn root(&self) -> &ImmutableRoot<Self> {
        &self.root
    }
}

impl StockItem {
    pub const AGGREGATE_NAME: &'static str = "StockItem";

    /// Returns a factory producing empty stock items.
    pub fn factory() -> AggregateFactory<StockItem> {
        AggregateFactory::new(
            Self::AGGREGATE_NAME,
            reduce,
            |root| StockItem { root },
            StockItemState::default(),
        )
    }
}

// Query methods
impl StockItem {
    pub fn state(&self) -> &StockItemState {
        self.root.state()
    }

    pub fn is_defined(&self) -> bool {
        self.state().lifecycle.is_active()
    }

    pub fn ean(&self) -> &str {
        &self.state().ean
    }

    pub fn total_quantity(&self) -> u64 {
        self.state().total_quantity
    }
}

// Command methods (return the changed item)
impl StockItem {
    /// Gives the item its EAN. Defining an already defined item records
    /// nothing.
    pub fn define(&self, ean: impl Into<String>) -> Result<StockItem, StockItemError> {
        if self.is_defined() {
            return Ok(self.clone());
        }

        Ok(self.root.change(StockItemEvent::defined(ean)))
    }

    /// Adds units to stock.
    pub fn deposit(&self, quantity: u64) -> Result<StockItem, StockItemError> {
        check_deposit(self.state(), quantity)?;
        Ok(self.root.change(StockItemEvent::deposited(quantity)))
    }

    /// Takes units out of stock.
    pub fn dispatch(&self, quantity: u64) -> Result<StockItem, StockItemError> {
        check_dispatch(self.state(), quantity)?;
        Ok(self.root.change(StockItemEvent::dispatched(quantity)))
    }
}
