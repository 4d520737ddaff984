//! Mutable stock item aggregate.

use event_log::{EventBasket, QualifiedDomainEvent};

use crate::aggregate::AggregateRoot;
use crate::mutable::{MutableAggregateRoot, MutableRoot};

use super::state::{check_deposit, check_dispatch};
use super::{Lifecycle, StockItemError, StockItemEvent, StockItemState, mutate};

/// Stock item that changes in place.
///
/// Business operations emit events through the private root; the fields only
/// change when an event is emitted or replayed.
#[derive(Debug, Clone)]
pub struct MutableStockItem {
    root: MutableRoot<StockItemState, StockItemEvent>,
}

impl MutableStockItem {
    pub const AGGREGATE_NAME: &'static str = "StockItem";

    pub fn new() -> Self {
        Self {
            root: MutableRoot::new(Self::AGGREGATE_NAME, StockItemState::default(), mutate),
        }
    }
}

impl Default for MutableStockItem {
    fn default() -> Self {
        Self::new()
    }
}

impl MutableAggregateRoot for MutableStockItem {
    type State = StockItemState;
    type Event = StockItemEvent;

    const AGGREGATE_NAME: &'static str = Self::AGGREGATE_NAME;

    fn root(&self) -> &MutableRoot<StockItemState, StockItemEvent> {
        &self.root
    }
}

impl AggregateRoot for MutableStockItem {
    type Event = StockItemEvent;
    type Pending = EventBasket<StockItemEvent>;

    fn aggregate_name(&self) -> &'static str {
        self.root.aggregate_name()
    }

    fn pending(&self) -> &EventBasket<StockItemEvent> {
        self.root.pending()
    }

    fn apply(mut self, event: &QualifiedDomainEvent<StockItemEvent>) -> Self {
        self.root.replay(event);
        self
    }
}

// Query methods
impl MutableStockItem {
    pub fn state(&self) -> &StockItemState {
        self.root.state()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.state().lifecycle
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

// Command methods
impl MutableStockItem {
    /// Gives the item its EAN. Defining an already defined item records
    /// nothing.
    pub fn define(&mut self, ean: impl Into<String>) -> Result<(), StockItemError> {
        if self.is_defined() {
            return Ok(());
        }

        self.root.emit(StockItemEvent::defined(ean));
        Ok(())
    }

    /// Adds units to stock.
    pub fn deposit(&mut self, quantity: u64) -> Result<(), StockItemError> {
        check_deposit(self.state(), quantity)?;
        self.root.emit(StockItemEvent::deposited(quantity));
        Ok(())
    }

    /// Takes units out of stock.
    pub fn dispatch(&mut self, quantity: u64) -> Result<(), StockItemError> {
        check_dispatch(self.state(), quantity)?;
        self.root.emit(StockItemEvent::dispatched(quantity));
        Ok(())
    }
}
