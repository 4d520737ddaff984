//! Aggregate root protocols for event-sourced entities.
//!
//! This crate provides:
//! - `AggregateRoot`, the contract infrastructure uses to replay and commit
//!   aggregates regardless of how they are implemented
//! - Immutable aggregates: `ImmutableAggregate`, `ImmutableRoot` and
//!   `AggregateFactory`
//! - Mutable aggregates: `MutableAggregateRoot` and `MutableRoot`
//! - A stock item aggregate implemented both ways

pub mod aggregate;
pub mod error;
pub mod immutable;
pub mod mutable;
pub mod stock;

pub use aggregate::AggregateRoot;
pub use error::DomainError;
pub use immutable::{
    AggregateFactory, AggregateFactoryBuilder, Constructor, ImmutableAggregate, ImmutableRoot,
    Reducer,
};
pub use mutable::{MutableAggregateRoot, MutableRoot, Mutator};
pub use stock::{
    Lifecycle, MutableStockItem, StockItem, StockItemError, StockItemEvent, StockItemState,
};
