//! Stock item walkthrough.
//!
//! Drives the immutable and the mutable stock item through the same
//! operations, materializes their pending events into commits, and replays
//! those commits into fresh instances of both variants.

pub mod config;

pub use config::Config;

use domain::{AggregateRoot, DomainError, MutableStockItem, StockItem, StockItemEvent};
use event_log::{Commit, QualifiedDomainEvent, RawDomainEvent};

/// Quantity deposited by the scenario.
pub const DEPOSIT: u64 = 100;

/// Quantity the scenario tries, and fails, to dispatch.
pub const OVERSIZED_DISPATCH: u64 = 200;

/// Outcome of one scenario run.
#[derive(Debug, Clone)]
pub struct Report {
    pub immutable_commit: Commit<StockItemEvent>,
    pub mutable_commit: Commit<StockItemEvent>,
    /// Quantity after replaying the immutable commit into a mutable item.
    pub replayed_into_mutable: u64,
    /// Quantity after replaying the mutable commit into an immutable item.
    pub replayed_into_immutable: u64,
    /// Quantity after replaying the stored (raw) form of the immutable commit.
    pub replayed_from_raw: u64,
}

/// Runs the scenario with the locations and EAN from `config`.
///
/// # Errors
///
/// Returns an error when an operation the scenario expects to succeed is
/// rejected, or when a stored event fails to decode.
#[tracing::instrument(skip_all, fields(sequence = %config.sequence_id))]
pub fn run(config: &Config) -> Result<Report, DomainError> {
    let immutable_commit = immutable_scenario(config)?;
    let mutable_commit = mutable_scenario(config)?;

    let replayed_into_mutable = MutableStockItem::new()
        .replay(&immutable_commit.events)
        .total_quantity();
    let replayed_into_immutable = StockItem::factory()
        .create()
        .replay(&mutable_commit.events)
        .total_quantity();

    let stored = immutable_commit
        .events
        .iter()
        .map(|event| event.to_raw())
        .collect::<Result<Vec<QualifiedDomainEvent<RawDomainEvent>>, _>>()?;
    let replayed_from_raw = stored
        .iter()
        .try_fold(StockItem::factory().create(), |item, event| item.try_apply(event))?
        .total_quantity();

    tracing::info!(
        replayed_into_mutable,
        replayed_into_immutable,
        replayed_from_raw,
        "replayed commits"
    );

    Ok(Report {
        immutable_commit,
        mutable_commit,
        replayed_into_mutable,
        replayed_into_immutable,
        replayed_from_raw,
    })
}

fn immutable_scenario(config: &Config) -> Result<Commit<StockItemEvent>, DomainError> {
    let item = StockItem::factory()
        .create()
        .define(config.ean.as_str())?
        .deposit(DEPOSIT)?;

    if let Err(err) = item.dispatch(OVERSIZED_DISPATCH) {
        tracing::warn!(variant = "immutable", error = %err, "dispatch rejected");
    }

    Ok(item.build_commit(config.commit_location(), config.start_location()))
}

fn mutable_scenario(config: &Config) -> Result<Commit<StockItemEvent>, DomainError> {
    let mut item = MutableStockItem::new();
    item.define(config.ean.as_str())?;
    item.deposit(DEPOSIT)?;

    if let Err(err) = item.dispatch(OVERSIZED_DISPATCH) {
        tracing::warn!(variant = "mutable", error = %err, "dispatch rejected");
    }

    Ok(item.build_commit(config.commit_location(), config.start_location()))
}
