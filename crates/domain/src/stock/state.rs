//! Stock item state and reducer.

use serde::{Deserialize, Serialize};

use super::{StockItemError, StockItemEvent};

/// Lifecycle of a stock item.
///
/// State transitions:
/// ```text
/// Uninitialized ──Defined──► Active
/// ```
/// There is no closing state; an item lives until it is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Lifecycle {
    /// No EAN yet, deposits and dispatches are rejected.
    #[default]
    Uninitialized,

    /// The item has been defined.
    Active,
}

impl Lifecycle {
    pub fn is_active(&self) -> bool {
        matches!(self, Lifecycle::Active)
    }

    /// Returns the lifecycle name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Lifecycle::Uninitialized => "Uninitialized",
            Lifecycle::Active => "Active",
        }
    }
}

impl std::fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// State of an immutable stock item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockItemState {
    pub lifecycle: Lifecycle,
    pub total_quantity: u64,
    pub ean: String,
}

/// Folds one stock item event into a new state.
pub fn reduce(state: &StockItemState, event: &StockItemEvent) -> StockItemState {
    match event {
        StockItemEvent::Defined { ean } => StockItemState {
            lifecycle: Lifecycle::Active,
            ean: ean.clone(),
            ..state.clone()
        },
        StockItemEvent::Deposited { quantity } => StockItemState {
            total_quantity: state.total_quantity.saturating_add(*quantity),
            ..state.clone()
        },
        StockItemEvent::Dispatched { quantity } => StockItemState {
            total_quantity: state.total_quantity.saturating_sub(*quantity),
            ..state.clone()
        },
    }
}

/// Folds one stock item event into `state` in place.
pub fn mutate(state: &mut StockItemState, event: &StockItemEvent) {
    match event {
        StockItemEvent::Defined { ean } => {
            state.lifecycle = Lifecycle::Active;
            state.ean = ean.clone();
        }
        StockItemEvent::Deposited { quantity } => {
            state.total_quantity = state.total_quantity.saturating_add(*quantity);
        }
        StockItemEvent::Dispatched { quantity } => {
            state.total_quantity = state.total_quantity.saturating_sub(*quantity);
        }
    }
}

/// Checks a deposit against the current total.
pub(crate) fn check_deposit(state: &StockItemState, quantity: u64) -> Result<(), StockItemError> {
    if !state.lifecycle.is_active() {
        return Err(StockItemError::NotDefined);
    }

    if quantity == 0 {
        return Err(StockItemError::InvalidQuantity { quantity });
    }

    if state.total_quantity.checked_add(quantity).is_none() {
        return Err(StockItemError::QuantityOverflow {
            requested: quantity,
            available: state.total_quantity,
        });
    }

    Ok(())
}

/// Checks a dispatch against the current total.
pub(crate) fn check_dispatch(state: &StockItemState, quantity: u64) -> Result<(), StockItemError> {
    if !state.lifecycle.is_active() {
        return Err(StockItemError::NotDefined);
    }

    if quantity == 0 {
        return Err(StockItemError::InvalidQuantity { quantity });
    }

    if state.total_quantity < quantity {
        return Err(StockItemError::OutOfStock {
            requested: quantity,
            available: state.total_quantity,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lifecycle_is_uninitialized() {
        assert_eq!(Lifecycle::default(), Lifecycle::Uninitialized);
        assert!(!Lifecycle::Uninitialized.is_active());
        assert!(Lifecycle::Active.is_active());
    }

    #[test]
    fn test_display() {
        assert_eq!(Lifecycle::Uninitialized.to_string(), "Uninitialized");
        assert_eq!(Lifecycle::Active.to_string(), "Active");
    }

    #[test]
    fn test_reduce_does_not_touch_input() {
        let state = StockItemState::default();
        let defined = reduce(&state, &StockItemEvent::defined("1231231231230"));

        assert_eq!(state, StockItemState::default());
        assert_eq!(defined.lifecycle, Lifecycle::Active);
        assert_eq!(defined.ean, "1231231231230");
    }

    #[test]
    fn test_reduce_tracks_quantity() {
        let state = [
            StockItemEvent::defined("1231231231230"),
            StockItemEvent::deposited(100),
            StockItemEvent::dispatched(30),
        ]
        .iter()
        .fold(StockItemState::default(), |state, event| reduce(&state, event));

        assert_eq!(state.total_quantity, 70);
    }

    #[test]
    fn test_mutate_matches_reduce() {
        let events = [
            StockItemEvent::defined("1231231231230"),
            StockItemEvent::deposited(100),
            StockItemEvent::dispatched(30),
        ];
        let folded = events
            .iter()
            .fold(StockItemState::default(), |state, event| reduce(&state, event));
        let mut mutated = StockItemState::default();
        for event in &events {
            mutate(&mut mutated, event);
        }

        assert_eq!(mutated, folded);
    }

    #[test]
    fn test_replaying_an_overflowing_history_saturates() {
        let events = [
            StockItemEvent::defined("1231231231230"),
            StockItemEvent::deposited(u64::MAX),
            StockItemEvent::deposited(1),
        ];
        let folded = events
            .iter()
            .fold(StockItemState::default(), |state, event| reduce(&state, event));
        let mut mutated = StockItemState::default();
        for event in &events {
            mutate(&mut mutated, event);
        }

        assert_eq!(folded.total_quantity, u64::MAX);
        assert_eq!(mutated.total_quantity, u64::MAX);
    }

    #[test]
    fn test_deposit_check_rejects_overflow() {
        let state = StockItemState {
            lifecycle: Lifecycle::Active,
            total_quantity: u64::MAX,
            ean: "1231231231230".to_string(),
        };

        assert_eq!(
            check_deposit(&state, 1),
            Err(StockItemError::QuantityOverflow {
                requested: 1,
                available: u64::MAX
            })
        );
        assert_eq!(check_dispatch(&state, u64::MAX), Ok(()));
    }
}
