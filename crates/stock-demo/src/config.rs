//! Demo configuration loaded from environment variables.

use common::{CommitLocation, CommitSlot, EventIndex, EventLocation, SequenceId};

/// Scenario configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `SEQUENCE_ID` — sequence the commits are written to (default: a fresh UUIDv4)
/// - `COMMIT_SLOT` — slot of the first commit (default: `1`)
/// - `EVENT_INDEX` — index of the first event (default: `1`)
/// - `STOCK_ITEM_EAN` — EAN the item is defined with (default: `"1231231231230"`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub sequence_id: SequenceId,
    pub commit_slot: CommitSlot,
    pub event_index: EventIndex,
    pub ean: String,
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            sequence_id: lookup("SEQUENCE_ID")
                .map(SequenceId::from)
                .unwrap_or(defaults.sequence_id),
            commit_slot: lookup("COMMIT_SLOT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.commit_slot),
            event_index: lookup("EVENT_INDEX")
                .and_then(|i| i.parse().ok())
                .unwrap_or(defaults.event_index),
            ean: lookup("STOCK_ITEM_EAN").unwrap_or(defaults.ean),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
        }
    }

    /// Location of the first commit written by the scenario.
    pub fn commit_location(&self) -> CommitLocation {
        CommitLocation::new(self.sequence_id.clone(), self.commit_slot)
    }

    /// Location of the first event written by the scenario.
    pub fn start_location(&self) -> EventLocation {
        EventLocation::new(self.sequence_id.clone(), self.event_index)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sequence_id: SequenceId::new(),
            commit_slot: 1,
            event_index: 1,
            ean: "1231231231230".to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.commit_slot, 1);
        assert_eq!(config.event_index, 1);
        assert_eq!(config.ean, "1231231231230");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_reads_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SEQUENCE_ID", "stock-7"),
            ("COMMIT_SLOT", "4"),
            ("EVENT_INDEX", "12"),
            ("RUST_LOG", "debug"),
        ]
        .into_iter()
        .collect();
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.sequence_id.as_str(), "stock-7");
        assert_eq!(config.commit_location(), CommitLocation::new("stock-7", 4));
        assert_eq!(config.start_location(), EventLocation::new("stock-7", 12));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_unparsable_numbers_fall_back() {
        let config = Config::from_lookup(|key| match key {
            "COMMIT_SLOT" | "EVENT_INDEX" => Some("not-a-number".to_string()),
            _ => None,
        });

        assert_eq!(config.commit_slot, 1);
        assert_eq!(config.event_index, 1);
    }
}
