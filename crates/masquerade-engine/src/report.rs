use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Counters accumulated by an `Anonymizer` across calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnonymizationReport {
    pub objects_anonymized: u64,
    pub fields_replaced: u64,
    /// Fields left alone because their current value was unset.
    pub fields_skipped: u64,
    pub elements_appended: u64,
    pub hooks_invoked: u64,
    pub files_materialized: u64,
    pub files_removed: u64,
    /// Previous files that could not be deleted under the best-effort policy.
    pub removal_failures: u64,
    /// Generated values per strategy (`string.email`, `number.integer`, `file`, ...).
    pub strategy_usage: BTreeMap<String, u64>,
}

impl AnonymizationReport {
    pub fn record_strategy(&mut self, id: &str, count: u64) {
        *self.strategy_usage.entry(id.to_string()).or_insert(0) += count;
    }

    pub fn record_replaced(&mut self) {
        self.fields_replaced += 1;
    }

    pub fn record_appended(&mut self, count: u64) {
        self.elements_appended += count;
    }

    pub fn record_skipped(&mut self) {
        self.fields_skipped += 1;
    }
}
