//! Fuel log ordering and the snapshot host sensors read from.

use serde::Serialize;

use crate::types::FuelLogEntry;

/// Order entries by date, most recent first.
///
/// Dates are ISO-8601 strings from the vendor, so string order is
/// chronological order. The sort is stable: entries sharing a date keep
/// their input order. Entries without a date go last.
pub fn sort_fuel_log(mut entries: Vec<FuelLogEntry>) -> Vec<FuelLogEntry> {
    // `None < Some(_)`, so undated entries sink to the end when descending
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries
}

/// Summary of a sorted fuel log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuelLogSnapshot {
    pub entries: usize,
    pub latest_date: Option<String>,
    pub latest: Option<FuelLogEntry>,
}

impl FuelLogSnapshot {
    /// Build from entries already in [`sort_fuel_log`] order.
    pub fn from_entries(sorted: &[FuelLogEntry]) -> Self {
        let latest = sorted.first().cloned();
        Self {
            entries: sorted.len(),
            latest_date: latest.as_ref().and_then(|e| e.date.clone()),
            latest,
        }
    }

    /// Numeric reading from the most recent refuel.
    pub fn latest_number(&self, field: &str) -> Option<f64> {
        self.latest.as_ref()?.number(field)
    }
}
