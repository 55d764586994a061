//! Record filtering.
//!
//! A [`FilterSpec`] is a list of partial records. A record passes when any
//! single field it shares with any single entry has an equal value:
//!
//! ```text
//! keep(r) = ∃ entry ∈ spec, ∃ f ∈ keys(r) ∩ keys(entry) : r[f] == entry[f]
//! ```
//!
//! An empty spec keeps nothing. Equality is strict (see [`Value`]).
//!
//! [`Value`]: crate::Value

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// OR-of-entries, OR-of-fields record filter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSpec {
    entries: Vec<Record>,
}

impl FilterSpec {
    /// Creates a filter spec from its entries.
    pub fn new(entries: impl IntoIterator<Item = Record>) -> Self {
        FilterSpec {
            entries: entries.into_iter().collect(),
        }
    }

    /// Adds an entry.
    pub fn or(mut self, entry: Record) -> Self {
        self.entries.push(entry);
        self
    }

    /// The filter entries.
    pub fn entries(&self) -> &[Record] {
        &self.entries
    }

    /// Returns `true` if there are no entries (and so nothing can match).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tests whether `record` passes the filter.
    pub fn matches(&self, record: &Record) -> bool {
        record.iter().any(|(field, value)| {
            self.entries
                .iter()
                .any(|entry| entry.get(field).is_some_and(|wanted| wanted == value))
        })
    }
}

impl FromIterator<Record> for FilterSpec {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        FilterSpec::new(iter)
    }
}

/// Keeps the records that pass `spec`; without a spec every record is kept.
pub fn filter_records(records: &[Record], spec: Option<&FilterSpec>) -> Vec<Record> {
    match spec {
        None => records.to_vec(),
        Some(spec) => records
            .iter()
            .filter(|record| spec.matches(record))
            .cloned()
            .collect(),
    }
}
