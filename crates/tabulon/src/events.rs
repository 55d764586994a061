//! Interaction payloads.
//!
//! The pipeline never calls back into a presenter. Instead it builds the
//! payload a presenter forwards when the user clicks a cell or a header,
//! ticks a row checkbox, or uses the select-all checkbox.

use serde::Serialize;

use crate::ordering::SortSpec;
use crate::record::Record;
use crate::rows::ClickPayload;

/// A user interaction, shaped for the presenter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum TableEvent {
    /// A data cell was clicked.
    CellClick(ClickPayload),
    /// A column header was clicked.
    HeaderClick {
        /// Field of the clicked header.
        column: String,
    },
    /// The select-all checkbox was used; carries every processed record.
    SelectAll {
        /// Processed records in display order.
        records: Vec<Record>,
    },
    /// A row checkbox was used.
    RowSelect {
        /// Row position in processed order.
        index: usize,
        /// The processed record of that row.
        record: Record,
    },
}

/// Sort spec after clicking the header of `column`.
///
/// Clicking the current sort column flips its direction and keeps its
/// formatter and extractor; any other column starts a plain ascending sort.
pub fn next_sort(current: Option<&SortSpec>, column: &str) -> SortSpec {
    match current {
        Some(spec) if spec.column == column => {
            let mut next = spec.clone();
            next.direction = spec.direction.flip();
            next
        }
        _ => SortSpec::asc(column),
    }
}

/// Selection after toggling the checkbox of row `index`.
///
/// The result is sorted and free of duplicates.
pub fn toggle_selection(selected: &[usize], index: usize) -> Vec<usize> {
    let mut next: Vec<usize> = selected.iter().copied().filter(|&i| i != index).collect();
    if next.len() == selected.len() {
        next.push(index);
    }
    next.sort_unstable();
    next.dedup();
    next
}
