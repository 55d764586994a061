//! The table pipeline.
//!
//! [`DataTable`] owns an input record list and a [`TableConfig`] and runs a
//! full render pass on demand:
//!
//! ```text
//! records ──► filter ──► include ──► reorder ──► sort ──► map rows
//!                 └──────── source index kept for click payloads ────┘
//! ```
//!
//! Nothing is cached between passes; changing the configuration and calling
//! [`DataTable::view`] again recomputes everything.

use serde::Serialize;

use crate::config::{ResolvedConfig, TableConfig};
use crate::events::{next_sort, TableEvent};
use crate::headers::{header_row, resolve_headers, HeaderMap, HeaderRow};
use crate::ordering::{sort_indexed, IndexedValue, SortSpec};
use crate::project::project_record;
use crate::record::Record;
use crate::rows::{map_rows, ClickPayload, ProcessedRecord, RowSet};
use crate::value::Value;

/// Everything a presenter needs to draw the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    /// Header row.
    pub header: HeaderRow,
    /// Data rows, or the placeholder.
    pub rows: RowSet,
}

/// Input records plus table configuration.
///
/// ```
/// use tabulon::{record, DataTable, SortSpec, TableConfig};
///
/// let table = DataTable::new(
///     vec![
///         record! { "name" => "Sue", "age" => 25 },
///         record! { "name" => "Frank", "age" => 20 },
///     ],
///     TableConfig::new().order(["age", "name"]).sort(SortSpec::asc("age")),
/// );
///
/// let view = table.view();
/// let first = &view.rows.rows()[0];
/// assert_eq!(first.cells[0].value.to_string(), "20");
/// assert_eq!(first.cells[1].value.to_string(), "Frank");
/// ```
#[derive(Debug, Clone, Default)]
pub struct DataTable {
    records: Vec<Record>,
    config: TableConfig,
}

impl DataTable {
    /// Creates a table over `records`.
    pub fn new(records: Vec<Record>, config: TableConfig) -> Self {
        DataTable { records, config }
    }

    /// The input records.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// The configuration.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Mutable access to the configuration, e.g. to change the selection.
    pub fn config_mut(&mut self) -> &mut TableConfig {
        &mut self.config
    }

    /// Replaces the input records.
    pub fn set_records(&mut self, records: Vec<Record>) {
        self.records = records;
    }

    /// Headers to display.
    pub fn headers(&self) -> HeaderMap {
        self.headers_with(&self.config.resolve())
    }

    /// Runs filter, projection and sort, keeping each row's source index.
    pub fn process(&self) -> Vec<ProcessedRecord> {
        self.process_with(&self.config.resolve())
    }

    fn headers_with(&self, resolved: &ResolvedConfig<'_>) -> HeaderMap {
        resolve_headers(
            &self.records,
            resolved.headers,
            resolved.column_order,
            resolved.inclusion,
        )
    }

    fn process_with(&self, resolved: &ResolvedConfig<'_>) -> Vec<ProcessedRecord> {
        let projected: Vec<ProcessedRecord> = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| resolved.filter.map_or(true, |f| f.matches(record)))
            .map(|(source_index, record)| ProcessedRecord {
                source_index,
                record: project_record(record, resolved.inclusion, resolved.column_order),
            })
            .collect();
        log::debug!(
            "{} of {} records passed the filter",
            projected.len(),
            self.records.len()
        );

        let Some(sort) = resolved.sort else {
            return projected;
        };
        reorder_by(projected, sort)
    }

    /// The processed records without source indices.
    pub fn processed_records(&self) -> Vec<Record> {
        self.process().into_iter().map(|p| p.record).collect()
    }

    /// Runs a full render pass.
    pub fn view(&self) -> TableView {
        let resolved = self.config.resolve();
        let headers = self.headers_with(&resolved);
        let processed = self.process_with(&resolved);

        for &row in resolved.selected_rows {
            if row >= processed.len() {
                log::warn!(
                    "selected row {} is out of range ({} rows)",
                    row,
                    processed.len()
                );
            }
        }

        TableView {
            header: header_row(
                &headers,
                resolved.widths,
                resolved.sort,
                resolved.multi_selectable,
            ),
            rows: map_rows(&processed, &self.records, headers.len(), &resolved),
        }
    }

    /// Click payload of the cell at column `x` of row `y`.
    pub fn click(&self, x: usize, y: usize) -> Option<ClickPayload> {
        let view = self.view();
        let row = view.rows.rows().iter().find(|row| row.index == y)?;
        row.cells.get(x).map(|cell| cell.click.clone())
    }

    /// Header click event, for a header that is displayed.
    pub fn header_click(&self, column: &str) -> Option<TableEvent> {
        self.headers()
            .fields()
            .any(|f| f == column)
            .then(|| TableEvent::HeaderClick {
                column: column.to_string(),
            })
    }

    /// Select-all event carrying every processed record.
    pub fn select_all(&self) -> TableEvent {
        TableEvent::SelectAll {
            records: self.processed_records(),
        }
    }

    /// Row-select event for row `y`.
    pub fn select_row(&self, y: usize) -> Option<TableEvent> {
        let record = self.process().into_iter().nth(y)?.record;
        Some(TableEvent::RowSelect { index: y, record })
    }

    /// Sort spec that clicking the header of `column` would switch to.
    pub fn toggle_sort(&self, column: &str) -> SortSpec {
        next_sort(self.config.order_by.as_ref(), column)
    }
}

/// Orders processed records by the sort column through their indices.
fn reorder_by(processed: Vec<ProcessedRecord>, sort: &SortSpec) -> Vec<ProcessedRecord> {
    let column_values: Vec<IndexedValue> = processed
        .iter()
        .enumerate()
        .map(|(index, p)| {
            IndexedValue::new(
                index,
                p.record.get(&sort.column).cloned().unwrap_or(Value::Null),
            )
        })
        .collect();

    let order = sort_indexed(column_values, Some(sort));

    let mut slots: Vec<Option<ProcessedRecord>> = processed.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|entry| slots.get_mut(entry.index).and_then(Option::take))
        .collect()
}
