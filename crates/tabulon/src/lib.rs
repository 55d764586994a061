//! Tabulon - record processing pipeline for data tables.
//!
//! Tabulon takes a list of flat records (field name to scalar value) and a
//! table configuration, and produces everything a presenter needs to draw
//! the table:
//!
//! - Header resolution: explicit labels, or inferred from the first record
//! - Record filtering: a record passes when any field matches any entry
//! - Projection: field inclusion, then column reordering
//! - Sorting: stable, by column, with date parsing and key extractors
//! - Row view models: cells, selection state and click payloads
//!
//! # Quick Start
//!
//! ```rust
//! use tabulon::{record, DataTable, FilterSpec, SortSpec, TableConfig};
//!
//! let people = vec![
//!     record! { "name" => "Sue", "age" => 25, "color" => "blue" },
//!     record! { "name" => "Frank", "age" => 20, "color" => "green" },
//!     record! { "name" => "Larry", "age" => 39, "color" => "red" },
//! ];
//!
//! let config = TableConfig::new()
//!     .include(["name", "age"])
//!     .filter(FilterSpec::new([
//!         record! { "color" => "blue" },
//!         record! { "color" => "red" },
//!     ]))
//!     .sort(SortSpec::desc("age"));
//!
//! let table = DataTable::new(people, config);
//! let view = table.view();
//!
//! let names: Vec<String> = view
//!     .rows
//!     .rows()
//!     .iter()
//!     .map(|row| row.cells[0].value.to_string())
//!     .collect();
//! assert_eq!(names, ["Larry", "Sue"]);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! records ─► filter ─► include ─► reorder ─► sort ─► map rows
//! ```
//!
//! Filtering runs first, so a filter can test fields the inclusion list
//! drops. Each stage is also exposed as a free function
//! ([`filter_records`], [`project_records`], [`sort_indexed`], [`map_rows`])
//! for callers that drive the pipeline themselves.

mod config;
mod error;
mod events;
mod filter;
mod headers;
mod load;
mod ordering;
mod project;
mod record;
mod rows;
mod table;
mod value;
mod width;

// Re-export public API
pub use config::{ColumnConfig, ResolvedConfig, RowPayload, TableConfig, DEFAULT_NO_RECORDS_TEXT};
pub use error::{Result, TableError};
pub use events::{next_sort, toggle_selection, TableEvent};
pub use filter::{filter_records, FilterSpec};
pub use headers::{header_row, resolve_headers, HeaderCell, HeaderMap, HeaderRow};
pub use load::{load_records, records_from_csv, records_from_json_str, records_from_yaml_str};
pub use ordering::{
    compare_values, parse_date, sort_indexed, Dir, IndexedValue, SortFormatter, SortSpec,
    SortValue,
};
pub use project::{project_record, project_records};
pub use record::Record;
pub use rows::{
    map_rows, CellView, ClickPayload, PlaceholderRow, ProcessedRecord, RowSet, RowViewModel,
};
pub use table::{DataTable, TableView};
pub use value::{Number, Value};
pub use width::{width_at, WidthToken};
