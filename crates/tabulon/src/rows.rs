//! Row view models.
//!
//! The mapper is the last pipeline stage: it turns processed records into
//! render-ready rows carrying selection state and one click payload per
//! cell. When nothing survives processing it emits a single placeholder row
//! spanning every column instead.

use serde::Serialize;

use crate::config::{ResolvedConfig, RowPayload};
use crate::record::Record;
use crate::value::Value;
use crate::width::{width_at, WidthToken};

/// A processed record and the position of the input record it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedRecord {
    /// Position of the originating record in the input list.
    pub source_index: usize,
    /// The filtered and projected record.
    pub record: Record,
}

/// Data reported when a cell is clicked.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickPayload {
    /// Field of the clicked column.
    pub column: String,
    /// Column position within the row's cells.
    pub x_coord: usize,
    /// Value of the clicked cell.
    pub cell_data: Value,
    /// The row: projected, or the unprojected input record when configured.
    pub row: Record,
    /// Row position in processed order.
    pub y_coord: usize,
}

/// One rendered cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellView {
    /// Field this cell shows.
    pub field: String,
    /// Cell value (`Null` renders as an empty cell).
    pub value: Value,
    /// Positional width token.
    pub width: WidthToken,
    /// Payload reported when this cell is clicked.
    pub click: ClickPayload,
}

/// One rendered data row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowViewModel {
    /// Position in processed order.
    pub index: usize,
    /// Position of the originating input record.
    pub source_index: usize,
    /// Cells in field order.
    pub cells: Vec<CellView>,
    /// Whether the row is in the selection set.
    pub is_selected: bool,
    /// Whether the row's multi-select checkbox is ticked.
    pub is_multi_select_checked: bool,
    /// Whether the row reacts to hover (click handling available).
    pub is_hoverable: bool,
}

/// The single row shown when there is nothing to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceholderRow {
    /// Number of columns the placeholder cell spans (at least 1).
    pub col_span: usize,
    /// Placeholder text.
    pub text: String,
}

/// Output of the row mapper.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowSet {
    /// Data rows in processed order.
    Rows(Vec<RowViewModel>),
    /// Nothing to display.
    Placeholder(PlaceholderRow),
}

impl RowSet {
    /// The data rows; empty for a placeholder.
    pub fn rows(&self) -> &[RowViewModel] {
        match self {
            RowSet::Rows(rows) => rows,
            RowSet::Placeholder(_) => &[],
        }
    }

    /// The placeholder row, if the table is empty.
    pub fn placeholder(&self) -> Option<&PlaceholderRow> {
        match self {
            RowSet::Rows(_) => None,
            RowSet::Placeholder(p) => Some(p),
        }
    }

    /// Returns `true` if the placeholder is shown.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, RowSet::Placeholder(_))
    }
}

/// Maps processed records to row view models.
///
/// `originals` is the unprocessed input list, used when click payloads
/// report the original record. `header_count` sizes the placeholder.
/// Records left with no fields are skipped one by one; the others keep
/// their processed index. The placeholder is emitted only when no row is left.
pub fn map_rows(
    processed: &[ProcessedRecord],
    originals: &[Record],
    header_count: usize,
    config: &ResolvedConfig<'_>,
) -> RowSet {
    let rows: Vec<RowViewModel> = processed
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.record.is_empty())
        .map(|(index, p)| map_row(index, p, originals, config))
        .collect();

    if rows.is_empty() {
        let col_span = header_count + usize::from(config.multi_selectable);
        log::debug!("no rows to display, placeholder spans {} columns", col_span.max(1));
        return RowSet::Placeholder(PlaceholderRow {
            col_span: col_span.max(1),
            text: config.no_records_text.to_string(),
        });
    }

    log::debug!("mapped {} rows", rows.len());
    RowSet::Rows(rows)
}

fn map_row(
    index: usize,
    processed: &ProcessedRecord,
    originals: &[Record],
    config: &ResolvedConfig<'_>,
) -> RowViewModel {
    let row = match config.row_payload {
        RowPayload::Original => originals
            .get(processed.source_index)
            .unwrap_or(&processed.record),
        RowPayload::Projected => &processed.record,
    };

    let cells = processed
        .record
        .iter()
        .enumerate()
        .map(|(x, (field, value))| CellView {
            field: field.to_string(),
            value: value.clone(),
            width: width_at(config.widths, x),
            click: ClickPayload {
                column: field.to_string(),
                x_coord: x,
                cell_data: value.clone(),
                row: row.clone(),
                y_coord: index,
            },
        })
        .collect();

    let is_selected = config.is_selected(index);
    RowViewModel {
        index,
        source_index: processed.source_index,
        cells,
        is_selected,
        is_multi_select_checked: config.multi_selectable && is_selected,
        is_hoverable: config.clickable,
    }
}
