//! Table configuration.
//!
//! [`TableConfig`] is the full option surface a presenter hands the
//! pipeline. It deserializes from JSON or YAML using the same camelCase keys
//! the data-table component accepted (`recordInclusion`, `filterRecords`,
//! `orderBy`, ...).
//!
//! Options interact: column order beats the inclusion list for headers, and
//! an active filter disables `returnAllRecordsOnClick`. Those rules live in
//! [`TableConfig::resolve`], which produces a [`ResolvedConfig`] once per
//! render pass so every stage reads the same decisions.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};
use crate::filter::FilterSpec;
use crate::headers::HeaderMap;
use crate::ordering::SortSpec;
use crate::width::WidthToken;

/// Placeholder text shown when no rows survive processing.
pub const DEFAULT_NO_RECORDS_TEXT: &str = "No records found.";

/// Column order and positional widths.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// Field order applied to headers and every record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Vec<String>>,
    /// Width of the i-th rendered column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Vec<WidthToken>>,
}

/// Configuration for one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableConfig {
    /// Column order and widths.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<ColumnConfig>,
    /// Explicit header labels; inferred from the first record when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HeaderMap>,
    /// Field allowlist, applied before reordering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_inclusion: Option<Vec<String>>,
    /// Record filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_records: Option<FilterSpec>,
    /// Sort configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<SortSpec>,
    /// Selected row positions (in processed order).
    pub selected_rows: Vec<usize>,
    /// Show a checkbox column and a select-all header.
    pub multi_selectable: bool,
    /// Click payloads carry the unprojected input record.
    pub return_all_records_on_click: bool,
    /// Placeholder text for an empty table.
    pub no_records_text: String,
    /// Whether cell clicks are handled (rows become hoverable).
    pub clickable: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            columns: None,
            headers: None,
            record_inclusion: None,
            filter_records: None,
            order_by: None,
            selected_rows: Vec::new(),
            multi_selectable: false,
            return_all_records_on_click: false,
            no_records_text: DEFAULT_NO_RECORDS_TEXT.to_string(),
            clickable: true,
        }
    }
}

impl TableConfig {
    /// Creates a configuration with every option at its default.
    pub fn new() -> Self {
        TableConfig::default()
    }

    /// Parses a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a YAML configuration.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads a configuration file, choosing the format by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loading table config from {}", path.display());
        match extension(path).as_deref() {
            Some("json") => Self::from_json_str(&text),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text),
            _ => Err(TableError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Sets the column order.
    pub fn order<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns.get_or_insert_with(Default::default).order =
            Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the positional column widths.
    pub fn widths(mut self, widths: impl IntoIterator<Item = WidthToken>) -> Self {
        self.columns.get_or_insert_with(Default::default).width =
            Some(widths.into_iter().collect());
        self
    }

    /// Sets explicit headers.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Sets the field inclusion list.
    pub fn include<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.record_inclusion = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the record filter.
    pub fn filter(mut self, spec: FilterSpec) -> Self {
        self.filter_records = Some(spec);
        self
    }

    /// Sets the sort configuration.
    pub fn sort(mut self, spec: SortSpec) -> Self {
        self.order_by = Some(spec);
        self
    }

    /// Sets the selected row positions.
    pub fn select(mut self, rows: impl IntoIterator<Item = usize>) -> Self {
        self.selected_rows = rows.into_iter().collect();
        self
    }

    /// Enables or disables multi-select.
    pub fn multi_selectable(mut self, enabled: bool) -> Self {
        self.multi_selectable = enabled;
        self
    }

    /// Enables or disables returning the unprojected record on click.
    pub fn return_all_records_on_click(mut self, enabled: bool) -> Self {
        self.return_all_records_on_click = enabled;
        self
    }

    /// Sets the placeholder text for an empty table.
    pub fn no_records_text(mut self, text: impl Into<String>) -> Self {
        self.no_records_text = text.into();
        self
    }

    /// Enables or disables click handling.
    pub fn clickable(mut self, enabled: bool) -> Self {
        self.clickable = enabled;
        self
    }

    /// The configured column order, if any.
    pub fn column_order(&self) -> Option<&[String]> {
        self.columns.as_ref()?.order.as_deref()
    }

    /// The configured column widths, if any.
    pub fn column_widths(&self) -> Option<&[WidthToken]> {
        self.columns.as_ref()?.width.as_deref()
    }

    /// Resolves option interactions for one render pass.
    pub fn resolve(&self) -> ResolvedConfig<'_> {
        let filter = self.filter_records.as_ref();
        let row_payload = match (self.return_all_records_on_click, filter) {
            (true, None) => RowPayload::Original,
            (true, Some(_)) => {
                log::warn!("returnAllRecordsOnClick is ignored while filterRecords is set");
                RowPayload::Projected
            }
            (false, _) => RowPayload::Projected,
        };

        ResolvedConfig {
            column_order: self.column_order(),
            inclusion: self.record_inclusion.as_deref(),
            widths: self.column_widths(),
            headers: self.headers.as_ref(),
            filter,
            sort: self.order_by.as_ref(),
            selected_rows: &self.selected_rows,
            multi_selectable: self.multi_selectable,
            clickable: self.clickable,
            row_payload,
            no_records_text: &self.no_records_text,
        }
    }
}

/// Which record a cell click reports as its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowPayload {
    /// The processed (filtered, projected) record.
    Projected,
    /// The input record the processed row came from.
    Original,
}

/// Configuration with every precedence rule applied, borrowed for one pass.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedConfig<'a> {
    /// Column order for headers and records.
    pub column_order: Option<&'a [String]>,
    /// Field allowlist.
    pub inclusion: Option<&'a [String]>,
    /// Positional widths.
    pub widths: Option<&'a [WidthToken]>,
    /// Explicit headers.
    pub headers: Option<&'a HeaderMap>,
    /// Record filter.
    pub filter: Option<&'a FilterSpec>,
    /// Sort configuration.
    pub sort: Option<&'a SortSpec>,
    /// Selected row positions.
    pub selected_rows: &'a [usize],
    /// Multi-select enabled.
    pub multi_selectable: bool,
    /// Click handling available.
    pub clickable: bool,
    /// Row reported in click payloads.
    pub row_payload: RowPayload,
    /// Placeholder text.
    pub no_records_text: &'a str,
}

impl ResolvedConfig<'_> {
    /// Returns `true` if the row at `index` is selected.
    pub fn is_selected(&self, index: usize) -> bool {
        self.selected_rows.contains(&index)
    }
}

pub(crate) fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}
