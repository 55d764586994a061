//! Header resolution.
//!
//! Headers come from explicit configuration, or are inferred from the first
//! record (each field labelled with its own name). Column order, or failing
//! that the inclusion list, then decides which headers are shown and in what
//! order. The same precedence governs record projection, so header cells and
//! row cells always line up.

use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::ordering::{Dir, SortSpec};
use crate::record::Record;
use crate::width::{width_at, WidthToken};

/// Ordered mapping from field name to display label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeaderMap {
    entries: Vec<(String, String)>,
}

impl HeaderMap {
    /// Creates an empty header map.
    pub fn new() -> Self {
        HeaderMap::default()
    }

    /// Sets the label for `field`, keeping its position if already present.
    pub fn insert(&mut self, field: impl Into<String>, label: impl Into<String>) {
        let field = field.into();
        let label = label.into();
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some((_, slot)) => *slot = label,
            None => self.entries.push((field, label)),
        }
    }

    /// Builder-style [`insert`](HeaderMap::insert).
    pub fn with(mut self, field: impl Into<String>, label: impl Into<String>) -> Self {
        self.insert(field, label);
        self
    }

    /// Label for `field`.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, label)| label.as_str())
    }

    /// Field names in display order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// `(field, label)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, label)| (name.as_str(), label.as_str()))
    }

    /// Number of headers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no headers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Headers inferred from a record: every field labelled with its name.
    pub fn from_record(record: &Record) -> Self {
        record.field_names().map(|f| (f, f)).collect()
    }

    /// Re-keys this map into `fields`, in that order.
    ///
    /// Fields this map has no label for get an empty label.
    fn select<S: AsRef<str>>(&self, fields: &[S]) -> HeaderMap {
        fields
            .iter()
            .map(|f| {
                let f = f.as_ref();
                (f, self.get(f).unwrap_or_default())
            })
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HeaderMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = HeaderMap::new();
        for (field, label) in iter {
            map.insert(field, label);
        }
        map
    }
}

impl Serialize for HeaderMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, label) in &self.entries {
            map.serialize_entry(field, label)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for HeaderMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HeaderVisitor;

        impl<'de> Visitor<'de> for HeaderVisitor {
            type Value = HeaderMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to labels")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<HeaderMap, A::Error> {
                let mut map = HeaderMap::new();
                while let Some((field, label)) = access.next_entry::<String, String>()? {
                    map.insert(field, label);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(HeaderVisitor)
    }
}

/// Resolves the headers to display.
///
/// - base: `explicit`, else inferred from `records[0]`, else empty
/// - `column_order` present: base re-keyed into that order (unlisted fields
///   dropped)
/// - else `inclusion` present: exactly the inclusion fields, in list order
/// - else: base unchanged
///
/// Only one of the two projections applies; `column_order` wins.
pub fn resolve_headers(
    records: &[Record],
    explicit: Option<&HeaderMap>,
    column_order: Option<&[String]>,
    inclusion: Option<&[String]>,
) -> HeaderMap {
    let base = match explicit {
        Some(headers) => headers.clone(),
        None => records.first().map(HeaderMap::from_record).unwrap_or_default(),
    };

    let resolved = match (column_order, inclusion) {
        (Some(order), _) => base.select(order),
        (None, Some(included)) => base.select(included),
        (None, None) => base,
    };
    log::debug!(
        "resolved {} headers ({})",
        resolved.len(),
        if explicit.is_some() { "explicit" } else { "inferred" }
    );
    resolved
}

/// One header cell, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderCell {
    /// Field this column shows.
    pub field: String,
    /// Display label.
    pub label: String,
    /// Positional width token.
    pub width: WidthToken,
    /// Whether the table is sorted by this column.
    pub is_sort_column: bool,
    /// Sort direction, for the sort column only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<Dir>,
}

/// The header row: an optional select-all cell followed by column headers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderRow {
    /// Whether a leading select-all checkbox column is shown.
    pub select_all: bool,
    /// Column headers in display order.
    pub cells: Vec<HeaderCell>,
}

impl HeaderRow {
    /// Total number of rendered columns, including the select-all column.
    pub fn column_count(&self) -> usize {
        self.cells.len() + usize::from(self.select_all)
    }
}

/// Builds the header row for resolved headers.
pub fn header_row(
    headers: &HeaderMap,
    widths: Option<&[WidthToken]>,
    sort: Option<&SortSpec>,
    multi_selectable: bool,
) -> HeaderRow {
    let cells = headers
        .iter()
        .enumerate()
        .map(|(position, (field, label))| {
            let sorted_by = sort.filter(|s| s.column == field);
            HeaderCell {
                field: field.to_string(),
                label: label.to_string(),
                width: width_at(widths, position),
                is_sort_column: sorted_by.is_some(),
                sort_direction: sorted_by.map(|s| s.direction),
            }
        })
        .collect();

    HeaderRow {
        select_all: multi_selectable,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;

    fn order(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| f.to_string()).collect()
    }

    fn explicit() -> HeaderMap {
        HeaderMap::new()
            .with("name", "Name")
            .with("age", "Age")
            .with("color", "Favorite Color")
    }

    #[test]
    fn infers_from_first_record() {
        let records = vec![record! { "name" => "Sue", "age" => 25 }];
        let headers = resolve_headers(&records, None, None, None);
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec![("name", "name"), ("age", "age")]
        );
    }

    #[test]
    fn only_first_record_is_inspected() {
        let records = vec![
            record! { "name" => "Sue" },
            record! { "name" => "Frank", "age" => 20 },
        ];
        let headers = resolve_headers(&records, None, None, None);
        assert_eq!(headers.fields().collect::<Vec<_>>(), ["name"]);
    }

    #[test]
    fn empty_records_without_headers() {
        assert!(resolve_headers(&[], None, None, None).is_empty());
    }

    #[test]
    fn explicit_headers_win_over_inference() {
        let records = vec![record! { "x" => 1 }];
        let headers = resolve_headers(&records, Some(&explicit()), None, None);
        assert_eq!(headers, explicit());
    }

    #[test]
    fn column_order_rekeys_and_drops() {
        let headers = resolve_headers(&[], Some(&explicit()), Some(&order(&["color", "name"])), None);
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec![("color", "Favorite Color"), ("name", "Name")]
        );
    }

    #[test]
    fn column_order_beats_inclusion() {
        let headers = resolve_headers(
            &[],
            Some(&explicit()),
            Some(&order(&["age"])),
            Some(&order(&["name", "color"])),
        );
        assert_eq!(headers.fields().collect::<Vec<_>>(), ["age"]);
    }

    #[test]
    fn inclusion_uses_list_order() {
        let headers = resolve_headers(&[], Some(&explicit()), None, Some(&order(&["color", "name"])));
        assert_eq!(headers.fields().collect::<Vec<_>>(), ["color", "name"]);
    }

    #[test]
    fn unknown_fields_get_empty_labels() {
        let headers = resolve_headers(&[], Some(&explicit()), Some(&order(&["name", "zip"])), None);
        assert_eq!(headers.get("zip"), Some(""));
    }

    #[test]
    fn header_row_marks_sort_column() {
        let widths = [WidthToken::Percent(60.0)];
        let sort = SortSpec::desc("age");
        let row = header_row(&explicit(), Some(&widths), Some(&sort), true);

        assert!(row.select_all);
        assert_eq!(row.column_count(), 4);
        assert_eq!(row.cells[0].width, WidthToken::Percent(60.0));
        assert_eq!(row.cells[1].width, WidthToken::Auto);
        assert!(!row.cells[0].is_sort_column);
        assert!(row.cells[1].is_sort_column);
        assert_eq!(row.cells[1].sort_direction, Some(Dir::Desc));
        assert_eq!(row.cells[2].sort_direction, None);
    }

    #[test]
    fn header_map_deserializes_in_order() {
        let headers: HeaderMap =
            serde_yaml::from_str("name: Name\nage: Age\ncolor: Favorite Color\n").unwrap();
        assert_eq!(headers, explicit());
    }
}
