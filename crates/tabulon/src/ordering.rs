//! Sorting of table rows by a single column.
//!
//! The sorter works on `(index, value)` pairs pulled from the sort column
//! rather than on whole records. The caller re-projects its processed
//! records through the sorted index sequence, so sort keys are never
//! re-derived from transformed records.
//!
//! Comparison policy, in order:
//!
//! - `formatter: date` parses values as calendar dates
//! - otherwise the [`SortValue`] extractor is applied (identity by default)
//!   and values are compared natively: numbers numerically, strings
//!   lexically, `false < true`
//! - values of different kinds order as bool < number < string < null
//!
//! The sort is stable: equal keys keep their relative input order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TableError;
use crate::value::{parse_number, Number, Value};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    #[serde(rename = "asc")]
    Asc,
    /// Descending order (largest first).
    #[serde(rename = "desc")]
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Applies this direction to an ascending ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// The opposite direction.
    pub fn flip(self) -> Dir {
        match self {
            Dir::Asc => Dir::Desc,
            Dir::Desc => Dir::Asc,
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Dir {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Dir::Asc),
            "desc" | "descending" => Ok(Dir::Desc),
            _ => Err(TableError::InvalidDirection(s.to_string())),
        }
    }
}

/// Value formatter applied before comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortFormatter {
    /// Compare values as calendar dates.
    Date,
}

/// Extractor turning a raw field value into its sort key.
///
/// Named extractors can be given in configuration files; [`SortValue::custom`]
/// takes any closure but only exists in code.
#[derive(Clone, Default)]
pub enum SortValue {
    /// Compare the raw value.
    #[default]
    Identity,
    /// Compare strings case-insensitively.
    Lowercase,
    /// Compare text that looks like a number as that number.
    Numeric,
    /// Compare by the length of the displayed value.
    Length,
    /// Caller-supplied extractor.
    Custom(Arc<dyn Fn(&Value) -> Value + Send + Sync>),
}

impl SortValue {
    /// Wraps a closure as an extractor.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        SortValue::Custom(Arc::new(f))
    }

    /// Applies the extractor.
    pub fn extract(&self, value: &Value) -> Value {
        match self {
            SortValue::Identity => value.clone(),
            SortValue::Lowercase => match value {
                Value::String(s) => Value::String(s.to_lowercase()),
                other => other.clone(),
            },
            SortValue::Numeric => match value {
                Value::String(s) => parse_number(s.trim()).map_or(Value::Null, Value::Number),
                Value::Bool(b) => Value::from(u8::from(*b)),
                other => other.clone(),
            },
            SortValue::Length => match value {
                Value::Null => Value::Null,
                other => Value::from(other.to_string().chars().count()),
            },
            SortValue::Custom(f) => f(value),
        }
    }

    /// Name used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            SortValue::Identity => "identity",
            SortValue::Lowercase => "lowercase",
            SortValue::Numeric => "numeric",
            SortValue::Length => "length",
            SortValue::Custom(_) => "custom",
        }
    }

    /// Returns `true` for the default identity extractor.
    pub fn is_identity(&self) -> bool {
        matches!(self, SortValue::Identity)
    }
}

impl fmt::Debug for SortValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SortValue::{}", self.name())
    }
}

impl PartialEq for SortValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SortValue::Custom(a), SortValue::Custom(b)) => Arc::ptr_eq(a, b),
            (a, b) => a.name() == b.name(),
        }
    }
}

impl FromStr for SortValue {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "identity" => Ok(SortValue::Identity),
            "lowercase" => Ok(SortValue::Lowercase),
            "numeric" => Ok(SortValue::Numeric),
            "length" => Ok(SortValue::Length),
            other => Err(TableError::UnknownExtractor(other.to_string())),
        }
    }
}

impl Serialize for SortValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for SortValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Sort configuration: column, direction and comparison policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    /// Field to sort by.
    pub column: String,
    /// Sort direction.
    #[serde(default)]
    pub direction: Dir,
    /// Optional formatter; `date` compares values as dates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatter: Option<SortFormatter>,
    /// Sort key extractor, ignored when a formatter is set.
    #[serde(default, skip_serializing_if = "SortValue::is_identity")]
    pub get_sort_value: SortValue,
}

impl SortSpec {
    /// Creates a sort spec for `column` in the given direction.
    pub fn new(column: impl Into<String>, direction: Dir) -> Self {
        SortSpec {
            column: column.into(),
            direction,
            formatter: None,
            get_sort_value: SortValue::Identity,
        }
    }

    /// Ascending sort on `column`.
    pub fn asc(column: impl Into<String>) -> Self {
        SortSpec::new(column, Dir::Asc)
    }

    /// Descending sort on `column`.
    pub fn desc(column: impl Into<String>) -> Self {
        SortSpec::new(column, Dir::Desc)
    }

    /// Compare values as calendar dates.
    pub fn date(mut self) -> Self {
        self.formatter = Some(SortFormatter::Date);
        self
    }

    /// Use `extractor` to derive sort keys.
    pub fn sort_value(mut self, extractor: SortValue) -> Self {
        self.get_sort_value = extractor;
        self
    }

    /// Use a closure to derive sort keys.
    pub fn with_extractor<F>(self, f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.sort_value(SortValue::custom(f))
    }

    /// Derives the comparable key for a raw value.
    ///
    /// Dates become epoch milliseconds; unparseable dates become `Null`.
    pub fn key(&self, value: &Value) -> Value {
        match self.formatter {
            Some(SortFormatter::Date) => parse_date(value).map_or(Value::Null, Value::from),
            None => self.get_sort_value.extract(value),
        }
    }

    /// Compares two raw values under this spec.
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        self.direction
            .apply(compare_values(&self.key(a), &self.key(b)))
    }
}

/// A sort column value tied to the position of the record it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexedValue {
    /// Position of the record in the list being sorted.
    pub index: usize,
    /// Value of the sort column for that record.
    pub value: Value,
}

impl IndexedValue {
    /// Creates a new indexed value.
    pub fn new(index: usize, value: impl Into<Value>) -> Self {
        IndexedValue {
            index,
            value: value.into(),
        }
    }
}

/// Total ascending order over values.
///
/// Same-kind values compare natively; different kinds order as
/// bool < number < string < null.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => a.total_cmp(*b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Null, Value::Null) => Ordering::Equal,
        _ => a.kind_rank().cmp(&b.kind_rank()),
    }
}

/// Sorts indexed values by `spec`; returns the input unchanged without one.
pub fn sort_indexed(entries: Vec<IndexedValue>, spec: Option<&SortSpec>) -> Vec<IndexedValue> {
    let Some(spec) = spec else {
        return entries;
    };

    let mut keyed: Vec<(Value, IndexedValue)> = entries
        .into_iter()
        .map(|entry| (spec.key(&entry.value), entry))
        .collect();

    // `sort_by` is stable, which keeps ties in input order.
    keyed.sort_by(|(a, _), (b, _)| spec.direction.apply(compare_values(a, b)));

    log::trace!(
        "sorted {} values by '{}' {}",
        keyed.len(),
        spec.column,
        spec.direction
    );
    keyed.into_iter().map(|(_, entry)| entry).collect()
}

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%m-%d-%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
];

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parses a value as a calendar date, returning epoch milliseconds.
///
/// Numbers are taken as epoch milliseconds. Strings may be ISO dates,
/// RFC 3339 timestamps, US `MM/DD/YYYY` dates or long-form month names.
/// Dates without an offset are read as UTC.
pub fn parse_date(value: &Value) -> Option<i64> {
    match value {
        Value::Number(Number::F64(n)) if !n.is_finite() => None,
        Value::Number(n) => Some(n.to_f64() as i64),
        Value::String(s) => parse_date_str(s.trim()),
        Value::Bool(_) | Value::Null => None,
    }
}

fn parse_date_str(s: &str) -> Option<i64> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    if let Some(dt) = DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.and_utc().timestamp_millis());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indexed(values: Vec<Value>) -> Vec<IndexedValue> {
        values
            .into_iter()
            .enumerate()
            .map(|(i, v)| IndexedValue::new(i, v))
            .collect()
    }

    fn order_of(entries: &[IndexedValue]) -> Vec<usize> {
        entries.iter().map(|e| e.index).collect()
    }

    #[test]
    fn dir_apply() {
        assert_eq!(Dir::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(Dir::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Dir::Desc.apply(Ordering::Equal), Ordering::Equal);
        assert_eq!(Dir::Asc.flip(), Dir::Desc);
    }

    #[test]
    fn dir_parse_and_display() {
        assert_eq!("desc".parse::<Dir>().unwrap(), Dir::Desc);
        assert_eq!("Ascending".parse::<Dir>().unwrap(), Dir::Asc);
        assert!("up".parse::<Dir>().is_err());
        assert_eq!(Dir::Desc.to_string(), "desc");
    }

    #[test]
    fn compare_across_kinds_is_total() {
        assert_eq!(
            compare_values(&Value::from(true), &Value::from(1)),
            Ordering::Less
        );
        assert_eq!(
            compare_values(&Value::from(99), &Value::from("1")),
            Ordering::Less
        );
        assert_eq!(
            compare_values(&Value::from("z"), &Value::Null),
            Ordering::Less
        );
        assert_eq!(compare_values(&Value::Null, &Value::Null), Ordering::Equal);
    }

    #[test]
    fn no_spec_is_identity() {
        let entries = indexed(vec![Value::from(3), Value::from(1)]);
        assert_eq!(order_of(&sort_indexed(entries, None)), vec![0, 1]);
    }

    #[test]
    fn numbers_sort_numerically() {
        let entries = indexed(vec![Value::from(25), Value::from(3), Value::from(100)]);
        let sorted = sort_indexed(entries, Some(&SortSpec::asc("age")));
        assert_eq!(order_of(&sorted), vec![1, 0, 2]);
    }

    #[test]
    fn strings_sort_lexically_descending() {
        let entries = indexed(vec![
            Value::from("Frank"),
            Value::from("Sue"),
            Value::from("Jose"),
        ]);
        let sorted = sort_indexed(entries, Some(&SortSpec::desc("name")));
        assert_eq!(order_of(&sorted), vec![1, 2, 0]);
    }

    #[test]
    fn ties_keep_input_order() {
        let entries = indexed(vec![
            Value::from(1),
            Value::from(0),
            Value::from(1),
            Value::from(0),
        ]);
        let asc = sort_indexed(entries.clone(), Some(&SortSpec::asc("n")));
        assert_eq!(order_of(&asc), vec![1, 3, 0, 2]);
        let desc = sort_indexed(entries, Some(&SortSpec::desc("n")));
        assert_eq!(order_of(&desc), vec![0, 2, 1, 3]);
    }

    #[test]
    fn nulls_sort_last_ascending() {
        let entries = indexed(vec![Value::Null, Value::from(2), Value::from(1)]);
        let sorted = sort_indexed(entries, Some(&SortSpec::asc("n")));
        assert_eq!(order_of(&sorted), vec![2, 1, 0]);
    }

    #[test]
    fn date_formatter_compares_calendar_dates() {
        let entries = indexed(vec![
            Value::from("10/20/1994"),
            Value::from("01/02/2001"),
            Value::from("03/15/1990"),
        ]);
        let sorted = sort_indexed(entries.clone(), Some(&SortSpec::asc("born").date()));
        assert_eq!(order_of(&sorted), vec![2, 0, 1]);

        // Lexical order would put "01/02/2001" first.
        let lexical = sort_indexed(entries, Some(&SortSpec::asc("born")));
        assert_eq!(order_of(&lexical), vec![1, 2, 0]);
    }

    #[test]
    fn invalid_dates_sort_last() {
        let entries = indexed(vec![
            Value::from("Updated: 10/20/1994"),
            Value::from("1994-10-20"),
        ]);
        let sorted = sort_indexed(entries, Some(&SortSpec::asc("d").date()));
        assert_eq!(order_of(&sorted), vec![1, 0]);
    }

    #[test]
    fn date_parsing_formats() {
        let day = Some(782_611_200_000);
        assert_eq!(parse_date(&Value::from("1994-10-20")), day);
        assert_eq!(parse_date(&Value::from("10/20/1994")), day);
        assert_eq!(parse_date(&Value::from("1994/10/20")), day);
        assert_eq!(parse_date(&Value::from("October 20, 1994")), day);
        assert_eq!(parse_date(&Value::from("Oct 20, 1994")), day);
        assert_eq!(parse_date(&Value::from("1994-10-20T00:00:00Z")), day);
        assert_eq!(parse_date(&Value::from("1994-10-20T02:00:00+02:00")), day);
        assert_eq!(parse_date(&Value::from(782_611_200_000i64)), day);
        assert_eq!(parse_date(&Value::from("not a date")), None);
        assert_eq!(parse_date(&Value::Null), None);
    }

    #[test]
    fn extractors() {
        assert_eq!(
            SortValue::Lowercase.extract(&Value::from("Sue")),
            Value::from("sue")
        );
        assert_eq!(SortValue::Numeric.extract(&Value::from("42")), Value::from(42));
        assert_eq!(SortValue::Numeric.extract(&Value::from("n/a")), Value::Null);
        assert_eq!(SortValue::Numeric.extract(&Value::from("007")), Value::from(7));
        assert_eq!(SortValue::Length.extract(&Value::from("abc")), Value::from(3));
        let custom = SortValue::custom(|v| Value::from(v.to_string().len() % 2 == 0));
        assert_eq!(custom.extract(&Value::from("ab")), Value::from(true));
    }

    #[test]
    fn extractor_changes_order() {
        let entries = indexed(vec![Value::from("b"), Value::from("C"), Value::from("a")]);
        let plain = sort_indexed(entries.clone(), Some(&SortSpec::asc("x")));
        assert_eq!(order_of(&plain), vec![1, 2, 0]);

        let spec = SortSpec::asc("x").with_extractor(|v| match v {
            Value::String(s) => Value::from(s.to_uppercase()),
            other => other.clone(),
        });
        let folded = sort_indexed(entries, Some(&spec));
        assert_eq!(order_of(&folded), vec![2, 0, 1]);
    }

    #[test]
    fn spec_deserializes_from_config_keys() {
        let spec: SortSpec = serde_json::from_str(
            r#"{"column": "born", "direction": "desc", "formatter": "date"}"#,
        )
        .unwrap();
        assert_eq!(spec, SortSpec::desc("born").date());

        let spec: SortSpec =
            serde_yaml::from_str("column: name\ngetSortValue: lowercase\n").unwrap();
        assert_eq!(spec, SortSpec::asc("name").sort_value(SortValue::Lowercase));

        assert!(serde_json::from_str::<SortSpec>(r#"{"column": "x", "direction": "up"}"#).is_err());
        assert!(
            serde_json::from_str::<SortSpec>(r#"{"column": "x", "getSortValue": "magic"}"#)
                .is_err()
        );
    }
}
