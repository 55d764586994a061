//! Property-based tests for the pipeline stages using proptest.

use proptest::prelude::*;
use tabulon::{
    filter_records, project_records, sort_indexed, FilterSpec, IndexedValue, Record, SortSpec,
    Value,
};

// ============================================================================
// Strategies
// ============================================================================

const FIELDS: &[&str] = &["name", "age", "color", "born"];

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        (-20i64..20).prop_map(Value::from),
        "[a-c]{1,2}".prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        Just(Value::Null),
    ]
}

fn record_strategy() -> impl Strategy<Value = Record> {
    prop::collection::vec((prop::sample::select(FIELDS), value_strategy()), 0..6).prop_map(
        |pairs| {
            let mut record = Record::new();
            for (field, value) in pairs {
                record.insert(field, value);
            }
            record
        },
    )
}

fn field_list_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::sample::subsequence(FIELDS, 0..=FIELDS.len())
        .prop_shuffle()
        .prop_map(|fields| fields.into_iter().map(str::to_string).collect())
}

// ============================================================================
// Projection
// ============================================================================

proptest! {
    /// Inclusion keeps exactly the listed fields the record has, in record order.
    #[test]
    fn inclusion_is_intersection_in_record_order(
        records in prop::collection::vec(record_strategy(), 0..10),
        included in field_list_strategy(),
    ) {
        let projected = project_records(&records, Some(&included), None);
        prop_assert_eq!(projected.len(), records.len());

        for (before, after) in records.iter().zip(&projected) {
            let expected: Vec<&str> = before
                .field_names()
                .filter(|f| included.iter().any(|i| i == f))
                .collect();
            prop_assert_eq!(after.field_names().collect::<Vec<_>>(), expected);
            for (field, value) in after.iter() {
                prop_assert_eq!(before.get(field), Some(value));
            }
        }
    }

    /// Projecting twice with the same list changes nothing.
    #[test]
    fn projection_is_idempotent(
        records in prop::collection::vec(record_strategy(), 0..10),
        included in field_list_strategy(),
        order in prop::option::of(field_list_strategy()),
    ) {
        let once = project_records(&records, Some(&included), order.as_deref());
        let twice = project_records(&once, Some(&included), order.as_deref());
        prop_assert_eq!(once, twice);
    }

    /// Column order yields exactly the ordered fields.
    #[test]
    fn column_order_fixes_field_list(
        records in prop::collection::vec(record_strategy(), 0..10),
        order in field_list_strategy(),
    ) {
        for record in project_records(&records, None, Some(&order)) {
            prop_assert_eq!(record.field_names().collect::<Vec<_>>(), order.iter().map(String::as_str).collect::<Vec<_>>());
        }
    }
}

// ============================================================================
// Filtering
// ============================================================================

proptest! {
    /// Filtering keeps a subsequence of the input.
    #[test]
    fn filter_is_subsequence(
        records in prop::collection::vec(record_strategy(), 0..20),
        entries in prop::collection::vec(record_strategy(), 0..4),
    ) {
        let spec = FilterSpec::new(entries);
        let kept = filter_records(&records, Some(&spec));
        prop_assert!(kept.len() <= records.len());

        let mut remaining = records.iter();
        for record in &kept {
            prop_assert!(remaining.any(|r| r == record));
        }
    }

    /// A record is kept iff some entry shares a field with an equal value.
    #[test]
    fn filter_membership(
        record in record_strategy(),
        entries in prop::collection::vec(record_strategy(), 0..4),
    ) {
        let expected = entries.iter().any(|entry| {
            record
                .iter()
                .any(|(field, value)| entry.get(field) == Some(value))
        });
        let spec = FilterSpec::new(entries);
        prop_assert_eq!(spec.matches(&record), expected);
    }
}

// ============================================================================
// Sorting
// ============================================================================

proptest! {
    /// Sorting permutes the input.
    #[test]
    fn sort_is_permutation(values in prop::collection::vec(value_strategy(), 0..30)) {
        let entries: Vec<IndexedValue> = values
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, v)| IndexedValue::new(i, v))
            .collect();
        let spec = SortSpec::asc("x");
        let mut indices: Vec<usize> = sort_indexed(entries, Some(&spec))
            .into_iter()
            .map(|e| e.index)
            .collect();
        indices.sort_unstable();
        prop_assert_eq!(indices, (0..values.len()).collect::<Vec<_>>());
    }

    /// Ascending reversed equals descending when keys are distinct.
    #[test]
    fn descending_reverses_ascending(
        values in prop::collection::hash_set(any::<i64>(), 0..30),
    ) {
        let entries: Vec<IndexedValue> = values
            .into_iter()
            .enumerate()
            .map(|(i, v)| IndexedValue::new(i, v))
            .collect();

        let asc = sort_indexed(entries.clone(), Some(&SortSpec::asc("x")));
        let mut desc = sort_indexed(entries, Some(&SortSpec::desc("x")));
        desc.reverse();
        prop_assert_eq!(asc, desc);
    }

    /// Equal keys keep their input order.
    #[test]
    fn sort_is_stable(keys in prop::collection::vec(0i64..4, 0..30)) {
        let entries: Vec<IndexedValue> = keys
            .iter()
            .enumerate()
            .map(|(i, k)| IndexedValue::new(i, *k))
            .collect();

        for spec in [SortSpec::asc("x"), SortSpec::desc("x")] {
            let sorted = sort_indexed(entries.clone(), Some(&spec));
            for pair in sorted.windows(2) {
                if pair[0].value == pair[1].value {
                    prop_assert!(pair[0].index < pair[1].index);
                }
            }
        }
    }

    /// Output is ordered under the sort spec's comparator.
    #[test]
    fn sort_output_is_ordered(values in prop::collection::vec(value_strategy(), 0..30)) {
        let entries: Vec<IndexedValue> = values
            .into_iter()
            .enumerate()
            .map(|(i, v)| IndexedValue::new(i, v))
            .collect();
        let spec = SortSpec::desc("x");
        let sorted = sort_indexed(entries, Some(&spec));
        for pair in sorted.windows(2) {
            prop_assert_ne!(
                spec.compare(&pair[0].value, &pair[1].value),
                std::cmp::Ordering::Greater
            );
        }
    }
}
