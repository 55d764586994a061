//! Record projection: inclusion filtering, then column reordering.
//!
//! The two steps are independent and may both apply. Inclusion keeps each
//! record's own field order, not the inclusion list's order: a record
//! `{name, age, color}` included with `[color, name]` comes out as
//! `{name, color}`. Only column ordering changes field order.

use crate::record::Record;

/// Projects every record through the inclusion list and column order.
///
/// - `inclusion`: keep only listed fields, in each record's own order
/// - `column_order`: rebuild with exactly these fields in this order;
///   fields the record lacks become `Null` (an empty cell)
/// - neither: shallow copies
pub fn project_records(
    records: &[Record],
    inclusion: Option<&[String]>,
    column_order: Option<&[String]>,
) -> Vec<Record> {
    records
        .iter()
        .map(|record| project_record(record, inclusion, column_order))
        .collect()
}

/// Projects a single record; see [`project_records`].
pub fn project_record(
    record: &Record,
    inclusion: Option<&[String]>,
    column_order: Option<&[String]>,
) -> Record {
    let included = match inclusion {
        Some(allowed) => record.include(allowed),
        None => record.clone(),
    };
    match column_order {
        Some(order) => included.reorder(order),
        None => included,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;
    use crate::value::Value;

    fn list(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| f.to_string()).collect()
    }

    fn names(record: &Record) -> Vec<&str> {
        record.field_names().collect()
    }

    #[test]
    fn passthrough_without_configuration() {
        let records = vec![record! { "name" => "Sue", "age" => 25 }];
        assert_eq!(project_records(&records, None, None), records);
    }

    #[test]
    fn inclusion_keeps_record_order() {
        let r = record! { "name" => "Sue", "age" => 25, "color" => "blue" };
        let projected = project_record(&r, Some(&list(&["color", "name"])), None);
        assert_eq!(names(&projected), ["name", "color"]);
    }

    #[test]
    fn column_order_reorders() {
        let r = record! { "name" => "Sue", "age" => 25 };
        let projected = project_record(&r, None, Some(&list(&["age", "name"])));
        assert_eq!(names(&projected), ["age", "name"]);
        assert_eq!(projected.get("age"), Some(&Value::from(25)));
    }

    #[test]
    fn inclusion_then_order() {
        let r = record! { "name" => "Sue", "age" => 25, "color" => "blue" };
        let projected = project_record(
            &r,
            Some(&list(&["name", "age"])),
            Some(&list(&["color", "age", "name"])),
        );
        // color was excluded first, so the ordered rebuild sees it as missing.
        assert_eq!(names(&projected), ["color", "age", "name"]);
        assert_eq!(projected.get("color"), Some(&Value::Null));
    }

    #[test]
    fn missing_ordered_field_is_null() {
        let r = record! { "name" => "Sue" };
        let projected = project_record(&r, None, Some(&list(&["name", "zip"])));
        assert_eq!(projected.get("zip"), Some(&Value::Null));
    }

    #[test]
    fn inclusion_is_idempotent() {
        let inclusion = list(&["age", "name"]);
        let records = vec![
            record! { "name" => "Sue", "age" => 25, "color" => "blue" },
            record! { "color" => "red", "age" => 39 },
        ];
        let once = project_records(&records, Some(&inclusion), None);
        let twice = project_records(&once, Some(&inclusion), None);
        assert_eq!(once, twice);
    }
}
