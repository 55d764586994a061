//! Loading record lists from JSON, YAML and CSV.
//!
//! JSON and YAML inputs are a list of flat maps. CSV inputs use the header
//! line as field names; cells are typed with [`Value::infer`], so `25`
//! loads as a number, `02139` stays text and an empty cell loads as null.

use std::io::Read;
use std::path::Path;

use crate::config::extension;
use crate::error::{Result, TableError};
use crate::record::Record;
use crate::value::Value;

/// Parses a JSON array of records.
pub fn records_from_json_str(json: &str) -> Result<Vec<Record>> {
    Ok(serde_json::from_str(json)?)
}

/// Parses a YAML sequence of records.
pub fn records_from_yaml_str(yaml: &str) -> Result<Vec<Record>> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Reads CSV records, using the first line as field names.
pub fn records_from_csv<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut csv = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let fields: Vec<String> = csv.headers()?.iter().map(str::to_string).collect();

    let mut records = Vec::new();
    for row in csv.records() {
        let row = row?;
        let record: Record = fields
            .iter()
            .zip(row.iter())
            .map(|(field, cell)| (field.as_str(), Value::infer(cell)))
            .collect();
        records.push(record);
    }
    Ok(records)
}

/// Loads records from a file, choosing the format by extension.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let io_err = |source: std::io::Error| TableError::Io {
        path: path.to_path_buf(),
        source,
    };

    let records = match extension(path).as_deref() {
        Some("json") => records_from_json_str(&std::fs::read_to_string(path).map_err(io_err)?)?,
        Some("yaml") | Some("yml") => {
            records_from_yaml_str(&std::fs::read_to_string(path).map_err(io_err)?)?
        }
        Some("csv") => records_from_csv(std::fs::File::open(path).map_err(io_err)?)?,
        _ => return Err(TableError::UnsupportedFormat(path.to_path_buf())),
    };
    log::debug!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_records_keep_field_order() {
        let records =
            records_from_json_str(r#"[{"name": "Sue", "age": 25}, {"age": 20, "name": "Frank"}]"#)
                .unwrap();
        assert_eq!(records[0].field_names().collect::<Vec<_>>(), ["name", "age"]);
        assert_eq!(records[1].field_names().collect::<Vec<_>>(), ["age", "name"]);
    }

    #[test]
    fn yaml_records() {
        let records = records_from_yaml_str("- name: Sue\n  age: 25\n- name: Frank\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("age"), Some(&Value::from(25)));
        assert!(!records[1].contains("age"));
    }

    #[test]
    fn csv_cells_are_typed() {
        let data = "name,age,color\nSue, 25 ,blue\nFrank,,green\n";
        let records = records_from_csv(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("age"), Some(&Value::from(25)));
        assert_eq!(records[1].get("age"), Some(&Value::Null));
        assert_eq!(records[1].get("color"), Some(&Value::from("green")));
    }

    #[test]
    fn csv_keeps_zero_padded_cells_as_text() {
        let records = records_from_csv("zip,code,count\n02139,007,12\n".as_bytes()).unwrap();
        assert_eq!(records[0].get("zip"), Some(&Value::from("02139")));
        assert_eq!(records[0].get("code"), Some(&Value::from("007")));
        assert_eq!(records[0].get("count"), Some(&Value::from(12)));
    }

    #[test]
    fn nested_json_is_rejected() {
        let err = records_from_json_str(r#"[{"tags": ["a"]}]"#).unwrap_err();
        assert!(matches!(err, TableError::Json(_)));
    }

    #[test]
    fn load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("people.csv");
        std::fs::write(&csv, "name,age\nSue,25\n").unwrap();
        assert_eq!(load_records(&csv).unwrap().len(), 1);

        let txt = dir.path().join("people.txt");
        std::fs::write(&txt, "").unwrap();
        assert!(matches!(
            load_records(&txt),
            Err(TableError::UnsupportedFormat(_))
        ));
    }
}
