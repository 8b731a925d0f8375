//! File export of normalized tables.

use nasapy::data::datatable::DataTable;
use nasapy::data::exporter::DataExporter;
use serde_json::json;
use std::fs;

fn sample_table() -> DataTable {
    DataTable::from_records(
        "neo",
        &json!([
            {"des": "433 Eros", "h": 10.4, "pha": false},
            {"des": "99942 Apophis", "h": 19.7, "pha": true},
        ]),
    )
    .unwrap()
}

#[test]
fn exports_csv_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("neo.csv");

    DataExporter::export_csv(&sample_table(), &path).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("des,h,pha"));
    assert_eq!(lines.next(), Some("433 Eros,10.4,false"));
    assert_eq!(lines.next(), Some("99942 Apophis,19.7,true"));
}

#[test]
fn exports_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("neo.json");

    DataExporter::export_json(&sample_table(), &path).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let rows = parsed.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["des"], json!("433 Eros"));
    assert_eq!(rows[1]["pha"], json!("true"));
}
