//! Flattening realistic response payloads into tables.

use nasapy::data::datatable::{DataTable, DataValue};
use nasapy::data::exporter::DataExporter;
use serde_json::json;

#[test]
fn donki_events_flatten_one_row_per_record() {
    // shape returned by the geomagnetic storm endpoint
    let events = json!([
        {
            "gstID": "2019-08-31T12:00:00-GST-001",
            "startTime": "2019-08-31T12:00Z",
            "allKpIndex": [{"observedTime": "2019-08-31T15:00Z", "kpIndex": 6, "source": "NOAA"}],
            "linkedEvents": [{"activityID": "2019-08-30T12:17:00-HSS-001"}]
        },
        {
            "gstID": "2019-09-27T18:00:00-GST-001",
            "startTime": "2019-09-27T18:00Z",
            "allKpIndex": [{"observedTime": "2019-09-27T21:00Z", "kpIndex": 5, "source": "NOAA"}],
            "linkedEvents": null
        }
    ]);

    let table = DataTable::from_records("geomagnetic_storms", &events).unwrap();

    assert_eq!(table.row_count(), 2);
    assert_eq!(table.column_count(), 4);
    assert_eq!(
        table.get_value_by_name(0, "startTime"),
        Some(&DataValue::DateTime("2019-08-31T12:00Z".to_string()))
    );
    // nested structures are kept as JSON text
    let kp = table.get_value_by_name(0, "allKpIndex").unwrap();
    assert!(kp.to_string().contains("NOAA"));
    // null stays null
    assert_eq!(
        table.get_value_by_name(1, "linkedEvents"),
        Some(&DataValue::Null)
    );
}

#[test]
fn every_row_reads_back_under_the_same_columns() {
    let records = json!([
        {"id": 1, "name": "first", "score": 0.5},
        {"id": 2, "score": 0.9, "name": "second"},
        {"id": 3, "name": "third"}
    ]);

    let table = DataTable::from_records("records", &records).unwrap();
    let names = table.column_names();

    for i in 0..table.row_count() {
        assert_eq!(table.get_row_as_strings(i).unwrap().len(), names.len());
    }
    assert_eq!(table.get_value_by_name(2, "score"), Some(&DataValue::Null));
}

#[test]
fn ssd_fields_and_data_shape_flattens() {
    // shape returned by the close approach service
    let response = json!({
        "signature": {"source": "NASA/JPL SBDB Close Approach Data API", "version": "1.1"},
        "count": 2,
        "fields": ["des", "orbit_id", "jd", "cd", "dist", "v_rel"],
        "data": [
            ["2019 SU2", "4", "2458765.5", "2019-Oct-09 03:46", "0.000876", "7.53"],
            ["2019 TC1", "2", "2458766.1", "2019-Oct-09 18:02", "0.001550", "11.2"]
        ]
    });

    let table = DataTable::from_fields_and_rows("close_approach", &response).unwrap();

    assert_eq!(
        table.column_names(),
        vec!["des", "orbit_id", "jd", "cd", "dist", "v_rel"]
    );
    assert_eq!(table.row_count(), 2);
    assert_eq!(
        table.get_value_by_name(0, "des"),
        Some(&DataValue::String("2019 SU2".to_string()))
    );
    assert_eq!(table.metadata.get("count"), Some(&"2".to_string()));
    assert_eq!(table.metadata.get("version"), Some(&"1.1".to_string()));
}

#[test]
fn flattened_table_round_trips_through_csv() {
    let response = json!({
        "fields": ["date", "energy"],
        "data": [["2019-09-12 12:54:45", "2.2"], ["2019-08-22 05:55:13", null]]
    });

    let table = DataTable::from_fields_and_rows("fireballs", &response).unwrap();
    let csv = DataExporter::csv_string(&table).unwrap();

    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("date,energy"));
    assert_eq!(lines.next(), Some("2019-09-12 12:54:45,2.2"));
    assert_eq!(lines.next(), Some("2019-08-22 05:55:13,"));
    assert_eq!(lines.next(), None);
}

#[test]
fn non_record_payload_is_rejected() {
    let err = DataTable::from_records("apod", &json!({"title": "M31"})).unwrap_err();
    assert!(matches!(err, nasapy::Error::Table(_)));
}
